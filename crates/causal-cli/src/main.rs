#![forbid(unsafe_code)]

mod cmd;
mod config;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::OutputMode;
use std::env;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "cg: causal graph structures and Markov-equivalence conversions",
    long_about = None
)]
struct Cli {
    /// Enable debug logging unless `CAUSAL_LOG` is set.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (default: pretty on a terminal, text when piped).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output; shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Convert",
        about = "Print the CPDAG of a DAG",
        long_about = "Build a DAG from the given edges and print the completed PDAG of its Markov-equivalence class.",
        after_help = "EXAMPLES:\n    # Collider stays directed\n    cg cpdag \"A -> C\" \"B -> C\"\n\n    # Chain becomes undirected\n    cg cpdag \"A -> B\" \"B -> C\"\n\n    # Emit machine-readable output\n    cg cpdag \"A -> B\" --json"
    )]
    Cpdag(cmd::cpdag::CpdagArgs),

    #[command(
        next_help_heading = "Convert",
        about = "Print a DAG consistent with a PDAG",
        long_about = "Orient every undirected edge of a PDAG without creating a new collider or a directed cycle.",
        after_help = "EXAMPLES:\n    # Orient an undirected chain\n    cg extend \"A - B\" \"B - C\"\n\n    # Keep existing arcs\n    cg extend \"A -> B\" \"B - C\""
    )]
    Extend(cmd::extend::ExtendArgs),

    #[command(
        next_help_heading = "Inspect",
        about = "Classify a graph",
        long_about = "Report the graph kind, component count, directed cycles and PDAG/CPDAG status.",
        after_help = "EXAMPLES:\n    # Check a mixed graph\n    cg check \"A -> B\" \"B <-> C\" --node D\n\n    # Emit machine-readable output\n    cg check \"A - B\" --format json"
    )]
    Check(cmd::check::CheckArgs),

    #[command(
        next_help_heading = "Inspect",
        about = "Print topological layers of a DAG",
        long_about = "Group the nodes of a DAG into layers whose parents all appear in earlier layers.",
        after_help = "EXAMPLES:\n    # Two roots, one child\n    cg order \"A -> C\" \"B -> C\""
    )]
    Order(cmd::order::OrderArgs),

    #[command(
        next_help_heading = "Codec",
        about = "Encode a graph as hex",
        long_about = "Print the big-endian binary encoding of a graph as hex.",
        after_help = "EXAMPLES:\n    # Encode a single arc\n    cg encode \"A -> B\""
    )]
    Encode(cmd::codec::EncodeArgs),

    #[command(
        next_help_heading = "Codec",
        about = "Decode a hex-encoded graph",
        long_about = "Decode the binary graph encoding from hex and print the graph.",
        after_help = "EXAMPLES:\n    # Decode a single arc\n    cg decode 000200014100014200010000000101"
    )]
    Decode(cmd::codec::DecodeArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Bash\n    cg completions bash > ~/.local/share/bash-completion/completions/cg"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

/// `CAUSAL_LOG` overrides the filter; `-v` or `DEBUG` lowers the default to debug.
fn init_tracing(config_format: Option<&str>, verbose: bool) {
    let filter = EnvFilter::try_from_env("CAUSAL_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "causal=debug,info"
        } else {
            "causal=info,warn"
        })
    });

    let format = env::var("CAUSAL_LOG_FORMAT")
        .ok()
        .or_else(|| config_format.map(str::to_string))
        .unwrap_or_else(|| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let user_config = config::load_user_config()?;
    init_tracing(user_config.log.format.as_deref(), cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output =
        output::resolve_output_mode(cli.format, cli.json, user_config.output.as_deref());
    debug!(?output, "resolved output mode");

    match cli.command {
        Commands::Cpdag(ref args) => cmd::cpdag::run_cpdag(args, output),
        Commands::Extend(ref args) => cmd::extend::run_extend(args, output),
        Commands::Check(ref args) => cmd::check::run_check(args, output),
        Commands::Order(ref args) => cmd::order::run_order(args, output),
        Commands::Encode(ref args) => cmd::codec::run_encode(args, output),
        Commands::Decode(ref args) => cmd::codec::run_decode(args, output),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}
