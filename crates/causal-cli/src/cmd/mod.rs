//! Subcommand handlers and the graph arguments they share.

pub mod check;
pub mod codec;
pub mod completions;
pub mod cpdag;
pub mod extend;
pub mod order;

use std::io::{self, Write};

use anyhow::{Context, bail};
use causal_core::{Graph, GraphError};
use clap::Args;
use serde::Serialize;

use crate::output::{CliError, OutputMode, pretty_section, render_error, render_mode};

/// Nodes and edges given on the command line.
#[derive(Args, Debug, Default)]
pub struct GraphArgs {
    /// Declare a node; repeat for isolated nodes. Edge endpoints are
    /// declared automatically.
    #[arg(long = "node", value_name = "NODE")]
    pub nodes: Vec<String>,

    /// Edge as "SOURCE SYMBOL TARGET", e.g. "A -> B". Symbols: -> - <-> o-> o-o o-
    #[arg(value_name = "EDGE")]
    pub edges: Vec<String>,
}

impl GraphArgs {
    /// Parse every `EDGE` argument and collect the declared node list.
    ///
    /// Explicit `--node` values come first, then edge endpoints in order of
    /// appearance; repeats are dropped.
    pub fn parts(&self) -> anyhow::Result<(Vec<String>, Vec<(String, String, String)>)> {
        let edges = self
            .edges
            .iter()
            .map(|raw| parse_edge(raw))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let mut nodes: Vec<String> = Vec::new();
        let endpoints = edges.iter().flat_map(|(s, _, t)| [s, t]);
        for name in self.nodes.iter().chain(endpoints) {
            if !nodes.contains(name) {
                nodes.push(name.clone());
            }
        }
        Ok((nodes, edges))
    }
}

/// Split `"A -> B"` into its three whitespace-separated fields.
pub fn parse_edge(raw: &str) -> anyhow::Result<(String, String, String)> {
    let fields: Vec<&str> = raw.split_whitespace().collect();
    let [source, symbol, target] = fields.as_slice() else {
        bail!("edge '{raw}' must be \"SOURCE SYMBOL TARGET\"");
    };
    Ok(((*source).to_string(), (*symbol).to_string(), (*target).to_string()))
}

/// Report a library failure with its error code, then hand it back to the
/// caller for the exit status.
pub fn graph_failure(output: OutputMode, err: GraphError, action: &str) -> anyhow::Error {
    if let Err(render_err) = render_error(output, &CliError::from(&err)) {
        return render_err;
    }
    anyhow::Error::new(err).context(format!("{action} failed"))
}

/// Attach the graph-failure reporting to a library result.
pub trait GraphResultExt<T> {
    fn or_report(self, output: OutputMode, action: &str) -> anyhow::Result<T>;
}

impl<T> GraphResultExt<T> for Result<T, GraphError> {
    fn or_report(self, output: OutputMode, action: &str) -> anyhow::Result<T> {
        self.map_err(|err| graph_failure(output, err, action))
    }
}

// ---------------------------------------------------------------------------
// Graph report
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct EdgeReport {
    pub source: String,
    pub symbol: &'static str,
    pub target: String,
}

#[derive(Debug, Serialize)]
pub struct GraphReport {
    pub kind: &'static str,
    pub nodes: Vec<String>,
    pub edges: Vec<EdgeReport>,
    #[serde(skip)]
    pub display: String,
}

impl From<&Graph> for GraphReport {
    fn from(graph: &Graph) -> Self {
        Self {
            kind: graph.kind().as_str(),
            nodes: graph.nodes().to_vec(),
            edges: graph
                .edge_list()
                .into_iter()
                .map(|(source, ty, target)| EdgeReport {
                    source,
                    symbol: ty.symbol(),
                    target,
                })
                .collect(),
            display: graph.to_string(),
        }
    }
}

/// `nodes:` line followed by one `SOURCE SYMBOL TARGET` line per edge.
pub fn render_graph_text(report: &GraphReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "nodes: {}", report.nodes.join(" "))?;
    for edge in &report.edges {
        writeln!(w, "{} {} {}", edge.source, edge.symbol, edge.target)?;
    }
    Ok(())
}

pub fn render_graph_pretty(
    heading: &str,
    report: &GraphReport,
    w: &mut dyn Write,
) -> io::Result<()> {
    pretty_section(w, heading)?;
    writeln!(w, "{}", report.display)
}

/// Render a graph in any output mode under a pretty heading.
pub fn render_graph(output: OutputMode, heading: &str, graph: &Graph) -> anyhow::Result<()> {
    let report = GraphReport::from(graph);
    render_mode(output, &report, render_graph_text, |r, w| {
        render_graph_pretty(heading, r, w)
    })
    .context("failed to write output")
}
