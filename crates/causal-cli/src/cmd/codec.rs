//! `cg encode` / `cg decode`: the binary graph encoding as hex.

use anyhow::Context;
use causal_core::Graph;
use clap::Args;
use serde::Serialize;
use tracing::debug;

use super::{GraphArgs, GraphResultExt, render_graph};
use crate::output::{OutputMode, pretty_kv, render_mode};

/// Arguments for `cg encode`.
#[derive(Args, Debug, Default)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub graph: GraphArgs,
}

/// Arguments for `cg decode`.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Encoded graph as hex, with or without a `0x` prefix.
    #[arg(value_name = "HEX")]
    pub hex: String,
}

#[derive(Debug, Serialize)]
struct EncodeOutput {
    bytes: usize,
    hex: String,
}

/// Execute `cg encode`.
pub fn run_encode(args: &EncodeArgs, output: OutputMode) -> anyhow::Result<()> {
    let (nodes, edges) = args.graph.parts()?;
    let graph = Graph::new(&nodes, &edges).or_report(output, "building graph")?;
    let bytes = graph.encode().or_report(output, "encoding graph")?;

    let payload = EncodeOutput {
        bytes: bytes.len(),
        hex: hex::encode(&bytes),
    };
    render_mode(
        output,
        &payload,
        |p, w| writeln!(w, "{}", p.hex),
        |p, w| {
            pretty_kv(w, "Bytes", p.bytes.to_string())?;
            pretty_kv(w, "Hex", &p.hex)
        },
    )
}

/// Strip whitespace and an optional `0x` prefix, then decode.
fn parse_hex(raw: &str) -> anyhow::Result<Vec<u8>> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact
        .strip_prefix("0x")
        .or_else(|| compact.strip_prefix("0X"))
        .unwrap_or(&compact);
    hex::decode(digits).with_context(|| format!("'{raw}' is not valid hex"))
}

/// Execute `cg decode`.
pub fn run_decode(args: &DecodeArgs, output: OutputMode) -> anyhow::Result<()> {
    let bytes = parse_hex(&args.hex)?;
    debug!(len = bytes.len(), "decoding graph");
    let graph = Graph::decode(&bytes).or_report(output, "decoding graph")?;
    render_graph(output, "Decoded graph", &graph)
}
