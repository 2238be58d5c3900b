//! `cg order`: topological layers of a DAG.

use std::io::Write;

use anyhow::anyhow;
use causal_core::{Dag, partial_order};
use clap::Args;
use serde::Serialize;

use super::{GraphArgs, GraphResultExt};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `cg order`.
#[derive(Args, Debug, Default)]
pub struct OrderArgs {
    #[command(flatten)]
    pub graph: GraphArgs,
}

#[derive(Debug, Serialize)]
struct OrderReport {
    /// Nodes whose parents all sit in earlier layers.
    layers: Vec<Vec<String>>,
    /// One total order compatible with the layers.
    order: Vec<String>,
}

/// Execute `cg order`.
pub fn run_order(args: &OrderArgs, output: OutputMode) -> anyhow::Result<()> {
    let (nodes, edges) = args.graph.parts()?;
    let dag = Dag::new(&nodes, &edges).or_report(output, "building DAG")?;

    let layers = partial_order(dag.parents(), Some(dag.nodes()), None)
        .ok_or_else(|| anyhow!("DAG has no partial order"))?;
    let report = OrderReport {
        layers: layers
            .into_iter()
            .map(|layer| layer.into_iter().collect())
            .collect(),
        order: dag.ordered_nodes(),
    };

    render_mode(output, &report, render_order_text, render_order_pretty)
}

fn render_order_text(report: &OrderReport, w: &mut dyn Write) -> std::io::Result<()> {
    for layer in &report.layers {
        writeln!(w, "{}", layer.join(" "))?;
    }
    Ok(())
}

fn render_order_pretty(report: &OrderReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Topological layers")?;
    for (idx, layer) in report.layers.iter().enumerate() {
        pretty_kv(w, &format!("Layer {idx}"), layer.join(", "))?;
    }
    writeln!(w)?;
    pretty_kv(w, "Order", report.order.join(" < "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_args_parse() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: OrderArgs,
        }

        let parsed = Wrapper::parse_from(["test", "A -> B"]);
        assert_eq!(parsed.args.graph.edges, vec!["A -> B"]);
    }

    #[test]
    fn text_order_prints_one_layer_per_line() {
        let report = OrderReport {
            layers: vec![vec!["A".into(), "C".into()], vec!["B".into()]],
            order: vec!["A".into(), "C".into(), "B".into()],
        };
        let mut out = Vec::new();
        render_order_text(&report, &mut out).expect("render");
        assert_eq!(String::from_utf8(out).expect("utf8"), "A C\nB\n");
    }

    #[test]
    fn pretty_order_names_layers() {
        let report = OrderReport {
            layers: vec![vec!["A".into()], vec!["B".into()]],
            order: vec!["A".into(), "B".into()],
        };
        let mut out = Vec::new();
        render_order_pretty(&report, &mut out).expect("render");
        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.contains("Layer 0:"));
        assert!(rendered.contains("A < B"));
    }
}
