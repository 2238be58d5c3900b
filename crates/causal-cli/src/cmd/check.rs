//! `cg check`: classify a graph and report its structure.

use std::io::Write;

use causal_core::graph::cycles::find_all_cycles;
use causal_core::{Graph, GraphError, Pdag, is_cpdag};
use clap::Args;
use serde::Serialize;

use super::{GraphArgs, GraphResultExt};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `cg check`.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub graph: GraphArgs,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    kind: &'static str,
    nodes: usize,
    edges: usize,
    components: usize,
    directed_cycles: Vec<Vec<String>>,
    is_dag: bool,
    is_pdag: bool,
    /// `None` when the graph is not a PDAG or has no consistent extension.
    is_cpdag: Option<bool>,
}

impl CheckReport {
    fn build(graph: &Graph) -> Result<Self, GraphError> {
        let is_cpdag = match Pdag::try_from(graph.clone()).map(|pdag| is_cpdag(&pdag)) {
            Ok(Ok(flag)) => Some(flag),
            Ok(Err(GraphError::Unextendable { .. })) | Err(_) => None,
            Ok(Err(err)) => return Err(err),
        };

        Ok(Self {
            kind: graph.kind().as_str(),
            nodes: graph.number_of_nodes(),
            edges: graph.number_of_edges(),
            components: graph.number_components(),
            directed_cycles: find_all_cycles(graph),
            is_dag: graph.is_dag(),
            is_pdag: graph.is_pdag(),
            is_cpdag,
        })
    }
}

/// Execute `cg check`.
pub fn run_check(args: &CheckArgs, output: OutputMode) -> anyhow::Result<()> {
    let (nodes, edges) = args.graph.parts()?;
    let graph = Graph::new(&nodes, &edges).or_report(output, "building graph")?;
    let report = CheckReport::build(&graph).or_report(output, "checking graph")?;
    render_mode(output, &report, render_check_text, render_check_pretty)
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn cpdag_label(flag: Option<bool>) -> &'static str {
    flag.map_or("n/a", yes_no)
}

fn render_check_text(report: &CheckReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "kind {}", report.kind)?;
    writeln!(w, "nodes {}", report.nodes)?;
    writeln!(w, "edges {}", report.edges)?;
    writeln!(w, "components {}", report.components)?;
    writeln!(w, "directed_cycles {}", report.directed_cycles.len())?;
    writeln!(w, "dag {}", yes_no(report.is_dag))?;
    writeln!(w, "pdag {}", yes_no(report.is_pdag))?;
    writeln!(w, "cpdag {}", cpdag_label(report.is_cpdag))
}

fn render_check_pretty(report: &CheckReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Graph check")?;
    pretty_kv(w, "Kind", report.kind)?;
    pretty_kv(w, "Nodes", report.nodes.to_string())?;
    pretty_kv(w, "Edges", report.edges.to_string())?;
    pretty_kv(w, "Components", report.components.to_string())?;
    pretty_kv(w, "DAG", yes_no(report.is_dag))?;
    pretty_kv(w, "PDAG", yes_no(report.is_pdag))?;
    pretty_kv(w, "CPDAG", cpdag_label(report.is_cpdag))?;

    if report.directed_cycles.is_empty() {
        writeln!(w, "\nNo directed cycles found.")?;
        return Ok(());
    }
    writeln!(w, "\nDirected cycles ({})", report.directed_cycles.len())?;
    for (idx, cycle) in report.directed_cycles.iter().enumerate() {
        writeln!(w, "  {}. {}", idx + 1, cycle.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &str, &str)]) -> Graph {
        let mut nodes: Vec<&str> = edges.iter().flat_map(|(s, _, t)| [*s, *t]).collect();
        nodes.sort_unstable();
        nodes.dedup();
        Graph::new(&nodes, edges).expect("valid graph")
    }

    #[test]
    fn check_args_parse_no_edges() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: CheckArgs,
        }

        let parsed = Wrapper::parse_from(["test", "--node", "A"]);
        assert_eq!(parsed.args.graph.nodes, vec!["A"]);
    }

    #[test]
    fn collider_is_a_cpdag() {
        let report = CheckReport::build(&graph(&[("A", "->", "C"), ("B", "->", "C")]))
            .expect("check");
        assert_eq!(report.kind, "DAG");
        assert!(report.is_dag && report.is_pdag);
        assert_eq!(report.is_cpdag, Some(true));
        assert_eq!(report.components, 1);
    }

    #[test]
    fn directed_cycle_is_reported() {
        let report = CheckReport::build(&graph(&[
            ("A", "->", "B"),
            ("B", "->", "C"),
            ("C", "->", "A"),
        ]))
        .expect("check");
        assert_eq!(report.kind, "SDG");
        assert_eq!(report.directed_cycles, vec![vec!["A", "B", "C"]]);
        assert_eq!(report.is_cpdag, None);
    }

    #[test]
    fn unextendable_pdag_has_no_cpdag_status() {
        let report = CheckReport::build(&graph(&[
            ("1", "-", "2"),
            ("2", "-", "3"),
            ("3", "-", "4"),
            ("1", "-", "4"),
        ]))
        .expect("check");
        assert!(report.is_pdag);
        assert_eq!(report.is_cpdag, None);
    }

    #[test]
    fn pretty_check_lists_cycles() {
        let report = CheckReport::build(&graph(&[
            ("A", "->", "B"),
            ("B", "->", "C"),
            ("C", "->", "A"),
        ]))
        .expect("check");
        let mut out = Vec::new();
        render_check_pretty(&report, &mut out).expect("render");
        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.contains("Directed cycles (1)"));
        assert!(rendered.contains("1. A, B, C"));
    }

    #[test]
    fn text_check_is_line_oriented() {
        let report = CheckReport::build(&graph(&[("A", "-", "B")])).expect("check");
        let mut out = Vec::new();
        render_check_text(&report, &mut out).expect("render");
        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.contains("kind PDAG\n"));
        assert!(rendered.contains("cpdag yes\n"));
    }
}
