//! `cg cpdag`: CPDAG of the Markov-equivalence class of a DAG.

use causal_core::{Dag, dag_to_pdag};
use clap::Args;
use tracing::debug;

use super::{GraphArgs, GraphResultExt, render_graph};
use crate::output::OutputMode;

/// Arguments for `cg cpdag`.
#[derive(Args, Debug, Default)]
pub struct CpdagArgs {
    #[command(flatten)]
    pub graph: GraphArgs,
}

/// Execute `cg cpdag`.
pub fn run_cpdag(args: &CpdagArgs, output: OutputMode) -> anyhow::Result<()> {
    let (nodes, edges) = args.graph.parts()?;
    let dag = Dag::new(&nodes, &edges).or_report(output, "building DAG")?;
    let cpdag = dag_to_pdag(&dag).or_report(output, "computing CPDAG")?;

    let reversible = cpdag
        .edges()
        .values()
        .filter(|ty| ty.is_symmetric())
        .count();
    debug!(
        edges = cpdag.number_of_edges(),
        reversible, "computed CPDAG"
    );

    render_graph(output, "CPDAG", &cpdag)
}
