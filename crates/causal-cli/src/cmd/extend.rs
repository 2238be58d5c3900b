//! `cg extend`: one DAG consistent with a PDAG.

use causal_core::{Pdag, extend_pdag};
use clap::Args;

use super::{GraphArgs, GraphResultExt, render_graph};
use crate::output::OutputMode;

/// Arguments for `cg extend`.
#[derive(Args, Debug, Default)]
pub struct ExtendArgs {
    #[command(flatten)]
    pub graph: GraphArgs,
}

/// Execute `cg extend`.
pub fn run_extend(args: &ExtendArgs, output: OutputMode) -> anyhow::Result<()> {
    let (nodes, edges) = args.graph.parts()?;
    let pdag = Pdag::new(&nodes, &edges).or_report(output, "building PDAG")?;
    let dag = extend_pdag(&pdag).or_report(output, "extending PDAG")?;
    render_graph(output, "Consistent extension", &dag)
}
