//! Fuzz target for the equivalence-class conversions.
//!
//! Decoded PDAGs are extended and completed; any consistent extension must
//! map back to a CPDAG that is a fixed point of `pdag_to_cpdag`.

#![no_main]

use causal_core::{Graph, GraphError, Pdag, dag_to_pdag, extend_pdag, is_cpdag, pdag_to_cpdag};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(graph) = Graph::decode(data) else {
        return;
    };
    let Ok(pdag) = Pdag::try_from(graph) else {
        return;
    };

    let dag = match extend_pdag(&pdag) {
        Ok(dag) => dag,
        Err(GraphError::Unextendable { .. }) => return,
        Err(err) => panic!("extend failed on a valid PDAG: {err}"),
    };
    assert_eq!(dag.number_of_edges(), pdag.number_of_edges());

    let cpdag = dag_to_pdag(&dag).expect("DAG has a CPDAG");
    assert!(is_cpdag(&cpdag).expect("CPDAG is extendable"));
    assert_eq!(pdag_to_cpdag(&pdag).expect("extendable"), cpdag);
});
