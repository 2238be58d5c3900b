use causal_core::{Dag, EdgeType, Graph};
use proptest::prelude::*;

/// Node names `N0..N{n-1}`; `N10` sorts before `N2`.
pub fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("N{i}")).collect()
}

/// Random DAG: a shuffled topological order plus a random subset of the
/// forward pairs.
pub fn arb_dag(max_nodes: usize) -> impl Strategy<Value = Dag> {
    (1..=max_nodes)
        .prop_flat_map(|n| {
            let order = Just((0..n).collect::<Vec<usize>>()).prop_shuffle();
            let pairs = prop::collection::vec(prop::bool::weighted(0.4), n * (n - 1) / 2);
            (Just(n), order, pairs)
        })
        .prop_map(|(n, order, keep)| {
            let nodes = names(n);
            let mut edges = Vec::new();
            let mut k = 0;
            for i in 0..n {
                for j in (i + 1)..n {
                    if keep[k] {
                        edges.push((
                            nodes[order[i]].clone(),
                            EdgeType::Directed,
                            nodes[order[j]].clone(),
                        ));
                    }
                    k += 1;
                }
            }
            Dag::from_parts(nodes, edges).expect("forward arcs are acyclic")
        })
}

/// Random SDG with any non-`None` edge kinds on a random subset of pairs.
pub fn arb_graph(max_nodes: usize) -> impl Strategy<Value = Graph> {
    (1..=max_nodes)
        .prop_flat_map(|n| {
            let slots = prop::collection::vec(
                prop::option::weighted(0.4, (1u8..=6, any::<bool>())),
                n * (n - 1) / 2,
            );
            (Just(n), slots)
        })
        .prop_map(|(n, slots)| {
            let nodes = names(n);
            let mut edges = Vec::new();
            let mut k = 0;
            for i in 0..n {
                for j in (i + 1)..n {
                    if let Some((code, flip)) = slots[k] {
                        let edge_type = EdgeType::from_code(code).expect("1..=6 are edge codes");
                        let (s, t) = if flip { (j, i) } else { (i, j) };
                        edges.push((nodes[s].clone(), edge_type, nodes[t].clone()));
                    }
                    k += 1;
                }
            }
            Graph::from_parts(nodes, edges).expect("one edge per pair")
        })
}
