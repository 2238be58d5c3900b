//! Directed-cycle detection over the directed edges of a graph.
//!
//! Only `->` edges take part. Undirected and circle-marked edges never close
//! a directed cycle, so an undirected triangle is acyclic here.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use super::Graph;
use crate::edge::EdgeType;

/// Project the directed edges of `graph` into a petgraph `DiGraph`.
#[must_use]
pub fn directed_subgraph(graph: &Graph) -> DiGraph<String, ()> {
    let mut dg = DiGraph::<String, ()>::with_capacity(graph.number_of_nodes(), 0);
    let index: HashMap<&str, NodeIndex> = graph
        .nodes()
        .iter()
        .map(|n| (n.as_str(), dg.add_node(n.clone())))
        .collect();

    for ((s, t), ty) in graph.edges() {
        if *ty != EdgeType::Directed {
            continue;
        }
        if let (Some(&a), Some(&b)) = (index.get(s.as_str()), index.get(t.as_str())) {
            dg.add_edge(a, b, ());
        }
    }
    dg
}

/// Find all directed cycles of `graph`.
///
/// Each entry is the sorted member list of one strongly connected component
/// with more than one node. Entries are sorted.
#[must_use]
pub fn find_all_cycles(graph: &Graph) -> Vec<Vec<String>> {
    let dg = directed_subgraph(graph);
    let mut cycles: Vec<Vec<String>> = tarjan_scc(&dg)
        .into_iter()
        .filter(|component| component.len() > 1)
        .map(|component| {
            let mut ids: Vec<String> = component.into_iter().map(|idx| dg[idx].clone()).collect();
            ids.sort_unstable();
            ids
        })
        .collect();

    cycles.sort_unstable();
    cycles
}

/// Members of the first directed cycle, if there is one.
#[must_use]
pub fn directed_cycle(graph: &Graph) -> Option<Vec<String>> {
    find_all_cycles(graph).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(nodes: &[&str], edges: &[(&str, &str, &str)]) -> Graph {
        Graph::new(nodes, edges).expect("valid graph")
    }

    #[test]
    fn acyclic_chain() {
        let g = graph(&["A", "B", "C"], &[("A", "->", "B"), ("B", "->", "C")]);
        assert!(find_all_cycles(&g).is_empty());
        assert_eq!(directed_cycle(&g), None);
    }

    #[test]
    fn detects_triangle() {
        let g = graph(
            &["A", "B", "C", "D"],
            &[("C", "->", "A"), ("A", "->", "B"), ("B", "->", "C"), ("C", "->", "D")],
        );
        assert_eq!(
            directed_cycle(&g),
            Some(vec!["A".to_string(), "B".to_string(), "C".to_string()])
        );
    }

    #[test]
    fn undirected_edges_do_not_close_cycles() {
        let g = graph(
            &["A", "B", "C"],
            &[("A", "->", "B"), ("B", "->", "C"), ("C", "-", "A")],
        );
        assert!(find_all_cycles(&g).is_empty());

        let g = graph(
            &["A", "B", "C"],
            &[("A", "->", "B"), ("B", "->", "C"), ("C", "o->", "A")],
        );
        assert!(find_all_cycles(&g).is_empty());
    }

    #[test]
    fn reports_each_cycle() {
        let g = graph(
            &["A", "B", "C", "X", "Y", "Z"],
            &[
                ("A", "->", "B"),
                ("B", "->", "C"),
                ("C", "->", "A"),
                ("X", "->", "Y"),
                ("Y", "->", "Z"),
                ("Z", "->", "X"),
            ],
        );
        assert_eq!(find_all_cycles(&g).len(), 2);
    }
}
