//! Partially directed acyclic graphs.
//!
//! A [`Pdag`] mixes `->` and `-` edges. Its directed edges must not form a
//! cycle; undirected edges are unconstrained here, so an undirected triangle
//! is a valid PDAG. Whether a PDAG can be extended to a DAG without new
//! colliders is a separate question answered by
//! [`extend_pdag`](crate::extend_pdag).

use std::collections::HashMap;
use std::ops::Deref;

use crate::dag::Dag;
use crate::edge::EdgeType;
use crate::error::GraphError;
use crate::graph::{Graph, GraphKind, cycles, parse_parts};

/// Validated partially directed acyclic graph.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pdag(Graph);

impl Pdag {
    /// Build a PDAG from node names and `(source, symbol, target)` triples.
    ///
    /// # Errors
    ///
    /// Returns the construction errors of [`Graph::new`], then a not-a-PDAG
    /// error for an edge other than `->`/`-` or a directed cycle.
    pub fn new<S: AsRef<str>>(nodes: &[S], edges: &[(S, S, S)]) -> Result<Self, GraphError> {
        let (nodes, edges) = parse_parts(nodes, edges)?;
        Self::from_parts(nodes, edges)
    }

    /// Build a PDAG from typed edges.
    ///
    /// # Errors
    ///
    /// See [`Pdag::new`].
    pub fn from_parts(
        nodes: Vec<String>,
        edges: Vec<(String, EdgeType, String)>,
    ) -> Result<Self, GraphError> {
        Self::try_from(Graph::from_parts(nodes, edges)?)
    }

    /// Whether the edge between `u` and `v` is undirected and so may be
    /// oriented either way. False for directed edges and non-adjacent pairs.
    #[must_use]
    pub fn edge_reversible(&self, (u, v): (&str, &str)) -> bool {
        matches!(self.edge_between(u, v), Some((_, EdgeType::Undirected, _)))
    }

    /// Rename nodes; see [`Graph::rename`].
    ///
    /// # Errors
    ///
    /// Same as [`Graph::rename`]. On error `self` is unchanged.
    pub fn rename(&mut self, name_map: &HashMap<String, String>) -> Result<(), GraphError> {
        self.0.rename(name_map)
    }

    #[must_use]
    pub const fn as_graph(&self) -> &Graph {
        &self.0
    }

    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.0
    }
}

pub(crate) fn check(graph: &Graph) -> Result<(), GraphError> {
    if let Some(((s, t), ty)) = graph
        .edges()
        .iter()
        .find(|(_, ty)| !matches!(ty, EdgeType::Directed | EdgeType::Undirected))
    {
        return Err(GraphError::UnsupportedEdgeType {
            kind: GraphKind::Pdag,
            from: s.clone(),
            edge_type: *ty,
            to: t.clone(),
        });
    }
    if let Some(members) = cycles::directed_cycle(graph) {
        return Err(GraphError::Cycle {
            kind: GraphKind::Pdag,
            members,
        });
    }
    Ok(())
}

impl TryFrom<Graph> for Pdag {
    type Error = GraphError;

    fn try_from(graph: Graph) -> Result<Self, Self::Error> {
        check(&graph)?;
        Ok(Self(graph))
    }
}

impl From<Dag> for Pdag {
    fn from(dag: Dag) -> Self {
        Self(dag.into_graph())
    }
}

impl Deref for Pdag {
    type Target = Graph;

    fn deref(&self) -> &Graph {
        &self.0
    }
}

impl AsRef<Graph> for Pdag {
    fn as_ref(&self) -> &Graph {
        &self.0
    }
}

impl std::fmt::Display for Pdag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn accepts_mixed_edges() {
        let p = Pdag::new(&["A", "B", "C"], &[("A", "->", "B"), ("C", "-", "B")])
            .expect("valid");
        assert_eq!(p.number_of_edges(), 2);
        assert!(p.is_pdag());
        assert!(!p.is_dag());
    }

    #[test]
    fn accepts_undirected_cycles() {
        let triangle = Pdag::new(
            &["A", "B", "C"],
            &[("A", "-", "B"), ("B", "-", "C"), ("C", "-", "A")],
        );
        assert!(triangle.is_ok());

        let mixed = Pdag::new(
            &["A", "B", "C"],
            &[("A", "->", "B"), ("B", "->", "C"), ("C", "-", "A")],
        );
        assert!(mixed.is_ok());
    }

    #[test]
    fn rejects_directed_cycle_even_with_pendant_edge() {
        let err = Pdag::new(
            &["A", "B", "C", "D"],
            &[("A", "->", "B"), ("B", "->", "C"), ("C", "->", "A"), ("C", "-", "D")],
        )
        .expect_err("cycle");
        assert!(err.is_not_pdag());
        assert!(!err.is_not_dag());
    }

    #[test]
    fn rejects_other_edge_kinds() {
        for symbol in ["<->", "o->", "o-o", "o-"] {
            let err = Pdag::new(&["A", "B"], &[("A", symbol, "B")]).expect_err("bad kind");
            assert_eq!(err.kind(), ErrorKind::NotPdag, "{symbol}");
        }
    }

    #[test]
    fn dag_converts_into_pdag() {
        let dag = Dag::new(&["A", "B"], &[("A", "->", "B")]).expect("valid");
        let p = Pdag::from(dag.clone());
        assert_eq!(p, dag);
    }

    #[test]
    fn edge_reversible_only_for_undirected() {
        let p = Pdag::new(&["A", "B", "C", "D"], &[("A", "->", "B"), ("C", "-", "B")])
            .expect("valid");
        assert!(p.edge_reversible(("B", "C")));
        assert!(p.edge_reversible(("C", "B")));
        assert!(!p.edge_reversible(("A", "B")));
        assert!(!p.edge_reversible(("B", "A")));
        assert!(!p.edge_reversible(("A", "D")));
        assert!(!p.edge_reversible(("A", "Z")));
    }

    #[test]
    fn rename_keeps_edge_kinds() {
        let mut p = Pdag::new(&["A", "B"], &[("A", "-", "B")]).expect("valid");
        let map = HashMap::from([("A".to_string(), "X".to_string())]);
        p.rename(&map).expect("rename");
        assert!(p.edge_reversible(("X", "B")));
        assert!(p.edges().contains_key(&("B".to_string(), "X".to_string())));
    }
}
