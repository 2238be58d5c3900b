//! Directed acyclic graphs.
//!
//! A [`Dag`] is a [`Graph`] whose edges are all `->` and whose directed part
//! has no cycle. It dereferences to [`Graph`] for every read-only query.

use std::collections::HashMap;
use std::ops::Deref;

use tracing::instrument;

use crate::edge::EdgeType;
use crate::error::GraphError;
use crate::graph::{Graph, GraphKind, cycles, parse_parts, partial_order};

/// Validated directed acyclic graph.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dag(Graph);

impl Dag {
    /// Build a DAG from node names and `(source, symbol, target)` triples.
    ///
    /// # Errors
    ///
    /// Returns the construction errors of [`Graph::new`], then a not-a-DAG
    /// error for any non-directed edge or a directed cycle.
    pub fn new<S: AsRef<str>>(nodes: &[S], edges: &[(S, S, S)]) -> Result<Self, GraphError> {
        let (nodes, edges) = parse_parts(nodes, edges)?;
        Self::from_parts(nodes, edges)
    }

    /// Build a DAG from typed edges.
    ///
    /// # Errors
    ///
    /// See [`Dag::new`].
    pub fn from_parts(
        nodes: Vec<String>,
        edges: Vec<(String, EdgeType, String)>,
    ) -> Result<Self, GraphError> {
        Self::try_from(Graph::from_parts(nodes, edges)?)
    }

    /// Nodes in a topological order: each layer of [`partial_order`] in
    /// name order, layer after layer.
    ///
    /// # Panics
    ///
    /// Panics if the graph has a directed cycle, which construction rules out.
    #[must_use]
    #[instrument(skip(self), fields(nodes = self.number_of_nodes()))]
    pub fn ordered_nodes(&self) -> Vec<String> {
        partial_order(self.parents(), Some(self.nodes()), None)
            .expect("DAG has cycles - this should not happen")
            .into_iter()
            .flatten()
            .collect()
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
        .find(|(_, ty)| **ty != EdgeType::Directed)
    {
        return Err(GraphError::UnsupportedEdgeType {
            kind: GraphKind::Dag,
            from: s.clone(),
            edge_type: *ty,
            to: t.clone(),
        });
    }
    if let Some(members) = cycles::directed_cycle(graph) {
        return Err(GraphError::Cycle {
            kind: GraphKind::Dag,
            members,
        });
    }
    Ok(())
}

impl TryFrom<Graph> for Dag {
    type Error = GraphError;

    fn try_from(graph: Graph) -> Result<Self, Self::Error> {
        check(&graph)?;
        Ok(Self(graph))
    }
}

impl Deref for Dag {
    type Target = Graph;

    fn deref(&self) -> &Graph {
        &self.0
    }
}

impl AsRef<Graph> for Dag {
    fn as_ref(&self) -> &Graph {
        &self.0
    }
}

impl std::fmt::Display for Dag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn builds_valid_dag() {
        let dag = Dag::new(&["B", "A", "C"], &[("A", "->", "B"), ("B", "->", "C")])
            .expect("valid");
        assert_eq!(dag.nodes(), ["A", "B", "C"]);
        assert_eq!(dag.number_of_edges(), 2);
        assert!(dag.is_dag());
    }

    #[test]
    fn empty_and_edgeless_dags_are_valid() {
        let empty: [&str; 0] = [];
        assert!(Dag::new(&empty, &[]).expect("empty").is_empty());
        assert_eq!(Dag::new(&["A"], &[]).expect("single").number_of_nodes(), 1);
    }

    #[test]
    fn rejects_two_cycle_as_duplicate_edge() {
        let err = Dag::new(&["A", "B"], &[("A", "->", "B"), ("B", "->", "A")])
            .expect_err("duplicate pair");
        assert!(matches!(err, GraphError::DuplicateEdge { .. }));
        assert!(err.is_value_error());
    }

    #[test]
    fn rejects_directed_cycle() {
        let err = Dag::new(
            &["A", "B", "C"],
            &[("A", "->", "B"), ("B", "->", "C"), ("C", "->", "A")],
        )
        .expect_err("cycle");
        assert!(err.is_not_dag());
        assert_eq!(
            err,
            GraphError::Cycle {
                kind: GraphKind::Dag,
                members: vec!["A".into(), "B".into(), "C".into()],
            }
        );
    }

    #[test]
    fn rejects_non_directed_edges() {
        for symbol in ["-", "<->", "o->", "o-o", "o-"] {
            let err = Dag::new(&["A", "B"], &[("A", symbol, "B")]).expect_err("not directed");
            assert_eq!(err.kind(), ErrorKind::NotDag, "{symbol}");
        }
    }

    #[test]
    fn universal_checks_run_before_subtype_checks() {
        let err = Dag::new(&["A", "B"], &[("A", "-", "B"), ("B", "-", "A")])
            .expect_err("duplicate");
        assert!(matches!(err, GraphError::DuplicateEdge { .. }));

        let err = Dag::new(&["A"], &[("A", "->", "B")]).expect_err("unknown node");
        assert_eq!(err.kind(), ErrorKind::Value);

        let err = Dag::new(&["A", "B"], &[("A", "~", "B")]).expect_err("bad symbol");
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn try_from_graph() {
        let g = Graph::new(&["A", "B"], &[("A", "->", "B")]).expect("valid");
        let dag = Dag::try_from(g.clone()).expect("is a dag");
        assert_eq!(dag, g);
        assert_eq!(dag.as_graph(), &g);

        let g = Graph::new(&["A", "B"], &[("A", "-", "B")]).expect("valid");
        assert!(Dag::try_from(g).expect_err("undirected").is_not_dag());
    }

    #[test]
    fn ordered_nodes_is_topological() {
        let dag = Dag::new(
            &["D", "C", "B", "A", "E"],
            &[("D", "->", "B"), ("B", "->", "A"), ("C", "->", "A")],
        )
        .expect("valid");
        assert_eq!(dag.ordered_nodes(), ["C", "D", "E", "B", "A"]);
    }

    #[test]
    fn rename_keeps_dag_invariants() {
        let mut dag = Dag::new(&["A", "B"], &[("A", "->", "B")]).expect("valid");
        let map = HashMap::from([("B".to_string(), "0".to_string())]);
        dag.rename(&map).expect("rename");
        assert_eq!(dag.nodes(), ["0", "A"]);
        assert_eq!(dag.ordered_nodes(), ["A", "0"]);
    }

    #[test]
    fn display_delegates_to_graph() {
        let dag = Dag::new(&["A", "B"], &[("A", "->", "B")]).expect("valid");
        assert!(dag.to_string().starts_with("DAG with 2 nodes"));
    }
}
