//! The general semi-directed graph (SDG) every causal structure is built on.
//!
//! # Overview
//!
//! A [`Graph`] is a validated, immutable value: a sorted node list and an
//! ordered edge map. [`Dag`](crate::Dag) and [`Pdag`](crate::Pdag) wrap a
//! `Graph` and add their own constraints, so all three share one
//! representation, one equality and one codec.
//!
//! ## Edge keys
//!
//! Edges are stored as `(u, v) -> EdgeType`. Asymmetric kinds (`->`, `o->`,
//! `o-`) keep the caller's source/target order. Symmetric kinds (`-`, `<->`,
//! `o-o`) are stored with `u < v`, so `A - B` and `B - A` are the same key.
//! [`canonical_key`] is the only place this rule lives.
//!
//! ## Validation
//!
//! Construction rejects, in this order: empty or duplicate node names, and
//! then per edge a `None` type, a self-loop, an undeclared endpoint, or a
//! second edge between the same unordered pair.

#![allow(clippy::module_name_repetitions)]

pub mod adjmat;
pub mod components;
pub mod cycles;
pub mod order;

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

use tracing::trace;

use crate::edge::EdgeType;
use crate::error::GraphError;

pub use adjmat::AdjMatrix;
pub use order::partial_order;

/// Ordered edge map keyed by `(source, target)`.
pub type EdgeMap = BTreeMap<(String, String), EdgeType>;

/// Most specific structure a graph's content satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphKind {
    Dag,
    Pdag,
    Sdg,
}

impl GraphKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dag => "DAG",
            Self::Pdag => "PDAG",
            Self::Sdg => "SDG",
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// A semi-directed graph over uniquely named nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Graph {
    nodes: Vec<String>,
    edges: EdgeMap,
    parents: BTreeMap<String, Vec<String>>,
}

/// Storage key for an edge: symmetric kinds put the smaller name first.
#[must_use]
pub fn canonical_key(source: &str, edge_type: EdgeType, target: &str) -> (String, String) {
    if edge_type.is_symmetric() && target < source {
        (target.to_string(), source.to_string())
    } else {
        (source.to_string(), target.to_string())
    }
}

impl Graph {
    /// Build a graph from node names and `(source, symbol, target)` triples.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownEdgeSymbol`] for a symbol outside the
    /// canonical set, and the validation errors of [`Graph::from_parts`].
    pub fn new<S: AsRef<str>>(nodes: &[S], edges: &[(S, S, S)]) -> Result<Self, GraphError> {
        let (nodes, edges) = parse_parts(nodes, edges)?;
        Self::from_parts(nodes, edges)
    }

    /// Build a graph from node names and typed `(source, type, target)` edges.
    ///
    /// # Errors
    ///
    /// Returns a value-category [`GraphError`] when a node name is empty or
    /// repeated, or an edge has type `None`, is a self-loop, references an
    /// undeclared node, or duplicates another edge's node pair.
    pub fn from_parts(
        nodes: Vec<String>,
        edges: Vec<(String, EdgeType, String)>,
    ) -> Result<Self, GraphError> {
        let mut declared: HashSet<&str> = HashSet::with_capacity(nodes.len());
        for node in &nodes {
            if node.is_empty() {
                return Err(GraphError::EmptyNodeName);
            }
            if !declared.insert(node.as_str()) {
                return Err(GraphError::DuplicateNode { node: node.clone() });
            }
        }

        let mut map = EdgeMap::new();
        let mut pairs: HashSet<(&str, &str)> = HashSet::with_capacity(edges.len());
        for (source, edge_type, target) in &edges {
            if *edge_type == EdgeType::None {
                return Err(GraphError::NoneEdge {
                    from: source.clone(),
                    to: target.clone(),
                });
            }
            if source == target {
                return Err(GraphError::SelfLoop {
                    node: source.clone(),
                });
            }
            for endpoint in [source, target] {
                if !declared.contains(endpoint.as_str()) {
                    return Err(GraphError::UnknownNode {
                        node: endpoint.clone(),
                        from: source.clone(),
                        to: target.clone(),
                    });
                }
            }
            let pair = if source < target {
                (source.as_str(), target.as_str())
            } else {
                (target.as_str(), source.as_str())
            };
            if !pairs.insert(pair) {
                return Err(GraphError::DuplicateEdge {
                    from: source.clone(),
                    to: target.clone(),
                });
            }
            map.insert(canonical_key(source, *edge_type, target), *edge_type);
        }

        let mut nodes = nodes;
        nodes.sort_unstable();
        let parents = derive_parents(&map);
        trace!(nodes = nodes.len(), edges = map.len(), "graph validated");

        Ok(Self {
            nodes,
            edges: map,
            parents,
        })
    }

    /// The graph with no nodes.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Node names in ascending order.
    #[must_use]
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Edge map in key order.
    #[must_use]
    pub const fn edges(&self) -> &EdgeMap {
        &self.edges
    }

    /// `node -> sorted parents`, from directed edges only. Nodes without a
    /// directed parent are absent.
    #[must_use]
    pub const fn parents(&self) -> &BTreeMap<String, Vec<String>> {
        &self.parents
    }

    #[must_use]
    pub fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn contains_node(&self, node: &str) -> bool {
        self.nodes.binary_search_by(|n| n.as_str().cmp(node)).is_ok()
    }

    /// Stored edge between `u` and `v` in either orientation, as
    /// `(source, type, target)`.
    #[must_use]
    pub fn edge_between(&self, u: &str, v: &str) -> Option<(&str, EdgeType, &str)> {
        [(u, v), (v, u)].into_iter().find_map(|(a, b)| {
            self.edges
                .get_key_value(&(a.to_string(), b.to_string()))
                .map(|((s, t), ty)| (s.as_str(), *ty, t.as_str()))
        })
    }

    /// Whether any edge joins `u` and `v`.
    #[must_use]
    pub fn adjacent(&self, u: &str, v: &str) -> bool {
        self.edge_between(u, v).is_some()
    }

    /// Edges as owned `(source, type, target)` triples in key order.
    #[must_use]
    pub fn edge_list(&self) -> Vec<(String, EdgeType, String)> {
        self.edges
            .iter()
            .map(|((s, t), ty)| (s.clone(), *ty, t.clone()))
            .collect()
    }

    /// Every edge is directed. True for an edgeless graph.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.edges.values().all(|t| *t == EdgeType::Directed)
    }

    /// Every edge is directed or undirected.
    #[must_use]
    pub fn is_partially_directed(&self) -> bool {
        self.edges
            .values()
            .all(|t| matches!(t, EdgeType::Directed | EdgeType::Undirected))
    }

    /// The directed edges contain a cycle.
    #[must_use]
    pub fn has_directed_cycles(&self) -> bool {
        cycles::directed_cycle(self).is_some()
    }

    #[must_use]
    pub fn is_dag(&self) -> bool {
        self.is_directed() && !self.has_directed_cycles()
    }

    #[must_use]
    pub fn is_pdag(&self) -> bool {
        crate::pdag::check(self).is_ok()
    }

    /// Most specific structure this graph satisfies.
    #[must_use]
    pub fn kind(&self) -> GraphKind {
        if self.is_dag() {
            GraphKind::Dag
        } else if self.is_pdag() {
            GraphKind::Pdag
        } else {
            GraphKind::Sdg
        }
    }

    /// Rename nodes in place.
    ///
    /// Every key of `name_map` must be a node of the graph; nodes missing
    /// from the map keep their names. The renamed graph is validated before
    /// it replaces `self`, so on error `self` is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownRenameKey`] for a key that is not a node,
    /// or [`GraphError::DuplicateNode`] if two nodes end up with one name.
    pub fn rename(&mut self, name_map: &HashMap<String, String>) -> Result<(), GraphError> {
        *self = self.renamed(name_map)?;
        Ok(())
    }

    pub(crate) fn renamed(&self, name_map: &HashMap<String, String>) -> Result<Self, GraphError> {
        let mut keys: Vec<&String> = name_map.keys().collect();
        keys.sort_unstable();
        if let Some(unknown) = keys.into_iter().find(|k| !self.contains_node(k)) {
            return Err(GraphError::UnknownRenameKey {
                node: unknown.clone(),
            });
        }

        let map = |name: &String| name_map.get(name).unwrap_or(name).clone();
        let nodes = self.nodes.iter().map(map).collect();
        let edges = self
            .edges
            .iter()
            .map(|((s, t), ty)| (map(s), *ty, map(t)))
            .collect();
        Self::from_parts(nodes, edges)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Empty graph");
        }
        let nodes = self.number_of_nodes();
        let edges = self.number_of_edges();
        let comps = self.number_components();
        write!(
            f,
            "{} with {nodes} node{}, {edges} edge{} and {comps} component{}",
            self.kind(),
            plural(nodes),
            plural(edges),
            plural(comps),
        )?;

        let mut by_source: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for ((s, t), ty) in &self.edges {
            by_source
                .entry(s.as_str())
                .or_default()
                .push(format!("{ty}{t}"));
        }
        for node in &self.nodes {
            write!(f, "\n{node}:")?;
            for edge in by_source.get(node.as_str()).into_iter().flatten() {
                write!(f, " {edge}")?;
            }
        }
        Ok(())
    }
}

const fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

pub(crate) fn parse_parts<S: AsRef<str>>(
    nodes: &[S],
    edges: &[(S, S, S)],
) -> Result<(Vec<String>, Vec<(String, EdgeType, String)>), GraphError> {
    let nodes = nodes.iter().map(|n| n.as_ref().to_string()).collect();
    let edges = edges
        .iter()
        .map(|(s, sym, t)| {
            let edge_type: EdgeType = sym.as_ref().parse()?;
            Ok((s.as_ref().to_string(), edge_type, t.as_ref().to_string()))
        })
        .collect::<Result<Vec<_>, GraphError>>()?;
    Ok((nodes, edges))
}

fn derive_parents(edges: &EdgeMap) -> BTreeMap<String, Vec<String>> {
    let mut parents: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for ((s, t), ty) in edges {
        if *ty == EdgeType::Directed {
            parents.entry(t.clone()).or_default().insert(s.clone());
        }
    }
    parents
        .into_iter()
        .map(|(child, ps)| (child, ps.into_iter().collect()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
