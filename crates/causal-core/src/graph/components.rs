//! Connectivity queries over the undirected skeleton.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;

use super::Graph;
use crate::edge::EdgeType;

/// One group of [`Graph::undirected_trees`]: `(u, Some(v))` for each
/// undirected edge, or `(node, None)` for a node with no undirected edge.
pub type UndirectedTree = BTreeSet<(String, Option<String>)>;

impl Graph {
    /// Connected components of the skeleton, every edge kind counting as a
    /// link. Each component is sorted; components are ordered by their
    /// smallest node. Isolated nodes form singleton components.
    #[must_use]
    pub fn components(&self) -> Vec<Vec<String>> {
        connected_groups(&skeleton(self, |_| true))
    }

    #[must_use]
    pub fn number_components(&self) -> usize {
        self.components().len()
    }

    /// Undirected edges grouped by the component they form together.
    ///
    /// Every node appears exactly once: inside the edges of its group, or as
    /// `(node, None)` when no undirected edge touches it. Groups are ordered
    /// by their smallest node.
    #[must_use]
    pub fn undirected_trees(&self) -> Vec<UndirectedTree> {
        connected_groups(&skeleton(self, |t| t == EdgeType::Undirected))
            .into_iter()
            .map(|component| -> UndirectedTree {
                if component.len() == 1 {
                    return component
                        .into_iter()
                        .map(|node| (node, None))
                        .collect();
                }
                let members: BTreeSet<&str> = component.iter().map(String::as_str).collect();
                self.edges()
                    .iter()
                    .filter(|((s, _), ty)| {
                        **ty == EdgeType::Undirected && members.contains(s.as_str())
                    })
                    .map(|((s, t), _)| (s.clone(), Some(t.clone())))
                    .collect()
            })
            .collect()
    }

    /// Neighbour sets restricted to edges whose kind passes `keep`.
    pub(crate) fn adjacency(
        &self,
        keep: impl Fn(EdgeType) -> bool,
    ) -> BTreeMap<&str, BTreeSet<&str>> {
        let mut adjacency: BTreeMap<&str, BTreeSet<&str>> = self
            .nodes()
            .iter()
            .map(|n| (n.as_str(), BTreeSet::new()))
            .collect();
        for ((s, t), ty) in self.edges() {
            if !keep(*ty) {
                continue;
            }
            adjacency.entry(s.as_str()).or_default().insert(t.as_str());
            adjacency.entry(t.as_str()).or_default().insert(s.as_str());
        }
        adjacency
    }
}

/// Project the edges of `graph` whose kind passes `keep` into a petgraph
/// `UnGraph`. Every node is kept.
fn skeleton(graph: &Graph, keep: impl Fn(EdgeType) -> bool) -> UnGraph<String, EdgeType> {
    let mut ug = UnGraph::<String, EdgeType>::with_capacity(graph.number_of_nodes(), 0);
    let index: HashMap<&str, NodeIndex> = graph
        .nodes()
        .iter()
        .map(|n| (n.as_str(), ug.add_node(n.clone())))
        .collect();

    for ((s, t), ty) in graph.edges() {
        if !keep(*ty) {
            continue;
        }
        if let (Some(&a), Some(&b)) = (index.get(s.as_str()), index.get(t.as_str())) {
            ug.add_edge(a, b, *ty);
        }
    }
    ug
}

/// Connected components of `ug`, each sorted, ordered by smallest member.
fn connected_groups(ug: &UnGraph<String, EdgeType>) -> Vec<Vec<String>> {
    let mut sets = UnionFind::<usize>::new(ug.node_count());
    for edge in ug.edge_references() {
        sets.union(edge.source().index(), edge.target().index());
    }

    let mut groups: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for (idx, root) in sets.into_labeling().into_iter().enumerate() {
        groups
            .entry(root)
            .or_default()
            .push(ug[NodeIndex::new(idx)].clone());
    }

    let mut components: Vec<Vec<String>> = groups
        .into_values()
        .map(|mut members| {
            members.sort_unstable();
            members
        })
        .collect();
    components.sort_unstable();
    components
}
