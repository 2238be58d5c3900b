//! PDAG to DAG: Dor–Tarsi consistent extension.
//!
//! Repeatedly pick a node `X` that is a sink among the remaining nodes and
//! whose undirected neighbours are each adjacent to all of `X`'s other
//! remaining neighbours. Orient every undirected edge at `X` into `X`, then
//! drop `X`. The clique condition guarantees no new v-structure appears, and
//! picking sinks guarantees no directed cycle. Candidates are tried in node
//! order, so the extension is deterministic.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, instrument, trace};

use crate::dag::Dag;
use crate::edge::EdgeType;
use crate::error::GraphError;
use crate::pdag::Pdag;

/// Edge state restricted to the nodes not yet removed.
struct Remaining<'a> {
    nodes: BTreeSet<&'a str>,
    skeleton: BTreeMap<&'a str, BTreeSet<&'a str>>,
    /// Directed arcs between remaining nodes, keyed by source.
    children: BTreeMap<&'a str, BTreeSet<&'a str>>,
    /// Undirected neighbours between remaining nodes.
    undirected: BTreeMap<&'a str, BTreeSet<&'a str>>,
}

impl<'a> Remaining<'a> {
    fn new(pdag: &'a Pdag) -> Self {
        let mut state = Self {
            nodes: pdag.nodes().iter().map(String::as_str).collect(),
            skeleton: pdag.adjacency(|_| true),
            children: BTreeMap::new(),
            undirected: BTreeMap::new(),
        };
        for ((s, t), ty) in pdag.edges() {
            match ty {
                EdgeType::Directed => {
                    state.children.entry(s.as_str()).or_default().insert(t.as_str());
                }
                _ => {
                    state.undirected.entry(s.as_str()).or_default().insert(t.as_str());
                    state.undirected.entry(t.as_str()).or_default().insert(s.as_str());
                }
            }
        }
        state
    }

    fn has_undirected(&self) -> bool {
        self.undirected.values().any(|n| !n.is_empty())
    }

    fn neighbours(&self, node: &str) -> impl Iterator<Item = &'a str> + '_ {
        self.skeleton
            .get(node)
            .into_iter()
            .flatten()
            .copied()
            .filter(|n| self.nodes.contains(n))
    }

    fn adjacent(&self, a: &str, b: &str) -> bool {
        self.skeleton.get(a).is_some_and(|n| n.contains(b))
    }

    fn undirected_of(&self, node: &str) -> Vec<&'a str> {
        self.undirected
            .get(node)
            .into_iter()
            .flatten()
            .copied()
            .filter(|n| self.nodes.contains(n))
            .collect()
    }

    fn eligible(&self, x: &str) -> bool {
        let is_sink = self
            .children
            .get(x)
            .is_none_or(|c| c.iter().all(|y| !self.nodes.contains(y)));
        if !is_sink {
            return false;
        }
        let neighbours: Vec<&str> = self.neighbours(x).collect();
        self.undirected_of(x).into_iter().all(|y| {
            neighbours
                .iter()
                .all(|&z| z == y || self.adjacent(y, z))
        })
    }

    fn remove(&mut self, x: &str) {
        self.nodes.remove(x);
        if let Some(ns) = self.undirected.remove(x) {
            for n in ns {
                if let Some(back) = self.undirected.get_mut(n) {
                    back.remove(x);
                }
            }
        }
    }

    fn leftover(&self) -> Vec<(String, String)> {
        let mut pairs: BTreeSet<(&str, &str)> = BTreeSet::new();
        for (&u, ns) in &self.undirected {
            for &v in ns {
                if self.nodes.contains(u) && self.nodes.contains(v) {
                    pairs.insert(if u < v { (u, v) } else { (v, u) });
                }
            }
        }
        pairs
            .into_iter()
            .map(|(u, v)| (u.to_string(), v.to_string()))
            .collect()
    }
}

/// Orient every undirected edge of `pdag` without creating a cycle or a new
/// v-structure, giving one DAG of its equivalence class.
///
/// # Errors
///
/// Returns [`GraphError::Unextendable`] when undirected edges remain but no
/// node can be oriented, e.g. for an undirected 4-cycle.
#[instrument(skip(pdag), fields(nodes = pdag.number_of_nodes(), edges = pdag.number_of_edges()))]
pub fn extend_pdag(pdag: &Pdag) -> Result<Dag, GraphError> {
    let mut state = Remaining::new(pdag);
    let mut arcs: Vec<(String, EdgeType, String)> = pdag
        .edges()
        .iter()
        .filter(|(_, ty)| **ty == EdgeType::Directed)
        .map(|((s, t), _)| (s.clone(), EdgeType::Directed, t.clone()))
        .collect();

    while state.has_undirected() {
        let Some(x) = state.nodes.iter().copied().find(|x| state.eligible(x)) else {
            let remaining = state.leftover();
            debug!(remaining = remaining.len(), "pdag is not extendable");
            return Err(GraphError::Unextendable { remaining });
        };
        for y in state.undirected_of(x) {
            trace!(from = y, to = x, "orienting into sink");
            arcs.push((y.to_string(), EdgeType::Directed, x.to_string()));
        }
        state.remove(x);
    }

    debug!(arcs = arcs.len(), "pdag extended");
    Dag::from_parts(pdag.nodes().to_vec(), arcs)
}
