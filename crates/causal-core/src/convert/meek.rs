//! DAG to CPDAG: v-structures plus Meek orientation rules.
//!
//! # Algorithm
//!
//! 1. Every arc that is part of a v-structure `A -> C <- B` (with `A` and
//!    `B` non-adjacent) is compelled and stays directed.
//! 2. Every other arc becomes undirected.
//! 3. Rules R1 to R3 orient undirected edges until none fires:
//!    - R1: `A -> B`, `B - C`, `A` and `C` non-adjacent: orient `B -> C`.
//!    - R2: `A -> B -> C`, `A - C`: orient `A -> C`.
//!    - R3: `A - B`, `A - C`, `B -> D`, `C -> D`, `B` and `C`
//!      non-adjacent, `A - D`: orient `A -> D`.
//!
//! Starting from the v-structure pattern of a DAG, R4 never fires, so the
//! closure under R1 to R3 is the completed PDAG of the equivalence class.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, instrument, trace};

use crate::dag::Dag;
use crate::edge::EdgeType;
use crate::error::GraphError;
use crate::pdag::Pdag;

/// Meek rule that justified an orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    R1,
    R2,
    R3,
}

/// Mixed directed/undirected edge state over borrowed node names.
struct Orientation<'a> {
    skeleton: BTreeMap<&'a str, BTreeSet<&'a str>>,
    directed: BTreeSet<(&'a str, &'a str)>,
    /// Stored with the smaller name first.
    undirected: BTreeSet<(&'a str, &'a str)>,
}

impl<'a> Orientation<'a> {
    fn adjacent(&self, a: &str, b: &str) -> bool {
        self.skeleton.get(a).is_some_and(|n| n.contains(b))
    }

    fn is_directed(&self, a: &'a str, b: &'a str) -> bool {
        self.directed.contains(&(a, b))
    }

    fn is_undirected(&self, a: &'a str, b: &'a str) -> bool {
        self.undirected.contains(&undirected_key(a, b))
    }

    fn neighbours(&self, node: &'a str) -> impl Iterator<Item = &'a str> + '_ {
        self.skeleton.get(node).into_iter().flatten().copied()
    }

    /// First rule that forces `x -> y` for the undirected edge `x - y`.
    fn forced(&self, x: &'a str, y: &'a str) -> Option<Rule> {
        let r1 = self
            .neighbours(x)
            .any(|a| self.is_directed(a, x) && a != y && !self.adjacent(a, y));
        if r1 {
            return Some(Rule::R1);
        }

        let r2 = self
            .neighbours(x)
            .any(|z| self.is_directed(x, z) && self.is_directed(z, y));
        if r2 {
            return Some(Rule::R2);
        }

        let spouses: Vec<&str> = self
            .neighbours(x)
            .filter(|&c| c != y && self.is_undirected(x, c) && self.is_directed(c, y))
            .collect();
        let r3 = spouses.iter().enumerate().any(|(i, c)| {
            spouses[i + 1..].iter().any(|d| !self.adjacent(c, d))
        });
        r3.then_some(Rule::R3)
    }

    fn orient(&mut self, x: &'a str, y: &'a str) {
        self.undirected.remove(&undirected_key(x, y));
        self.directed.insert((x, y));
    }

    /// Apply R1 to R3 until none fires. Returns the number of orientations.
    fn close(&mut self) -> usize {
        let mut oriented = 0;
        loop {
            let next = self
                .undirected
                .iter()
                .flat_map(|&(u, v)| [(u, v), (v, u)])
                .find_map(|(x, y)| self.forced(x, y).map(|rule| (x, y, rule)));
            let Some((x, y, rule)) = next else {
                return oriented;
            };
            trace!(?rule, from = x, to = y, "orienting edge");
            self.orient(x, y);
            oriented += 1;
        }
    }
}

fn undirected_key<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a < b { (a, b) } else { (b, a) }
}

/// Arcs of `dag` that take part in a v-structure.
fn compelled_arcs(dag: &Dag) -> BTreeSet<(&str, &str)> {
    let mut compelled = BTreeSet::new();
    for (child, parents) in dag.parents() {
        for (i, a) in parents.iter().enumerate() {
            for b in &parents[i + 1..] {
                if !dag.adjacent(a, b) {
                    compelled.insert((a.as_str(), child.as_str()));
                    compelled.insert((b.as_str(), child.as_str()));
                }
            }
        }
    }
    compelled
}

/// Completed PDAG (CPDAG) of the Markov-equivalence class of `dag`.
///
/// Compelled arcs stay directed; reversible arcs become undirected.
///
/// # Errors
///
/// Returns a [`GraphError`] only if the oriented result fails PDAG
/// validation, which cannot happen for a valid `Dag`.
#[instrument(skip(dag), fields(nodes = dag.number_of_nodes(), edges = dag.number_of_edges()))]
pub fn dag_to_pdag(dag: &Dag) -> Result<Pdag, GraphError> {
    let compelled = compelled_arcs(dag);

    let mut state = Orientation {
        skeleton: dag.adjacency(|_| true),
        directed: BTreeSet::new(),
        undirected: BTreeSet::new(),
    };
    for (s, t) in dag.edges().keys() {
        let arc = (s.as_str(), t.as_str());
        if compelled.contains(&arc) {
            state.directed.insert(arc);
        } else {
            state.undirected.insert(undirected_key(arc.0, arc.1));
        }
    }

    let oriented = state.close();
    debug!(
        compelled = compelled.len(),
        oriented,
        undirected = state.undirected.len(),
        "cpdag computed"
    );

    let edges = state
        .directed
        .iter()
        .map(|&(s, t)| (s.to_string(), EdgeType::Directed, t.to_string()))
        .chain(
            state
                .undirected
                .iter()
                .map(|&(u, v)| (u.to_string(), EdgeType::Undirected, v.to_string())),
        )
        .collect();
    Pdag::from_parts(dag.nodes().to_vec(), edges)
}
