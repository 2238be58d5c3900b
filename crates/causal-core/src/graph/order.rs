//! Topological layering of a parent map.

use std::collections::{BTreeMap, BTreeSet};

/// Layer the nodes of a `node -> parents` map topologically.
///
/// Layer 0 holds every node without parents; layer `k` holds the remaining
/// nodes whose parents all lie in earlier layers. The universe of nodes is
/// the map's keys, every listed parent and the optional extra `nodes`.
///
/// `new_arc = Some((u, v))` evaluates the order as if the arc `u -> v`
/// were present: `v` is dropped from `u`'s parents and `u` is added to `v`'s.
/// The caller's map is not modified.
///
/// Returns `None` when the parent relation is cyclic.
#[must_use]
pub fn partial_order(
    parents: &BTreeMap<String, Vec<String>>,
    nodes: Option<&[String]>,
    new_arc: Option<(&str, &str)>,
) -> Option<Vec<BTreeSet<String>>> {
    let mut pending: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for (child, ps) in parents {
        pending
            .entry(child.as_str())
            .or_default()
            .extend(ps.iter().map(String::as_str));
        for p in ps {
            pending.entry(p.as_str()).or_default();
        }
    }
    for node in nodes.unwrap_or_default() {
        pending.entry(node.as_str()).or_default();
    }
    if let Some((u, v)) = new_arc {
        pending.entry(u).or_default().remove(v);
        pending.entry(v).or_default().insert(u);
    }

    let mut layers = Vec::new();
    let mut placed: BTreeSet<&str> = BTreeSet::new();
    while !pending.is_empty() {
        let layer: BTreeSet<&str> = pending
            .iter()
            .filter(|(_, ps)| ps.iter().all(|p| placed.contains(p)))
            .map(|(node, _)| *node)
            .collect();
        if layer.is_empty() {
            return None;
        }
        for node in &layer {
            pending.remove(node);
        }
        placed.extend(layer.iter().copied());
        layers.push(layer.into_iter().map(str::to_string).collect());
    }
    Some(layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parents(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(child, ps)| {
                (
                    (*child).to_string(),
                    ps.iter().map(|p| (*p).to_string()).collect(),
                )
            })
            .collect()
    }

    fn layer(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn empty_map_has_no_layers() {
        assert_eq!(partial_order(&BTreeMap::new(), None, None), Some(vec![]));
    }

    #[test]
    fn chain_layers() {
        let p = parents(&[("B", &["A"]), ("C", &["B"])]);
        assert_eq!(
            partial_order(&p, None, None),
            Some(vec![layer(&["A"]), layer(&["B"]), layer(&["C"])])
        );
    }

    #[test]
    fn extra_nodes_join_first_layer() {
        let p = parents(&[("B", &["A"])]);
        let nodes = names(&["A", "B", "C"]);
        assert_eq!(
            partial_order(&p, Some(&nodes), None),
            Some(vec![layer(&["A", "C"]), layer(&["B"])])
        );
    }

    #[test]
    fn cycle_returns_none() {
        let p = parents(&[("A", &["B"]), ("B", &["A"])]);
        assert_eq!(partial_order(&p, None, None), None);
    }

    #[test]
    fn new_arc_adds_parent() {
        let p = parents(&[("B", &["A"]), ("A", &[]), ("C", &[])]);
        assert_eq!(
            partial_order(&p, None, Some(("C", "A"))),
            Some(vec![layer(&["C"]), layer(&["A"]), layer(&["B"])])
        );
    }

    #[test]
    fn new_arc_reverses_existing_arc() {
        let p = parents(&[("A", &["B"]), ("B", &[])]);
        let nodes = names(&["A", "B"]);
        assert_eq!(
            partial_order(&p, Some(&nodes), Some(("B", "A"))),
            Some(vec![layer(&["B"]), layer(&["A"])])
        );

        // C -> B replaces B -> C
        let p = parents(&[("C", &["B"])]);
        assert_eq!(
            partial_order(&p, None, Some(("C", "B"))),
            Some(vec![layer(&["C"]), layer(&["B"])])
        );
    }

    #[test]
    fn new_arc_can_close_a_cycle() {
        let p = parents(&[("B", &["A"]), ("C", &["B"])]);
        assert_eq!(partial_order(&p, None, Some(("C", "A"))), None);
    }

    #[test]
    fn input_map_is_not_modified() {
        let p = parents(&[("B", &["A"])]);
        let before = p.clone();
        let _ = partial_order(&p, None, Some(("B", "A")));
        assert_eq!(p, before);
    }
}
