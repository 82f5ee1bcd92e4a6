//! Labeled directed multigraph stored as per-source adjacency lists.

use std::collections::HashMap;
use std::hash::Hash;

/// Directed multigraph keyed by `K` with edge labels `L`.
///
/// Parallel edges are kept: adding the same `(from, to, label)` twice stores
/// two edges. Out-edges of a node are returned in insertion order.
#[derive(Debug, Clone)]
pub struct Digraph<K, L> {
    adjacency: HashMap<K, Vec<(K, L)>>,
    edge_count: usize,
}

impl<K, L> Default for Digraph<K, L> {
    fn default() -> Self {
        Self {
            adjacency: HashMap::new(),
            edge_count: 0,
        }
    }
}

impl<K, L> Digraph<K, L>
where
    K: Copy + Eq + Hash,
    L: Copy + Eq,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_edge(&mut self, from: K, to: K, label: L) {
        self.adjacency.entry(from).or_default().push((to, label));
        self.edge_count += 1;
    }

    /// All out-edges of `from` as `(target, label)` pairs.
    pub fn out_edges(&self, from: K) -> &[(K, L)] {
        self.adjacency.get(&from).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Targets of the out-edges of `from` carrying `label`.
    pub fn targets(&self, from: K, label: L) -> impl Iterator<Item = K> + '_ {
        self.out_edges(from)
            .iter()
            .filter(move |(_, l)| *l == label)
            .map(|(to, _)| *to)
    }

    pub fn out_degree(&self, from: K, label: L) -> usize {
        self.targets(from, label).count()
    }

    pub fn has_edge(&self, from: K, to: K, label: L) -> bool {
        self.out_edges(from)
            .iter()
            .any(|&(t, l)| t == to && l == label)
    }

    /// Every edge as `(from, to, label)`, grouped by source.
    pub fn edges(&self) -> impl Iterator<Item = (K, K, L)> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(&from, out)| out.iter().map(move |&(to, label)| (from, to, label)))
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Label {
        A,
        B,
    }

    #[test]
    fn given_mixed_labels_when_filtering_targets_then_keeps_insertion_order() {
        let mut g = Digraph::new();
        g.add_edge(1, 2, Label::A);
        g.add_edge(1, 3, Label::B);
        g.add_edge(1, 4, Label::A);

        let targets: Vec<i32> = g.targets(1, Label::A).collect();

        assert_eq!(targets, vec![2, 4]);
        assert_eq!(g.out_degree(1, Label::B), 1);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn given_parallel_edges_when_adding_then_both_kept() {
        let mut g = Digraph::new();
        g.add_edge("x", "y", Label::A);
        g.add_edge("x", "y", Label::A);

        assert_eq!(g.out_degree("x", Label::A), 2);
        assert_eq!(g.edges().count(), 2);
    }

    #[test]
    fn given_unknown_node_when_querying_then_empty() {
        let g: Digraph<u8, Label> = Digraph::new();
        assert!(g.out_edges(7).is_empty());
        assert!(!g.has_edge(7, 8, Label::A));
    }
}
