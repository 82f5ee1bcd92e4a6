//! Render parent/child hierarchies as `termtree` trees.

use std::collections::HashSet;

use termtree::Tree;
use tracing::instrument;

use crate::domain::graph::{FamilyGraph, Relationship};
use crate::domain::member::MemberId;

const CYCLE_MARKER: &str = " (cycle)";

pub trait DescendantTree {
    /// Tree rooted at `root` containing all of its descendants.
    fn descendant_tree(&self, root: MemberId) -> Tree<String>;

    /// One tree per member without parents.
    fn forest(&self) -> Vec<Tree<String>>;
}

impl DescendantTree for FamilyGraph {
    #[instrument(level = "debug", skip(self))]
    fn descendant_tree(&self, root: MemberId) -> Tree<String> {
        let mut path = HashSet::new();
        build_subtree(self, root, &mut path)
    }

    fn forest(&self) -> Vec<Tree<String>> {
        self.roots()
            .into_iter()
            .map(|root| self.descendant_tree(root))
            .collect()
    }
}

// `path` holds the members on the way down from the root, so a member that is
// its own ancestor is printed once and not expanded.
fn build_subtree(
    graph: &FamilyGraph,
    node: MemberId,
    path: &mut HashSet<MemberId>,
) -> Tree<String> {
    let name = graph.name_of(node).to_string();
    if !path.insert(node) {
        return Tree::new(name + CYCLE_MARKER);
    }

    let leaves: Vec<_> = graph
        .targets(node, Relationship::ParentChild)
        .map(|child| build_subtree(graph, child, path))
        .collect();

    path.remove(&node);
    Tree::new(name).with_leaves(leaves)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_three_generations_when_rendering_then_nested() {
        let mut graph = FamilyGraph::new();
        for name in ["Nancy", "Carl", "Kevin"] {
            graph.add_member(name).unwrap();
        }
        graph.link_parent_child("Nancy", "Carl").unwrap();
        graph.link_parent_child("Carl", "Kevin").unwrap();

        let tree = graph.descendant_tree(graph.find("Nancy").unwrap());

        let rendered = tree.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3, "{rendered}");
        assert_eq!(lines[0], "Nancy");
        assert!(lines[1].ends_with("Carl"));
        assert!(lines[2].ends_with("Kevin"));
        assert!(lines[2].len() > lines[1].len());
    }

    #[test]
    fn given_cycle_when_rendering_then_marks_and_stops() {
        let mut graph = FamilyGraph::new();
        for name in ["A", "B"] {
            graph.add_member(name).unwrap();
        }
        graph.add_edge("A", "B", Relationship::ParentChild).unwrap();
        graph.add_edge("B", "A", Relationship::ParentChild).unwrap();

        let rendered = graph.descendant_tree(graph.find("A").unwrap()).to_string();

        assert!(rendered.contains("A (cycle)"), "{rendered}");
    }

    #[test]
    fn given_two_roots_when_rendering_forest_then_two_trees() {
        let mut graph = FamilyGraph::new();
        for name in ["Nancy", "Carl", "Solo"] {
            graph.add_member(name).unwrap();
        }
        graph.link_parent_child("Nancy", "Carl").unwrap();

        let forest = graph.forest();

        assert_eq!(forest.len(), 2);
        assert_eq!(forest[1].to_string().trim_end(), "Solo");
    }
}
