//! Family relationship graph: member registry plus labeled directed edges.

use std::fmt;

use tracing::{instrument, trace};

use crate::domain::digraph::Digraph;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::member::{MemberId, MemberRegistry};

/// Label carried by every directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relationship {
    /// Edge from a parent to one of its children.
    ParentChild,
    /// Edge from a child to one of its parents.
    ChildParent,
    Sibling,
}

impl Relationship {
    /// Kind of the edge stored in the opposite direction.
    pub fn inverse(self) -> Self {
        match self {
            Relationship::ParentChild => Relationship::ChildParent,
            Relationship::ChildParent => Relationship::ParentChild,
            Relationship::Sibling => Relationship::Sibling,
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relationship::ParentChild => write!(f, "parent->child"),
            Relationship::ChildParent => write!(f, "child->parent"),
            Relationship::Sibling => write!(f, "sibling"),
        }
    }
}

/// Read-only view of one stored edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: MemberId,
    pub to: MemberId,
    pub kind: Relationship,
}

/// The family tree as a directed multigraph.
///
/// Owns every member and edge. Queries hand out [`MemberId`] handles or names,
/// never ownership.
#[derive(Debug, Default)]
pub struct FamilyGraph {
    members: MemberRegistry,
    edges: Digraph<MemberId, Relationship>,
}

impl FamilyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &MemberRegistry {
        &self.members
    }

    pub fn add_member(&mut self, name: &str) -> DomainResult<MemberId> {
        self.members.add_member(name)
    }

    pub fn find(&self, name: &str) -> Option<MemberId> {
        self.members.find_by_name(name)
    }

    pub fn name_of(&self, id: MemberId) -> &str {
        self.members.name_of(id)
    }

    /// Resolve a name to a handle, rejecting empty and unknown names.
    pub fn resolve(&self, name: &str) -> DomainResult<MemberId> {
        if name.is_empty() {
            return Err(DomainError::InvalidArgument(
                "member name must not be empty".to_string(),
            ));
        }
        self.find(name)
            .ok_or_else(|| DomainError::MemberNotFound(name.to_string()))
    }

    /// Append one directed edge.
    ///
    /// `from` is resolved before `to`, so when both are unknown the error names
    /// `from`. Self links are rejected. Nothing is stored on failure, and no
    /// duplicate check is made.
    #[instrument(level = "trace", skip(self))]
    pub fn add_edge(&mut self, from: &str, to: &str, kind: Relationship) -> DomainResult<()> {
        let (from_id, to_id) = self.resolve_pair(from, to, kind)?;
        self.edges.add_edge(from_id, to_id, kind);
        trace!("added {} edge {} -> {}", kind, from, to);
        Ok(())
    }

    /// Store a parent/child declaration as its forward and inverse edge.
    ///
    /// Both names are resolved before anything is stored, so the pair is
    /// added completely or not at all.
    #[instrument(level = "trace", skip(self))]
    pub fn link_parent_child(&mut self, parent: &str, child: &str) -> DomainResult<()> {
        let (parent_id, child_id) = self.resolve_pair(parent, child, Relationship::ParentChild)?;
        self.edges
            .add_edge(parent_id, child_id, Relationship::ParentChild);
        self.edges
            .add_edge(child_id, parent_id, Relationship::ChildParent);
        trace!("linked parent {} -> child {}", parent, child);
        Ok(())
    }

    fn resolve_pair(
        &self,
        from: &str,
        to: &str,
        kind: Relationship,
    ) -> DomainResult<(MemberId, MemberId)> {
        let from_id = self.resolve(from)?;
        let to_id = self.resolve(to)?;
        if from_id == to_id {
            return Err(DomainError::SelfRelationship {
                name: from.to_string(),
                kind,
            });
        }
        Ok((from_id, to_id))
    }

    /// Targets of `name`'s outgoing edges of `kind`, in insertion order.
    pub fn neighbors_by_kind(
        &self,
        name: &str,
        kind: Relationship,
    ) -> DomainResult<Vec<MemberId>> {
        let id = self.resolve(name)?;
        Ok(self.edges.targets(id, kind).collect())
    }

    pub fn children_of(&self, name: &str) -> DomainResult<Vec<MemberId>> {
        self.neighbors_by_kind(name, Relationship::ParentChild)
    }

    pub fn parents_of(&self, name: &str) -> DomainResult<Vec<MemberId>> {
        self.neighbors_by_kind(name, Relationship::ChildParent)
    }

    pub fn siblings_of(&self, name: &str) -> DomainResult<Vec<MemberId>> {
        self.neighbors_by_kind(name, Relationship::Sibling)
    }

    /// Parents of parents. One entry per path, so a grandparent reachable
    /// through two parents appears twice.
    #[instrument(level = "debug", skip(self))]
    pub fn grandparents_of(&self, name: &str) -> DomainResult<Vec<MemberId>> {
        let id = self.resolve(name)?;
        Ok(self
            .edges
            .targets(id, Relationship::ChildParent)
            .flat_map(|parent| self.edges.targets(parent, Relationship::ChildParent))
            .collect())
    }

    pub fn out_degree(&self, id: MemberId, kind: Relationship) -> usize {
        self.edges.out_degree(id, kind)
    }

    pub fn targets(
        &self,
        id: MemberId,
        kind: Relationship,
    ) -> impl Iterator<Item = MemberId> + '_ {
        self.edges.targets(id, kind)
    }

    pub fn has_edge(&self, from: MemberId, to: MemberId, kind: Relationship) -> bool {
        self.edges.has_edge(from, to, kind)
    }

    pub fn all_member_names(&self) -> Vec<String> {
        self.members.names().map(str::to_string).collect()
    }

    pub fn members_with_child_count_equal_to(&self, n: usize) -> Vec<String> {
        self.members_with_out_degree(Relationship::ParentChild, n)
    }

    pub fn members_with_sibling_count_equal_to(&self, n: usize) -> Vec<String> {
        self.members_with_out_degree(Relationship::Sibling, n)
    }

    fn members_with_out_degree(&self, kind: Relationship, n: usize) -> Vec<String> {
        self.members
            .all_members()
            .filter(|&id| self.edges.out_degree(id, kind) == n)
            .map(|id| self.name_of(id).to_string())
            .collect()
    }

    /// Members whose single child has the most children of its own.
    ///
    /// Scans every (parent, child) pair and scores it by the child's child
    /// count. A parent is pushed once per child that ties the running
    /// maximum, so it can appear several times.
    #[instrument(level = "debug", skip(self))]
    pub fn members_with_most_grandchildren(&self) -> Vec<String> {
        let mut winners = Vec::new();
        let mut max = 0;

        for parent in self.members.all_members() {
            for child in self.edges.targets(parent, Relationship::ParentChild) {
                let grandchildren = self.edges.out_degree(child, Relationship::ParentChild);
                if grandchildren == 0 {
                    continue;
                }
                if grandchildren > max {
                    winners.clear();
                    max = grandchildren;
                }
                if grandchildren == max {
                    winners.push(self.name_of(parent).to_string());
                }
            }
        }
        winners
    }

    /// Members without any recorded parent, in registry order.
    pub fn roots(&self) -> Vec<MemberId> {
        self.members
            .all_members()
            .filter(|&id| self.edges.out_degree(id, Relationship::ChildParent) == 0)
            .collect()
    }

    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges
            .edges()
            .map(|(from, to, kind)| Edge { from, to, kind })
    }

    pub fn edge_count(&self) -> usize {
        self.edges.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(names: &[&str]) -> FamilyGraph {
        let mut graph = FamilyGraph::new();
        for name in names {
            graph.add_member(name).unwrap();
        }
        graph
    }

    fn names(graph: &FamilyGraph, ids: Vec<MemberId>) -> Vec<String> {
        ids.into_iter()
            .map(|id| graph.name_of(id).to_string())
            .collect()
    }

    #[test]
    fn given_unknown_from_when_adding_edge_then_names_from_first() {
        let mut graph = graph_with(&["Nancy"]);

        let result = graph.add_edge("Ghost", "Phantom", Relationship::Sibling);

        assert!(matches!(result, Err(DomainError::MemberNotFound(ref n)) if n == "Ghost"));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn given_unknown_to_when_adding_edge_then_no_edge_added() {
        let mut graph = graph_with(&["Nancy"]);

        let result = graph.add_edge("Nancy", "Ghost", Relationship::ParentChild);

        assert!(matches!(result, Err(DomainError::MemberNotFound(ref n)) if n == "Ghost"));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn given_same_member_when_adding_edge_then_self_relationship_rejected() {
        let mut graph = graph_with(&["Carl"]);

        let result = graph.add_edge("Carl", "Carl", Relationship::Sibling);

        assert!(matches!(
            result,
            Err(DomainError::SelfRelationship { ref name, kind: Relationship::Sibling }) if name == "Carl"
        ));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn given_empty_name_when_querying_then_invalid_argument() {
        let graph = graph_with(&["Carl"]);
        assert!(matches!(
            graph.siblings_of(""),
            Err(DomainError::InvalidArgument(_))
        ));
    }

    #[test]
    fn given_parent_child_link_when_linking_then_both_directions_stored() {
        let mut graph = graph_with(&["Nancy", "Carl"]);

        graph.link_parent_child("Nancy", "Carl").unwrap();

        let children = names(&graph, graph.children_of("Nancy").unwrap());
        let parents = names(&graph, graph.parents_of("Carl").unwrap());
        assert_eq!(children, vec!["Carl"]);
        assert_eq!(parents, vec!["Nancy"]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn given_missing_child_when_linking_then_nothing_stored() {
        let mut graph = graph_with(&["Nancy"]);

        let result = graph.link_parent_child("Nancy", "Ghost");

        assert!(result.is_err());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn given_two_paths_to_grandparent_when_querying_then_duplicated() {
        let mut graph = graph_with(&["Grandma", "Mom", "Dad", "Kid"]);
        graph.link_parent_child("Grandma", "Mom").unwrap();
        graph.link_parent_child("Grandma", "Dad").unwrap();
        graph.link_parent_child("Mom", "Kid").unwrap();
        graph.link_parent_child("Dad", "Kid").unwrap();

        let grandparents = names(&graph, graph.grandparents_of("Kid").unwrap());

        assert_eq!(grandparents, vec!["Grandma", "Grandma"]);
    }

    #[test]
    fn given_no_parents_when_querying_grandparents_then_empty() {
        let graph = graph_with(&["Solo"]);
        assert!(graph.grandparents_of("Solo").unwrap().is_empty());
    }

    #[test]
    fn given_mixed_edges_when_filtering_by_kind_then_only_matching_returned() {
        let mut graph = graph_with(&["Nancy", "Carl", "Jill"]);
        graph.link_parent_child("Nancy", "Carl").unwrap();
        graph.add_edge("Carl", "Jill", Relationship::Sibling).unwrap();

        let siblings = graph.neighbors_by_kind("Carl", Relationship::Sibling);
        let parents = graph.neighbors_by_kind("Carl", Relationship::ChildParent);

        assert_eq!(names(&graph, siblings.unwrap()), vec!["Jill"]);
        assert_eq!(names(&graph, parents.unwrap()), vec!["Nancy"]);
    }

    #[test]
    fn given_no_grandchildren_when_finding_most_then_empty() {
        let mut graph = graph_with(&["Nancy", "Carl"]);
        graph.link_parent_child("Nancy", "Carl").unwrap();

        assert!(graph.members_with_most_grandchildren().is_empty());
    }

    #[test]
    fn given_roots_when_listing_then_members_without_parents() {
        let mut graph = graph_with(&["Nancy", "Carl", "Solo"]);
        graph.link_parent_child("Nancy", "Carl").unwrap();

        assert_eq!(names(&graph, graph.roots()), vec!["Nancy", "Solo"]);
    }

    #[test]
    fn given_relationship_when_inverting_twice_then_identity() {
        for kind in [
            Relationship::ParentChild,
            Relationship::ChildParent,
            Relationship::Sibling,
        ] {
            assert_eq!(kind.inverse().inverse(), kind);
        }
        assert_eq!(
            Relationship::ParentChild.inverse(),
            Relationship::ChildParent
        );
    }
}
