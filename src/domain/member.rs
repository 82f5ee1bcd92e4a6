//! Member registry: unique, name-keyed storage of family members.

use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

/// Lightweight handle to a member stored in a [`MemberRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberId(Index);

/// A single person in the family tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    name: String,
}

impl Member {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Arena-backed registry of members.
///
/// Members are never removed, so handles stay valid for the lifetime of the
/// registry. Lookup by name is a hash-map hit; enumeration follows insertion
/// order.
#[derive(Debug, Default)]
pub struct MemberRegistry {
    arena: Arena<Member>,
    by_name: HashMap<String, MemberId>,
    order: Vec<MemberId>,
}

impl MemberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new member.
    ///
    /// Names are case-sensitive. Empty names and names already present are
    /// rejected.
    #[instrument(level = "trace", skip(self))]
    pub fn add_member(&mut self, name: &str) -> DomainResult<MemberId> {
        if name.is_empty() {
            return Err(DomainError::InvalidArgument(
                "member name must not be empty".to_string(),
            ));
        }
        if self.by_name.contains_key(name) {
            return Err(DomainError::DuplicateMember(name.to_string()));
        }

        let id = MemberId(self.arena.insert(Member {
            name: name.to_string(),
        }));
        self.by_name.insert(name.to_string(), id);
        self.order.push(id);
        Ok(id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<MemberId> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.arena.get(id.0)
    }

    /// Name of a member, or the empty string for a handle from another registry.
    pub fn name_of(&self, id: MemberId) -> &str {
        self.get(id).map(Member::name).unwrap_or_default()
    }

    /// All members in insertion order. Each call starts a fresh traversal.
    pub fn all_members(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.order.iter().copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.all_members().map(|id| self.name_of(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_new_name_when_adding_then_findable() {
        let mut registry = MemberRegistry::new();
        let id = registry.add_member("Nancy").unwrap();

        assert_eq!(registry.find_by_name("Nancy"), Some(id));
        assert_eq!(registry.name_of(id), "Nancy");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn given_existing_name_when_adding_then_duplicate_error() {
        let mut registry = MemberRegistry::new();
        registry.add_member("Nancy").unwrap();

        let result = registry.add_member("Nancy");

        assert!(matches!(result, Err(DomainError::DuplicateMember(ref n)) if n == "Nancy"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn given_empty_name_when_adding_then_invalid_argument() {
        let mut registry = MemberRegistry::new();
        assert!(matches!(
            registry.add_member(""),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn given_different_case_when_finding_then_absent() {
        let mut registry = MemberRegistry::new();
        registry.add_member("Nancy").unwrap();

        assert_eq!(registry.find_by_name("nancy"), None);
        assert!(!registry.contains("NANCY"));
    }

    #[test]
    fn given_members_when_enumerating_twice_then_same_insertion_order() {
        let mut registry = MemberRegistry::new();
        for name in ["Nancy", "Carl", "Jill", "Adam"] {
            registry.add_member(name).unwrap();
        }

        let first: Vec<&str> = registry.names().collect();
        let second: Vec<&str> = registry.names().collect();

        assert_eq!(first, vec!["Nancy", "Carl", "Jill", "Adam"]);
        assert_eq!(first, second);
    }
}
