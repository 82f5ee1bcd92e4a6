//! Domain layer: members, relationship graph, text loader
//!
//! This layer is independent of configuration and CLI concerns.

pub mod digraph;
pub mod error;
pub mod graph;
pub mod loader;
pub mod member;
pub mod render;

pub use digraph::Digraph;
pub use error::{DomainError, DomainResult};
pub use graph::{Edge, FamilyGraph, Relationship};
pub use loader::{LoadOptions, SelfLinkPolicy, TreeLoader};
pub use member::{Member, MemberId, MemberRegistry};
pub use render::DescendantTree;
