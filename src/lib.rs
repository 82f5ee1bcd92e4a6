//! famtree: family tree relationship graph
//!
//! Loads members and parent/child/sibling relationships from a colon-delimited
//! text file into a directed multigraph and answers relationship queries.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use application::{ApplicationError, ApplicationResult, FamilyTree};
pub use domain::{DomainError, FamilyGraph, Relationship, TreeLoader};
