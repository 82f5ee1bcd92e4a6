//! Application layer: services and use cases
//!
//! This layer exposes the family tree query API on top of the domain graph.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use services::FamilyTree;
