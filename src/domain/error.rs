//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::graph::Relationship;

/// Domain errors represent relationship graph violations and load failures.
/// These are independent of configuration and CLI concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("cannot open input file: {path}")]
    InputFileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read input file: {path}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input format error on line {line}: {reason}")]
    InputFormat { line: usize, reason: String },

    #[error("tree construction failed on line {line}: family member not found: {name}")]
    TreeConstruction { line: usize, name: String },

    #[error("family member not found: {0}")]
    MemberNotFound(String),

    #[error("duplicate family member: {0}")]
    DuplicateMember(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{name} cannot be in a {kind} relationship with itself")]
    SelfRelationship { name: String, kind: Relationship },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
