//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Usage(String),
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::Application(e.into())
    }
}

impl CliError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Io { .. } => crate::exitcode::IOERR,
            CliError::Application(ApplicationError::Config { .. }) => crate::exitcode::CONFIG,
            CliError::Application(ApplicationError::Domain(e)) => match e {
                DomainError::InputFileOpen { .. } => crate::exitcode::NOINPUT,
                DomainError::InputRead { .. } => crate::exitcode::IOERR,
                DomainError::InputFormat { .. }
                | DomainError::TreeConstruction { .. }
                | DomainError::DuplicateMember(_)
                | DomainError::SelfRelationship { .. } => crate::exitcode::DATAERR,
                DomainError::MemberNotFound(_) | DomainError::InvalidArgument(_) => {
                    crate::exitcode::USAGE
                }
            },
        }
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
