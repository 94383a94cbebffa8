//! Error types for paralix.
//!
//! Uses thiserror for derive macros. Every variant names the contract that was
//! violated so the CLI can print it as-is.

use crate::exit_codes;
use std::path::Path;
use thiserror::Error;

/// Main error type for paralix operations.
#[derive(Error, Debug)]
pub enum ParalixError {
    /// Both or neither of the inline spec and the input file were supplied.
    #[error("{0}")]
    ConflictingInput(String),

    /// The inline spec lacks the `KEY=` part.
    #[error("placeholder should be in the format of -p KEY={{VALUE1,VALUE2}}: {0}")]
    MalformedPlaceholder(String),

    /// The inline spec lacks `{` or `}` around its values.
    #[error("values should be in the format of {{VALUE1,VALUE2,VALUE3}}: got '{0}'")]
    DelimiterFormat(String),

    /// A supplied key does not appear in the command template.
    #[error("<{0}> is missing in the command")]
    UnmatchedPlaceholder(String),

    /// A template placeholder has no supplied values.
    #[error("<{0}> has not been passed using -p {0}=... or -f {0}")]
    MissingSubstitution(String),

    /// Filesystem failure with the operation that was attempted.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// A unit's shell process could not be started.
    #[error("failed to launch command for '{value}': {reason}")]
    SubprocessLaunch { value: String, reason: String },

    /// A unit's shell process exited unsuccessfully.
    #[error("command for '{value}' exited with {status}")]
    SubprocessExecution { value: String, status: String },

    /// Aggregate signal raised after every unit finished.
    #[error("{failed} of {total} units failed")]
    UnitsFailed { failed: usize, total: usize },

    /// The config file could not be parsed or holds invalid values.
    #[error("config error: {0}")]
    Config(String),
}

impl ParalixError {
    /// Build an `Io` error whose context names the path involved.
    pub fn io(action: &str, path: &Path, source: std::io::Error) -> Self {
        ParalixError::Io {
            context: format!("failed to {} '{}'", action, path.display()),
            source,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ParalixError::ConflictingInput(_)
            | ParalixError::MalformedPlaceholder(_)
            | ParalixError::DelimiterFormat(_)
            | ParalixError::UnmatchedPlaceholder(_)
            | ParalixError::MissingSubstitution(_)
            | ParalixError::Config(_) => exit_codes::USER_ERROR,
            ParalixError::SubprocessLaunch { .. }
            | ParalixError::SubprocessExecution { .. }
            | ParalixError::UnitsFailed { .. } => exit_codes::UNIT_FAILURE,
            ParalixError::Io { .. } => exit_codes::IO_FAILURE,
        }
    }
}

/// Result type alias for paralix operations.
pub type Result<T> = std::result::Result<T, ParalixError>;
