//! Execution units and their outcomes.

use crate::error::ParalixError;
use crate::placeholder;
use crate::substitution::SubstitutionSource;
use std::fmt;
use std::time::Duration;

/// One concrete command derived from the template and a single value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionUnit {
    /// Position of the value in the substitution source.
    pub index: usize,
    pub value: String,
    /// Key the unit's output is stored under.
    pub label: String,
    /// Template with every `<key>` replaced by `value`.
    pub command: String,
}

/// Expand `template` once per value of `source`, in source order.
pub fn build_units(template: &str, source: &SubstitutionSource) -> Vec<ExecutionUnit> {
    let token = placeholder::token(source.key());

    source
        .values()
        .iter()
        .enumerate()
        .map(|(index, value)| ExecutionUnit {
            index,
            value: value.clone(),
            label: value.clone(),
            command: template.replace(&token, value),
        })
        .collect()
}

/// How a unit ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitStatus {
    Succeeded,
    /// The shell exited non-zero; `None` when it was killed by a signal.
    Exited { code: Option<i32> },
    /// The shell process could not be started.
    LaunchFailed { reason: String },
    /// The process ran but its output could not be read or stored.
    CaptureFailed { reason: String },
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitStatus::Succeeded => write!(f, "success"),
            UnitStatus::Exited { code: Some(code) } => write!(f, "exit code {}", code),
            UnitStatus::Exited { code: None } => write!(f, "termination by signal"),
            UnitStatus::LaunchFailed { reason } => write!(f, "launch failure: {}", reason),
            UnitStatus::CaptureFailed { reason } => write!(f, "capture failure: {}", reason),
        }
    }
}

/// Result of one unit, read once by the report aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub index: usize,
    pub value: String,
    pub label: String,
    pub status: UnitStatus,
    pub duration: Duration,
}

impl ExecutionOutcome {
    pub fn is_success(&self) -> bool {
        self.status == UnitStatus::Succeeded
    }

    /// The error this outcome represents, if it failed.
    pub fn error(&self) -> Option<ParalixError> {
        match &self.status {
            UnitStatus::Succeeded => None,
            UnitStatus::LaunchFailed { reason } => Some(ParalixError::SubprocessLaunch {
                value: self.value.clone(),
                reason: reason.clone(),
            }),
            status => Some(ParalixError::SubprocessExecution {
                value: self.value.clone(),
                status: status.to_string(),
            }),
        }
    }
}
