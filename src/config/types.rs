//! Configuration types and defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Ordering of sections in the aggregate report.
///
/// Neither ordering depends on which unit finished first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportOrder {
    /// Sort sections by label, byte-wise (default).
    #[default]
    Label,
    /// Keep the order values appeared in the substitution source.
    Input,
}

impl ReportOrder {
    /// Parse a report order from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "label" => Some(Self::Label),
            "input" => Some(Self::Input),
            _ => None,
        }
    }
}

pub(crate) fn default_scratch_dir() -> PathBuf {
    std::env::temp_dir().join("paralix_output")
}

pub(crate) fn default_shell() -> String {
    "sh -c".to_string()
}

pub(crate) fn default_true() -> bool {
    true
}
