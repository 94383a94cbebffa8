//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a paralix run.
///
/// This struct represents the contents of `paralix.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding one output file per unit while a run is in flight.
    /// It is deleted and recreated at the start of every run.
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: PathBuf,

    /// Shell prefix each concrete command is appended to (shell-words parsed).
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Print the finished report to stdout.
    #[serde(default = "default_true")]
    pub echo_report: bool,

    /// Section ordering in the report.
    #[serde(default)]
    pub report_order: ReportOrder,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scratch_dir: default_scratch_dir(),
            shell: default_shell(),
            echo_report: default_true(),
            report_order: ReportOrder::default(),
        }
    }
}
