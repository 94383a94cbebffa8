//! The run pipeline: validate, prepare, execute, aggregate.
//!
//! ```text
//! Validating -> Preparing -> Executing -> Aggregating -> Done
//!      \            \            \             \
//!       +------------+------------+-------------+--> Failed
//! ```
//!
//! Validation failures stop the run before anything touches the filesystem.
//! Unit failures do not stop the run; they are counted in the returned
//! [`RunSummary`]. Any error while writing the report is fatal.

use crate::config::ReportOrder;
use crate::error::{ParalixError, Result};
use crate::executor::{self, Execution, Shell};
use crate::fs;
use crate::report::{self, AggregateReport};
use crate::sink::OutputSink;
use crate::substitution::{self, SubstitutionSource};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Lifecycle of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Validating,
    Preparing,
    Executing,
    Aggregating,
    Done,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Validating => "validating",
            RunState::Preparing => "preparing",
            RunState::Executing => "executing",
            RunState::Aggregating => "aggregating",
            RunState::Done => "done",
            RunState::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Inputs of one run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub template: String,
    pub inline_spec: Option<String>,
    pub input_file: Option<PathBuf>,
    pub output: PathBuf,
    pub shell: Shell,
    pub report_order: ReportOrder,
}

/// Why one value's unit failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitFailure {
    pub value: String,
    pub reason: String,
}

/// What a finished run reports back to its caller.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub key: String,
    pub total_units: usize,
    pub failed_units: usize,
    pub failed_values: Vec<String>,
    pub failures: Vec<UnitFailure>,
    pub report_path: PathBuf,
    #[serde(skip)]
    pub report: AggregateReport,
}

impl RunSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed_units == 0
    }

    /// `Err(UnitsFailed)` when any unit failed.
    pub fn check(&self) -> Result<()> {
        if self.all_succeeded() {
            Ok(())
        } else {
            Err(ParalixError::UnitsFailed {
                failed: self.failed_units,
                total: self.total_units,
            })
        }
    }

    /// One-line status for the terminal.
    pub fn status_line(&self) -> String {
        if self.all_succeeded() {
            format!("all {} units succeeded", self.total_units)
        } else {
            format!(
                "{} of {} units failed: {}",
                self.failed_units,
                self.total_units,
                self.failed_values.join(", ")
            )
        }
    }
}

/// Drives one run through its states.
pub struct Orchestrator<S> {
    request: RunRequest,
    sink: Arc<S>,
    state: RunState,
}

impl<S: OutputSink + 'static> Orchestrator<S> {
    pub fn new(request: RunRequest, sink: S) -> Self {
        Self {
            request,
            sink: Arc::new(sink),
            state: RunState::Validating,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run the pipeline to `Done`, or to `Failed` with the first fatal error.
    pub async fn run(&mut self) -> Result<RunSummary> {
        let started_at = Utc::now();
        match self.advance(started_at).await {
            Ok(summary) => Ok(summary),
            Err(e) => {
                error!(state = %self.state, error = %e, "run failed");
                self.state = RunState::Failed;
                Err(e)
            }
        }
    }

    async fn advance(&mut self, started_at: DateTime<Utc>) -> Result<RunSummary> {
        self.enter(RunState::Validating);
        let source = substitution::resolve(
            &self.request.template,
            self.request.inline_spec.as_deref(),
            self.request.input_file.as_deref(),
        )?;
        debug!(key = source.key(), values = source.values().len(), "substitution resolved");

        self.enter(RunState::Preparing);
        fs::create_output_file(&self.request.output)?;
        self.sink.reset().await?;

        self.enter(RunState::Executing);
        let execution = executor::execute_all(
            &self.request.template,
            &source,
            &self.request.shell,
            Arc::clone(&self.sink),
        )
        .await;

        self.enter(RunState::Aggregating);
        let report =
            report::aggregate(&execution.outcomes, self.sink.as_ref(), self.request.report_order)
                .await?;
        fs::atomic_write(&self.request.output, &report.render())?;
        self.sink.cleanup().await?;

        self.enter(RunState::Done);
        let summary = summarize(started_at, &source, &execution, &self.request.output, report);
        info!(
            total = summary.total_units,
            failed = summary.failed_units,
            output = %summary.report_path.display(),
            "report written"
        );
        Ok(summary)
    }

    fn enter(&mut self, next: RunState) {
        debug!(from = %self.state, to = %next, "state transition");
        self.state = next;
    }
}

fn summarize(
    started_at: DateTime<Utc>,
    source: &SubstitutionSource,
    execution: &Execution,
    output: &std::path::Path,
    report: AggregateReport,
) -> RunSummary {
    RunSummary {
        started_at,
        finished_at: Utc::now(),
        key: source.key().to_string(),
        total_units: execution.total(),
        failed_units: execution.failed_count(),
        failed_values: execution.failed().map(|o| o.value.clone()).collect(),
        failures: execution
            .failed()
            .filter_map(|o| {
                o.error().map(|e| UnitFailure {
                    value: o.value.clone(),
                    reason: e.to_string(),
                })
            })
            .collect(),
        report_path: output.to_path_buf(),
        report,
    }
}
