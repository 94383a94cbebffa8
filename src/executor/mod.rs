//! Parallel execution of a command template over substitution values.
//!
//! Every value becomes one [`ExecutionUnit`] running as its own tokio task and
//! its own shell process. All units are launched before any is awaited and
//! there is no concurrency cap, so a source with thousands of values starts
//! thousands of processes at once.
//!
//! A failing unit never cancels its siblings. [`execute_all`] returns only
//! after every unit has reported, with every outcome (failed ones included)
//! in source order.

mod shell;
mod unit;


use crate::sink::OutputSink;
use crate::substitution::SubstitutionSource;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub use shell::{Captured, Shell, capture};
pub use unit::{ExecutionOutcome, ExecutionUnit, UnitStatus, build_units};

/// Outcomes of one fan-out, in source order.
#[derive(Debug, Clone, Default)]
pub struct Execution {
    pub outcomes: Vec<ExecutionOutcome>,
}

impl Execution {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failed(&self) -> impl Iterator<Item = &ExecutionOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }
}

/// Run one unit per value of `source` concurrently and collect every outcome.
pub async fn execute_all<S>(
    template: &str,
    source: &SubstitutionSource,
    shell: &Shell,
    sink: Arc<S>,
) -> Execution
where
    S: OutputSink + 'static,
{
    let units = build_units(template, source);
    if units.is_empty() {
        debug!("no values to execute");
        return Execution::default();
    }

    let mut pending = Vec::with_capacity(units.len());
    for unit in units {
        let index = unit.index;
        let value = unit.value.clone();
        let label = unit.label.clone();
        let handle = tokio::spawn(run_unit(unit, shell.clone(), Arc::clone(&sink)));
        pending.push((index, value, label, handle));
    }

    let mut outcomes = Vec::with_capacity(pending.len());
    for (index, value, label, handle) in pending {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(value = %value, error = %e, "unit task did not complete");
                ExecutionOutcome {
                    index,
                    value,
                    label,
                    status: UnitStatus::LaunchFailed {
                        reason: format!("worker task failed: {}", e),
                    },
                    duration: Duration::ZERO,
                }
            }
        };
        outcomes.push(outcome);
    }

    let execution = Execution { outcomes };
    info!(
        total = execution.total(),
        failed = execution.failed_count(),
        "all units finished"
    );
    execution
}

async fn run_unit<S: OutputSink>(unit: ExecutionUnit, shell: Shell, sink: Arc<S>) -> ExecutionOutcome {
    let started = Instant::now();
    info!(value = %unit.value, command = %unit.command, "executing command");

    let (mut status, output) = match shell.spawn(&unit.command) {
        Err(e) => (
            UnitStatus::LaunchFailed {
                reason: e.to_string(),
            },
            Vec::new(),
        ),
        Ok(child) => {
            let Captured { status, output } = capture(child).await;
            let status = match status {
                Ok(status) if status.success() => UnitStatus::Succeeded,
                Ok(status) => UnitStatus::Exited {
                    code: status.code(),
                },
                Err(e) => UnitStatus::CaptureFailed {
                    reason: e.to_string(),
                },
            };
            (status, output)
        }
    };

    // Failed units still store whatever they printed.
    if let Err(e) = sink.store(&unit.label, &output).await {
        status = UnitStatus::CaptureFailed {
            reason: e.to_string(),
        };
    }

    let duration = started.elapsed();
    match &status {
        UnitStatus::Succeeded => {
            debug!(value = %unit.value, elapsed_ms = duration.as_millis() as u64, "unit succeeded")
        }
        failed => {
            warn!(value = %unit.value, status = %failed, elapsed_ms = duration.as_millis() as u64, "unit failed")
        }
    }

    ExecutionOutcome {
        index: unit.index,
        value: unit.value,
        label: unit.label,
        status,
        duration,
    }
}
