//! Aggregation of per-unit output into one report.
//!
//! Sections are ordered by label (or by source position, see
//! [`ReportOrder`]), never by completion time, so identical inputs give a
//! byte-identical report. Each rendered section is the label on its own line
//! followed by the unit's captured output and a newline. Failed units
//! contribute whatever they printed; nothing marks them as failed here.

use crate::config::ReportOrder;
use crate::error::Result;
use crate::executor::{ExecutionOutcome, UnitStatus};
use crate::sink::OutputSink;
use std::collections::BTreeMap;
use tracing::warn;

/// One labelled block of captured output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub label: String,
    pub content: Vec<u8>,
}

/// The ordered concatenation of every unit's output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateReport {
    pub sections: Vec<ReportSection>,
}

impl AggregateReport {
    pub fn labels(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.label.as_str()).collect()
    }

    /// Render as `label\ncontent\n` per section.
    pub fn render(&self) -> Vec<u8> {
        let size = self
            .sections
            .iter()
            .map(|s| s.label.len() + s.content.len() + 2)
            .sum();

        let mut out = Vec::with_capacity(size);
        for section in &self.sections {
            out.extend_from_slice(section.label.as_bytes());
            out.push(b'\n');
            out.extend_from_slice(&section.content);
            out.push(b'\n');
        }
        out
    }
}

/// Build the report from `outcomes`, loading each label's output from `sink`.
///
/// Outcomes sharing a label produce a single section holding whatever the
/// sink kept for that label. A label whose output was never stored because
/// its capture failed yields an empty section; any other load failure fails
/// the whole aggregation.
pub async fn aggregate<S: OutputSink>(
    outcomes: &[ExecutionOutcome],
    sink: &S,
    order: ReportOrder,
) -> Result<AggregateReport> {
    let labels = ordered_labels(outcomes, order);

    let mut sections = Vec::with_capacity(labels.len());
    for LabelEntry {
        label,
        capture_failed,
        ..
    } in labels
    {
        let content = match sink.load(label).await {
            Ok(content) => content,
            Err(e) if capture_failed => {
                warn!(label, error = %e, "no stored output for failed capture");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        sections.push(ReportSection {
            label: label.to_string(),
            content,
        });
    }

    Ok(AggregateReport { sections })
}

struct LabelEntry<'a> {
    label: &'a str,
    /// First source position of the label.
    position: usize,
    /// Some unit with this label could not capture or store its output.
    capture_failed: bool,
}

/// Distinct labels of `outcomes` in report order.
fn ordered_labels(outcomes: &[ExecutionOutcome], order: ReportOrder) -> Vec<LabelEntry<'_>> {
    let mut seen: BTreeMap<&str, LabelEntry<'_>> = BTreeMap::new();
    for outcome in outcomes {
        let capture_failed = matches!(outcome.status, UnitStatus::CaptureFailed { .. });
        let entry = seen.entry(outcome.label.as_str()).or_insert(LabelEntry {
            label: outcome.label.as_str(),
            position: outcome.index,
            capture_failed,
        });
        entry.position = entry.position.min(outcome.index);
        entry.capture_failed |= capture_failed;
    }

    let mut labels: Vec<LabelEntry<'_>> = seen.into_values().collect();
    if order == ReportOrder::Input {
        labels.sort_by_key(|entry| entry.position);
    }
    labels
}
