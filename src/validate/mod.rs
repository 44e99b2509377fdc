//! Referential integrity validation over an indexed graph.

pub mod checks;
pub mod report;

pub use report::{IntegrityReport, Relation, RelationReport, Severity, Violation};

use crate::graph::ComponentGraph;

/// Walk all eight relationship types and assemble the scored report.
///
/// `partial` marks a report built from a scan the deadline cut short; the
/// numbers are then a lower bound on reality, not a verdict.
pub fn validate(graph: &ComponentGraph, partial: bool) -> IntegrityReport {
    IntegrityReport::assemble(checks::run_all(graph), checks::suggestions(graph), partial)
}
