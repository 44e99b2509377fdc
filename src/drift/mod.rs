//! Staleness and drift detection for declared metadata.
//!
//! Everything here is advisory: findings never fail a scan, they tell
//! maintainers which declarations no longer match reality. `today` is
//! injected so reports stay deterministic under test.

pub mod tokens;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use crate::fs::plugin_dir::PluginDir;
use crate::graph::ComponentGraph;
use crate::models::constants::{STALE_AFTER_DAYS, TOKEN_DRIFT_RATIO, TOKEN_DRIFT_WARN_RATIO};
use crate::models::context_file::ContextFile;
use crate::parser::frontmatter::extract_body;
use crate::validate::report::Severity;

/// What kind of drift a finding reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DriftKind {
    /// lastUpdated is older than the staleness threshold.
    Stale,
    /// Measured token count disagrees with the declared estimate.
    TokenDrift,
    /// Per-section estimates no longer sum to the file estimate.
    SectionSumDrift,
    /// The originating skill moved on but the file did not.
    SemanticLag,
}

impl std::fmt::Display for DriftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriftKind::Stale => write!(f, "stale"),
            DriftKind::TokenDrift => write!(f, "token drift"),
            DriftKind::SectionSumDrift => write!(f, "section sum drift"),
            DriftKind::SemanticLag => write!(f, "semantic lag"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct DriftFinding {
    pub id: String,
    pub kind: DriftKind,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DriftReport {
    pub findings: Vec<DriftFinding>,
    #[serde(rename = "filesChecked")]
    pub files_checked: usize,
    #[serde(rename = "asOf")]
    pub as_of: NaiveDate,
}

impl DriftReport {
    pub fn count_of(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}

/// Check every context file for staleness and drift as of `today`.
pub fn detect(dir: &PluginDir, graph: &ComponentGraph, today: NaiveDate) -> DriftReport {
    let mut findings = Vec::new();
    let mut files_checked = 0;

    for file in graph.files() {
        files_checked += 1;

        check_staleness(file, today, &mut findings);
        check_token_drift(dir, file, &mut findings);
        check_section_sum(file, &mut findings);
        check_semantic_lag(graph, file, &mut findings);
    }

    findings.sort();

    DriftReport {
        findings,
        files_checked,
        as_of: today,
    }
}

fn check_staleness(file: &ContextFile, today: NaiveDate, findings: &mut Vec<DriftFinding>) {
    let age_days = (today - file.last_updated).num_days();
    if age_days > STALE_AFTER_DAYS {
        findings.push(DriftFinding {
            id: file.id.clone(),
            kind: DriftKind::Stale,
            severity: Severity::Warning,
            message: format!(
                "last updated {age_days} days ago (threshold {STALE_AFTER_DAYS})"
            ),
        });
    }
}

fn check_token_drift(dir: &PluginDir, file: &ContextFile, findings: &mut Vec<DriftFinding>) {
    let Some(path) = dir.file_path(&file.id) else {
        return;
    };
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) => {
            warn!(id = file.id, "cannot measure tokens: {err}");
            return;
        }
    };

    let measured = tokens::estimate_tokens(&extract_body(&content));
    let deviation = tokens::deviation(file.estimated_tokens, measured);
    if deviation > TOKEN_DRIFT_RATIO {
        let severity = if deviation > TOKEN_DRIFT_WARN_RATIO {
            Severity::Warning
        } else {
            Severity::Info
        };
        findings.push(DriftFinding {
            id: file.id.clone(),
            kind: DriftKind::TokenDrift,
            severity,
            message: format!(
                "declares {} tokens but measures {measured} ({:.0}% off)",
                file.estimated_tokens,
                deviation * 100.0
            ),
        });
    }
}

fn check_section_sum(file: &ContextFile, findings: &mut Vec<DriftFinding>) {
    if file.sections.is_empty() {
        return;
    }
    let sum = file.sections_total();
    let deviation = tokens::deviation(file.estimated_tokens, sum);
    if deviation > TOKEN_DRIFT_RATIO {
        findings.push(DriftFinding {
            id: file.id.clone(),
            kind: DriftKind::SectionSumDrift,
            severity: Severity::Info,
            message: format!(
                "section estimates sum to {sum}, file declares {}",
                file.estimated_tokens
            ),
        });
    }
}

/// Best-effort heuristic: a file distilled from a skill is lagging when the
/// skill was updated after it and the file still carries the sections most
/// sensitive to capability changes. Approximate by design.
fn check_semantic_lag(graph: &ComponentGraph, file: &ContextFile, findings: &mut Vec<DriftFinding>) {
    let Some(skill_name) = file.source_skill.as_deref() else {
        return;
    };
    let Some(skill) = graph.skill(skill_name) else {
        return;
    };
    let Some(skill_updated) = skill.last_updated else {
        return;
    };

    let has_sensitive_section = file
        .sections
        .iter()
        .any(|s| s.name == "Common Issues" || s.name == "Quick Reference");

    if skill_updated > file.last_updated && has_sensitive_section {
        findings.push(DriftFinding {
            id: file.id.clone(),
            kind: DriftKind::SemanticLag,
            severity: Severity::Info,
            message: format!(
                "skill '{skill_name}' was updated {skill_updated} but this file dates {}",
                file.last_updated
            ),
        });
    }
}
