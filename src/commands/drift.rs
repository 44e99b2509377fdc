//! Drift command - staleness and metadata drift across all context files.

use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use serde_json::json;
use std::path::Path;

use crate::drift::{detect, DriftReport};
use crate::scan::ScanOptions;
use crate::utils::count_noun;
use crate::validate::Severity;

pub fn execute(root: Option<&Path>, format: super::OutputFormat, as_of: Option<NaiveDate>) -> Result<()> {
    let (dir, outcome) = super::scan_plugin(root, &ScanOptions::default())?;
    let today = as_of.unwrap_or_else(|| chrono::Local::now().date_naive());
    let report = detect(&dir, &outcome.graph, today);

    match format {
        super::OutputFormat::Json => {
            let payload = json!({
                "report": report,
                "schemaIssues": outcome.issues,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        super::OutputFormat::Text => print_report(&report),
    }

    Ok(())
}

fn print_report(report: &DriftReport) {
    println!(
        "{}",
        format!("Staleness & Drift (as of {})", report.as_of)
            .cyan()
            .bold()
    );
    println!();

    if report.findings.is_empty() {
        println!(
            "  {} {} checked, nothing drifting",
            "✓".green().bold(),
            count_noun(report.files_checked, "file")
        );
        return;
    }

    for finding in &report.findings {
        let severity = match finding.severity {
            Severity::Critical => "critical".red().bold(),
            Severity::Warning => "warning".yellow(),
            Severity::Info => "info".normal(),
        };
        println!(
            "  {} {} [{}] {}",
            severity,
            finding.id,
            finding.kind,
            finding.message.dimmed()
        );
    }

    println!();
    println!(
        "  {} across {}",
        count_noun(report.findings.len(), "finding"),
        count_noun(report.files_checked, "file")
    );
}
