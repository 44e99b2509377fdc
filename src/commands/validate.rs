//! Validate command - the eight relationship checks and the health score.

use anyhow::{bail, Result};
use colored::Colorize;
use serde_json::json;
use std::path::Path;
use std::time::Duration;

use crate::errors::SchemaIssue;
use crate::scan::{install_cancel_flag, ScanOptions};
use crate::utils::count_noun;
use crate::validate::{validate, IntegrityReport, Severity};

pub fn execute(
    root: Option<&Path>,
    format: super::OutputFormat,
    strict: bool,
    timeout_secs: Option<u64>,
) -> Result<()> {
    let options = ScanOptions {
        timeout: timeout_secs.map(Duration::from_secs),
        cancel: Some(install_cancel_flag()),
        ..Default::default()
    };
    let (_dir, outcome) = super::scan_plugin(root, &options)?;
    let report = validate(&outcome.graph, outcome.partial);

    match format {
        super::OutputFormat::Json => {
            let payload = json!({
                "report": report,
                "schemaIssues": outcome.issues,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        super::OutputFormat::Text => print_report(&report, &outcome.issues),
    }

    let criticals = report.count_of(Severity::Critical);
    let warnings = report.count_of(Severity::Warning);
    if criticals > 0 {
        bail!("Validation failed: {}", count_noun(criticals, "critical violation"));
    }
    if strict && warnings > 0 {
        bail!("Validation failed (strict): {}", count_noun(warnings, "warning"));
    }

    Ok(())
}

fn print_report(report: &IntegrityReport, issues: &[SchemaIssue]) {
    println!("{}", "Reference Integrity".cyan().bold());
    println!();

    for relation in &report.relations {
        let icon = if relation.valid == relation.total {
            "✓".green()
        } else if relation
            .violations
            .iter()
            .any(|v| v.severity == Severity::Critical)
        {
            "✗".red()
        } else {
            "○".yellow()
        };

        println!(
            "  {} {:<24} {}/{} ({:.0}%)",
            icon,
            relation.relation.to_string(),
            relation.valid,
            relation.total,
            relation.percent()
        );

        for violation in &relation.violations {
            let severity = match violation.severity {
                Severity::Critical => "critical".red().bold(),
                Severity::Warning => "warning".yellow(),
                Severity::Info => "info".normal(),
            };
            println!(
                "      {} {} -> {}: {}",
                severity,
                violation.source,
                violation.target,
                violation.message.dimmed()
            );
        }
    }

    if !report.suggestions.is_empty() {
        println!();
        println!("{}", "Suggestions:".cyan().bold());
        for suggestion in &report.suggestions {
            println!("  {} {}", "·".dimmed(), suggestion.message);
        }
    }

    if !issues.is_empty() {
        println!();
        println!("{}", "Schema issues:".cyan().bold());
        for issue in issues {
            println!("  {} {}", "○".yellow(), issue);
        }
    }

    println!();
    let score = report.health_score;
    let rendered = format!("{score:.1}%");
    let colored_score = if report.is_healthy() {
        rendered.green().bold()
    } else if score >= 80.0 {
        rendered.yellow().bold()
    } else {
        rendered.red().bold()
    };
    println!("Health score: {colored_score}");

    if report.partial {
        println!(
            "{}",
            "⚠ scan was interrupted; this report covers a partial graph".yellow()
        );
    }
}
