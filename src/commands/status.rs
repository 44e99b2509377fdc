//! Status command - one-screen dashboard over the plugin tree.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::drift::detect;
use crate::scan::ScanOptions;
use crate::utils::count_noun;
use crate::validate::{validate, Severity};

pub fn execute(root: Option<&Path>) -> Result<()> {
    let (dir, outcome) = super::scan_plugin(root, &ScanOptions::default())?;
    let report = validate(&outcome.graph, outcome.partial);
    let today = chrono::Local::now().date_naive();
    let drift = detect(&dir, &outcome.graph, today);
    let counts = outcome.graph.counts();

    println!("{}", crate::LOGO.cyan());
    println!();
    println!("  root: {}", dir.root().display().to_string().dimmed());
    println!();

    println!("{}", "Inventory:".cyan().bold());
    println!(
        "  {} / {} / {}",
        count_noun(counts.domains, "domain"),
        count_noun(counts.files, "context file"),
        count_noun(counts.skills, "skill"),
    );
    println!(
        "  {} / {} / {} / {}",
        count_noun(counts.agents, "agent"),
        count_noun(counts.commands, "command"),
        count_noun(counts.hook_scripts, "hook script"),
        count_noun(counts.mcps, "mcp"),
    );
    println!();

    println!("{}", "Health:".cyan().bold());
    let score = report.health_score;
    let rendered = format!("{score:.1}%");
    let colored_score = if report.is_healthy() {
        rendered.green().bold()
    } else if score >= 80.0 {
        rendered.yellow().bold()
    } else {
        rendered.red().bold()
    };
    println!(
        "  score {colored_score}  ({}, {})",
        count_noun(report.count_of(Severity::Critical), "critical"),
        count_noun(report.count_of(Severity::Warning), "warning"),
    );
    println!(
        "  {} / {}",
        count_noun(outcome.issues.len(), "schema issue"),
        count_noun(drift.findings.len(), "drift finding"),
    );

    if outcome.partial {
        println!();
        println!(
            "{}",
            "⚠ scan was interrupted; numbers cover a partial graph".yellow()
        );
    }

    Ok(())
}
