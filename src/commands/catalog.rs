//! Catalog command - metadata-only queries against one domain.

use anyhow::{bail, Result};
use colored::Colorize;
use std::path::Path;

use crate::catalog::{Catalog, CatalogEntry};
use crate::models::context_file::LoadingStrategy;
use crate::scan::ScanOptions;
use crate::utils::{count_noun, truncate};

pub fn execute(
    root: Option<&Path>,
    domain: &str,
    always: bool,
    signals: Vec<String>,
    cross: Vec<String>,
) -> Result<()> {
    let (_dir, outcome) = super::scan_plugin(root, &ScanOptions::default())?;
    if outcome.graph.domain(domain).is_none() {
        bail!(
            "Domain '{domain}' not found. Known domains: {}",
            outcome.graph.domain_names().join(", ")
        );
    }
    let catalog = Catalog::new(&outcome.graph);

    if always {
        let entries = catalog.always_load(domain);
        print_entries(&format!("Always-load files for '{domain}'"), &entries);
        return Ok(());
    }

    if !signals.is_empty() {
        let entries = catalog.conditional(domain, &signals);
        print_entries(
            &format!("Conditional matches for '{domain}' ({})", signals.join(" ")),
            &entries,
        );
        return Ok(());
    }

    if !cross.is_empty() {
        let entries = catalog.cross_domain(domain, &cross);
        print_entries(
            &format!("Cross-domain context for '{domain}' ({})", cross.join(" ")),
            &entries,
        );
        return Ok(());
    }

    let entries = catalog.catalog(domain);
    print_entries(&format!("Catalog for '{domain}'"), &entries);
    Ok(())
}

fn print_entries(header: &str, entries: &[CatalogEntry]) {
    println!("{}", header.cyan().bold());
    println!();

    if entries.is_empty() {
        println!("  {}", "no matching files".dimmed());
        return;
    }

    for entry in entries {
        let icon = match entry.loading_strategy {
            LoadingStrategy::Always => "●".green(),
            LoadingStrategy::Conditional => "◐".yellow(),
            LoadingStrategy::OnDemand => "○".normal(),
        };
        println!(
            "  {} {} {} {}",
            icon,
            entry.id(),
            format!("~{} tokens", entry.estimated_tokens).dimmed(),
            format!("[{}]", entry.loading_strategy).dimmed(),
        );
        println!("      {}", truncate(&entry.title, 72).dimmed());
    }

    let total: u32 = entries.iter().map(|e| e.estimated_tokens).sum();
    println!();
    println!(
        "  {} ({} if fully materialized)",
        count_noun(entries.len(), "file"),
        format!("~{total} tokens").dimmed()
    );
}
