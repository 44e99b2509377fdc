//! Index command - show one domain's parsed index with resolution state.

use anyhow::{bail, Result};
use colored::Colorize;
use std::path::Path;

use crate::catalog::Catalog;
use crate::scan::ScanOptions;

pub fn execute(root: Option<&Path>, domain: &str) -> Result<()> {
    let (_dir, outcome) = super::scan_plugin(root, &ScanOptions::default())?;
    let catalog = Catalog::new(&outcome.graph);

    let Some(listing) = catalog.domain_index(domain) else {
        bail!(
            "Domain '{domain}' not found. Known domains: {}",
            outcome.graph.domain_names().join(", ")
        );
    };

    println!("{}", format!("Domain index: {domain}").cyan().bold());
    println!();

    if !listing.index_exists {
        println!("  {} no index.md in this domain", "✗".red().bold());
    }

    for entry in &listing.entries {
        if entry.exists {
            let tokens = entry
                .estimated_tokens
                .map(|t| format!("~{t} tokens"))
                .unwrap_or_default();
            println!("  {} {} {}", "✓".green(), entry.stem, tokens.dimmed());
        } else {
            println!(
                "  {} {} {}",
                "✗".red(),
                entry.stem,
                "(ghost: listed but missing)".dimmed()
            );
        }
    }

    for stem in &listing.unlisted {
        println!(
            "  {} {} {}",
            "○".yellow(),
            stem,
            "(orphan: on disk but unlisted)".dimmed()
        );
    }

    Ok(())
}
