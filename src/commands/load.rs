//! Load command - budget-tracked materialization of one file or sections.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::catalog::{Budget, ContextLoader, FileRef};
use crate::scan::ScanOptions;

pub fn execute(
    root: Option<&Path>,
    id: &str,
    sections: Vec<String>,
    max_files: Option<usize>,
    max_tokens: Option<u32>,
) -> Result<()> {
    let (dir, outcome) = super::scan_plugin(root, &ScanOptions::default())?;

    let budget = Budget {
        max_files: max_files.unwrap_or(Budget::default().max_files),
        max_tokens,
    };
    let mut loader = ContextLoader::with_budget(&dir, &outcome.graph, budget);
    let reference = FileRef::new(id);

    let content = if sections.is_empty() {
        loader
            .materialize(&reference)
            .with_context(|| format!("Failed to load '{id}'"))?
    } else {
        loader
            .materialize_sections(&reference, &sections)
            .with_context(|| format!("Failed to load sections of '{id}'"))?
    };

    println!("{content}");
    eprintln!(
        "{}",
        format!(
            "loaded {} (~{} tokens charged)",
            id,
            loader.tokens_loaded()
        )
        .dimmed()
    );

    Ok(())
}
