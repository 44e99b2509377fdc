//! CLI command implementations.

pub mod catalog;
pub mod drift;
pub mod index;
pub mod load;
pub mod status;
pub mod validate;

use anyhow::Result;
use clap::ValueEnum;
use std::path::Path;

use crate::fs::plugin_dir::PluginDir;
use crate::scan::{scan, ScanOptions, ScanOutcome};

/// Output rendering for report commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Resolve the plugin root and run one full scan.
pub(crate) fn scan_plugin(
    root: Option<&Path>,
    options: &ScanOptions,
) -> Result<(PluginDir, ScanOutcome)> {
    let dir = PluginDir::discover(root)?;
    let outcome = scan(&dir, options);
    Ok((dir, outcome))
}
