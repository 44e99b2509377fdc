//! Per-domain content scanning.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::SchemaIssue;
use crate::fs::plugin_dir::PluginDir;
use crate::graph::nodes::{DomainIndex, DomainNode};
use crate::models::context_file::ContextFile;
use crate::parser::frontmatter::{extract_frontmatter_field, parse_from_markdown};
use crate::parser::markdown::extract_local_links;
use crate::scan::{Deadline, StepOutcome};
use crate::validation::validate_domain_name;

/// Result of scanning one domain directory.
#[derive(Debug)]
pub struct DomainScan {
    pub node: DomainNode,
    pub issues: Vec<SchemaIssue>,
    /// True when the deadline fired before every file was processed.
    pub expired: bool,
}

/// Enumerate domain directories under `context/`, sorted by name.
///
/// Entries with invalid names are reported and skipped; loose files at the
/// context root other than the trigger matrix are ignored.
pub fn enumerate_domains(dir: &PluginDir) -> (Vec<String>, Vec<SchemaIssue>) {
    let mut names = Vec::new();
    let mut issues = Vec::new();

    let context_dir = dir.context_dir();
    let entries = match std::fs::read_dir(&context_dir) {
        Ok(entries) => entries,
        Err(err) => {
            issues.push(SchemaIssue::new(
                "context",
                format!("cannot read context directory: {err}"),
            ));
            return (names, issues);
        }
    };

    for entry in entries.flatten() {
        if !entry.path().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };

        if let Err(err) = validate_domain_name(&name) {
            issues.push(SchemaIssue::new(format!("context/{name}"), err.to_string()));
            continue;
        }
        names.push(name);
    }

    names.sort();
    (names, issues)
}

/// Scan one domain: parse every content file and the index.
pub fn scan_domain(dir: &PluginDir, name: &str, deadline: &Deadline) -> DomainScan {
    let mut node = DomainNode::new(name);
    let mut issues = Vec::new();
    let mut expired = false;

    let domain_dir = dir.domain_dir(name);
    let mut paths: Vec<_> = match std::fs::read_dir(&domain_dir) {
        Ok(entries) => entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect(),
        Err(err) => {
            issues.push(SchemaIssue::new(
                format!("context/{name}"),
                format!("cannot read domain directory: {err}"),
            ));
            return DomainScan {
                node,
                issues,
                expired,
            };
        }
    };
    paths.sort();

    for path in paths {
        if deadline.expired() {
            expired = true;
            break;
        }

        let Some(stem) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };
        let is_markdown = path.extension().and_then(|e| e.to_str()) == Some("md");
        let rel_path = format!("context/{name}/{stem}.md");

        if !is_markdown {
            debug!(path = %path.display(), "skipping non-markdown file");
            continue;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                issues.push(SchemaIssue::new(&rel_path, format!("cannot read file: {err}")));
                continue;
            }
        };

        if stem == "index" {
            let (index, mut index_issues) = parse_index(&content, name);
            node.index = index;
            issues.append(&mut index_issues);
            continue;
        }

        match parse_content_file(&content, &rel_path) {
            StepOutcome::Indexed(file) => {
                issues.extend(file.schema_issues(&rel_path, name, &stem));
                node.files.insert(stem, file);
            }
            StepOutcome::Skip(reason) => {
                debug!(path = rel_path, reason, "skipping file");
            }
            StepOutcome::Fault(issue) => {
                warn!(path = rel_path, "schema issue: {}", issue.message);
                issues.push(issue);
            }
        }
    }

    DomainScan {
        node,
        issues,
        expired,
    }
}

/// Parse one content file's frontmatter into its declared metadata.
///
/// A file missing required fields is a fault; it never enters the graph.
/// Field-level problems beyond deserialization are collected by the caller
/// so the file still participates in index and reference checks.
fn parse_content_file(content: &str, rel_path: &str) -> StepOutcome<ContextFile> {
    match parse_from_markdown::<ContextFile>(content, "context file") {
        Ok(file) => StepOutcome::Indexed(file),
        Err(err) => {
            // Surface the declared id when one is recoverable, so the issue
            // names the file even when the full parse fails.
            let detail = extract_frontmatter_field(content, "id")
                .ok()
                .flatten()
                .map(|id| format!(" (declared id: {id})"))
                .unwrap_or_default();
            StepOutcome::Fault(SchemaIssue::new(
                rel_path,
                format!("{err:#}{detail}"),
            ))
        }
    }
}

/// Frontmatter shape of an index file's optional machine-readable listing.
#[derive(Debug, Default, Deserialize)]
struct IndexFrontmatter {
    #[serde(rename = "indexedFiles", default)]
    indexed_files: Vec<IndexedFile>,
}

#[derive(Debug, Deserialize)]
struct IndexedFile {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    path: Option<String>,
}

/// Parse a domain index into the set of file stems it claims.
///
/// Claims come from local markdown links and from the optional
/// `indexedFiles` frontmatter list; the claimed set is the union.
fn parse_index(content: &str, domain: &str) -> (DomainIndex, Vec<SchemaIssue>) {
    let mut index = DomainIndex {
        exists: true,
        ..Default::default()
    };
    let mut issues = Vec::new();
    let rel_path = format!("context/{domain}/index.md");

    for link in extract_local_links(content) {
        let stem = link
            .rsplit('/')
            .next()
            .unwrap_or(&link)
            .trim_end_matches(".md");
        if !stem.is_empty() && stem != "index" {
            index.listed.insert(stem.to_string());
        }
    }

    if content.starts_with("---") {
        match parse_from_markdown::<IndexFrontmatter>(content, "domain index") {
            Ok(front) => {
                for entry in front.indexed_files {
                    let stem = entry
                        .path
                        .as_deref()
                        .map(|p| p.rsplit('/').next().unwrap_or(p).trim_end_matches(".md"))
                        .or_else(|| {
                            entry
                                .id
                                .as_deref()
                                .map(|id| id.rsplit('/').next().unwrap_or(id))
                        })
                        .map(str::to_string);

                    match stem {
                        Some(stem) if !stem.is_empty() => {
                            index.listed.insert(stem);
                        }
                        _ => issues.push(SchemaIssue::for_field(
                            &rel_path,
                            "indexedFiles",
                            "entry has neither a path nor an id",
                        )),
                    }
                }
            }
            Err(err) => issues.push(SchemaIssue::new(&rel_path, format!("{err:#}"))),
        }
    }

    (index, issues)
}
