//! Metadata-only catalog queries over the component graph.
//!
//! Everything here answers from the graph without touching disk; content
//! loading lives in [`loader`], behind its budget.

pub mod entry;
pub mod loader;
pub mod matcher;

use serde::Serialize;
use tracing::debug;

pub use entry::{CatalogEntry, FileRef, SectionSummary};
pub use loader::{Budget, ContextLoader};

use crate::graph::ComponentGraph;
use crate::models::context_file::LoadingStrategy;

/// One row of a parsed domain index, with its resolution state.
#[derive(Debug, Clone, Serialize)]
pub struct DomainIndexEntry {
    pub stem: String,
    /// Whether the claimed file exists on disk.
    pub exists: bool,
    #[serde(rename = "estimatedTokens")]
    pub estimated_tokens: Option<u32>,
}

/// Parsed state of one domain's index, as seen by callers.
#[derive(Debug, Clone, Serialize)]
pub struct DomainIndexListing {
    pub domain: String,
    pub index_exists: bool,
    pub entries: Vec<DomainIndexEntry>,
    /// Files on disk the index fails to claim.
    pub unlisted: Vec<String>,
}

/// Read-only query surface over an indexed graph.
pub struct Catalog<'a> {
    graph: &'a ComponentGraph,
}

impl<'a> Catalog<'a> {
    pub fn new(graph: &'a ComponentGraph) -> Self {
        Self { graph }
    }

    /// Every file in the domain as a metadata entry, ordered by loading
    /// strategy (always > conditional > onDemand), then id.
    pub fn catalog(&self, domain: &str) -> Vec<CatalogEntry> {
        let Some(node) = self.graph.domain(domain) else {
            return Vec::new();
        };

        let mut entries: Vec<CatalogEntry> =
            node.files.values().map(CatalogEntry::from_file).collect();
        entries.sort_by(|a, b| {
            a.loading_strategy
                .cmp(&b.loading_strategy)
                .then_with(|| a.reference.cmp(&b.reference))
        });
        entries
    }

    /// Files the domain wants loaded unconditionally.
    pub fn always_load(&self, domain: &str) -> Vec<CatalogEntry> {
        self.catalog(domain)
            .into_iter()
            .filter(|e| e.loading_strategy == LoadingStrategy::Always)
            .collect()
    }

    /// Conditional-strategy files whose tags or section keywords match the
    /// supplied detection signals, best match first.
    pub fn conditional(&self, domain: &str, signals: &[String]) -> Vec<CatalogEntry> {
        let Some(node) = self.graph.domain(domain) else {
            return Vec::new();
        };

        let joined = signals.join(" ");
        let signal_text = matcher::normalize_text(&joined);
        let signal_words = matcher::split_into_words(&joined);

        let mut scored: Vec<(f32, CatalogEntry)> = node
            .files
            .values()
            .filter(|f| f.loading_strategy == LoadingStrategy::Conditional)
            .filter_map(|f| {
                let mut terms: Vec<&str> = f.tags.iter().map(String::as_str).collect();
                for section in &f.sections {
                    terms.extend(section.keywords.iter().map(String::as_str));
                }

                let score = matcher::score_terms(&signal_text, &signal_words, &terms);
                (score >= 1.0).then(|| (score, CatalogEntry::from_file(f)))
            })
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.1.reference.cmp(&b.1.reference))
        });
        scored.into_iter().map(|(_, entry)| entry).collect()
    }

    /// Files from other domains the trigger matrix routes to for the
    /// supplied trigger phrases. Rules whose target cannot be resolved are
    /// skipped; missing targets are a validation concern.
    pub fn cross_domain(&self, domain: &str, triggers: &[String]) -> Vec<CatalogEntry> {
        let joined = triggers.join(" ");
        let signal_text = matcher::normalize_text(&joined);

        let mut entries: Vec<CatalogEntry> = Vec::new();
        for rule in self.graph.cross_domain_rules() {
            if !matcher::phrase_matches(&signal_text, &rule.when) {
                continue;
            }
            if rule.target_domain() == Some(domain) {
                continue;
            }
            match self.graph.file(&rule.load) {
                Some(file) => {
                    if !entries.iter().any(|e| e.id() == file.id) {
                        entries.push(CatalogEntry::from_file(file));
                    }
                }
                None => debug!(target = %rule.load, "skipping unresolvable cross-domain target"),
            }
        }

        entries.sort_by(|a, b| a.reference.cmp(&b.reference));
        entries
    }

    /// The parsed domain index, with each claim resolved against disk state.
    pub fn domain_index(&self, domain: &str) -> Option<DomainIndexListing> {
        let node = self.graph.domain(domain)?;

        let entries = node
            .index
            .listed
            .iter()
            .map(|stem| DomainIndexEntry {
                stem: stem.clone(),
                exists: node.files.contains_key(stem),
                estimated_tokens: node.files.get(stem).map(|f| f.estimated_tokens),
            })
            .collect();

        let unlisted = node
            .files
            .keys()
            .filter(|stem| !node.index.listed.contains(*stem))
            .cloned()
            .collect();

        Some(DomainIndexListing {
            domain: node.name.clone(),
            index_exists: node.index.exists,
            entries,
            unlisted,
        })
    }
}
