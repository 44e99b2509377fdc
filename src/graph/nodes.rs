//! Node types of the component graph.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::context_file::ContextFile;

/// Parsed state of one domain's `index.md`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DomainIndex {
    /// File stems the index claims, from markdown links and the optional
    /// `indexedFiles` frontmatter list.
    pub listed: BTreeSet<String>,
    pub exists: bool,
}

/// One context domain: its content files plus its index.
#[derive(Debug, Clone, Serialize)]
pub struct DomainNode {
    pub name: String,
    /// File stem to declared metadata, in stem order.
    pub files: BTreeMap<String, ContextFile>,
    pub index: DomainIndex,
}

impl DomainNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: BTreeMap::new(),
            index: DomainIndex::default(),
        }
    }

    /// A domain with no content files cannot satisfy references to it.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn file_ids(&self) -> impl Iterator<Item = &str> {
        self.files.values().map(|f| f.id.as_str())
    }
}

/// Hook scripts, registrations, and documentation as found on disk.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HookInventory {
    /// `*.sh` basenames present in `hooks/`.
    pub scripts: BTreeSet<String>,
    /// Script basename to the events it is registered under.
    pub registered: BTreeMap<String, BTreeSet<String>>,
    /// Basenames mentioned in the hooks guide.
    pub documented: BTreeSet<String>,
    pub guide_exists: bool,
}

impl HookInventory {
    /// Registrations that point at scripts missing from disk.
    pub fn dangling_registrations(&self) -> Vec<&String> {
        self.registered
            .keys()
            .filter(|name| !self.scripts.contains(*name))
            .collect()
    }

    /// Scripts on disk that no registration mentions.
    pub fn unregistered_scripts(&self) -> Vec<&String> {
        self.scripts
            .iter()
            .filter(|name| !self.registered.contains_key(*name))
            .collect()
    }

    /// Scripts that are both on disk and registered.
    pub fn active_scripts(&self) -> Vec<&String> {
        self.scripts
            .iter()
            .filter(|name| self.registered.contains_key(*name))
            .collect()
    }
}
