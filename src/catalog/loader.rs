//! Budget-tracked content loading.
//!
//! Catalog queries are free; actual content goes through a [`ContextLoader`]
//! that charges every request against its budget before touching disk. A
//! request that would overrun fails whole and loads nothing.

use std::path::PathBuf;

use crate::catalog::entry::FileRef;
use crate::errors::LoadError;
use crate::fs::plugin_dir::PluginDir;
use crate::graph::ComponentGraph;
use crate::models::constants::DEFAULT_MAX_FILES;
use crate::models::context_file::ContextFile;
use crate::parser::frontmatter::extract_body;
use crate::parser::markdown::{find_section, split_sections};

/// Limits for one logical loading invocation.
#[derive(Debug, Clone, Copy)]
pub struct Budget {
    pub max_files: usize,
    /// No token cap unless the caller supplies one.
    pub max_tokens: Option<u32>,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            max_tokens: None,
        }
    }
}

/// Loads file and section content under a budget.
///
/// State is scoped to this value: two loaders never share counters, and a
/// failed call leaves the counters untouched. Charges use declared token
/// estimates; measured-vs-declared discrepancies are drift findings, not
/// loader concerns.
pub struct ContextLoader<'a> {
    dir: &'a PluginDir,
    graph: &'a ComponentGraph,
    budget: Budget,
    files_loaded: usize,
    tokens_loaded: u32,
}

impl<'a> ContextLoader<'a> {
    pub fn new(dir: &'a PluginDir, graph: &'a ComponentGraph) -> Self {
        Self::with_budget(dir, graph, Budget::default())
    }

    pub fn with_budget(dir: &'a PluginDir, graph: &'a ComponentGraph, budget: Budget) -> Self {
        Self {
            dir,
            graph,
            budget,
            files_loaded: 0,
            tokens_loaded: 0,
        }
    }

    pub fn files_loaded(&self) -> usize {
        self.files_loaded
    }

    pub fn tokens_loaded(&self) -> u32 {
        self.tokens_loaded
    }

    /// Load the full body of a previously cataloged file.
    pub fn materialize(&mut self, reference: &FileRef) -> Result<String, LoadError> {
        let file = self.lookup(reference)?;
        let cost = file.estimated_tokens;
        self.check_budget(&reference.id, cost)?;

        let body = self.read_body(reference)?;
        self.commit(cost);
        Ok(body)
    }

    /// Load only the named sections of a previously cataloged file.
    ///
    /// Every name must be declared in the file's metadata; the charge is the
    /// sum of the named sections' declared estimates.
    pub fn materialize_sections(
        &mut self,
        reference: &FileRef,
        section_names: &[String],
    ) -> Result<String, LoadError> {
        let file = self.lookup(reference)?;

        let mut cost = 0u32;
        for name in section_names {
            let section =
                file.declared_section(name)
                    .ok_or_else(|| LoadError::SectionNotFound {
                        id: reference.id.clone(),
                        section: name.clone(),
                    })?;
            cost += section.estimated_tokens;
        }
        self.check_budget(&reference.id, cost)?;

        let body = self.read_body(reference)?;
        let sections = split_sections(&body);

        let mut parts = Vec::with_capacity(section_names.len());
        for name in section_names {
            match find_section(&sections, name) {
                Some(section) => {
                    let hashes = "#".repeat(section.level as usize);
                    parts.push(format!("{hashes} {}\n{}", section.title, section.content));
                }
                None => {
                    // Declared in metadata but absent from the body; the
                    // mismatch belongs to drift reporting, not this call.
                    return Err(LoadError::SectionNotFound {
                        id: reference.id.clone(),
                        section: name.clone(),
                    });
                }
            }
        }

        self.commit(cost);
        Ok(parts.join("\n\n"))
    }

    fn lookup(&self, reference: &FileRef) -> Result<&'a ContextFile, LoadError> {
        self.graph
            .file(&reference.id)
            .ok_or_else(|| LoadError::FileNotFound {
                path: self.path_of(reference),
            })
    }

    fn path_of(&self, reference: &FileRef) -> PathBuf {
        self.dir
            .file_path(&reference.id)
            .unwrap_or_else(|| PathBuf::from(&reference.id))
    }

    fn check_budget(&self, id: &str, cost: u32) -> Result<(), LoadError> {
        if self.files_loaded + 1 > self.budget.max_files {
            return Err(LoadError::FileBudgetExceeded {
                id: id.to_string(),
                max_files: self.budget.max_files,
            });
        }

        if let Some(max_tokens) = self.budget.max_tokens {
            let remaining = max_tokens.saturating_sub(self.tokens_loaded);
            if cost > remaining {
                return Err(LoadError::TokenBudgetExceeded {
                    id: id.to_string(),
                    requested: cost,
                    remaining,
                    max_tokens,
                });
            }
        }

        Ok(())
    }

    fn commit(&mut self, cost: u32) {
        self.files_loaded += 1;
        self.tokens_loaded += cost;
    }

    fn read_body(&self, reference: &FileRef) -> Result<String, LoadError> {
        let path = self.path_of(reference);
        let content = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::FileNotFound { path: path.clone() }
            } else {
                LoadError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        Ok(extract_body(&content))
    }
}
