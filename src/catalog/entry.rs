//! Metadata-only projections returned by catalog queries.

use serde::Serialize;

use crate::models::context_file::{ContextFile, FileType, LoadingStrategy};

/// Stable handle to a context file, usable for materialization after the
/// catalog phase. Carries the `domain/stem` id and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct FileRef {
    pub id: String,
}

impl FileRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Declared shape of one section, without its content.
#[derive(Debug, Clone, Serialize)]
pub struct SectionSummary {
    pub name: String,
    #[serde(rename = "estimatedTokens")]
    pub estimated_tokens: u32,
}

/// What a catalog query returns: everything needed to decide whether a file
/// is worth loading, at zero content cost.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub reference: FileRef,
    pub title: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    #[serde(rename = "loadingStrategy")]
    pub loading_strategy: LoadingStrategy,
    #[serde(rename = "estimatedTokens")]
    pub estimated_tokens: u32,
    pub tags: Vec<String>,
    pub sections: Vec<SectionSummary>,
}

impl CatalogEntry {
    pub fn from_file(file: &ContextFile) -> Self {
        Self {
            reference: FileRef::new(&file.id),
            title: file.title.clone(),
            file_type: file.file_type,
            loading_strategy: file.loading_strategy,
            estimated_tokens: file.estimated_tokens,
            tags: file.tags.clone(),
            sections: file
                .sections
                .iter()
                .map(|s| SectionSummary {
                    name: s.name.clone(),
                    estimated_tokens: s.estimated_tokens,
                })
                .collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.reference.id
    }
}
