//! Error types shared across the weft library.
//!
//! A scan collects [`SchemaIssue`]s instead of aborting on the first bad
//! file; only content loading has hard failure modes, captured by
//! [`LoadError`]. Integrity violations and drift findings are report values,
//! not errors.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A metadata problem found while parsing a single file.
///
/// One malformed file never hides the rest of the tree: issues are
/// accumulated during the scan and surfaced in reports.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SchemaIssue {
    /// Path relative to the plugin root.
    pub path: String,
    /// Offending frontmatter or JSON field, when the problem is field-level.
    pub field: Option<String>,
    pub message: String,
}

impl SchemaIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            field: None,
            message: message.into(),
        }
    }

    pub fn for_field(
        path: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            field: Some(field.into()),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {} ({})", self.path, self.message, field),
            None => write!(f, "{}: {}", self.path, self.message),
        }
    }
}

/// Failure of a single budget-tracked load call.
///
/// Each variant is fatal to the call that produced it and to nothing else;
/// the loader state is unchanged when an error is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file budget exhausted: loading '{id}' would exceed the limit of {max_files} files")]
    FileBudgetExceeded { id: String, max_files: usize },

    #[error(
        "token budget exhausted: '{id}' declares {requested} tokens but only {remaining} of {max_tokens} remain"
    )]
    TokenBudgetExceeded {
        id: String,
        requested: u32,
        remaining: u32,
        max_tokens: u32,
    },

    #[error("no section named '{section}' declared in '{id}'")]
    SectionNotFound { id: String, section: String },

    #[error("content file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
