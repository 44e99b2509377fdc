use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::SchemaIssue;
use crate::models::constants::MAX_ESTIMATED_TOKENS;
use crate::validation::validate_file_id;

/// How a context file participates in catalog assembly.
///
/// Ordering matters: catalog listings sort `Always` entries before
/// `Conditional` before `OnDemand`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LoadingStrategy {
    /// Loaded for every task touching the domain.
    #[serde(rename = "always")]
    Always,

    /// Loaded when detection signals match the file's tags or keywords.
    #[serde(rename = "conditional")]
    Conditional,

    /// Loaded only on an explicit request.
    #[serde(rename = "onDemand", alias = "on-demand")]
    OnDemand,
}

impl std::fmt::Display for LoadingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadingStrategy::Always => write!(f, "always"),
            LoadingStrategy::Conditional => write!(f, "conditional"),
            LoadingStrategy::OnDemand => write!(f, "onDemand"),
        }
    }
}

/// Editorial category of a context file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Reference,
    Guide,
    Checklist,
    Pattern,
    Framework,
    Detection,
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileType::Reference => write!(f, "reference"),
            FileType::Guide => write!(f, "guide"),
            FileType::Checklist => write!(f, "checklist"),
            FileType::Pattern => write!(f, "pattern"),
            FileType::Framework => write!(f, "framework"),
            FileType::Detection => write!(f, "detection"),
        }
    }
}

/// One declared section of a context file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    #[serde(rename = "estimatedTokens")]
    pub estimated_tokens: u32,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Declared metadata of one knowledge file, parsed from YAML frontmatter.
///
/// Frontmatter keys are camelCase on disk (`estimatedTokens`,
/// `loadingStrategy`, `lastUpdated`). Catalog decisions run entirely on this
/// metadata; the file body is only read at materialization time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextFile {
    /// Stable id of the form `domain/stem`.
    pub id: String,
    /// Owning domain; must match the containing directory.
    pub domain: String,
    pub title: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    #[serde(rename = "estimatedTokens")]
    pub estimated_tokens: u32,
    #[serde(rename = "loadingStrategy")]
    pub loading_strategy: LoadingStrategy,
    /// Semver string; validated separately so one bad field stays one issue.
    pub version: String,
    #[serde(rename = "lastUpdated")]
    pub last_updated: NaiveDate,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Ids of files in other domains worth co-loading with this one.
    #[serde(rename = "crossDomainTriggers", default)]
    pub cross_domain_triggers: Vec<String>,
    /// Skill this file was distilled from, when known.
    #[serde(rename = "sourceSkill", default)]
    pub source_skill: Option<String>,
}

impl ContextFile {
    /// File name part of the id.
    pub fn stem(&self) -> &str {
        self.id.split_once('/').map(|(_, s)| s).unwrap_or(&self.id)
    }

    /// Sum of declared per-section estimates.
    pub fn sections_total(&self) -> u32 {
        self.sections.iter().map(|s| s.estimated_tokens).sum()
    }

    /// Look up a declared section by name.
    pub fn declared_section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Field-level checks that go beyond what deserialization enforces.
    ///
    /// `stem` is the on-disk file name without extension; `expected_domain`
    /// is the containing directory. Every problem becomes one issue; none of
    /// them stops the scan.
    pub fn schema_issues(
        &self,
        rel_path: &str,
        expected_domain: &str,
        stem: &str,
    ) -> Vec<SchemaIssue> {
        let mut issues = Vec::new();

        if self.estimated_tokens == 0 {
            issues.push(SchemaIssue::for_field(
                rel_path,
                "estimatedTokens",
                "must be greater than zero",
            ));
        } else if self.estimated_tokens >= MAX_ESTIMATED_TOKENS {
            issues.push(SchemaIssue::for_field(
                rel_path,
                "estimatedTokens",
                format!(
                    "{} exceeds the {MAX_ESTIMATED_TOKENS} sanity bound; split the file",
                    self.estimated_tokens
                ),
            ));
        }

        if self.domain != expected_domain {
            issues.push(SchemaIssue::for_field(
                rel_path,
                "domain",
                format!(
                    "declares domain '{}' but lives in '{expected_domain}/'",
                    self.domain
                ),
            ));
        }

        let expected_id = format!("{expected_domain}/{stem}");
        if self.id != expected_id {
            issues.push(SchemaIssue::for_field(
                rel_path,
                "id",
                format!("'{}' does not match its location '{expected_id}'", self.id),
            ));
        }

        if semver::Version::parse(&self.version).is_err() {
            issues.push(SchemaIssue::for_field(
                rel_path,
                "version",
                format!("'{}' is not a valid semver version", self.version),
            ));
        }

        if self.sections.is_empty() {
            issues.push(SchemaIssue::for_field(
                rel_path,
                "sections",
                "at least one section must be declared",
            ));
        }

        for trigger in &self.cross_domain_triggers {
            if validate_file_id(trigger).is_err() {
                issues.push(SchemaIssue::for_field(
                    rel_path,
                    "crossDomainTriggers",
                    format!("'{trigger}' is not a domain/file id"),
                ));
            }
        }

        issues
    }
}
