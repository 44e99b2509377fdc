//! Cross-domain trigger matrix parsed from `context/cross_domain.md`.

use serde::{Deserialize, Serialize};

/// One routing rule: when a signal phrase is active, co-load a file from
/// another domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerRule {
    /// Signal phrase that activates the rule.
    pub when: String,
    /// Target file id (`domain/file`).
    pub load: String,
}

impl TriggerRule {
    pub fn target_domain(&self) -> Option<&str> {
        self.load.split_once('/').map(|(domain, _)| domain)
    }
}

/// Frontmatter shape of the matrix file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrossDomainMatrix {
    #[serde(default)]
    pub triggers: Vec<TriggerRule>,
}
