//! Typed model for `agents/<name>.config.json`.

use serde::{Deserialize, Serialize};

/// One declared skill dependency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRef {
    pub name: String,
}

/// Context wiring block of an agent config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentContext {
    /// Domains the agent draws context from.
    #[serde(default, alias = "primaryDomains")]
    pub domains: Vec<String>,
    /// File ids the agent wants loaded at session start.
    #[serde(rename = "alwaysLoadFiles", default)]
    pub always_load_files: Vec<String>,
}

/// Parsed agent configuration.
///
/// Unknown keys (memory settings and the like) are ignored; the fields of
/// interest are the skill list, the MCP allowlist, and the context domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Filled from the file name when the config omits it.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<SkillRef>,
    #[serde(rename = "allowedMcps", default)]
    pub allowed_mcps: Vec<String>,
    #[serde(default)]
    pub context: AgentContext,
    /// Whether a paired personality markdown file sits beside the config.
    #[serde(skip)]
    pub has_personality: bool,
}

impl AgentConfig {
    pub fn skill_names(&self) -> Vec<&str> {
        self.skills.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn domain_names(&self) -> &[String] {
        &self.context.domains
    }
}
