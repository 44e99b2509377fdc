//! The component union and the references components declare.
//!
//! Callers never match on a component's variant to decide what it can
//! reference; they ask through the capability accessors. A variant without a
//! capability answers with the empty list, so adding a component kind never
//! ripples through the validators.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::agent::AgentConfig;
use crate::models::hooks::HookScript;

/// `SKILL.md` frontmatter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Context domains backing this skill.
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: Option<NaiveDate>,
}

/// `commands/<name>.md` frontmatter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Command {
    /// Filled from the file name when the frontmatter omits it.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub domains: Vec<String>,
}

/// Kind tag used in reports and reference grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Skill,
    Agent,
    Command,
    Hook,
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentKind::Skill => write!(f, "skill"),
            ComponentKind::Agent => write!(f, "agent"),
            ComponentKind::Command => write!(f, "command"),
            ComponentKind::Hook => write!(f, "hook"),
        }
    }
}

/// What a declared reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Domain,
    Skill,
    Mcp,
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetKind::Domain => write!(f, "domain"),
            TargetKind::Skill => write!(f, "skill"),
            TargetKind::Mcp => write!(f, "mcp"),
        }
    }
}

/// One declared edge from a component to a named target.
///
/// Targets are names, not resolved handles; whether the name resolves is
/// exactly what integrity validation determines.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Reference {
    pub source_kind: ComponentKind,
    pub source: String,
    pub target_kind: TargetKind,
    pub target: String,
}

/// A borrowed view of any plugin component.
#[derive(Debug, Clone, Copy)]
pub enum Component<'a> {
    Skill(&'a Skill),
    Agent(&'a AgentConfig),
    Command(&'a Command),
    Hook(&'a HookScript),
}

impl<'a> Component<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            Component::Skill(s) => &s.name,
            Component::Agent(a) => &a.name,
            Component::Command(c) => &c.name,
            Component::Hook(h) => &h.name,
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Skill(_) => ComponentKind::Skill,
            Component::Agent(_) => ComponentKind::Agent,
            Component::Command(_) => ComponentKind::Command,
            Component::Hook(_) => ComponentKind::Hook,
        }
    }

    /// Skills this component requires.
    pub fn skill_refs(&self) -> Vec<&'a str> {
        match self {
            Component::Agent(a) => a.skill_names(),
            Component::Command(c) => c.skills.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Context domains this component draws on.
    pub fn domain_refs(&self) -> Vec<&'a str> {
        match self {
            Component::Skill(s) => s.domains.iter().map(String::as_str).collect(),
            Component::Agent(a) => a.domain_names().iter().map(String::as_str).collect(),
            Component::Command(c) => c.domains.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// MCP servers this component is allowed to call.
    pub fn mcp_refs(&self) -> Vec<&'a str> {
        match self {
            Component::Agent(a) => a.allowed_mcps.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// All declared outgoing references, as typed edges.
    pub fn references(&self) -> Vec<Reference> {
        let mut refs = Vec::new();
        let (source_kind, source) = (self.kind(), self.id().to_string());

        for skill in self.skill_refs() {
            refs.push(Reference {
                source_kind,
                source: source.clone(),
                target_kind: TargetKind::Skill,
                target: skill.to_string(),
            });
        }
        for domain in self.domain_refs() {
            refs.push(Reference {
                source_kind,
                source: source.clone(),
                target_kind: TargetKind::Domain,
                target: domain.to_string(),
            });
        }
        for mcp in self.mcp_refs() {
            refs.push(Reference {
                source_kind,
                source: source.clone(),
                target_kind: TargetKind::Mcp,
                target: mcp.to_string(),
            });
        }

        refs
    }
}
