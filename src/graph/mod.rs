//! The immutable component graph a scan produces.
//!
//! Every map is BTree-backed so that two scans of an unchanged tree produce
//! byte-identical serialized graphs. The graph owns plain data only; queries
//! and validation borrow it freely.

pub mod nodes;

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::agent::AgentConfig;
use crate::models::component::{Command, Component, Reference, Skill};
use crate::models::context_file::ContextFile;
use crate::models::cross_domain::TriggerRule;
use crate::models::hooks::HookScript;
use nodes::{DomainNode, HookInventory};

/// Entity counts for dashboards.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GraphCounts {
    pub domains: usize,
    pub files: usize,
    pub skills: usize,
    pub agents: usize,
    pub commands: usize,
    pub hook_scripts: usize,
    pub mcps: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentGraph {
    domains: BTreeMap<String, DomainNode>,
    skills: BTreeMap<String, Skill>,
    agents: BTreeMap<String, AgentConfig>,
    commands: BTreeMap<String, Command>,
    hooks: HookInventory,
    mcps: BTreeSet<String>,
    cross_domain: Vec<TriggerRule>,
    /// Union-view hook components, derived from the inventory.
    #[serde(skip)]
    hook_components: Vec<HookScript>,
}

impl ComponentGraph {
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        domains: BTreeMap<String, DomainNode>,
        skills: BTreeMap<String, Skill>,
        agents: BTreeMap<String, AgentConfig>,
        commands: BTreeMap<String, Command>,
        hooks: HookInventory,
        mcps: BTreeSet<String>,
        cross_domain: Vec<TriggerRule>,
    ) -> Self {
        let hook_components = hooks
            .scripts
            .iter()
            .map(|name| HookScript {
                name: name.clone(),
                events: hooks
                    .registered
                    .get(name)
                    .map(|events| events.iter().cloned().collect())
                    .unwrap_or_default(),
            })
            .collect();

        Self {
            domains,
            skills,
            agents,
            commands,
            hooks,
            mcps,
            cross_domain,
            hook_components,
        }
    }

    pub fn domain(&self, name: &str) -> Option<&DomainNode> {
        self.domains.get(name)
    }

    pub fn domains(&self) -> impl Iterator<Item = &DomainNode> {
        self.domains.values()
    }

    pub fn domain_names(&self) -> Vec<&str> {
        self.domains.keys().map(String::as_str).collect()
    }

    /// True when the domain exists and holds at least one content file.
    pub fn has_nonempty_domain(&self, name: &str) -> bool {
        self.domains.get(name).is_some_and(|d| !d.is_empty())
    }

    /// Look up a context file by `domain/stem` id.
    pub fn file(&self, id: &str) -> Option<&ContextFile> {
        let (domain, stem) = id.split_once('/')?;
        self.domains.get(domain)?.files.get(stem)
    }

    /// All context files across domains, in (domain, stem) order.
    pub fn files(&self) -> impl Iterator<Item = &ContextFile> {
        self.domains.values().flat_map(|d| d.files.values())
    }

    pub fn skill(&self, name: &str) -> Option<&Skill> {
        self.skills.get(name)
    }

    pub fn skills(&self) -> impl Iterator<Item = &Skill> {
        self.skills.values()
    }

    pub fn agents(&self) -> impl Iterator<Item = &AgentConfig> {
        self.agents.values()
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    pub fn hooks(&self) -> &HookInventory {
        &self.hooks
    }

    pub fn has_mcp(&self, name: &str) -> bool {
        self.mcps.contains(name)
    }

    pub fn mcps(&self) -> &BTreeSet<String> {
        &self.mcps
    }

    pub fn cross_domain_rules(&self) -> &[TriggerRule] {
        &self.cross_domain
    }

    /// Every component as the tagged union, in a fixed kind-then-name order.
    pub fn components(&self) -> Vec<Component<'_>> {
        let mut all: Vec<Component<'_>> = Vec::new();
        all.extend(self.skills.values().map(Component::Skill));
        all.extend(self.agents.values().map(Component::Agent));
        all.extend(self.commands.values().map(Component::Command));
        all.extend(self.hook_components.iter().map(Component::Hook));
        all
    }

    /// Every declared reference edge, sorted for stable reports.
    ///
    /// Assembly goes through the capability accessors, so a component kind
    /// that cannot declare a reference type simply contributes nothing.
    pub fn declared_references(&self) -> Vec<Reference> {
        let mut refs: Vec<Reference> = self
            .components()
            .iter()
            .flat_map(|c| c.references())
            .collect();
        refs.sort();
        refs
    }

    pub fn counts(&self) -> GraphCounts {
        GraphCounts {
            domains: self.domains.len(),
            files: self.files().count(),
            skills: self.skills.len(),
            agents: self.agents.len(),
            commands: self.commands.len(),
            hook_scripts: self.hooks.scripts.len(),
            mcps: self.mcps.len(),
        }
    }
}
