//! Scanning of skills, agents, commands, hooks, and MCP definitions.

use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

use crate::errors::SchemaIssue;
use crate::fs::plugin_dir::PluginDir;
use crate::graph::nodes::HookInventory;
use crate::models::agent::AgentConfig;
use crate::models::component::{Command, Skill};
use crate::models::constants::KNOWN_HOOK_EVENTS;
use crate::models::cross_domain::{CrossDomainMatrix, TriggerRule};
use crate::models::hooks::{mentioned_scripts, script_basename, HooksFile};
use crate::parser::frontmatter::parse_from_markdown;
use crate::validation::validate_component_name;

/// Parse `context/cross_domain.md` into the trigger matrix.
///
/// An absent matrix file is fine; a malformed one is a single issue.
pub fn scan_cross_domain(dir: &PluginDir) -> (Vec<TriggerRule>, Vec<SchemaIssue>) {
    let path = dir.cross_domain_file();
    let rel_path = "context/cross_domain.md";

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return (Vec::new(), Vec::new()),
    };

    match parse_from_markdown::<CrossDomainMatrix>(&content, "trigger matrix") {
        Ok(matrix) => (matrix.triggers, Vec::new()),
        Err(err) => (
            Vec::new(),
            vec![SchemaIssue::new(rel_path, format!("{err:#}"))],
        ),
    }
}

/// Scan `skills/<name>/SKILL.md` directories.
pub fn scan_skills(dir: &PluginDir) -> (BTreeMap<String, Skill>, Vec<SchemaIssue>) {
    let mut skills = BTreeMap::new();
    let mut issues = Vec::new();

    for (name, path) in sorted_subdirs(&dir.skills_dir()) {
        let rel_path = format!("skills/{name}/SKILL.md");

        if let Err(err) = validate_component_name(&name) {
            issues.push(SchemaIssue::new(format!("skills/{name}"), err.to_string()));
            continue;
        }

        let skill_file = path.join("SKILL.md");
        let content = match std::fs::read_to_string(&skill_file) {
            Ok(content) => content,
            Err(_) => {
                issues.push(SchemaIssue::new(
                    format!("skills/{name}"),
                    "skill directory has no SKILL.md",
                ));
                continue;
            }
        };

        match parse_from_markdown::<Skill>(&content, "skill") {
            Ok(mut skill) => {
                if skill.name.is_empty() {
                    skill.name = name.clone();
                } else if skill.name != name {
                    issues.push(SchemaIssue::for_field(
                        &rel_path,
                        "name",
                        format!("declares '{}' but lives in 'skills/{name}/'", skill.name),
                    ));
                    skill.name = name.clone();
                }
                skills.insert(name, skill);
            }
            Err(err) => {
                warn!(path = rel_path, "schema issue: {err:#}");
                issues.push(SchemaIssue::new(&rel_path, format!("{err:#}")));
            }
        }
    }

    (skills, issues)
}

/// Scan `agents/<name>.config.json` files.
pub fn scan_agents(dir: &PluginDir) -> (BTreeMap<String, AgentConfig>, Vec<SchemaIssue>) {
    let mut agents = BTreeMap::new();
    let mut issues = Vec::new();

    for (file_name, path) in sorted_files(&dir.agents_dir()) {
        let Some(name) = file_name.strip_suffix(".config.json").map(str::to_string) else {
            continue;
        };
        let rel_path = format!("agents/{file_name}");

        if let Err(err) = validate_component_name(&name) {
            issues.push(SchemaIssue::new(&rel_path, err.to_string()));
            continue;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                issues.push(SchemaIssue::new(&rel_path, format!("cannot read file: {err}")));
                continue;
            }
        };

        match serde_json::from_str::<AgentConfig>(&content) {
            Ok(mut config) => {
                if config.name.is_empty() {
                    config.name = name.clone();
                }
                config.has_personality = dir.agents_dir().join(format!("{name}.md")).is_file();
                agents.insert(name, config);
            }
            Err(err) => {
                warn!(path = rel_path, "schema issue: {err}");
                issues.push(SchemaIssue::new(&rel_path, format!("invalid agent config: {err}")));
            }
        }
    }

    (agents, issues)
}

/// Scan `commands/<name>.md` files.
pub fn scan_commands(dir: &PluginDir) -> (BTreeMap<String, Command>, Vec<SchemaIssue>) {
    let mut commands = BTreeMap::new();
    let mut issues = Vec::new();

    for (file_name, path) in sorted_files(&dir.commands_dir()) {
        let Some(name) = file_name.strip_suffix(".md").map(str::to_string) else {
            continue;
        };
        let rel_path = format!("commands/{file_name}");

        if let Err(err) = validate_component_name(&name) {
            issues.push(SchemaIssue::new(&rel_path, err.to_string()));
            continue;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                issues.push(SchemaIssue::new(&rel_path, format!("cannot read file: {err}")));
                continue;
            }
        };

        // A command file without frontmatter declares no references; that
        // is a valid, if inert, command.
        if !content.starts_with("---") {
            debug!(path = rel_path, "command has no frontmatter");
            commands.insert(
                name.clone(),
                Command {
                    name,
                    ..Default::default()
                },
            );
            continue;
        }

        match parse_from_markdown::<Command>(&content, "command") {
            Ok(mut command) => {
                if command.name.is_empty() {
                    command.name = name.clone();
                }
                commands.insert(name, command);
            }
            Err(err) => {
                warn!(path = rel_path, "schema issue: {err:#}");
                issues.push(SchemaIssue::new(&rel_path, format!("{err:#}")));
            }
        }
    }

    (commands, issues)
}

/// Scan the hook registry, the scripts on disk, and the guide.
pub fn scan_hooks(dir: &PluginDir) -> (HookInventory, Vec<SchemaIssue>) {
    let mut inventory = HookInventory::default();
    let mut issues = Vec::new();

    for (file_name, _) in sorted_files(&dir.hooks_dir()) {
        if file_name.ends_with(".sh") {
            inventory.scripts.insert(file_name);
        }
    }

    let registry_path = dir.hooks_file();
    if let Ok(content) = std::fs::read_to_string(&registry_path) {
        match serde_json::from_str::<HooksFile>(&content) {
            Ok(registry) => {
                register_hooks(&registry, &mut inventory, &mut issues);
            }
            Err(err) => {
                issues.push(SchemaIssue::new(
                    "hooks/hooks.json",
                    format!("invalid hook registry: {err}"),
                ));
            }
        }
    }

    if let Ok(guide) = std::fs::read_to_string(dir.hooks_guide()) {
        inventory.guide_exists = true;
        inventory.documented = mentioned_scripts(&guide);
    }

    (inventory, issues)
}

fn register_hooks(
    registry: &HooksFile,
    inventory: &mut HookInventory,
    issues: &mut Vec<SchemaIssue>,
) {
    let mut seen: BTreeSet<(String, String, String)> = BTreeSet::new();

    for (event, groups) in &registry.hooks {
        if !KNOWN_HOOK_EVENTS.contains(&event.as_str()) {
            issues.push(SchemaIssue::for_field(
                "hooks/hooks.json",
                "hooks",
                format!("unknown event '{event}'"),
            ));
            continue;
        }

        for group in groups {
            for command in &group.hooks {
                let Some(basename) = script_basename(&command.command) else {
                    debug!(command = command.command, "registration has no script path");
                    continue;
                };

                let key = (event.clone(), group.matcher.clone(), basename.clone());
                if !seen.insert(key) {
                    issues.push(SchemaIssue::for_field(
                        "hooks/hooks.json",
                        "hooks",
                        format!(
                            "duplicate registration of '{basename}' for event '{event}' (matcher '{}')",
                            group.matcher
                        ),
                    ));
                    continue;
                }

                inventory
                    .registered
                    .entry(basename)
                    .or_default()
                    .insert(event.clone());
            }
        }
    }
}

/// Scan `mcps/*.json` definition stems.
pub fn scan_mcps(dir: &PluginDir) -> (BTreeSet<String>, Vec<SchemaIssue>) {
    let mut mcps = BTreeSet::new();
    let mut issues = Vec::new();

    for (file_name, path) in sorted_files(&dir.mcps_dir()) {
        let Some(name) = file_name.strip_suffix(".json").map(str::to_string) else {
            continue;
        };

        if let Ok(content) = std::fs::read_to_string(&path) {
            if serde_json::from_str::<serde_json::Value>(&content).is_err() {
                issues.push(SchemaIssue::new(
                    format!("mcps/{file_name}"),
                    "definition is not valid JSON",
                ));
            }
        }
        mcps.insert(name);
    }

    (mcps, issues)
}

fn sorted_subdirs(path: &std::path::Path) -> Vec<(String, std::path::PathBuf)> {
    let mut dirs: Vec<(String, std::path::PathBuf)> = std::fs::read_dir(path)
        .map(|entries| {
            entries
                .flatten()
                .filter(|e| e.path().is_dir())
                .filter_map(|e| {
                    e.file_name()
                        .to_str()
                        .map(|name| (name.to_string(), e.path()))
                })
                .collect()
        })
        .unwrap_or_default();
    dirs.sort();
    dirs
}

fn sorted_files(path: &std::path::Path) -> Vec<(String, std::path::PathBuf)> {
    let mut files: Vec<(String, std::path::PathBuf)> = std::fs::read_dir(path)
        .map(|entries| {
            entries
                .flatten()
                .filter(|e| e.path().is_file())
                .filter_map(|e| {
                    e.file_name()
                        .to_str()
                        .map(|name| (name.to_string(), e.path()))
                })
                .collect()
        })
        .unwrap_or_default();
    files.sort();
    files
}
