//! The eight relationship checks and the unscored suggestions.
//!
//! Each check is a pure function of the graph returning its own sub-report;
//! nothing here mutates shared state, so the checks run on a scoped pool
//! and merge in fixed order.

use std::collections::BTreeMap;

use crate::graph::ComponentGraph;
use crate::models::constants::TAG_SUGGESTION_MIN_FILES;
use crate::validate::report::{Relation, RelationReport, Severity, Violation};

/// Run every relation check, in [`Relation::ALL`] order.
pub fn run_all(graph: &ComponentGraph) -> Vec<RelationReport> {
    std::thread::scope(|scope| {
        let handles = [
            scope.spawn(|| check_skill_domain(graph)),
            scope.spawn(|| check_agent_skill(graph)),
            scope.spawn(|| check_agent_mcp(graph)),
            scope.spawn(|| check_command_skill(graph)),
            scope.spawn(|| check_command_domain(graph)),
            scope.spawn(|| check_file_index(graph)),
            scope.spawn(|| check_hook_registry(graph)),
            scope.spawn(|| check_hook_docs(graph)),
        ];
        handles
            .into_iter()
            .map(|h| h.join().expect("relation check panicked"))
            .collect()
    })
}

/// Skill -> Domain: every declared domain exists and holds content.
pub fn check_skill_domain(graph: &ComponentGraph) -> RelationReport {
    let mut report = RelationReport::new(Relation::SkillDomain);

    for skill in graph.skills() {
        for domain in &skill.domains {
            if graph.has_nonempty_domain(domain) {
                report.record_valid();
            } else {
                let detail = if graph.domain(domain).is_some() {
                    "domain exists but holds no content files"
                } else {
                    "domain does not exist"
                };
                report.record(Severity::Critical, &skill.name, domain, detail.to_string());
            }
        }
    }

    report.finish()
}

/// Agent -> Skill: every declared skill has a directory with a SKILL.md.
pub fn check_agent_skill(graph: &ComponentGraph) -> RelationReport {
    let mut report = RelationReport::new(Relation::AgentSkill);

    for agent in graph.agents() {
        for skill in agent.skill_names() {
            if graph.skill(skill).is_some() {
                report.record_valid();
            } else {
                report.record(
                    Severity::Critical,
                    &agent.name,
                    skill,
                    "skill not found".to_string(),
                );
            }
        }
    }

    report.finish()
}

/// Agent -> Mcp: every allowed MCP has a definition.
pub fn check_agent_mcp(graph: &ComponentGraph) -> RelationReport {
    let mut report = RelationReport::new(Relation::AgentMcp);

    for agent in graph.agents() {
        for mcp in &agent.allowed_mcps {
            if graph.has_mcp(mcp) {
                report.record_valid();
            } else {
                report.record(
                    Severity::Critical,
                    &agent.name,
                    mcp,
                    "mcp definition not found".to_string(),
                );
            }
        }
    }

    report.finish()
}

/// Command -> Skill.
pub fn check_command_skill(graph: &ComponentGraph) -> RelationReport {
    let mut report = RelationReport::new(Relation::CommandSkill);

    for command in graph.commands() {
        for skill in &command.skills {
            if graph.skill(skill).is_some() {
                report.record_valid();
            } else {
                report.record(
                    Severity::Critical,
                    &command.name,
                    skill,
                    "skill not found".to_string(),
                );
            }
        }
    }

    report.finish()
}

/// Command -> Domain.
pub fn check_command_domain(graph: &ComponentGraph) -> RelationReport {
    let mut report = RelationReport::new(Relation::CommandDomain);

    for command in graph.commands() {
        for domain in &command.domains {
            if graph.has_nonempty_domain(domain) {
                report.record_valid();
            } else {
                report.record(
                    Severity::Critical,
                    &command.name,
                    domain,
                    "domain missing or empty".to_string(),
                );
            }
        }
    }

    report.finish()
}

/// File <-> DomainIndex, both directions: a file on disk must be listed
/// (else it is an orphan), and a listed name must exist (else a ghost).
pub fn check_file_index(graph: &ComponentGraph) -> RelationReport {
    let mut report = RelationReport::new(Relation::FileIndex);

    for domain in graph.domains() {
        for stem in domain.files.keys() {
            if domain.index.listed.contains(stem) {
                report.record_valid();
            } else {
                let detail = if domain.index.exists {
                    "file exists but is missing from the domain index (orphan)"
                } else {
                    "domain has no index.md; file is unlisted (orphan)"
                };
                report.record(
                    Severity::Warning,
                    &format!("{}/{stem}", domain.name),
                    "index.md",
                    detail.to_string(),
                );
            }
        }

        for stem in &domain.index.listed {
            if !domain.files.contains_key(stem) {
                report.record(
                    Severity::Warning,
                    &format!("{}/index.md", domain.name),
                    stem,
                    "index entry points to a missing file (ghost)".to_string(),
                );
            }
        }
    }

    report.finish()
}

/// Hook <-> Registry, both directions: scripts on disk must be registered,
/// and every registration must name a script on disk.
pub fn check_hook_registry(graph: &ComponentGraph) -> RelationReport {
    let mut report = RelationReport::new(Relation::HookRegistry);
    let hooks = graph.hooks();

    for script in &hooks.scripts {
        if hooks.registered.contains_key(script) {
            report.record_valid();
        } else {
            report.record(
                Severity::Warning,
                script,
                "hooks.json",
                "script exists on disk but is not registered".to_string(),
            );
        }
    }

    for script in hooks.dangling_registrations() {
        report.record(
            Severity::Critical,
            "hooks.json",
            script,
            "registration points to a script missing from disk".to_string(),
        );
    }

    report.finish()
}

/// Hook -> Docs, both directions: active scripts must appear in the guide,
/// and guide mentions must correspond to scripts on disk.
pub fn check_hook_docs(graph: &ComponentGraph) -> RelationReport {
    let mut report = RelationReport::new(Relation::HookDocs);
    let hooks = graph.hooks();

    for script in hooks.active_scripts() {
        if hooks.documented.contains(script) {
            report.record_valid();
        } else {
            let detail = if hooks.guide_exists {
                "registered script is not documented in the hooks guide"
            } else {
                "no hooks guide exists to document this script"
            };
            report.record(Severity::Warning, script, "HOOKS_GUIDE.md", detail.to_string());
        }
    }

    for name in &hooks.documented {
        if !hooks.scripts.contains(name) {
            report.record(
                Severity::Warning,
                "HOOKS_GUIDE.md",
                name,
                "guide documents a script that does not exist".to_string(),
            );
        }
    }

    report.finish()
}

/// Unscored, lower-confidence advice carried alongside the report.
pub fn suggestions(graph: &ComponentGraph) -> Vec<Violation> {
    let mut found = Vec::new();

    // Technologies tagged across many files with no dedicated domain yet.
    let mut tag_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for file in graph.files() {
        for tag in &file.tags {
            *tag_counts.entry(tag.as_str()).or_default() += 1;
        }
    }
    for (tag, count) in tag_counts {
        if count >= TAG_SUGGESTION_MIN_FILES && graph.domain(tag).is_none() {
            found.push(Violation {
                relation: Relation::SkillDomain,
                severity: Severity::Info,
                source: "tags".to_string(),
                target: tag.to_string(),
                message: format!(
                    "'{tag}' is tagged across {count} files but has no dedicated domain"
                ),
            });
        }
    }

    // Matrix rules that cannot resolve, and per-file trigger hygiene.
    for rule in graph.cross_domain_rules() {
        if graph.file(&rule.load).is_none() {
            found.push(Violation {
                relation: Relation::FileIndex,
                severity: Severity::Info,
                source: "cross_domain.md".to_string(),
                target: rule.load.clone(),
                message: format!("trigger '{}' routes to a missing file", rule.when),
            });
        }
    }

    for file in graph.files() {
        for target in &file.cross_domain_triggers {
            let Some(target_file) = graph.file(target) else {
                continue;
            };
            if target_file.domain == file.domain {
                found.push(Violation {
                    relation: Relation::FileIndex,
                    severity: Severity::Info,
                    source: file.id.clone(),
                    target: target.clone(),
                    message: "cross-domain trigger stays inside its own domain".to_string(),
                });
            } else if target_file.cross_domain_triggers.contains(&file.id) && file.id < target_file.id
            {
                // Report each two-step cycle once, from the lower id.
                found.push(Violation {
                    relation: Relation::FileIndex,
                    severity: Severity::Info,
                    source: file.id.clone(),
                    target: target.clone(),
                    message: "cross-domain triggers form a two-step cycle".to_string(),
                });
            }
        }
    }

    // Agents are expected to carry a paired personality markdown file.
    for agent in graph.agents() {
        if !agent.has_personality {
            found.push(Violation {
                relation: Relation::AgentSkill,
                severity: Severity::Info,
                source: agent.name.clone(),
                target: format!("{}.md", agent.name),
                message: "agent config has no paired personality file".to_string(),
            });
        }
    }

    found
}
