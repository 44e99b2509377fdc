//! A full plugin workspace for end-to-end runs: three domains, skills,
//! an agent, a command, hooks, and MCP definitions.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use weft::fs::plugin_dir::PluginDir;

pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn prose(tokens: u32) -> String {
    "guidance ".repeat((tokens as usize) * 4 / 9)
}

fn context_file(
    id: &str,
    strategy: &str,
    tags: &[&str],
    source_skill: Option<&str>,
    sections: &[(&str, u32, &[&str])],
) -> String {
    let (domain, stem) = id.split_once('/').unwrap();
    let total: u32 = sections.iter().map(|(_, tokens, _)| tokens).sum();
    let skill_line = source_skill
        .map(|s| format!("sourceSkill: {s}\n"))
        .unwrap_or_default();

    let mut out = format!(
        "---\nid: {id}\ndomain: {domain}\ntitle: {stem}\ntype: guide\n\
         estimatedTokens: {total}\nloadingStrategy: {strategy}\nversion: 1.2.0\n\
         lastUpdated: 2025-07-15\ntags: [{}]\n{skill_line}sections:\n",
        tags.join(", ")
    );
    for (name, tokens, keywords) in sections {
        out.push_str(&format!(
            "  - name: {name}\n    estimatedTokens: {tokens}\n    keywords: [{}]\n",
            keywords.join(", ")
        ));
    }
    out.push_str("---\n");
    for (name, tokens, _) in sections {
        out.push_str(&format!("# {name}\n{}\n", prose(*tokens)));
    }
    out
}

fn index_for(stems: &[&str]) -> String {
    stems
        .iter()
        .map(|stem| format!("- [{stem}]({stem}.md)\n"))
        .collect()
}

pub fn workspace() -> (TempDir, PluginDir) {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write_file(
        root,
        "context/backend/api_patterns.md",
        &context_file(
            "backend/api_patterns",
            "always",
            &["rest", "http"],
            Some("api-design"),
            &[
                ("Overview", 200, &["rest api"]),
                ("Common Issues", 300, &["errors", "debugging"]),
            ],
        ),
    );
    write_file(
        root,
        "context/backend/database_modeling.md",
        &context_file(
            "backend/database_modeling",
            "conditional",
            &["postgres", "sql"],
            None,
            &[
                ("Schema Design", 400, &["migrations", "normalization"]),
                ("Query Tuning", 350, &["slow query", "explain"]),
            ],
        ),
    );
    write_file(
        root,
        "context/backend/queue_patterns.md",
        &context_file(
            "backend/queue_patterns",
            "onDemand",
            &["queues"],
            None,
            &[("Overview", 250, &["background jobs"])],
        ),
    );
    write_file(
        root,
        "context/backend/index.md",
        &index_for(&["api_patterns", "database_modeling", "queue_patterns"]),
    );

    write_file(
        root,
        "context/security/auth_review.md",
        &context_file(
            "security/auth_review",
            "conditional",
            &["auth", "oauth"],
            None,
            &[("Checklist", 300, &["authentication", "tokens"])],
        ),
    );
    write_file(
        root,
        "context/security/index.md",
        &index_for(&["auth_review"]),
    );

    write_file(
        root,
        "context/infra/deploy_runbook.md",
        &context_file(
            "infra/deploy_runbook",
            "onDemand",
            &["deploy"],
            None,
            &[("Runbook", 500, &["rollback", "canary"])],
        ),
    );
    write_file(root, "context/infra/index.md", &index_for(&["deploy_runbook"]));

    write_file(
        root,
        "context/cross_domain.md",
        "---\ntriggers:\n\
         \x20 - when: auth code\n    load: security/auth_review\n\
         \x20 - when: deployment failure\n    load: infra/deploy_runbook\n---\n\
         # Cross-Domain Triggers\n",
    );

    write_file(
        root,
        "skills/api-design/SKILL.md",
        "---\nname: api-design\ndescription: REST API design\ndomains: [backend]\n\
         capabilities: [endpoint-design, versioning]\nlastUpdated: 2025-06-01\n---\n# API Design\n",
    );
    write_file(
        root,
        "skills/incident-response/SKILL.md",
        "---\nname: incident-response\ndescription: Production incident handling\n\
         domains: [infra]\nlastUpdated: 2025-06-01\n---\n# Incident Response\n",
    );

    write_file(
        root,
        "agents/backend-dev.config.json",
        r#"{
  "name": "backend-dev",
  "description": "Backend implementation agent",
  "skills": [{"name": "api-design"}],
  "allowedMcps": ["postgres"],
  "context": {"domains": ["backend"], "alwaysLoadFiles": ["backend/api_patterns"]}
}"#,
    );
    write_file(root, "agents/backend-dev.md", "# Personality\nMethodical.\n");

    write_file(
        root,
        "commands/deploy.md",
        "---\nskills: [incident-response]\ndomains: [infra]\n---\n# Deploy\n",
    );

    write_file(root, "hooks/validate_api.sh", "#!/bin/sh\nexit 0\n");
    write_file(root, "hooks/load_context.sh", "#!/bin/sh\nexit 0\n");
    write_file(
        root,
        "hooks/hooks.json",
        r#"{
  "hooks": {
    "PostToolUse": [
      {"matcher": "Edit|Write", "hooks": [
        {"type": "command", "command": "$PLUGIN_DIR/hooks/validate_api.sh"}
      ]}
    ],
    "SessionStart": [
      {"hooks": [
        {"type": "command", "command": "bash hooks/load_context.sh"}
      ]}
    ]
  }
}"#,
    );
    write_file(
        root,
        "hooks/HOOKS_GUIDE.md",
        "# Hooks Guide\n\n\
         - `validate_api.sh` checks edits against API conventions\n\
         - `load_context.sh` primes sessions with always-load context\n",
    );

    write_file(root, "mcps/postgres.json", r#"{"command": "mcp-postgres"}"#);

    let dir = PluginDir::new(temp.path());
    (temp, dir)
}
