//! Fixture plugin trees shared by the integration tests.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use weft::fs::plugin_dir::PluginDir;

pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Filler prose measuring approximately `tokens` tokens (4 chars each).
pub fn filler(tokens: u32) -> String {
    "content ".repeat((tokens as usize) / 2)
}

/// Render a complete context file whose body matches its declared
/// estimates: one heading per section plus filler sized to the estimate.
pub fn context_file(
    id: &str,
    strategy: &str,
    last_updated: &str,
    tags: &[&str],
    sections: &[(&str, u32, &[&str])],
) -> String {
    let (domain, stem) = id.split_once('/').unwrap();
    let total: u32 = sections.iter().map(|(_, tokens, _)| tokens).sum();

    let mut frontmatter = format!(
        "---\nid: {id}\ndomain: {domain}\ntitle: {stem}\ntype: guide\n\
         estimatedTokens: {total}\nloadingStrategy: {strategy}\nversion: 1.0.0\n\
         lastUpdated: {last_updated}\ntags: [{}]\nsections:\n",
        tags.join(", ")
    );
    for (name, tokens, keywords) in sections {
        frontmatter.push_str(&format!(
            "  - name: {name}\n    estimatedTokens: {tokens}\n    keywords: [{}]\n",
            keywords.join(", ")
        ));
    }
    frontmatter.push_str("---\n");

    let mut body = String::new();
    for (name, tokens, _) in sections {
        body.push_str(&format!("# {name}\n{}\n", filler(*tokens)));
    }

    format!("{frontmatter}{body}")
}

/// A small but complete plugin tree: two domains, the trigger matrix, one
/// skill, one agent with personality, one command, a registered and
/// documented hook, and one MCP definition. Validates clean.
pub fn standard_tree() -> (TempDir, PluginDir) {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write_file(
        root,
        "context/python/common_issues.md",
        &context_file(
            "python/common_issues",
            "always",
            "2025-08-01",
            &["python"],
            &[
                ("Overview", 150, &["errors"]),
                ("Common Issues", 250, &["debugging"]),
            ],
        ),
    );
    write_file(
        root,
        "context/python/fastapi_patterns.md",
        &context_file(
            "python/fastapi_patterns",
            "conditional",
            "2025-08-01",
            &["fastapi"],
            &[
                ("Overview", 200, &["rest api"]),
                ("Endpoints", 400, &["endpoint"]),
            ],
        ),
    );
    write_file(
        root,
        "context/python/index.md",
        "# Python Index\n\n\
         - [Common Issues](common_issues.md) recurring pitfalls, 400 tokens\n\
         - [FastAPI Patterns](fastapi_patterns.md) endpoint conventions, 600 tokens\n",
    );

    write_file(
        root,
        "context/security/auth_checklist.md",
        &context_file(
            "security/auth_checklist",
            "conditional",
            "2025-08-01",
            &["auth", "security"],
            &[("Overview", 300, &["authentication"])],
        ),
    );
    write_file(
        root,
        "context/security/index.md",
        "- [Auth Checklist](auth_checklist.md) review checklist, 300 tokens\n",
    );

    write_file(
        root,
        "context/cross_domain.md",
        "---\ntriggers:\n  - when: auth code\n    load: security/auth_checklist\n---\n\
         # Cross-Domain Triggers\n",
    );

    write_file(
        root,
        "skills/python-fundamentals/SKILL.md",
        "---\nname: python-fundamentals\ndescription: Core Python practices\n\
         domains: [python]\ncapabilities: [debugging, testing]\nlastUpdated: 2025-05-01\n---\n\
         # Python Fundamentals\n",
    );

    write_file(
        root,
        "agents/python-dev.config.json",
        r#"{
  "name": "python-dev",
  "description": "Python implementation agent",
  "skills": [{"name": "python-fundamentals"}],
  "allowedMcps": ["postgres"],
  "context": {"domains": ["python"], "alwaysLoadFiles": ["python/common_issues"]}
}"#,
    );
    write_file(root, "agents/python-dev.md", "# Personality\nPragmatic.\n");

    write_file(
        root,
        "commands/implement.md",
        "---\nskills: [python-fundamentals]\ndomains: [python]\n---\n# Implement\n",
    );

    write_file(root, "hooks/validate_python.sh", "#!/bin/sh\nexit 0\n");
    write_file(
        root,
        "hooks/hooks.json",
        r#"{
  "hooks": {
    "PostToolUse": [
      {"matcher": "Edit|Write", "hooks": [
        {"type": "command", "command": "$PLUGIN_DIR/hooks/validate_python.sh"}
      ]}
    ]
  }
}"#,
    );
    write_file(
        root,
        "hooks/HOOKS_GUIDE.md",
        "# Hooks Guide\n\n- `validate_python.sh` lints Python edits after Edit/Write\n",
    );

    write_file(root, "mcps/postgres.json", r#"{"command": "mcp-postgres"}"#);

    let dir = PluginDir::new(temp.path());
    (temp, dir)
}
