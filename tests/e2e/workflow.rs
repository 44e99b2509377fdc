//! End-to-end passes over a complete plugin workspace: scan, catalog,
//! load under budget, validate, and drift, the way a session or a CI job
//! would drive the library.

use chrono::NaiveDate;
use weft::catalog::{Budget, Catalog, ContextLoader};
use weft::drift::{detect, DriftKind};
use weft::scan::{scan, ScanOptions};
use weft::validate::{validate, Relation, Severity};

use crate::fixtures::{workspace, write_file};

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 20).unwrap()
}

#[test]
fn test_full_session_lifecycle() {
    let (_temp, dir) = workspace();

    // Index the whole tree.
    let outcome = scan(&dir, &ScanOptions::default());
    assert!(outcome.issues.is_empty(), "issues: {:?}", outcome.issues);
    assert!(!outcome.partial);

    let counts = outcome.graph.counts();
    assert_eq!(counts.domains, 3);
    assert_eq!(counts.files, 5);
    assert_eq!(counts.skills, 2);
    assert_eq!(counts.agents, 1);
    assert_eq!(counts.commands, 1);
    assert_eq!(counts.hook_scripts, 2);
    assert_eq!(counts.mcps, 1);

    // Session start: only the always-load file comes back.
    let catalog = Catalog::new(&outcome.graph);
    let always = catalog.always_load("backend");
    let ids: Vec<&str> = always.iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["backend/api_patterns"]);

    // A task about slow queries pulls in the conditional database file.
    let matched = catalog.conditional("backend", &["investigating a slow query".to_string()]);
    let ids: Vec<&str> = matched.iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["backend/database_modeling"]);

    // Auth work routes across domains.
    let routed = catalog.cross_domain("backend", &["touching auth code".to_string()]);
    let ids: Vec<&str> = routed.iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["security/auth_review"]);

    // Materialize the session's picks under one budget.
    let mut loader = ContextLoader::with_budget(
        &dir,
        &outcome.graph,
        Budget {
            max_files: 6,
            max_tokens: Some(2000),
        },
    );
    let body = loader.materialize(&always[0].reference).unwrap();
    assert!(body.contains("# Common Issues"));
    loader.materialize(&matched[0].reference).unwrap();
    loader.materialize(&routed[0].reference).unwrap();
    assert_eq!(loader.files_loaded(), 3);
    assert_eq!(loader.tokens_loaded(), 500 + 750 + 300);

    // The tree is healthy and nothing is drifting yet.
    let report = validate(&outcome.graph, outcome.partial);
    assert!(report.is_healthy());
    assert_eq!(report.health_score, 100.0);

    let drift = detect(&dir, &outcome.graph, as_of());
    assert_eq!(drift.files_checked, 5);
    assert!(drift.findings.is_empty(), "findings: {:?}", drift.findings);
}

#[test]
fn test_refactor_breaks_references_and_the_score_shows_it() {
    let (temp, dir) = workspace();

    // A refactor deletes a skill directory but leaves its consumers behind,
    // and drops a context file the backend index still claims.
    std::fs::remove_dir_all(temp.path().join("skills/incident-response")).unwrap();
    std::fs::remove_file(temp.path().join("context/backend/queue_patterns.md")).unwrap();

    let outcome = scan(&dir, &ScanOptions::default());
    let report = validate(&outcome.graph, outcome.partial);

    let command_skill = report
        .violations()
        .find(|v| v.relation == Relation::CommandSkill)
        .expect("command's skill reference should dangle");
    assert_eq!(command_skill.severity, Severity::Critical);
    assert_eq!(command_skill.source, "deploy");
    assert_eq!(command_skill.target, "incident-response");

    let ghost = report
        .violations()
        .find(|v| v.relation == Relation::FileIndex && v.target == "queue_patterns")
        .expect("index should report the deleted file");
    assert_eq!(ghost.severity, Severity::Warning);

    assert!(report.health_score < 100.0);
    assert!(!report.is_healthy());
}

#[test]
fn test_drift_accumulates_as_the_tree_ages() {
    let (temp, dir) = workspace();

    // Someone rewrites the runbook without touching its metadata.
    let inflated = format!(
        "---\nid: infra/deploy_runbook\ndomain: infra\ntitle: deploy_runbook\ntype: guide\n\
         estimatedTokens: 500\nloadingStrategy: onDemand\nversion: 1.2.0\n\
         lastUpdated: 2025-07-15\ntags: [deploy]\nsections:\n\
         \x20 - name: Runbook\n    estimatedTokens: 500\n    keywords: [rollback]\n---\n\
         # Runbook\n{}\n",
        "step ".repeat(1000)
    );
    write_file(temp.path(), "context/infra/deploy_runbook.md", &inflated);

    let outcome = scan(&dir, &ScanOptions::default());

    // Fresh date: only the token drift shows.
    let drift = detect(&dir, &outcome.graph, as_of());
    let token_findings: Vec<_> = drift
        .findings
        .iter()
        .filter(|f| f.kind == DriftKind::TokenDrift)
        .collect();
    assert_eq!(token_findings.len(), 1);
    assert_eq!(token_findings[0].id, "infra/deploy_runbook");
    // Roughly 1250 measured against 500 declared.
    assert_eq!(token_findings[0].severity, Severity::Warning);

    // A year on, every file is stale on top of that.
    let aged = detect(
        &dir,
        &outcome.graph,
        NaiveDate::from_ymd_opt(2026, 8, 20).unwrap(),
    );
    let stale = aged
        .findings
        .iter()
        .filter(|f| f.kind == DriftKind::Stale)
        .count();
    assert_eq!(stale, aged.files_checked);
}

#[test]
fn test_reports_serialize_identically_across_runs() {
    let (_temp, dir) = workspace();

    let render = || {
        let outcome = scan(&dir, &ScanOptions::default());
        let report = validate(&outcome.graph, outcome.partial);
        let drift = detect(&dir, &outcome.graph, as_of());
        format!(
            "{}\n{}",
            serde_json::to_string_pretty(&report).unwrap(),
            serde_json::to_string_pretty(&drift).unwrap()
        )
    };

    assert_eq!(render(), render());
}
