//! Lifecycle scenarios over a realistic plugin tree: catalog queries,
//! integrity violations, and drift, each exercised end to end through scan.

use chrono::NaiveDate;
use weft::catalog::{Catalog, ContextLoader, FileRef};
use weft::drift::{detect, tokens::estimate_tokens};
use weft::scan::{scan, ScanOptions};
use weft::validate::{validate, Relation, Severity};

use crate::helpers::{context_file, standard_tree, write_file};

#[test]
fn test_clean_tree_scans_without_issues_and_scores_100() {
    let (_temp, dir) = standard_tree();
    let outcome = scan(&dir, &ScanOptions::default());

    assert!(outcome.issues.is_empty(), "issues: {:?}", outcome.issues);
    assert!(!outcome.partial);

    let report = validate(&outcome.graph, outcome.partial);
    assert!(report.is_healthy(), "violations: {:?}", report.violations().collect::<Vec<_>>());
    assert_eq!(report.health_score, 100.0);
    assert_eq!(report.count_of(Severity::Critical), 0);
}

#[test]
fn test_session_start_loads_only_always_files() {
    let (_temp, dir) = standard_tree();
    let outcome = scan(&dir, &ScanOptions::default());
    let catalog = Catalog::new(&outcome.graph);

    let entries = catalog.always_load("python");
    let ids: Vec<&str> = entries.iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["python/common_issues"]);

    // Cataloging charged nothing; materializing the one entry charges its
    // declared estimate.
    let mut loader = ContextLoader::new(&dir, &outcome.graph);
    let body = loader.materialize(&entries[0].reference).unwrap();
    assert!(body.contains("# Common Issues"));
    assert_eq!(loader.files_loaded(), 1);
    assert_eq!(loader.tokens_loaded(), 400);
}

#[test]
fn test_detection_signals_surface_conditional_files() {
    let (_temp, dir) = standard_tree();
    let outcome = scan(&dir, &ScanOptions::default());
    let catalog = Catalog::new(&outcome.graph);

    let entries = catalog.conditional(
        "python",
        &["building a rest api endpoint with fastapi".to_string()],
    );
    let ids: Vec<&str> = entries.iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["python/fastapi_patterns"]);

    // A signal matching nothing yields nothing.
    let entries = catalog.conditional("python", &["kubernetes manifests".to_string()]);
    assert!(entries.is_empty());
}

#[test]
fn test_trigger_phrase_routes_across_domains() {
    let (_temp, dir) = standard_tree();
    let outcome = scan(&dir, &ScanOptions::default());
    let catalog = Catalog::new(&outcome.graph);

    let entries = catalog.cross_domain("python", &["reviewing auth code".to_string()]);
    let ids: Vec<&str> = entries.iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["security/auth_checklist"]);
}

#[test]
fn test_materialized_content_matches_declared_estimate() {
    let (_temp, dir) = standard_tree();
    let outcome = scan(&dir, &ScanOptions::default());
    let mut loader = ContextLoader::new(&dir, &outcome.graph);

    let body = loader
        .materialize(&FileRef::new("python/fastapi_patterns"))
        .unwrap();
    let measured = estimate_tokens(&body) as f64;
    let declared = 600.0;
    assert!(
        (measured - declared).abs() / declared < 0.2,
        "declared {declared}, measured {measured}"
    );
}

#[test]
fn test_section_materialization_returns_only_named_section() {
    let (_temp, dir) = standard_tree();
    let outcome = scan(&dir, &ScanOptions::default());
    let mut loader = ContextLoader::new(&dir, &outcome.graph);

    let content = loader
        .materialize_sections(
            &FileRef::new("python/fastapi_patterns"),
            &["Endpoints".to_string()],
        )
        .unwrap();

    assert!(content.starts_with("# Endpoints"));
    assert!(!content.contains("# Overview"));
    // Charged the section estimate, not the 600-token file estimate.
    assert_eq!(loader.tokens_loaded(), 400);
}

#[test]
fn test_agent_referencing_deleted_skill_is_critical() {
    let (temp, dir) = standard_tree();
    write_file(
        temp.path(),
        "agents/test-runner.config.json",
        r#"{
  "name": "test-runner",
  "skills": [{"name": "python-testing"}],
  "context": {"domains": ["python"]}
}"#,
    );
    write_file(temp.path(), "agents/test-runner.md", "# Personality\n");

    let outcome = scan(&dir, &ScanOptions::default());
    let report = validate(&outcome.graph, outcome.partial);

    let violation = report
        .violations()
        .find(|v| v.relation == Relation::AgentSkill)
        .expect("dangling skill reference should be reported");
    assert_eq!(violation.severity, Severity::Critical);
    assert_eq!(violation.source, "test-runner");
    assert_eq!(violation.target, "python-testing");
    assert!(report.health_score < 100.0);
}

#[test]
fn test_unindexed_file_is_orphan_warning() {
    let (temp, dir) = standard_tree();
    write_file(
        temp.path(),
        "context/python/new_feature.md",
        &context_file(
            "python/new_feature",
            "conditional",
            "2025-08-01",
            &["feature"],
            &[("Overview", 200, &["feature flags"])],
        ),
    );

    let outcome = scan(&dir, &ScanOptions::default());
    let report = validate(&outcome.graph, outcome.partial);

    let violation = report
        .violations()
        .find(|v| v.relation == Relation::FileIndex && v.source == "python/new_feature")
        .expect("orphan file should be reported");
    assert_eq!(violation.severity, Severity::Warning);
}

#[test]
fn test_index_claiming_missing_file_is_ghost_warning() {
    let (temp, dir) = standard_tree();
    write_file(
        temp.path(),
        "context/python/index.md",
        "- [Common Issues](common_issues.md)\n\
         - [FastAPI Patterns](fastapi_patterns.md)\n\
         - [Removed Guide](removed_guide.md)\n",
    );

    let outcome = scan(&dir, &ScanOptions::default());
    let report = validate(&outcome.graph, outcome.partial);

    let violation = report
        .violations()
        .find(|v| v.relation == Relation::FileIndex && v.target == "removed_guide")
        .expect("ghost index entry should be reported");
    assert_eq!(violation.source, "python/index.md");
    assert_eq!(violation.severity, Severity::Warning);
}

#[test]
fn test_hook_registry_mismatches_both_directions() {
    let (temp, dir) = standard_tree();
    // On disk but never registered.
    write_file(temp.path(), "hooks/custom_check.sh", "#!/bin/sh\nexit 0\n");
    // Registered but not on disk.
    write_file(
        temp.path(),
        "hooks/hooks.json",
        r#"{
  "hooks": {
    "PostToolUse": [
      {"matcher": "Edit|Write", "hooks": [
        {"type": "command", "command": "$PLUGIN_DIR/hooks/validate_python.sh"},
        {"type": "command", "command": "$PLUGIN_DIR/hooks/deleted_hook.sh"}
      ]}
    ]
  }
}"#,
    );

    let outcome = scan(&dir, &ScanOptions::default());
    let report = validate(&outcome.graph, outcome.partial);

    let registry: Vec<_> = report
        .violations()
        .filter(|v| v.relation == Relation::HookRegistry)
        .collect();

    let unregistered = registry
        .iter()
        .find(|v| v.source == "custom_check.sh")
        .expect("unregistered script should be reported");
    assert_eq!(unregistered.severity, Severity::Warning);

    let dangling = registry
        .iter()
        .find(|v| v.target == "deleted_hook.sh")
        .expect("dangling registration should be reported");
    assert_eq!(dangling.severity, Severity::Critical);
}

#[test]
fn test_unknown_hook_event_is_schema_issue() {
    let (temp, dir) = standard_tree();
    write_file(
        temp.path(),
        "hooks/hooks.json",
        r#"{
  "hooks": {
    "AfterToolUse": [
      {"matcher": "Edit", "hooks": [
        {"type": "command", "command": "$PLUGIN_DIR/hooks/validate_python.sh"}
      ]}
    ]
  }
}"#,
    );

    let outcome = scan(&dir, &ScanOptions::default());
    assert!(
        outcome
            .issues
            .iter()
            .any(|i| i.message.contains("unknown event 'AfterToolUse'")),
        "issues: {:?}",
        outcome.issues
    );
}

#[test]
fn test_stale_file_flagged_relative_to_injected_date() {
    let (_temp, dir) = standard_tree();
    let outcome = scan(&dir, &ScanOptions::default());

    // Well within 90 days of the fixture's 2025-08-01 stamps.
    let fresh = detect(&dir, &outcome.graph, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
    assert!(fresh.findings.is_empty(), "findings: {:?}", fresh.findings);

    // Half a year later everything is stale.
    let later = detect(&dir, &outcome.graph, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    assert_eq!(later.findings.len(), later.files_checked);
    assert!(later
        .findings
        .iter()
        .all(|f| f.severity == Severity::Warning));
}
