//! Budget enforcement across a full scan-then-load cycle.

use weft::catalog::{Budget, ContextLoader, FileRef};
use weft::errors::LoadError;
use weft::scan::{scan, ScanOptions};

use crate::helpers::standard_tree;

#[test]
fn test_file_budget_caps_loads_across_calls() {
    let (_temp, dir) = standard_tree();
    let outcome = scan(&dir, &ScanOptions::default());
    let mut loader = ContextLoader::with_budget(
        &dir,
        &outcome.graph,
        Budget {
            max_files: 2,
            max_tokens: None,
        },
    );

    loader
        .materialize(&FileRef::new("python/common_issues"))
        .unwrap();
    loader
        .materialize(&FileRef::new("python/fastapi_patterns"))
        .unwrap();

    let result = loader.materialize(&FileRef::new("security/auth_checklist"));
    assert!(matches!(
        result,
        Err(LoadError::FileBudgetExceeded { max_files: 2, .. })
    ));
    assert_eq!(loader.files_loaded(), 2);
}

#[test]
fn test_token_budget_rejects_oversized_request_whole() {
    let (_temp, dir) = standard_tree();
    let outcome = scan(&dir, &ScanOptions::default());
    let mut loader = ContextLoader::with_budget(
        &dir,
        &outcome.graph,
        Budget {
            max_files: 6,
            max_tokens: Some(800),
        },
    );

    // 400 of 800 tokens spent.
    loader
        .materialize(&FileRef::new("python/common_issues"))
        .unwrap();

    // 600 more would overrun; the call fails whole and charges nothing.
    let result = loader.materialize(&FileRef::new("python/fastapi_patterns"));
    assert!(matches!(
        result,
        Err(LoadError::TokenBudgetExceeded {
            requested: 600,
            remaining: 400,
            max_tokens: 800,
            ..
        })
    ));
    assert_eq!(loader.files_loaded(), 1);
    assert_eq!(loader.tokens_loaded(), 400);

    // A request that fits the remainder still goes through.
    let content = loader.materialize_sections(
        &FileRef::new("security/auth_checklist"),
        &["Overview".to_string()],
    );
    assert!(content.is_ok());
    assert_eq!(loader.tokens_loaded(), 400 + 300);
}

#[test]
fn test_budget_failure_leaves_sections_loadable_elsewhere() {
    let (_temp, dir) = standard_tree();
    let outcome = scan(&dir, &ScanOptions::default());

    let mut exhausted = ContextLoader::with_budget(
        &dir,
        &outcome.graph,
        Budget {
            max_files: 1,
            max_tokens: None,
        },
    );
    exhausted
        .materialize(&FileRef::new("python/common_issues"))
        .unwrap();
    assert!(exhausted
        .materialize(&FileRef::new("security/auth_checklist"))
        .is_err());

    // Budget state never leaks between loaders.
    let mut fresh = ContextLoader::new(&dir, &outcome.graph);
    assert!(fresh
        .materialize(&FileRef::new("security/auth_checklist"))
        .is_ok());
}
