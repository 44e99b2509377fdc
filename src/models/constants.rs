//! Shared limits and defaults for the catalog engine.

/// Default maximum number of files a single loader call may materialize.
pub const DEFAULT_MAX_FILES: usize = 6;

/// A file whose lastUpdated is older than this is considered stale.
pub const STALE_AFTER_DAYS: i64 = 90;

/// Declared-vs-measured token deviation that earns an advisory finding.
pub const TOKEN_DRIFT_RATIO: f64 = 0.20;

/// Deviation that escalates a drift finding to a warning.
pub const TOKEN_DRIFT_WARN_RATIO: f64 = 0.50;

/// Upper sanity bound for declared token estimates.
pub const MAX_ESTIMATED_TOKENS: u32 = 10_000;

/// A tag must appear in at least this many files before a missing-domain
/// suggestion fires.
pub const TAG_SUGGESTION_MIN_FILES: usize = 3;

/// Worker cap for the per-domain scan pool.
pub const DEFAULT_SCAN_WORKERS: usize = 4;

/// Hook events the runtime dispatches. Registrations under any other key
/// are dead configuration.
pub const KNOWN_HOOK_EVENTS: &[&str] = &[
    "PreToolUse",
    "PostToolUse",
    "SessionStart",
    "UserPromptSubmit",
    "Stop",
    "PreCompact",
    "TaskCompleted",
    "SubagentStart",
    "SessionEnd",
];
