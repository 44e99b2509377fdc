//! The single full indexing pass over a plugin tree.
//!
//! One scan produces one immutable [`ComponentGraph`] plus the issues found
//! along the way. Domains parse on a scoped worker pool; component kinds
//! parse serially afterwards. A deadline (caller timeout or Ctrl-C) is
//! checked at file boundaries only, so the published graph is never
//! half-mutated: whatever was fully indexed ships, marked partial.

pub mod components;
pub mod domains;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::errors::SchemaIssue;
use crate::fs::plugin_dir::PluginDir;
use crate::graph::nodes::DomainNode;
use crate::graph::ComponentGraph;
use crate::models::constants::DEFAULT_SCAN_WORKERS;

/// Caller-supplied limits for one scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Overall wall-clock bound; on expiry the scan returns partial results.
    pub timeout: Option<Duration>,
    /// Cooperative cancellation flag, typically wired to Ctrl-C.
    pub cancel: Option<Arc<AtomicBool>>,
    /// Worker cap for the per-domain pool; 0 means the default.
    pub max_workers: usize,
}

/// Cooperative deadline checked at file boundaries.
#[derive(Debug, Clone, Default)]
pub struct Deadline {
    expires_at: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Deadline {
    pub fn from_options(options: &ScanOptions) -> Self {
        Self {
            expires_at: options.timeout.map(|t| Instant::now() + t),
            cancel: options.cancel.clone(),
        }
    }

    pub fn expired(&self) -> bool {
        if let Some(expires_at) = self.expires_at {
            if Instant::now() >= expires_at {
                return true;
            }
        }
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Explicit per-file pipeline result; control flow, not exceptions.
#[derive(Debug)]
pub enum StepOutcome<T> {
    Indexed(T),
    Skip(String),
    Fault(SchemaIssue),
}

/// What one scan returns: the graph, the issues, and whether the deadline
/// cut the pass short.
#[derive(Debug)]
pub struct ScanOutcome {
    pub graph: ComponentGraph,
    pub issues: Vec<SchemaIssue>,
    pub partial: bool,
}

/// Install a Ctrl-C handler and return the flag it flips.
///
/// The handler may already be claimed by the host process; that is not an
/// error, the returned flag is simply never set.
pub fn install_cancel_flag() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&flag);
    if ctrlc::set_handler(move || handler_flag.store(true, Ordering::Relaxed)).is_err() {
        debug!("Ctrl-C handler already installed");
    }
    flag
}

/// Run the full indexing pass.
pub fn scan(dir: &PluginDir, options: &ScanOptions) -> ScanOutcome {
    let deadline = Deadline::from_options(options);
    let mut issues = Vec::new();
    let mut partial = false;

    let (domain_names, mut enum_issues) = domains::enumerate_domains(dir);
    issues.append(&mut enum_issues);

    let (domain_nodes, domain_issues, domains_partial) =
        scan_domains_parallel(dir, &domain_names, &deadline, options.max_workers);
    issues.extend(domain_issues);
    partial |= domains_partial;

    // Component kinds are small flat listings; they parse serially, each
    // behind the same deadline. An expired deadline stays expired, so the
    // remaining stages fall through and the outcome is marked partial.
    let mut cross_domain = Vec::new();
    let mut skills = BTreeMap::new();
    let mut agents = BTreeMap::new();
    let mut commands = BTreeMap::new();
    let mut hooks = crate::graph::nodes::HookInventory::default();
    let mut mcps = std::collections::BTreeSet::new();

    if deadline.expired() {
        partial = true;
    } else {
        let (value, stage_issues) = components::scan_cross_domain(dir);
        cross_domain = value;
        issues.extend(stage_issues);
    }

    if deadline.expired() {
        partial = true;
    } else {
        let (value, stage_issues) = components::scan_skills(dir);
        skills = value;
        issues.extend(stage_issues);
    }

    if deadline.expired() {
        partial = true;
    } else {
        let (value, stage_issues) = components::scan_agents(dir);
        agents = value;
        issues.extend(stage_issues);
    }

    if deadline.expired() {
        partial = true;
    } else {
        let (value, stage_issues) = components::scan_commands(dir);
        commands = value;
        issues.extend(stage_issues);
    }

    if deadline.expired() {
        partial = true;
    } else {
        let (value, stage_issues) = components::scan_hooks(dir);
        hooks = value;
        issues.extend(stage_issues);
    }

    if deadline.expired() {
        partial = true;
    } else {
        let (value, stage_issues) = components::scan_mcps(dir);
        mcps = value;
        issues.extend(stage_issues);
    }

    if partial {
        warn!("scan deadline expired; returning partial graph");
    }

    issues.sort();
    issues.dedup();

    ScanOutcome {
        graph: ComponentGraph::assemble(
            domain_nodes,
            skills,
            agents,
            commands,
            hooks,
            mcps,
            cross_domain,
        ),
        issues,
        partial,
    }
}

/// Fan domain scans out over a scoped worker pool and merge the results
/// over a channel. Collection into a BTreeMap keeps the merged graph
/// independent of arrival order.
fn scan_domains_parallel(
    dir: &PluginDir,
    names: &[String],
    deadline: &Deadline,
    max_workers: usize,
) -> (BTreeMap<String, DomainNode>, Vec<SchemaIssue>, bool) {
    let mut nodes = BTreeMap::new();
    let mut issues = Vec::new();
    let mut partial = false;

    if names.is_empty() {
        return (nodes, issues, partial);
    }

    let worker_cap = if max_workers == 0 {
        DEFAULT_SCAN_WORKERS
    } else {
        max_workers
    };
    let workers = worker_cap.min(names.len());

    let (tx, rx) = mpsc::channel::<(String, domains::DomainScan)>();

    std::thread::scope(|scope| {
        for bucket in 0..workers {
            let tx = tx.clone();
            let bucket_names: Vec<&String> = names.iter().skip(bucket).step_by(workers).collect();
            scope.spawn(move || {
                for name in bucket_names {
                    if deadline.expired() {
                        // Signal the cut without scanning; an empty send
                        // would misreport the domain as empty.
                        break;
                    }
                    let result = domains::scan_domain(dir, name, deadline);
                    if tx.send((name.clone(), result)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);

        for (name, scan) in rx {
            partial |= scan.expired;
            issues.extend(scan.issues);
            nodes.insert(name, scan.node);
        }
    });

    // Domains never delivered were cut off by the deadline.
    if nodes.len() < names.len() {
        partial = true;
        for name in names {
            if !nodes.contains_key(name) {
                debug!(domain = name.as_str(), "domain not scanned before deadline");
            }
        }
    }

    (nodes, issues, partial)
}
