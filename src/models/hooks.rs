//! Models for the hook registry (`hooks/hooks.json`) and hook scripts.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

/// Parsed `hooks/hooks.json`: event name to matcher groups.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HooksFile {
    #[serde(default)]
    pub hooks: BTreeMap<String, Vec<MatcherGroup>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatcherGroup {
    /// Tool-name pattern the event payload is matched against.
    #[serde(default)]
    pub matcher: String,
    #[serde(default)]
    pub hooks: Vec<HookCommand>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HookCommand {
    #[serde(rename = "type", default)]
    pub command_type: String,
    #[serde(default)]
    pub command: String,
}

/// A hook script known to the graph: basename plus the events it is
/// registered under. Scripts on disk with no registration have an empty
/// event list.
#[derive(Debug, Clone, Serialize)]
pub struct HookScript {
    pub name: String,
    pub events: Vec<String>,
}

/// Extract the script basename from a registration command.
///
/// Commands reference scripts as `.../hooks/<name>.sh`; inline shell or
/// interpreter one-liners yield no basename.
pub fn script_basename(command: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"hooks/([A-Za-z0-9_\-]+\.sh)").expect("valid script pattern")
    });
    re.captures(command).map(|caps| caps[1].to_string())
}

/// Collect every script basename mentioned in guide text.
pub fn mentioned_scripts(text: &str) -> BTreeSet<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re =
        RE.get_or_init(|| Regex::new(r"([A-Za-z0-9_\-]+\.sh)").expect("valid script pattern"));
    re.captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}
