//! Input validation for names used in file path construction.
//!
//! Domain names, component names, and file ids all end up in paths under the
//! plugin root; these checks reject traversal sequences and reserved system
//! names before any path is built from user input.

use anyhow::{bail, Result};

/// Maximum allowed length for domain and component names.
pub const MAX_NAME_LENGTH: usize = 128;

/// Reserved names that cannot be used (case-insensitive).
const RESERVED_NAMES: &[&str] = &[
    ".", "..", "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7",
    "com8", "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

fn check_common(name: &str, what: &str) -> Result<()> {
    if name.is_empty() {
        bail!("{what} cannot be empty");
    }

    if name.len() > MAX_NAME_LENGTH {
        bail!(
            "{what} too long: {} characters (max {MAX_NAME_LENGTH})",
            name.len()
        );
    }

    let lower = name.to_lowercase();
    if RESERVED_NAMES.contains(&lower.as_str()) {
        bail!("{what} '{name}' uses a reserved name");
    }

    Ok(())
}

/// Validates a context domain name.
///
/// Domain directories use lowercase alphanumerics and underscores
/// (`backend`, `cross_cutting`).
pub fn validate_domain_name(name: &str) -> Result<()> {
    check_common(name, "Domain name")?;

    let valid = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if !valid {
        bail!(
            "Domain name '{name}' contains invalid characters. Use only lowercase alphanumerics and underscores (_)"
        );
    }

    Ok(())
}

/// Validates a skill, agent, or command name.
///
/// Components use kebab-case (`api-design`, `code-reviewer`).
pub fn validate_component_name(name: &str) -> Result<()> {
    check_common(name, "Component name")?;

    let valid = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        bail!(
            "Component name '{name}' contains invalid characters. Use only lowercase alphanumerics and dashes (-)"
        );
    }

    Ok(())
}

/// Validates a context file id of the form `domain/stem`.
pub fn validate_file_id(id: &str) -> Result<()> {
    let Some((domain, stem)) = id.split_once('/') else {
        bail!("File id '{id}' must have the form domain/file");
    };

    validate_domain_name(domain)?;
    check_common(stem, "File name")?;

    let valid = stem
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if !valid {
        bail!(
            "File name '{stem}' contains invalid characters. Use only lowercase alphanumerics and underscores (_)"
        );
    }

    Ok(())
}

/// Clap value parser for domain arguments.
pub fn clap_domain_validator(s: &str) -> Result<String, String> {
    validate_domain_name(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

/// Clap value parser for `domain/file` arguments.
pub fn clap_file_id_validator(s: &str) -> Result<String, String> {
    validate_file_id(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}
