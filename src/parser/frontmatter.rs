use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;

/// Parse a type from markdown content with YAML frontmatter
///
/// Extracts the YAML frontmatter block and deserializes it into the target
/// type. `type_name` is only used in error messages.
///
/// # Example
///
/// ```text
/// let header: ContextFileHeader = parse_from_markdown(&content, "context file")?;
/// let skill: Skill = parse_from_markdown(&content, "skill")?;
/// ```
///
/// # Errors
///
/// Returns an error if frontmatter extraction fails or YAML deserialization fails.
pub fn parse_from_markdown<T: DeserializeOwned>(content: &str, type_name: &str) -> Result<T> {
    let frontmatter = extract_yaml_frontmatter(content)?;
    serde_yaml::from_value(frontmatter)
        .with_context(|| format!("Failed to parse {type_name} from frontmatter"))
}

/// Extract a single scalar field from YAML frontmatter
///
/// Convenience for probing one value without deserializing the whole
/// structure; used to recover an id for error messages when the full parse
/// fails.
///
/// Returns `None` if the field is not found or its value is `null`, `~`,
/// or empty.
///
/// # Errors
///
/// Returns an error if frontmatter extraction fails.
pub fn extract_frontmatter_field(content: &str, field: &str) -> Result<Option<String>> {
    let yaml = extract_yaml_frontmatter(content)?;

    let value = match &yaml[field] {
        serde_yaml::Value::Null => return Ok(None),
        serde_yaml::Value::String(s) if s.is_empty() => return Ok(None),
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        _ => return Ok(None),
    };

    Ok(Some(value))
}

/// Extract YAML frontmatter from markdown content
///
/// Expects frontmatter delimited by `---` at the start and end. Returns the
/// parsed YAML as a `serde_yaml::Value`.
///
/// # Errors
///
/// Returns an error if:
/// - Content is empty or missing opening `---`
/// - Closing `---` is not found
/// - YAML content cannot be parsed
pub fn extract_yaml_frontmatter(content: &str) -> Result<serde_yaml::Value> {
    let lines: Vec<&str> = content.lines().collect();
    let end_idx = closing_delimiter_index(&lines)?;

    let yaml_content = lines[1..end_idx].join("\n");

    serde_yaml::from_str(&yaml_content).context("Failed to parse YAML frontmatter")
}

/// Return the markdown body with the frontmatter block stripped.
///
/// Content without a frontmatter block is returned unchanged; materialized
/// context is always the body, never the metadata.
pub fn extract_body(content: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();
    match closing_delimiter_index(&lines) {
        Ok(end_idx) => lines[end_idx + 1..].join("\n"),
        Err(_) => content.to_string(),
    }
}

/// Find the line index of the closing `---` delimiter.
///
/// Tracks the indentation of the opening delimiter and only accepts a
/// closing delimiter at the same level, so embedded `---` inside indented
/// YAML block scalars is not mistaken for the end of the frontmatter.
fn closing_delimiter_index(lines: &[&str]) -> Result<usize> {
    if lines.is_empty() || !lines[0].trim().starts_with("---") {
        bail!("No frontmatter delimiter found at start of content");
    }

    let opening_indent = lines[0].len() - lines[0].trim_start().len();

    for (idx, line) in lines.iter().enumerate().skip(1) {
        let trimmed = line.trim_start();
        if trimmed.starts_with("---") {
            let line_indent = line.len() - trimmed.len();
            if line_indent == opening_indent {
                return Ok(idx);
            }
        }
    }

    bail!("Frontmatter not properly closed with ---")
}
