//! Heading-level splitting and link extraction for markdown bodies.

use regex::Regex;
use std::sync::OnceLock;

/// One heading-delimited segment of a markdown body.
#[derive(Debug, Clone)]
pub struct BodySection {
    pub level: u8,
    pub title: String,
    pub content: String,
}

impl BodySection {
    pub fn trimmed_content(&self) -> String {
        self.content.trim().to_string()
    }
}

/// Split a markdown body into heading-delimited sections.
///
/// Text before the first heading is dropped; each `#`-prefixed line starts a
/// new section that runs until the next heading.
pub fn split_sections(body: &str) -> Vec<BodySection> {
    let mut sections = Vec::new();
    let mut current: Option<BodySection> = None;

    for line in body.lines() {
        if line.starts_with('#') {
            if let Some(section) = current.take() {
                sections.push(section);
            }

            let level = line.chars().take_while(|&c| c == '#').count() as u8;
            let title = line.trim_start_matches('#').trim().to_string();

            current = Some(BodySection {
                level,
                title,
                content: String::new(),
            });
        } else if let Some(ref mut section) = current {
            if !section.content.is_empty() {
                section.content.push('\n');
            }
            section.content.push_str(line);
        }
    }

    if let Some(section) = current {
        sections.push(section);
    }

    sections
}

/// Find a section by its heading title (exact match).
pub fn find_section<'a>(sections: &'a [BodySection], title: &str) -> Option<&'a BodySection> {
    sections.iter().find(|s| s.title == title)
}

/// Extract local markdown link targets ending in `.md`.
///
/// Domain indexes claim their files through `[title](file.md)` links; web
/// links are not claims and are ignored.
pub fn extract_local_links(content: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE
        .get_or_init(|| Regex::new(r"\[[^\]]*\]\(([^)\s]+\.md)\)").expect("valid link pattern"));

    re.captures_iter(content)
        .map(|caps| caps[1].to_string())
        .filter(|target| !target.contains("://"))
        .collect()
}
