//! Table-of-contents extraction from markdown bodies.

use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Headings whose top edge sits at or above this offset count as "read".
pub const ACTIVE_HEADING_OFFSET: f64 = 120.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub id: String,
    pub text: String,
    pub level: u8,
}

fn heading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?m)^(#{1,3})[ \t]+(.+?)[ \t]*\r?$").expect("heading pattern is valid")
    })
}

fn separator_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]+").expect("separator pattern is valid"))
}

/// Drops emphasis markers (`*`, `_`, `` ` ``, `~`) from heading text.
pub fn strip_emphasis(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '*' | '_' | '`' | '~'))
        .collect()
}

/// 產生錨點識別字：轉小寫、非單字字元合併為連字號、去除首尾連字號
pub fn heading_id(text: &str) -> String {
    let lowered = text.to_lowercase();
    separator_pattern()
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Scans `markdown` for level 1-3 headings in document order.
///
/// Duplicate identifiers are disambiguated GitHub-style: the first heading
/// keeps the bare id, later ones get `-1`, `-2`, ... appended.
pub fn extract_toc(markdown: &str) -> Vec<TocEntry> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut entries = Vec::new();

    for caps in heading_pattern().captures_iter(markdown) {
        let level = caps[1].len() as u8;
        let text = strip_emphasis(&caps[2]);
        let base = heading_id(&text);

        let mut id = base.clone();
        let mut suffix = 1;
        while taken.contains(&id) {
            id = format!("{}-{}", base, suffix);
            suffix += 1;
        }
        taken.insert(id.clone());

        entries.push(TocEntry { id, text, level });
    }

    entries
}

/// Returns the id of the last heading whose top offset is at or above
/// [`ACTIVE_HEADING_OFFSET`]; `positions` pairs each id with its top offset
/// relative to the viewport, in document order.
pub fn active_heading<'a>(positions: &[(&'a str, f64)]) -> Option<&'a str> {
    positions
        .iter()
        .rev()
        .find(|(_, top)| *top <= ACTIVE_HEADING_OFFSET)
        .map(|(id, _)| *id)
}
