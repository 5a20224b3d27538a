//! Tolerant bibliography parser
//!
//! Scans the source text for `@TYPE{` markers; the span from one marker to
//! the next (or end of text) is one entry's raw block. Fields are extracted
//! from each block with per-field patterns. The scan simply stops when no
//! further marker is found, and a field pattern that matches nothing leaves
//! that field absent.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::entry::{Entry, UNKNOWN_YEAR};
use crate::latex_decoder::decode_latex;

/// Field names extracted from every entry block.
const FIELD_NAMES: [&str; 14] = [
    "title",
    "author",
    "year",
    "journal",
    "booktitle",
    "institution",
    "publisher",
    "organization",
    "volume",
    "number",
    "pages",
    "keywords",
    "doi",
    "url",
];

lazy_static! {
    static ref ENTRY_MARKER: Regex = Regex::new(r"@[A-Za-z]+\s*\{").unwrap();
    static ref NEXT_MARKER: Regex = Regex::new(r"\n\s*@[A-Za-z]+\s*\{").unwrap();
    static ref MARKER_TYPE: Regex = Regex::new(r"^@([A-Za-z]+)\s*\{").unwrap();
    static ref YEAR_TOKEN: Regex = Regex::new(r"19\d{2}|20\d{2}").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    /// One `name = value` pattern per recognized field, terminated by a
    /// newline (optionally preceded by the field separator comma).
    static ref FIELD_PATTERNS: Vec<(&'static str, Regex)> = FIELD_NAMES
        .iter()
        .map(|name| {
            let pattern = format!(r"(?is)\b{}\s*=\s*(.+?)(?:,\s*\n|\n)", name);
            (*name, Regex::new(&pattern).unwrap())
        })
        .collect();
}

/// Parse bibliography source text into entries, in source order.
///
/// Never fails: an empty source yields an empty sequence, and a malformed
/// tail without a recognizable marker ends the scan.
pub fn parse(text: &str) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut pos = 0;

    while let Some(found) = ENTRY_MARKER.find(&text[pos..]) {
        let start = pos + found.start();
        let end = match NEXT_MARKER.find(&text[start + 1..]) {
            Some(next) => start + 1 + next.start(),
            None => text.len(),
        };
        entries.push(parse_block(text[start..end].trim()));
        pos = end;
    }

    entries
}

/// Build one entry from its raw block.
fn parse_block(block: &str) -> Entry {
    let entry_type = MARKER_TYPE
        .captures(block)
        .map(|captures| captures[1].to_lowercase())
        .unwrap_or_else(|| "misc".to_string());

    // Citation key sits between the opening brace and the first comma.
    let key = block
        .find('{')
        .and_then(|brace| {
            let rest = &block[brace + 1..];
            rest.find(',').map(|comma| rest[..comma].trim().to_string())
        })
        .unwrap_or_default();

    let mut fields = BTreeMap::new();
    for (name, pattern) in FIELD_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(block) {
            fields.insert((*name).to_string(), clean_field_value(&captures[1]));
        }
    }

    let year = fields
        .get("year")
        .and_then(|value| YEAR_TOKEN.find(value))
        .map(|token| token.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_YEAR.to_string());

    Entry {
        entry_type,
        key,
        raw_bibtex: block.to_string(),
        fields,
        year,
    }
}

/// Strip one matching pair of value delimiters, decode LaTeX escapes, and
/// collapse internal whitespace runs to single spaces.
fn clean_field_value(value: &str) -> String {
    let mut value = value.trim();
    if let Some(inner) = value.strip_prefix('{').and_then(|v| v.strip_suffix('}')) {
        value = inner;
    }
    if let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        value = inner;
    }
    let decoded = decode_latex(value);
    WHITESPACE_RUN.replace_all(&decoded, " ").trim().to_string()
}
