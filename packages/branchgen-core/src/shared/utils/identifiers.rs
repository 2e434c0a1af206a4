//! Identifier scanning
//!
//! Textual helpers the heuristic stages share. None of this resolves
//! symbols; it only finds identifier-shaped words.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref IDENTIFIER: Regex =
        Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").expect("identifier pattern");
    static ref WHOLE_IDENTIFIER: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern");
}

/// Hard keywords excluded from condition identifier scans
const KOTLIN_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw",
    "true", "try", "typealias", "val", "var", "when", "while",
];

pub fn is_keyword(word: &str) -> bool {
    KOTLIN_KEYWORDS.contains(&word)
}

/// Whole text is a single identifier
pub fn is_identifier(text: &str) -> bool {
    WHOLE_IDENTIFIER.is_match(text)
}

/// Non-keyword identifiers in order of appearance (duplicates kept)
///
/// Words that start inside a string literal or right after a digit are
/// skipped, so `"abc"` and `10L` contribute nothing.
pub fn identifiers_in(text: &str) -> Vec<&str> {
    let quoted = quoted_ranges(text);
    IDENTIFIER
        .find_iter(text)
        .filter(|m| !quoted.iter().any(|(s, e)| m.start() > *s && m.start() < *e))
        .filter(|m| {
            text[..m.start()]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_ascii_digit())
        })
        .map(|m| m.as_str())
        .filter(|w| !is_keyword(w))
        .collect()
}

/// `word` occurs in `text` delimited by non-identifier characters
pub fn contains_word(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    text.match_indices(word).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + word.len()..].chars().next();
        !before.map_or(false, is_ident_char) && !after.map_or(false, is_ident_char)
    })
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Byte ranges of double-quoted literals, quote to closing quote
fn quoted_ranges(text: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut open: Option<usize> = None;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        match (c, open) {
            ('\\', Some(_)) if !escaped => {
                escaped = true;
                continue;
            }
            ('"', Some(start)) if !escaped => {
                ranges.push((start, i));
                open = None;
            }
            ('"', None) => open = Some(i),
            _ => {}
        }
        escaped = false;
    }
    if let Some(start) = open {
        ranges.push((start, text.len()));
    }
    ranges
}

/// Uppercase the first character
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Split on anything but ASCII alphanumerics and capitalize each piece
pub fn to_name_fragment(text: &str) -> String {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|piece| !piece.is_empty())
        .map(capitalize)
        .collect()
}
