//! Field-value normalization and multi-value splitting
//!
//! Strips the brace/accent markup BibTeX wraps around field values and splits
//! multi-valued fields into their elements.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // {\c{C}} -> C : accent macro nested one level inside a brace group
    static ref NESTED_ESCAPE: Regex = Regex::new(r"\{\\[a-z]\{([a-zA-Z])\}\}").unwrap();
    // {\o} -> o : bare accent/letter macro in a brace group
    static ref SIMPLE_ESCAPE: Regex = Regex::new(r"\{\\([a-zA-Z])\}").unwrap();
    static ref BRACES: Regex = Regex::new(r"[{}]").unwrap();
    static ref NAME_SEPARATOR: Regex = Regex::new(r"\s+and\s+").unwrap();
    static ref KEYWORD_SEPARATOR: Regex = Regex::new(r",\s*").unwrap();
}

/// Normalize a raw field value: resolve the two escape shapes to their plain
/// letter, drop remaining braces, and trim surrounding whitespace.
pub fn clean_text(text: &str) -> String {
    let text = NESTED_ESCAPE.replace_all(text, "$1");
    let text = SIMPLE_ESCAPE.replace_all(&text, "$1");
    BRACES.replace_all(&text, "").trim().to_string()
}

/// Split an author/editor value on the " and " separator, normalizing each
/// name independently. Order is preserved.
pub fn split_names(names: &str) -> Vec<String> {
    NAME_SEPARATOR
        .split(names.trim())
        .map(|name| clean_text(name.trim()))
        .collect()
}

/// Split a keywords value on commas, dropping empty elements.
pub fn split_keywords(keywords: &str) -> Vec<String> {
    KEYWORD_SEPARATOR
        .split(keywords.trim())
        .filter(|k| !k.trim().is_empty())
        .map(clean_text)
        .collect()
}
