//! Content-based format detection for string-buffer input

use crate::convert::Direction;

/// Detect whether a buffer holds BibTeX or RIS content.
///
/// Used when no file extension is available; returns `None` when neither
/// format can be recognized.
pub fn detect_format(content: &str) -> Option<Direction> {
    let trimmed = content.trim();

    // BibTeX starts with @
    if trimmed.starts_with('@') {
        return Some(Direction::BibtexToRis);
    }

    // RIS starts with TY  -
    if trimmed.starts_with("TY") && trimmed.len() > 2 {
        if let Some(rest) = trimmed.strip_prefix("TY") {
            if rest.trim_start().starts_with('-') {
                return Some(Direction::RisToBibtex);
            }
        }
    }

    // Fall back to content patterns
    if trimmed.contains("@article")
        || trimmed.contains("@book")
        || trimmed.contains("@inproceedings")
        || trimmed.contains("@misc")
    {
        return Some(Direction::BibtexToRis);
    }
    if trimmed.contains("\nTY  -") || trimmed.contains("ER  -") || trimmed.contains("AU  -") {
        return Some(Direction::RisToBibtex);
    }

    None
}
