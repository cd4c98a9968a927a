//! Top-level conversion driver
//!
//! Splits a batch into records, converts each independently, and joins the
//! results. One unparseable record is skipped (and reported) rather than
//! failing the whole batch.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::ConvertError;
use crate::import::detect_format;
use crate::{bibtex, ris};

lazy_static! {
    // One BibTeX record: @word{ ... up to a close brace on its own line end.
    // Entries containing a literal '@' inside a value split early; accepted
    // limitation inherited from the record grammar.
    static ref BIBTEX_RECORD: Regex = Regex::new(r"@\w+\s*\{[^@]*?\n\}").unwrap();
    static ref BLANK_LINES: Regex = Regex::new(r"\r?\n\s*\r?\n").unwrap();
}

/// Conversion direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    BibtexToRis,
    RisToBibtex,
}

impl Direction {
    /// Select a direction from a file extension (`bib` or `ris`)
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "bib" => Some(Self::BibtexToRis),
            "ris" => Some(Self::RisToBibtex),
            _ => None,
        }
    }

    /// Extension of the output format
    pub fn output_extension(&self) -> &'static str {
        match self {
            Self::BibtexToRis => "ris",
            Self::RisToBibtex => "bib",
        }
    }
}

/// A record that could not be converted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Zero-based position of the record in the batch
    pub index: usize,
    pub reason: String,
}

/// Result of converting a batch
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    /// Converted records joined by a blank line
    pub output: String,
    /// Number of records successfully converted
    pub converted: usize,
    /// Records skipped with their reasons, in source order
    pub skipped: Vec<SkippedRecord>,
}

/// Result of a file conversion
#[derive(Debug)]
pub struct WrittenOutput {
    pub path: PathBuf,
    pub outcome: ConversionOutcome,
}

/// Split a batch of BibTeX records into per-record blocks.
///
/// A file with no recognizable record marker is treated as one record.
pub fn split_bibtex(input: &str) -> Vec<&str> {
    let records: Vec<&str> = BIBTEX_RECORD.find_iter(input).map(|m| m.as_str()).collect();
    if records.is_empty() {
        vec![input]
    } else {
        records
    }
}

/// Split a batch of RIS records on blank lines.
pub fn split_ris(input: &str) -> Vec<&str> {
    let records: Vec<&str> = BLANK_LINES
        .split(input.trim())
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect();
    if records.is_empty() {
        vec![input]
    } else {
        records
    }
}

fn convert_one(record_text: &str, direction: Direction) -> Result<String, ConvertError> {
    match direction {
        Direction::BibtexToRis => {
            bibtex::parse_record(record_text).map(|record| ris::format_record(&record))
        }
        Direction::RisToBibtex => {
            ris::parse_record(record_text).map(|record| bibtex::format_record(&record))
        }
    }
}

/// Convert a batch (or single record) held in a string buffer.
///
/// Never fails: records that cannot be parsed are skipped and reported in
/// the outcome. With the `parallel` feature records convert concurrently;
/// results are collected in source order either way.
pub fn convert_str(input: &str, direction: Direction) -> ConversionOutcome {
    let records = match direction {
        Direction::BibtexToRis => split_bibtex(input),
        Direction::RisToBibtex => split_ris(input),
    };

    #[cfg(feature = "parallel")]
    let results: Vec<Result<String, ConvertError>> = records
        .par_iter()
        .map(|record| convert_one(record, direction))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<String, ConvertError>> = records
        .iter()
        .map(|record| convert_one(record, direction))
        .collect();

    let mut pieces = Vec::new();
    let mut skipped = Vec::new();
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(text) => pieces.push(text),
            Err(err) => {
                tracing::warn!(index, "skipping record: {err}");
                skipped.push(SkippedRecord {
                    index,
                    reason: err.to_string(),
                });
            }
        }
    }

    ConversionOutcome {
        converted: pieces.len(),
        output: pieces.join("\n\n"),
        skipped,
    }
}

/// Convert a string buffer, detecting its format from the content.
pub fn convert_str_auto(input: &str) -> Result<ConversionOutcome, ConvertError> {
    let direction = detect_format(input).ok_or_else(|| {
        ConvertError::unsupported_format("unable to detect BibTeX or RIS content")
    })?;
    Ok(convert_str(input, direction))
}

/// Convert a citation file, writing the result next to it with a
/// `_generated` suffix and the opposite extension.
pub fn convert_file(input: &Path) -> Result<WrittenOutput, ConvertError> {
    convert_file_to(input, None)
}

/// Convert a citation file to an explicit output path.
pub fn convert_file_to(
    input: &Path,
    output: Option<&Path>,
) -> Result<WrittenOutput, ConvertError> {
    if !input.is_file() {
        return Err(ConvertError::FileNotFound {
            path: input.to_path_buf(),
        });
    }
    let extension = input
        .extension()
        .and_then(OsStr::to_str)
        .unwrap_or_default();
    let direction = Direction::from_extension(extension).ok_or_else(|| {
        ConvertError::unsupported_format(format!(
            "extension {:?} (expected .bib or .ris)",
            extension
        ))
    })?;

    let content = fs::read_to_string(input).map_err(|source| ConvertError::Io {
        path: input.to_path_buf(),
        source,
    })?;
    let outcome = convert_str(&content, direction);

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let stem = input
                .file_stem()
                .and_then(OsStr::to_str)
                .unwrap_or("converted");
            input.with_file_name(format!(
                "{}_generated.{}",
                stem,
                direction.output_extension()
            ))
        }
    };
    fs::write(&path, &outcome.output).map_err(|source| ConvertError::Io {
        path: path.clone(),
        source,
    })?;

    Ok(WrittenOutput { path, outcome })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_bibtex_two_records() {
        let input = "@article{A,\n  title = {First}\n}\n\n@book{B,\n  title = {Second}\n}";
        let records = split_bibtex(input);
        assert_eq!(records.len(), 2);
        assert!(records[0].contains("First"));
        assert!(records[1].contains("Second"));
    }

    #[test]
    fn test_split_bibtex_no_marker_single_record() {
        let records = split_bibtex("no entries here at all");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_split_ris_on_blank_lines() {
        let input = "TY  - JOUR\nER  -\n\nTY  - BOOK\nER  -";
        let records = split_ris(input);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_split_ris_no_blank_line_single_record() {
        let records = split_ris("TY  - JOUR\nER  -");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_convert_str_skips_bad_record() {
        // The second block carries no tag lines; the first still converts.
        let input = "TY  - JOUR\nTI  - Good\nER  -\n\nnot a record at all";
        let outcome = convert_str(input, Direction::RisToBibtex);
        assert_eq!(outcome.converted, 1);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].index, 1);
        assert!(outcome.output.contains("title = {Good}"));
    }

    #[test]
    fn test_direction_from_extension() {
        assert_eq!(Direction::from_extension("bib"), Some(Direction::BibtexToRis));
        assert_eq!(Direction::from_extension("RIS"), Some(Direction::RisToBibtex));
        assert_eq!(Direction::from_extension("txt"), None);
    }
}
