//! BibTeX entry parser
//!
//! Extracts the entry type, citation key, and known fields from a single
//! brace-delimited record. Fields may appear in any order; unrecognized
//! field keys are ignored. Values are captured up to the closing brace at
//! the same nesting depth.

use std::collections::HashMap;

use lazy_static::lazy_static;
use nom::{
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace0},
    IResult,
};
use regex::Regex;

use crate::error::ConvertError;
use crate::mapping::{month_number, FIELD_SPECS};
use crate::record::{CitationRecord, EntryType, FieldValue};
use crate::text::{clean_text, split_keywords, split_names};

// Fields recognized by the grammar but absent from the RIS mapping table;
// they only feed the derived composite date.
const DATE_PARTS: [&str; 2] = ["month", "day"];

lazy_static! {
    static ref FIELD_OPENERS: HashMap<&'static str, Regex> = {
        let mut map = HashMap::new();
        for spec in FIELD_SPECS {
            map.insert(spec.name, opener(spec.name));
        }
        for name in DATE_PARTS {
            map.insert(name, opener(name));
        }
        map
    };
    static ref YEAR_SHAPE: Regex = Regex::new(r"^\d{4}$").unwrap();
    static ref NUMERIC_SHAPE: Regex = Regex::new(r"^\d+$").unwrap();
    static ref PAGE_RANGE_SHAPE: Regex = Regex::new(r"^(\d+)\s*[-–]{1,2}\s*(\d+)$").unwrap();
}

fn opener(name: &str) -> Regex {
    // The word boundary keeps `title` from matching inside `booktitle`.
    Regex::new(&format!(r"\b{}\s*=\s*\{{", name)).unwrap()
}

/// Parse a single BibTeX record into a [`CitationRecord`].
pub fn parse_record(input: &str) -> Result<CitationRecord, ConvertError> {
    let (_, (keyword, cite_key)) = envelope(input)
        .map_err(|_| ConvertError::malformed_entry("missing @type{key opening marker"))?;

    let mut record = CitationRecord::new(EntryType::from_bibtex_keyword(keyword));
    let cite_key = cite_key.trim();
    if !cite_key.is_empty() {
        record.citation_key = cite_key.to_string();
    }

    for spec in FIELD_SPECS {
        let raw = match capture_raw(input, spec.name) {
            Ok(Some(raw)) => raw,
            Ok(None) => continue,
            Err(err) => {
                tracing::warn!(key = %record.citation_key, "skipping field: {err}");
                continue;
            }
        };

        match spec.name {
            "author" | "editor" => {
                let names: Vec<String> = split_names(raw)
                    .into_iter()
                    .filter(|n| !n.is_empty())
                    .collect();
                if !names.is_empty() {
                    record.set(spec.name, FieldValue::List(names));
                }
            }
            "keywords" => {
                let keywords = split_keywords(raw);
                if !keywords.is_empty() {
                    record.set(spec.name, FieldValue::List(keywords));
                }
            }
            "pages" => {
                let value = raw.trim();
                if let Some(caps) = PAGE_RANGE_SHAPE.captures(value) {
                    record.set(
                        "pages",
                        FieldValue::Pages {
                            start: caps[1].to_string(),
                            end: caps[2].to_string(),
                        },
                    );
                } else {
                    tracing::debug!(key = %record.citation_key, value, "pages is not a digit range, dropping");
                }
            }
            "year" => {
                let value = clean_text(raw);
                if YEAR_SHAPE.is_match(&value) {
                    record.set("year", FieldValue::Single(value));
                } else {
                    tracing::debug!(key = %record.citation_key, value, "year is not four digits, dropping");
                }
            }
            "volume" | "number" => {
                let value = clean_text(raw);
                if NUMERIC_SHAPE.is_match(&value) {
                    record.set(spec.name, FieldValue::Single(value));
                } else {
                    tracing::debug!(key = %record.citation_key, field = spec.name, value, "non-numeric value, dropping");
                }
            }
            _ => {
                let value = clean_text(raw);
                if !value.is_empty() {
                    record.set(spec.name, FieldValue::Single(value));
                }
            }
        }
    }

    derive_composite_date(input, &mut record);

    Ok(record)
}

/// When year, month, and day are all present the record gains a composite
/// `date` value (`year/month-number/day`) in addition to the standalone year.
fn derive_composite_date(input: &str, record: &mut CitationRecord) {
    let Some(year) = record.year().map(str::to_string) else {
        return;
    };
    let month = capture_raw(input, "month")
        .ok()
        .flatten()
        .map(clean_text)
        .filter(|m| !m.is_empty());
    let day = capture_raw(input, "day")
        .ok()
        .flatten()
        .map(clean_text)
        .filter(|d| !d.is_empty());
    if let (Some(month), Some(day)) = (month, day) {
        record.set(
            "date",
            FieldValue::Single(format!("{}/{}/{}", year, month_number(&month), day)),
        );
    }
}

/// Record envelope: `@keyword{citekey`
fn envelope(input: &str) -> IResult<&str, (&str, &str)> {
    let (rest, _) = multispace0(input)?;
    let (rest, _) = char('@')(rest)?;
    let (rest, keyword) = take_while1(|c: char| c.is_ascii_alphanumeric())(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('{')(rest)?;
    let (rest, cite_key) = take_while(|c: char| c != ',' && c != '}' && c != '\n')(rest)?;
    Ok((rest, (keyword, cite_key)))
}

/// Locate `name = {` and capture the value up to the matching close brace.
///
/// Returns `Ok(None)` when the field is absent and `MalformedField` when the
/// braces never close; a truncated value is never returned silently.
fn capture_raw<'a>(entry: &'a str, name: &'static str) -> Result<Option<&'a str>, ConvertError> {
    let Some(found) = FIELD_OPENERS[name].find(entry) else {
        return Ok(None);
    };
    match scan_braced(&entry[found.end() - 1..]) {
        Some(inner) => Ok(Some(inner)),
        None => Err(ConvertError::MalformedField {
            field: name.to_string(),
            message: "unbalanced braces in value".to_string(),
        }),
    }
}

/// Scan a brace-delimited value, tracking nesting depth and skipping
/// backslash-escaped characters. Input must start at the opening brace.
fn scan_braced(input: &str) -> Option<&str> {
    let bytes = input.as_bytes();
    let mut depth = 0usize;
    let mut pos = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&input[1..pos]);
                }
            }
            b'\\' => {
                pos += 1;
            }
            _ => {}
        }
        pos += 1;
    }
    None
}
