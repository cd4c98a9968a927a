//! RIS record parser
//!
//! Parses a sequence of `XX  - value` tag lines into a [`CitationRecord`].
//! Repeated `AU`/`ED`/`KW` tags accumulate in order; other known tags
//! overwrite their slot (last occurrence wins). Lines that do not look like
//! a tag continue the previous tagged value, which is how multi-line
//! abstracts arrive. An abstract body line that itself starts with two
//! uppercase letters and a hyphen will be taken for a tag; this is a known
//! limitation of the line grammar.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ConvertError;
use crate::mapping::{Multiplicity, FIELD_MAP};
use crate::record::{CitationRecord, EntryType, FieldValue};

lazy_static! {
    static ref TAG_LINE: Regex = Regex::new(r"^([A-Z]{2})\s*-\s*(.*)$").unwrap();
}

/// Parse a single RIS record into a [`CitationRecord`].
pub fn parse_record(input: &str) -> Result<CitationRecord, ConvertError> {
    let mut record = CitationRecord::new(EntryType::Generic);
    let mut page_start: Option<String> = None;
    let mut page_end: Option<String> = None;
    // Target for continuation lines: the field the last tag wrote to.
    let mut last_field: Option<&'static str> = None;
    let mut saw_tag = false;

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(caps) = TAG_LINE.captures(line) else {
            if let Some(name) = last_field {
                record.append_to(name, line);
            }
            continue;
        };
        saw_tag = true;
        let code = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let value = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();

        match code {
            "TY" => {
                record.entry_type = EntryType::from_ris_code(value);
                last_field = None;
            }
            "ID" => {
                if !value.is_empty() {
                    record.citation_key = value.to_string();
                }
                last_field = None;
            }
            "ER" => break,
            "SP" => {
                page_start = Some(value.to_string());
                last_field = None;
            }
            "EP" => {
                page_end = Some(value.to_string());
                last_field = None;
            }
            "DA" => {
                if !value.is_empty() {
                    record.set("date", FieldValue::Single(value.to_string()));
                }
                last_field = Some("date");
            }
            _ => match FIELD_MAP.by_code(code) {
                Some(spec) => {
                    match spec.multiplicity {
                        Multiplicity::List => record.push_list(spec.name, value),
                        Multiplicity::Scalar => {
                            record.set(spec.name, FieldValue::Single(value.to_string()))
                        }
                    }
                    last_field = Some(spec.name);
                }
                None => {
                    tracing::debug!(code, "ignoring unrecognized tag");
                    last_field = None;
                }
            },
        }
    }

    if !saw_tag {
        return Err(ConvertError::malformed_entry("no tag lines found"));
    }

    match (page_start, page_end) {
        (Some(start), Some(end)) => record.set("pages", FieldValue::Pages { start, end }),
        (Some(_), None) | (None, Some(_)) => {
            tracing::debug!(key = %record.citation_key, "incomplete page range, dropping");
        }
        (None, None) => {}
    }

    record.prune_empty();
    Ok(record)
}
