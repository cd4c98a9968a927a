//! BibTeX serialization
//!
//! Emits fields in a fixed canonical order regardless of the order they
//! appeared in the source record. Absent fields are omitted; the trailing
//! comma on the final field is removed before the closing brace.

use crate::record::{CitationRecord, EntryType};

/// Serialize a [`CitationRecord`] as a single BibTeX entry.
pub fn format_record(record: &CitationRecord) -> String {
    let mut fields: Vec<(&str, String)> = Vec::new();

    if let Some(authors) = record.get_list("author") {
        fields.push(("author", authors.join(" and ")));
    }
    if let Some(editors) = record.get_list("editor") {
        fields.push(("editor", editors.join(" and ")));
    }
    if let Some(title) = record.title() {
        fields.push(("title", title.to_string()));
    }
    // The entry type decides which container field is consulted.
    match record.entry_type {
        EntryType::Article => {
            if let Some(journal) = record.get_single("journal") {
                fields.push(("journal", journal.to_string()));
            }
        }
        EntryType::InProceedings => {
            if let Some(booktitle) = record.get_single("booktitle") {
                fields.push(("booktitle", booktitle.to_string()));
            }
        }
        _ => {}
    }
    if let Some(year) = record.year() {
        fields.push(("year", year.to_string()));
    }
    if let Some(date) = record.get_single("date") {
        fields.push(("date", date.to_string()));
    }
    if let Some(volume) = record.get_single("volume") {
        fields.push(("volume", volume.to_string()));
    }
    if let Some(number) = record.get_single("number") {
        fields.push(("number", number.to_string()));
    }
    if let Some((start, end)) = record.pages() {
        fields.push(("pages", format!("{}--{}", start, end)));
    }
    if let Some(doi) = record.doi() {
        fields.push(("doi", doi.to_string()));
    }
    if let Some(url) = record.get_single("url") {
        fields.push(("url", url.to_string()));
    }
    if let Some(publisher) = record.get_single("publisher") {
        fields.push(("publisher", publisher.to_string()));
    }
    if let Some(address) = record.get_single("address") {
        fields.push(("address", address.to_string()));
    }
    if let Some(abstract_text) = record.get_single("abstract") {
        fields.push(("abstract", abstract_text.to_string()));
    }
    if let Some(isbn) = record.get_single("isbn") {
        fields.push(("isbn", isbn.to_string()));
    } else if let Some(issn) = record.get_single("issn") {
        fields.push(("issn", issn.to_string()));
    }
    if let Some(edition) = record.get_single("edition") {
        fields.push(("edition", edition.to_string()));
    }
    if let Some(keywords) = record.get_list("keywords") {
        fields.push(("keywords", keywords.join(", ")));
    }

    let mut lines: Vec<String> = Vec::with_capacity(fields.len() + 2);
    lines.push(format!(
        "@{}{{{},",
        record.entry_type.bibtex_keyword(),
        record.citation_key
    ));
    for (name, value) in fields {
        lines.push(format!("  {} = {{{}}},", name, value));
    }
    if let Some(last) = lines.last_mut() {
        if last.ends_with(',') {
            last.pop();
        }
    }
    lines.push("}".to_string());
    lines.join("\n")
}
