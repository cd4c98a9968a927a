//! RIS serialization
//!
//! Emits tag lines in a fixed canonical order, one `AU`/`ED`/`KW` line per
//! list element, the citation key as the closing `ID` line, and the `ER`
//! end-of-record marker. Absent fields are omitted.

use crate::record::{CitationRecord, EntryType};

/// Serialize a [`CitationRecord`] as a single RIS record.
pub fn format_record(record: &CitationRecord) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(tag_line("TY", record.entry_type.ris_code()));

    if let Some(authors) = record.get_list("author") {
        for author in authors {
            lines.push(tag_line("AU", author));
        }
    }
    if let Some(editors) = record.get_list("editor") {
        for editor in editors {
            lines.push(tag_line("ED", editor));
        }
    }
    if let Some(year) = record.year() {
        lines.push(tag_line("PY", year));
    }
    if let Some(date) = record.get_single("date") {
        lines.push(tag_line("DA", date));
    }
    if let Some(title) = record.title() {
        lines.push(tag_line("TI", title));
    }
    // The entry type decides which container field is consulted; the other
    // is ignored even when present.
    match record.entry_type {
        EntryType::Article => {
            if let Some(journal) = record.get_single("journal") {
                lines.push(tag_line("JO", journal));
            }
        }
        EntryType::InProceedings => {
            if let Some(booktitle) = record.get_single("booktitle") {
                lines.push(tag_line("BT", booktitle));
            }
        }
        _ => {}
    }
    if let Some(abstract_text) = record.get_single("abstract") {
        lines.push(tag_line("AB", abstract_text));
    }
    // isbn and issn share the SN code; isbn takes priority when both exist.
    if let Some(isbn) = record.get_single("isbn") {
        if record.get_single("issn").is_some() {
            tracing::debug!(key = %record.citation_key, "both isbn and issn present, writing isbn");
        }
        lines.push(tag_line("SN", isbn));
    } else if let Some(issn) = record.get_single("issn") {
        lines.push(tag_line("SN", issn));
    }
    if let Some((start, end)) = record.pages() {
        lines.push(tag_line("SP", start));
        lines.push(tag_line("EP", end));
    }
    if let Some(publisher) = record.get_single("publisher") {
        lines.push(tag_line("PB", publisher));
    }
    if let Some(address) = record.get_single("address") {
        lines.push(tag_line("CY", address));
    }
    if let Some(volume) = record.get_single("volume") {
        lines.push(tag_line("VL", volume));
    }
    if let Some(number) = record.get_single("number") {
        lines.push(tag_line("IS", number));
    }
    if let Some(url) = record.get_single("url") {
        lines.push(tag_line("UR", url));
    }
    if let Some(doi) = record.doi() {
        lines.push(tag_line("DO", doi));
    }
    if let Some(edition) = record.get_single("edition") {
        lines.push(tag_line("ET", edition));
    }
    if let Some(keywords) = record.get_list("keywords") {
        for keyword in keywords {
            lines.push(tag_line("KW", keyword));
        }
    }

    lines.push(tag_line("ID", &record.citation_key));
    lines.push("ER  -".to_string());
    lines.join("\n")
}

fn tag_line(code: &str, value: &str) -> String {
    format!("{}  - {}", code, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;

    #[test]
    fn test_format_worked_example() {
        let mut record = CitationRecord::new(EntryType::Article);
        record.citation_key = "Doe2020".to_string();
        record.push_list("author", "Doe, Jane");
        record.push_list("author", "Roe, Richard");
        record.set("title", FieldValue::Single("Example Study".into()));
        record.set("year", FieldValue::Single("2020".into()));

        let output = format_record(&record);
        assert!(output.starts_with("TY  - JOUR"));
        assert!(output.contains("AU  - Doe, Jane"));
        assert!(output.contains("AU  - Roe, Richard"));
        assert!(output.contains("TI  - Example Study"));
        assert!(output.contains("PY  - 2020"));
        assert!(output.ends_with("ID  - Doe2020\nER  -"));
    }

    #[test]
    fn test_format_pages_as_two_lines() {
        let mut record = CitationRecord::new(EntryType::Article);
        record.set(
            "pages",
            FieldValue::Pages {
                start: "125".into(),
                end: "148".into(),
            },
        );
        let output = format_record(&record);
        assert!(output.contains("SP  - 125\nEP  - 148"));
    }

    #[test]
    fn test_format_isbn_wins_over_issn() {
        let mut record = CitationRecord::new(EntryType::Book);
        record.set("isbn", FieldValue::Single("978-3-16-148410-0".into()));
        record.set("issn", FieldValue::Single("2093-7423".into()));
        let output = format_record(&record);
        assert!(output.contains("SN  - 978-3-16-148410-0"));
        assert!(!output.contains("2093-7423"));
    }

    #[test]
    fn test_format_issn_alone_uses_shared_code() {
        let mut record = CitationRecord::new(EntryType::Article);
        record.set("issn", FieldValue::Single("2093-7423".into()));
        let output = format_record(&record);
        assert!(output.contains("SN  - 2093-7423"));
    }

    #[test]
    fn test_format_booktitle_ignored_for_articles() {
        let mut record = CitationRecord::new(EntryType::Article);
        record.set("journal", FieldValue::Single("Nature".into()));
        record.set("booktitle", FieldValue::Single("Ignored".into()));
        let output = format_record(&record);
        assert!(output.contains("JO  - Nature"));
        assert!(!output.contains("BT  -"));
    }

    #[test]
    fn test_format_generic_type_code() {
        let record = CitationRecord::new(EntryType::Generic);
        let output = format_record(&record);
        assert!(output.starts_with("TY  - GEN"));
        assert!(output.contains("ID  - citation"));
    }
}
