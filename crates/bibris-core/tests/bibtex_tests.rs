//! BibTeX parsing and serialization integration tests

mod common;

use common::fixtures::load_bibtex_fixture;
use bibris_core::{bibtex, ris, split_bibtex, EntryType};

// === Parsing ===

#[test]
fn test_parse_sample_fixture() {
    let input = load_bibtex_fixture("sample.bib");
    let record = bibtex::parse_record(&input).unwrap();

    assert_eq!(record.entry_type, EntryType::Article);
    assert_eq!(record.citation_key, "Fatima2025");
    assert_eq!(record.authors().map(<[String]>::len), Some(3));
    assert_eq!(
        record.authors().unwrap()[0],
        "Fatima, N. Sabiyath",
        "multi-line author value should join cleanly"
    );
    assert_eq!(
        record.title(),
        Some("Enhanced Facial Emotion Recognition Using Vision Transformer Models")
    );
    assert_eq!(record.year(), Some("2025"));
    assert_eq!(record.get_single("date"), Some("2025/01/29"));
    assert_eq!(record.pages(), Some(("125", "148")));
    assert_eq!(record.get_single("issn"), Some("2093-7423"));
    assert_eq!(
        record.get_list("keywords"),
        Some(
            &[
                "emotion recognition".to_string(),
                "vision transformer".to_string(),
                "attention".to_string()
            ][..]
        )
    );
}

#[test]
fn test_split_batch_fixture() {
    let input = load_bibtex_fixture("batch.bib");
    let records = split_bibtex(&input);
    assert_eq!(records.len(), 2);

    let first = bibtex::parse_record(records[0]).unwrap();
    let second = bibtex::parse_record(records[1]).unwrap();
    assert_eq!(first.citation_key, "Codd1970");
    assert_eq!(first.entry_type, EntryType::Article);
    assert_eq!(second.citation_key, "Turing1950");
    assert_eq!(second.entry_type, EntryType::InProceedings);
}

// === Conversion to RIS ===

#[test]
fn test_worked_example_to_ris() {
    let input = "@article{Doe2020, author={Doe, Jane and Roe, Richard}, title={Example Study}, year={2020}}";
    let record = bibtex::parse_record(input).unwrap();
    let output = ris::format_record(&record);

    assert!(output.starts_with("TY  - JOUR"));
    assert!(output.contains("AU  - Doe, Jane"));
    assert!(output.contains("AU  - Roe, Richard"));
    assert!(output.contains("TI  - Example Study"));
    assert!(output.contains("PY  - 2020"));
    assert!(output.ends_with("ID  - Doe2020\nER  -"));

    // Authors keep their source order.
    let first = output.find("AU  - Doe, Jane").unwrap();
    let second = output.find("AU  - Roe, Richard").unwrap();
    assert!(first < second);
}

#[test]
fn test_sample_fixture_to_ris() {
    let input = load_bibtex_fixture("sample.bib");
    let record = bibtex::parse_record(&input).unwrap();
    let output = ris::format_record(&record);

    assert!(output.contains("DA  - 2025/01/29"));
    assert!(output.contains("JO  - Journal of Electrical Engineering Technology"));
    assert!(output.contains("SP  - 125\nEP  - 148"));
    // issn alone still travels under the shared SN code
    assert!(output.contains("SN  - 2093-7423"));
    assert_eq!(output.matches("KW  - ").count(), 3);
}

#[test]
fn test_inproceedings_uses_booktitle() {
    let input = load_bibtex_fixture("batch.bib");
    let records = split_bibtex(&input);
    let record = bibtex::parse_record(records[1]).unwrap();
    let output = ris::format_record(&record);

    assert!(output.starts_with("TY  - CONF"));
    assert!(output.contains("BT  - Mind"));
    assert!(!output.contains("JO  -"));
}

#[test]
fn test_isbn_priority_end_to_end() {
    let input = "@book{K, isbn={978-0-201-89683-1}, issn={0001-0782}}";
    let record = bibtex::parse_record(input).unwrap();
    let output = ris::format_record(&record);
    assert!(output.contains("SN  - 978-0-201-89683-1"));
    assert!(!output.contains("0001-0782"));
}
