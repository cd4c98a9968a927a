//! Canonical citation record shared by both format parsers and serializers

use serde::{Deserialize, Serialize};

/// Citation key used when the source record carries none
pub const DEFAULT_CITE_KEY: &str = "citation";

/// Entry type of a citation record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    Article,
    InProceedings,
    Book,
    Generic,
}

impl EntryType {
    /// Parse a BibTeX entry keyword (case-insensitive)
    #[allow(clippy::should_implement_trait)]
    pub fn from_bibtex_keyword(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "article" => Self::Article,
            "inproceedings" | "conference" => Self::InProceedings,
            "book" => Self::Book,
            _ => Self::Generic,
        }
    }

    /// Canonical BibTeX keyword
    pub fn bibtex_keyword(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::InProceedings => "inproceedings",
            Self::Book => "book",
            Self::Generic => "misc",
        }
    }

    /// Parse a RIS `TY` code
    pub fn from_ris_code(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "JOUR" => Self::Article,
            "CONF" => Self::InProceedings,
            "BOOK" => Self::Book,
            _ => Self::Generic,
        }
    }

    /// Canonical RIS `TY` code
    pub fn ris_code(&self) -> &'static str {
        match self {
            Self::Article => "JOUR",
            Self::InProceedings => "CONF",
            Self::Book => "BOOK",
            Self::Generic => "GEN",
        }
    }
}

/// Value of a single citation field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Plain scalar value
    Single(String),
    /// Ordered multi-valued field (authors, editors, keywords)
    List(Vec<String>),
    /// Page range, both halves required
    Pages { start: String, end: String },
}

/// A single named field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
}

/// A parsed citation record, independent of source format.
///
/// Constructed fresh per input record by a parser, consumed once by a
/// serializer. Field insertion order is preserved but serializers emit a
/// fixed canonical order regardless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationRecord {
    pub entry_type: EntryType,
    pub citation_key: String,
    fields: Vec<Field>,
}

impl CitationRecord {
    /// Create an empty record with the default citation key
    pub fn new(entry_type: EntryType) -> Self {
        Self {
            entry_type,
            citation_key: DEFAULT_CITE_KEY.to_string(),
            fields: Vec::new(),
        }
    }

    /// Set a field, replacing any existing value under the same name
    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        if let Some(existing) = self.fields.iter_mut().find(|f| f.name == name) {
            existing.value = value;
        } else {
            self.fields.push(Field { name, value });
        }
    }

    /// Append one element to a list-valued field, creating it when absent
    pub fn push_list(&mut self, name: &str, item: impl Into<String>) {
        if let Some(existing) = self.fields.iter_mut().find(|f| f.name == name) {
            if let FieldValue::List(items) = &mut existing.value {
                items.push(item.into());
                return;
            }
            // A scalar slipped in under a list name; promote it.
            let prior = match &existing.value {
                FieldValue::Single(s) => vec![s.clone(), item.into()],
                _ => vec![item.into()],
            };
            existing.value = FieldValue::List(prior);
            return;
        }
        self.fields.push(Field {
            name: name.to_string(),
            value: FieldValue::List(vec![item.into()]),
        });
    }

    /// Append continuation text to an existing field: onto the scalar value,
    /// or onto the last element of a list. No-op when the field is absent.
    pub fn append_to(&mut self, name: &str, extra: &str) {
        let Some(field) = self.fields.iter_mut().find(|f| f.name == name) else {
            return;
        };
        match &mut field.value {
            FieldValue::Single(value) => {
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(extra);
            }
            FieldValue::List(items) => {
                if let Some(last) = items.last_mut() {
                    if !last.is_empty() {
                        last.push(' ');
                    }
                    last.push_str(extra);
                }
            }
            FieldValue::Pages { .. } => {}
        }
    }

    /// Drop fields that ended up empty so serializers never emit blank values
    pub(crate) fn prune_empty(&mut self) {
        for field in &mut self.fields {
            if let FieldValue::List(items) = &mut field.value {
                items.retain(|item| !item.is_empty());
            }
        }
        self.fields.retain(|f| match &f.value {
            FieldValue::Single(value) => !value.is_empty(),
            FieldValue::List(items) => !items.is_empty(),
            FieldValue::Pages { start, end } => !start.is_empty() && !end.is_empty(),
        });
    }

    /// Get a field value by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    /// Get a scalar field value
    pub fn get_single(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(FieldValue::Single(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get a list-valued field
    pub fn get_list(&self, name: &str) -> Option<&[String]> {
        match self.get(name) {
            Some(FieldValue::List(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Get the page range when both halves are present
    pub fn pages(&self) -> Option<(&str, &str)> {
        match self.get("pages") {
            Some(FieldValue::Pages { start, end }) => Some((start.as_str(), end.as_str())),
            _ => None,
        }
    }

    /// True when the record carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    // Convenience accessors

    pub fn title(&self) -> Option<&str> {
        self.get_single("title")
    }

    pub fn authors(&self) -> Option<&[String]> {
        self.get_list("author")
    }

    pub fn year(&self) -> Option<&str> {
        self.get_single("year")
    }

    pub fn doi(&self) -> Option<&str> {
        self.get_single("doi")
    }
}
