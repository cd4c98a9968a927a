//! Static field mapping between BibTeX field names and RIS tag codes
//!
//! The table is expressed once in the BibTeX→RIS direction and inverted at
//! initialization. It is never mutated after construction and is safe to
//! share across concurrent conversions.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// How repeated occurrences of a field combine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    /// One value; a repeated tag overwrites (last occurrence wins)
    Scalar,
    /// Ordered list; repeated tags append
    List,
}

/// RIS side of a mapping entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RisTarget {
    /// Single tag code
    Code(&'static str),
    /// Page range split across two codes
    PageRange {
        start: &'static str,
        end: &'static str,
    },
}

/// One field-mapping entry
#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub target: RisTarget,
    pub multiplicity: Multiplicity,
}

/// The mapping table, BibTeX→RIS direction.
///
/// `issn` precedes `isbn` so that the derived inversion resolves the shared
/// `SN` code to `isbn`; on the reverse direction the original field name is
/// not recoverable.
pub static FIELD_SPECS: &[FieldSpec] = &[
    FieldSpec {
        name: "author",
        target: RisTarget::Code("AU"),
        multiplicity: Multiplicity::List,
    },
    FieldSpec {
        name: "title",
        target: RisTarget::Code("TI"),
        multiplicity: Multiplicity::Scalar,
    },
    FieldSpec {
        name: "year",
        target: RisTarget::Code("PY"),
        multiplicity: Multiplicity::Scalar,
    },
    FieldSpec {
        name: "volume",
        target: RisTarget::Code("VL"),
        multiplicity: Multiplicity::Scalar,
    },
    FieldSpec {
        name: "number",
        target: RisTarget::Code("IS"),
        multiplicity: Multiplicity::Scalar,
    },
    FieldSpec {
        name: "pages",
        target: RisTarget::PageRange {
            start: "SP",
            end: "EP",
        },
        multiplicity: Multiplicity::Scalar,
    },
    FieldSpec {
        name: "doi",
        target: RisTarget::Code("DO"),
        multiplicity: Multiplicity::Scalar,
    },
    FieldSpec {
        name: "url",
        target: RisTarget::Code("UR"),
        multiplicity: Multiplicity::Scalar,
    },
    FieldSpec {
        name: "publisher",
        target: RisTarget::Code("PB"),
        multiplicity: Multiplicity::Scalar,
    },
    FieldSpec {
        name: "journal",
        target: RisTarget::Code("JO"),
        multiplicity: Multiplicity::Scalar,
    },
    FieldSpec {
        name: "booktitle",
        target: RisTarget::Code("BT"),
        multiplicity: Multiplicity::Scalar,
    },
    FieldSpec {
        name: "editor",
        target: RisTarget::Code("ED"),
        multiplicity: Multiplicity::List,
    },
    FieldSpec {
        name: "edition",
        target: RisTarget::Code("ET"),
        multiplicity: Multiplicity::Scalar,
    },
    FieldSpec {
        name: "keywords",
        target: RisTarget::Code("KW"),
        multiplicity: Multiplicity::List,
    },
    FieldSpec {
        name: "issn",
        target: RisTarget::Code("SN"),
        multiplicity: Multiplicity::Scalar,
    },
    FieldSpec {
        name: "isbn",
        target: RisTarget::Code("SN"),
        multiplicity: Multiplicity::Scalar,
    },
    FieldSpec {
        name: "address",
        target: RisTarget::Code("CY"),
        multiplicity: Multiplicity::Scalar,
    },
    FieldSpec {
        name: "abstract",
        target: RisTarget::Code("AB"),
        multiplicity: Multiplicity::Scalar,
    },
];

/// Field mapping with lookups in both directions
pub struct FieldMap {
    by_name: HashMap<&'static str, &'static FieldSpec>,
    by_code: HashMap<&'static str, &'static FieldSpec>,
}

impl FieldMap {
    fn new() -> Self {
        let mut by_name = HashMap::new();
        let mut by_code = HashMap::new();
        for spec in FIELD_SPECS {
            by_name.insert(spec.name, spec);
            if let RisTarget::Code(code) = spec.target {
                // Insertion order makes isbn win the shared SN code.
                by_code.insert(code, spec);
            }
        }
        Self { by_name, by_code }
    }

    /// Look up a mapping entry by BibTeX field name
    pub fn by_name(&self, name: &str) -> Option<&'static FieldSpec> {
        self.by_name.get(name).copied()
    }

    /// Look up a mapping entry by RIS tag code
    pub fn by_code(&self, code: &str) -> Option<&'static FieldSpec> {
        self.by_code.get(code).copied()
    }
}

lazy_static! {
    /// Process-wide mapping table, built once
    pub static ref FIELD_MAP: FieldMap = FieldMap::new();
}

/// Month-name abbreviations to two-digit numbers
static MONTHS: [(&str, &str); 12] = [
    ("jan", "01"),
    ("feb", "02"),
    ("mar", "03"),
    ("apr", "04"),
    ("may", "05"),
    ("jun", "06"),
    ("jul", "07"),
    ("aug", "08"),
    ("sep", "09"),
    ("oct", "10"),
    ("nov", "11"),
    ("dec", "12"),
];

/// Convert a month name to its two-digit number, passing unrecognized text
/// (already-numeric or foreign-language months) through unchanged.
pub fn month_number(text: &str) -> String {
    let lower = text.trim().to_lowercase();
    MONTHS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, number)| number.to_string())
        .unwrap_or_else(|| text.trim().to_string())
}
