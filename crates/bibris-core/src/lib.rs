//! bibris-core: bidirectional BibTeX/RIS citation conversion
//!
//! This library converts bibliographic records between the brace-delimited
//! BibTeX entry format and the line-tagged RIS format:
//! - BibTeX and RIS parsers producing a shared [`CitationRecord`] model
//! - a static field-mapping table, inverted once at startup
//! - serializers emitting each format in a fixed canonical order
//! - batch splitting with skip-and-continue error handling
//!
//! Conversion of one record is a pure function of its input text; the only
//! shared state is the read-only mapping table, so batches may be converted
//! concurrently (enable the `parallel` feature).

pub mod bibtex;
pub mod convert;
pub mod error;
pub mod import;
pub mod mapping;
pub mod record;
pub mod ris;
pub mod text;

pub use convert::{
    convert_file, convert_file_to, convert_str, convert_str_auto, split_bibtex, split_ris,
    ConversionOutcome, Direction, SkippedRecord, WrittenOutput,
};
pub use error::ConvertError;
pub use import::detect_format;
pub use record::{CitationRecord, EntryType, FieldValue, DEFAULT_CITE_KEY};
