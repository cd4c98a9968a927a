//! Conversion error types

use std::path::PathBuf;

use thiserror::Error;

/// Error type for conversion failures
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("unsupported format: {message}")]
    UnsupportedFormat { message: String },

    #[error("malformed entry: {message}")]
    MalformedEntry { message: String },

    #[error("malformed field '{field}': {message}")]
    MalformedField { field: String, message: String },

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ConvertError {
    pub(crate) fn malformed_entry(message: impl Into<String>) -> Self {
        Self::MalformedEntry {
            message: message.into(),
        }
    }

    pub(crate) fn unsupported_format(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ConvertError::malformed_entry("no opening marker");
        assert_eq!(err.to_string(), "malformed entry: no opening marker");

        let err = ConvertError::FileNotFound {
            path: PathBuf::from("refs.bib"),
        };
        assert!(err.to_string().contains("refs.bib"));
    }
}
