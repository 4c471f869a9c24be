//! Error types for doclint library.

use std::io;
use thiserror::Error;

/// Result type alias for doclint operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while opening or validating a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as DOCX or a JSON snapshot.
    #[error("Unknown file format: not a DOCX document or JSON snapshot")]
    UnknownFormat,

    /// No document source is registered for the extension.
    #[error("No document source for extension: {0}")]
    UnsupportedExtension(String),

    /// The DOCX package is missing a part or is not a ZIP archive.
    #[error("Invalid DOCX package: {0}")]
    InvalidDocx(String),

    /// An XML part inside the package is malformed.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// A JSON snapshot could not be read or written.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// The document session could not be established or used.
    #[error("Document session error: {0}")]
    Session(String),

    /// A single attribute of a paragraph, table or cell could not be read.
    #[error("could not read {attribute}: {reason}")]
    ElementRead {
        /// Attribute that failed (e.g. "font size", "cell (2, 3)")
        attribute: String,
        /// Reason reported by the document model
        reason: String,
    },

    /// A table-level read failed; the table cannot be validated.
    #[error("Table {table} could not be read: {reason}")]
    TableStructure {
        /// 1-based table index
        table: usize,
        /// Reason reported by the document model
        reason: String,
    },

    /// Error while rendering a report.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Build an attribute read failure.
    pub fn element_read(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::ElementRead {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error aborts a whole validation run.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::ElementRead { .. } | Error::TableStructure { .. }
        )
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::InvalidDocx(err.to_string()),
        }
    }
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Snapshot(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownFormat;
        assert_eq!(
            err.to_string(),
            "Unknown file format: not a DOCX document or JSON snapshot"
        );

        let err = Error::element_read("font size", "mixed font sizes across runs");
        assert_eq!(
            err.to_string(),
            "could not read font size: mixed font sizes across runs"
        );

        let err = Error::TableStructure {
            table: 2,
            reason: "rows cannot be enumerated".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Table 2 could not be read: rows cannot be enumerated"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_local_errors_are_not_fatal() {
        assert!(!Error::element_read("bold", "unavailable").is_fatal());
        assert!(!Error::TableStructure {
            table: 1,
            reason: "x".into()
        }
        .is_fatal());
        assert!(Error::Session("closed".into()).is_fatal());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Snapshot(_)));
    }
}
