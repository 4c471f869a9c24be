//! Input format detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Document formats doclint can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    /// Office Open XML word-processing package (.docx, .docm)
    Docx,
    /// JSON snapshot of extracted paragraph and table views
    Snapshot,
}

impl DocFormat {
    /// Extension of the registered source for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            DocFormat::Docx => "docx",
            DocFormat::Snapshot => "json",
        }
    }
}

impl std::fmt::Display for DocFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocFormat::Docx => write!(f, "DOCX"),
            DocFormat::Snapshot => write!(f, "JSON snapshot"),
        }
    }
}

/// ZIP local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const HEADER_LEN: usize = 64;

/// Detect the document format from a file path.
///
/// # Example
/// ```no_run
/// use doclint::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("report.docx").unwrap();
/// println!("Format: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<DocFormat> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut header = Vec::with_capacity(HEADER_LEN);
    reader.take(HEADER_LEN as u64).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the document format from the leading bytes of a file.
///
/// Returns `Err(Error::UnknownFormat)` for anything that is neither a ZIP
/// package nor a JSON object.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DocFormat> {
    if data.starts_with(ZIP_MAGIC) {
        return Ok(DocFormat::Docx);
    }

    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    match data.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') => Ok(DocFormat::Snapshot),
        _ => Err(Error::UnknownFormat),
    }
}

/// Check if a file looks like a DOCX package.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    matches!(detect_format_from_path(path), Ok(DocFormat::Docx))
}

/// Check if bytes look like a DOCX package.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    matches!(detect_format_from_bytes(data), Ok(DocFormat::Docx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_zip_package() {
        let data = b"PK\x03\x04\x14\x00\x06\x00";
        assert_eq!(detect_format_from_bytes(data).unwrap(), DocFormat::Docx);
        assert!(is_docx_bytes(data));
    }

    #[test]
    fn test_detect_snapshot() {
        assert_eq!(
            detect_format_from_bytes(b"  \n{\"paragraphs\": []}").unwrap(),
            DocFormat::Snapshot
        );
        assert_eq!(
            detect_format_from_bytes(b"\xEF\xBB\xBF{}").unwrap(),
            DocFormat::Snapshot
        );
    }

    #[test]
    fn test_detect_unknown() {
        assert!(matches!(
            detect_format_from_bytes(b"%PDF-1.7"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(
            detect_format_from_bytes(b""),
            Err(Error::UnknownFormat)
        ));
        assert!(!is_docx_bytes(b"[1, 2]"));
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(DocFormat::Docx.extension(), "docx");
        assert_eq!(DocFormat::Snapshot.to_string(), "JSON snapshot");
    }
}
