//! DOCX document source.

use super::{DocumentSession, DocumentSource, LoadedSession};
use crate::detect::DocFormat;
use crate::error::Result;
use crate::parser::DocxParser;
use std::path::Path;

/// Opens `.docx` and `.docm` packages.
#[derive(Debug, Clone, Default)]
pub struct DocxSource {
    _private: (),
}

impl DocxSource {
    /// Create a new DOCX source.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn load(&self, parser: DocxParser, origin: String) -> Result<Box<dyn DocumentSession>> {
        let mut snapshot = parser.parse()?;
        snapshot.metadata.source = Some(origin);
        snapshot.metadata.format = Some(DocFormat::Docx.extension().to_string());
        Ok(Box::new(LoadedSession::new(snapshot)))
    }
}

impl DocumentSource for DocxSource {
    fn supported_extensions(&self) -> &[&str] {
        &["docx", "docm"]
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn open(&self, path: &Path) -> Result<Box<dyn DocumentSession>> {
        let parser = DocxParser::open(path)?;
        self.load(parser, path.display().to_string())
    }

    fn open_bytes(&self, bytes: &[u8]) -> Result<Box<dyn DocumentSession>> {
        let parser = DocxParser::from_bytes(bytes)?;
        self.load(parser, "<bytes>".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_docx_source() {
        let source = DocxSource::new();
        assert_eq!(source.name(), "docx");
        assert!(source.supports_extension("DOCX"));
        assert!(!source.supports_extension("json"));
    }

    #[test]
    fn test_open_bytes_rejects_non_zip() {
        let result = DocxSource::new().open_bytes(b"not a package");
        assert!(matches!(result, Err(Error::InvalidDocx(_))));
    }
}
