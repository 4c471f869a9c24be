//! Document sources: how a file becomes a validation session.
//!
//! A [`DocumentSource`] knows how to open one family of files; the
//! [`SourceRegistry`] dispatches by file extension and falls back to magic
//! byte detection. Opening yields a [`DocumentSession`], the read-only
//! handle both validation passes borrow.
//!
//! # Example
//!
//! ```no_run
//! use doclint::source::SourceRegistry;
//! use doclint::Validator;
//! use std::path::Path;
//!
//! fn main() -> doclint::Result<()> {
//!     let registry = SourceRegistry::with_defaults();
//!     let session = registry.open(Path::new("report.docx"))?;
//!     let report = Validator::default().validate_session(session.as_ref())?;
//!     println!("{} defects", report.defect_count());
//!     Ok(())
//! }
//! ```

mod docx;
mod snapshot;

pub use docx::DocxSource;
pub use snapshot::SnapshotSource;

use crate::detect::detect_format_from_path;
use crate::error::{Error, Result};
use crate::model::{DocumentSnapshot, Metadata, ParagraphView, TableView};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// An open document, scoped to one validation run.
pub trait DocumentSession {
    /// Get the document metadata.
    fn metadata(&self) -> &Metadata;

    /// Get all paragraphs in document order.
    fn paragraphs(&self) -> Result<&[ParagraphView]>;

    /// Get all tables in document order.
    fn tables(&self) -> Result<&[TableView]>;

    /// Copy the session's views into a snapshot.
    fn to_snapshot(&self) -> Result<DocumentSnapshot> {
        Ok(DocumentSnapshot {
            metadata: self.metadata().clone(),
            paragraphs: self.paragraphs()?.to_vec(),
            tables: self.tables()?.to_vec(),
        })
    }
}

/// A session over views that were fully read at open time.
#[derive(Debug)]
pub struct LoadedSession {
    snapshot: DocumentSnapshot,
}

impl LoadedSession {
    /// Wrap a snapshot.
    pub fn new(snapshot: DocumentSnapshot) -> Self {
        log::debug!(
            "Opened session for {} ({} paragraphs, {} tables)",
            describe(&snapshot.metadata),
            snapshot.paragraphs.len(),
            snapshot.tables.len()
        );
        Self { snapshot }
    }

    /// Get the underlying snapshot.
    pub fn snapshot(&self) -> &DocumentSnapshot {
        &self.snapshot
    }
}

impl DocumentSession for LoadedSession {
    fn metadata(&self) -> &Metadata {
        &self.snapshot.metadata
    }

    fn paragraphs(&self) -> Result<&[ParagraphView]> {
        Ok(&self.snapshot.paragraphs)
    }

    fn tables(&self) -> Result<&[TableView]> {
        Ok(&self.snapshot.tables)
    }
}

impl Drop for LoadedSession {
    fn drop(&mut self) {
        log::debug!("Released session for {}", describe(&self.snapshot.metadata));
    }
}

fn describe(metadata: &Metadata) -> &str {
    metadata.source.as_deref().unwrap_or("<memory>")
}

/// Trait for document sources.
///
/// Implement this trait to validate a new document format.
pub trait DocumentSource: Send + Sync {
    /// Get the supported file extensions for this source.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["docx"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this source.
    fn name(&self) -> &str;

    /// Open a file at the given path.
    fn open(&self, path: &Path) -> Result<Box<dyn DocumentSession>>;

    /// Open from bytes.
    fn open_bytes(&self, bytes: &[u8]) -> Result<Box<dyn DocumentSession>>;

    /// Check if this source supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for document sources.
pub struct SourceRegistry {
    sources: HashMap<String, Arc<dyn DocumentSource>>,
    by_name: HashMap<String, Arc<dyn DocumentSource>>,
}

impl SourceRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the default sources (DOCX and JSON snapshots).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(DocxSource::new()));
        registry.register(Arc::new(SnapshotSource::new()));
        registry
    }

    /// Register a source for all its supported extensions.
    pub fn register(&mut self, source: Arc<dyn DocumentSource>) {
        for ext in source.supported_extensions() {
            self.sources.insert(ext.to_lowercase(), source.clone());
        }
        self.by_name.insert(source.name().to_lowercase(), source);
    }

    /// Get a source by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentSource>> {
        self.sources.get(&ext.to_lowercase()).cloned()
    }

    /// Get a source by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentSource>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.sources.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.sources.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Open a file with the source registered for its extension.
    ///
    /// Files with a missing or unregistered extension are identified by
    /// their leading bytes.
    pub fn open(&self, path: &Path) -> Result<Box<dyn DocumentSession>> {
        let by_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|ext| self.get_by_extension(ext));

        let source = match by_ext {
            Some(source) => source,
            None => {
                let format = detect_format_from_path(path)?;
                self.get_by_extension(format.extension())
                    .ok_or_else(|| Error::UnsupportedExtension(format.extension().to_string()))?
            }
        };

        log::debug!("Opening {} with the {} source", path.display(), source.name());
        source.open(path)
    }

    /// Open bytes using the specified extension to pick the source.
    pub fn open_bytes(&self, bytes: &[u8], ext: &str) -> Result<Box<dyn DocumentSession>> {
        let source = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedExtension(ext.to_string()))?;
        source.open_bytes(bytes)
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_with_defaults() {
        let registry = SourceRegistry::with_defaults();
        assert!(registry.supports("docx"));
        assert!(registry.supports("DOCM"));
        assert!(registry.supports("json"));
        assert!(!registry.supports("pdf"));
        assert_eq!(registry.supported_extensions(), vec!["docm", "docx", "json"]);
    }

    #[test]
    fn test_registry_get_by_name() {
        let registry = SourceRegistry::with_defaults();
        assert_eq!(registry.get_by_name("DOCX").map(|s| s.name().to_string()), Some("docx".into()));
        assert!(registry.get_by_name("pdf").is_none());
    }

    #[test]
    fn test_open_bytes_unknown_extension() {
        let registry = SourceRegistry::with_defaults();
        assert!(matches!(
            registry.open_bytes(b"{}", "odt"),
            Err(Error::UnsupportedExtension(ext)) if ext == "odt"
        ));
    }

    #[test]
    fn test_loaded_session() {
        let mut snapshot = DocumentSnapshot::new();
        snapshot.push_paragraph(ParagraphView::new(0, "Intro"));
        let session = LoadedSession::new(snapshot);
        assert_eq!(session.paragraphs().unwrap().len(), 1);
        assert!(session.tables().unwrap().is_empty());
        assert_eq!(session.to_snapshot().unwrap().paragraphs[0].index, 1);
    }
}
