//! JSON snapshot document source.
//!
//! Snapshots are [`DocumentSnapshot`] values serialized with serde, as
//! written by `doclint dump`. They let documents be validated without the
//! original package and make fixtures easy to write by hand.

use super::{DocumentSession, DocumentSource, LoadedSession};
use crate::detect::DocFormat;
use crate::error::Result;
use crate::model::DocumentSnapshot;
use std::path::Path;

/// Opens `.json` document snapshots.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    _private: (),
}

impl SnapshotSource {
    /// Create a new snapshot source.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn load(&self, bytes: &[u8], origin: String) -> Result<Box<dyn DocumentSession>> {
        let mut snapshot: DocumentSnapshot = serde_json::from_slice(bytes)?;
        normalize(&mut snapshot);
        snapshot.metadata.source = Some(origin);
        snapshot.metadata.format = Some(DocFormat::Snapshot.extension().to_string());
        Ok(Box::new(LoadedSession::new(snapshot)))
    }
}

/// Make element counts agree with the content and fill missing indices.
fn normalize(snapshot: &mut DocumentSnapshot) {
    for (i, p) in snapshot.paragraphs.iter_mut().enumerate() {
        if p.index == 0 {
            p.index = i + 1;
        }
    }
    for (i, t) in snapshot.tables.iter_mut().enumerate() {
        if t.index == 0 {
            t.index = i + 1;
        }
    }
    snapshot.metadata.paragraph_count = snapshot.paragraphs.len();
    snapshot.metadata.table_count = snapshot.tables.len();
}

impl DocumentSource for SnapshotSource {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "snapshot"
    }

    fn open(&self, path: &Path) -> Result<Box<dyn DocumentSession>> {
        let bytes = std::fs::read(path)?;
        self.load(&bytes, path.display().to_string())
    }

    fn open_bytes(&self, bytes: &[u8]) -> Result<Box<dyn DocumentSession>> {
        self.load(bytes, "<bytes>".to_string())
    }
}
