//! Document-level types.

use super::{ParagraphView, TableView};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// All paragraph and table views of one document, in document order.
///
/// This is also the on-disk JSON snapshot format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    /// Document metadata
    #[serde(default)]
    pub metadata: Metadata,

    /// Paragraphs in document order (including paragraphs inside table cells)
    #[serde(default)]
    pub paragraphs: Vec<ParagraphView>,

    /// Top-level tables in document order
    #[serde(default)]
    pub tables: Vec<TableView>,
}

impl DocumentSnapshot {
    /// Create a new empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a paragraph, assigning the next 1-based index.
    pub fn push_paragraph(&mut self, mut paragraph: ParagraphView) -> usize {
        paragraph.index = self.paragraphs.len() + 1;
        self.paragraphs.push(paragraph);
        self.metadata.paragraph_count = self.paragraphs.len();
        self.paragraphs.len()
    }

    /// Append a table, assigning the next 1-based index.
    pub fn push_table(&mut self, mut table: TableView) -> usize {
        table.index = self.tables.len() + 1;
        self.tables.push(table);
        self.metadata.table_count = self.tables.len();
        self.tables.len()
    }

    /// Check if the snapshot has no paragraphs and no tables.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty() && self.tables.is_empty()
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Where the document was loaded from (path or "<bytes>")
    pub source: Option<String>,

    /// Source format name (e.g. "docx")
    pub format: Option<String>,

    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,

    /// Number of paragraphs
    pub paragraph_count: usize,

    /// Number of tables
    pub table_count: usize,
}

impl Metadata {
    /// Create metadata for a source.
    pub fn with_source(source: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            format: Some(format.into()),
            ..Default::default()
        }
    }
}
