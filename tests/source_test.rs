//! Integration tests for document sources and the file-level API.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use doclint::error::Result;
use doclint::source::LoadedSession;
use doclint::{
    render, snapshot_file, validate_file, BorderStyle, DocumentSession, DocumentSnapshot,
    DocumentSource, Doclint, Error, JsonFormat, ParagraphView, SourceRegistry, TableGrid,
    TableView,
};
use tempfile::TempDir;

/// Source serving a fixed snapshot for any input.
struct FixedSource {
    snapshot: DocumentSnapshot,
}

impl DocumentSource for FixedSource {
    fn supported_extensions(&self) -> &[&str] {
        &["fixed"]
    }

    fn name(&self) -> &str {
        "fixed"
    }

    fn open(&self, _path: &Path) -> Result<Box<dyn DocumentSession>> {
        Ok(Box::new(LoadedSession::new(self.snapshot.clone())))
    }

    fn open_bytes(&self, _bytes: &[u8]) -> Result<Box<dyn DocumentSession>> {
        Ok(Box::new(LoadedSession::new(self.snapshot.clone())))
    }
}

fn sample_snapshot() -> DocumentSnapshot {
    let mut snapshot = DocumentSnapshot::new();
    snapshot.push_paragraph(
        ParagraphView::new(0, "Введение")
            .with_style("Heading 1")
            .with_font(14.0, true, false)
            .with_spacing(6.0, 12.0),
    );
    snapshot.push_paragraph(
        ParagraphView::new(0, "Таблица 1 -- Итоги").with_style("Table Title"),
    );
    snapshot.push_table(
        TableView::new(
            0,
            TableGrid::from_strings(vec![vec!["Имя", "Значение"], vec!["Альфа", "Бета"]]),
        )
        .with_header("Table Heading", BorderStyle::Double)
        .with_title("Таблица 1 -- Итоги", "Table Title"),
    );
    snapshot
}

fn write_snapshot(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let json = render::to_json(&sample_snapshot(), JsonFormat::Pretty).unwrap();
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn test_open_snapshot_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, "thesis.json");

    let report = validate_file(&path).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.metadata.paragraph_count, 2);
    assert_eq!(report.tables.as_ref().unwrap().table_count, 1);
}

#[test]
fn test_open_falls_back_to_magic_bytes() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, "thesis.export");

    let session = SourceRegistry::with_defaults().open(&path).unwrap();
    assert_eq!(session.paragraphs().unwrap().len(), 2);
}

#[test]
fn test_open_unknown_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "just some text").unwrap();

    assert!(matches!(validate_file(&path), Err(Error::UnknownFormat)));
}

#[test]
fn test_open_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = validate_file(dir.path().join("missing.docx"));
    assert!(result.is_err());
}

#[test]
fn test_snapshot_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, "thesis.json");

    let snapshot = snapshot_file(&path).unwrap();
    assert_eq!(snapshot.paragraphs, sample_snapshot().paragraphs);
    assert_eq!(snapshot.tables, sample_snapshot().tables);
}

#[test]
fn test_malformed_snapshot() {
    let result = SourceRegistry::with_defaults().open_bytes(b"{\"paragraphs\": 3}", "json");
    assert!(result.is_err());
}

#[test]
fn test_custom_source() {
    let source = Arc::new(FixedSource {
        snapshot: sample_snapshot(),
    });
    let result = Doclint::new()
        .with_source(source)
        .validate_bytes(b"", "FIXED")
        .unwrap();
    assert!(result.is_clean());
    assert!(result.to_text().contains("All tables are correct."));
}

#[test]
fn test_text_and_json_entry_points() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, "thesis.json");

    let text = doclint::to_text(&path).unwrap();
    assert!(text.contains("Heading check results"));
    assert!(text.contains("Total headings: 1"));

    let json = doclint::to_json(&path, JsonFormat::Compact).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["headings"]["headings"][0]["text"], "Введение");
    assert_eq!(value["tables"]["tables"][0]["title_correct"], true);
}
