//! JSON rendering for validation reports.

use crate::error::{Error, Result};
use serde::Serialize;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a report (or a document snapshot) to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentSnapshot, Metadata, ParagraphView};
    use crate::validate::{HeadingReport, ValidationReport};

    fn report() -> ValidationReport {
        let mut metadata = Metadata::with_source("thesis.docx", "docx");
        metadata.title = Some("Thesis".to_string());
        ValidationReport {
            metadata,
            headings: Some(HeadingReport::default()),
            tables: None,
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&report(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("Thesis"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&report(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"tables\":null"));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut doc = DocumentSnapshot::new();
        doc.push_paragraph(ParagraphView::new(0, "Введение").with_style("Заголовок 1"));
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        let back: DocumentSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
