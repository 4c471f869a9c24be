//! Validation result types.

use crate::model::{CellPos, Metadata};
use crate::rules::{FormatMismatch, HeadingLevel, IgnoreReason};
use serde::{Deserialize, Serialize};

/// Characters of heading text kept in a result.
pub const HEADING_TEXT_LIMIT: usize = 100;

/// Characters of ignored paragraph text kept in a result.
pub const IGNORED_TEXT_LIMIT: usize = 50;

/// Format check outcome for one heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingResult {
    /// Paragraph index
    pub index: usize,
    /// Assigned level
    pub level: HeadingLevel,
    /// Heading text (first 100 characters)
    pub text: String,
    /// Observed font size
    pub font_size: Option<f32>,
    /// Observed bold flag
    pub bold: Option<bool>,
    /// Style name
    pub style_name: Option<String>,
    /// Deviations from the standard, in check order
    pub mismatches: Vec<FormatMismatch>,
}

impl HeadingResult {
    /// Check if the heading matches its standard.
    pub fn is_correct(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// A heading-like paragraph excluded from heading analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IgnoredParagraph {
    /// Paragraph index
    pub index: usize,
    /// Text (first 50 characters)
    pub text: String,
    /// Style name
    pub style_name: Option<String>,
    /// Why it was ignored
    pub reason: IgnoreReason,
}

/// Outcome of the heading pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadingReport {
    /// Headings in document order
    pub headings: Vec<HeadingResult>,
    /// Table captions excluded from analysis
    pub ignored: Vec<IgnoredParagraph>,
    /// Paragraphs with empty text
    pub skipped_empty: usize,
    /// Paragraphs whose text could not be read
    pub skipped_unreadable: usize,
    /// Paragraphs visited
    pub paragraph_count: usize,
}

impl HeadingReport {
    /// Number of compliant headings.
    pub fn correct_count(&self) -> usize {
        self.headings.iter().filter(|h| h.is_correct()).count()
    }

    /// Number of headings with at least one mismatch.
    pub fn error_count(&self) -> usize {
        self.headings.len() - self.correct_count()
    }

    /// Iterate headings with mismatches.
    pub fn erroring(&self) -> impl Iterator<Item = &HeadingResult> {
        self.headings.iter().filter(|h| !h.is_correct())
    }
}

/// Rule outcome for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableResult {
    /// Table index
    pub index: usize,
    /// Candidate title text (the preceding paragraph, cleaned)
    pub title: Option<String>,
    /// A preceding paragraph exists and its text is non-empty or unreadable
    pub has_title: bool,
    /// The title passed every title check
    pub title_correct: bool,
    /// The header row passed the style and border checks
    pub header_row_correct: bool,
    /// Cells with no text
    pub empty_cells: Vec<CellPos>,
    /// Cells ending with a period
    pub cells_with_period: Vec<CellPos>,
    /// Data cells starting with a lowercase letter
    pub cells_without_capital: Vec<CellPos>,
    /// All defects as messages: title, header, empty, period, capitalization
    pub errors: Vec<String>,
}

impl TableResult {
    /// Check if the table has no defects.
    pub fn is_correct(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcome of the table pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableReport {
    /// Checked tables in document order
    pub tables: Vec<TableResult>,
    /// Tables whose structure could not be read
    pub skipped: usize,
    /// Tables visited
    pub table_count: usize,
}

impl TableReport {
    /// Number of tables without defects.
    pub fn correct_count(&self) -> usize {
        self.tables.iter().filter(|t| t.is_correct()).count()
    }

    /// Number of tables with at least one defect.
    pub fn error_count(&self) -> usize {
        self.tables.len() - self.correct_count()
    }
}

/// Full validation outcome for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Source document metadata
    pub metadata: Metadata,
    /// Heading pass outcome; None when the pass was disabled
    pub headings: Option<HeadingReport>,
    /// Table pass outcome; None when the pass was disabled
    pub tables: Option<TableReport>,
}

impl ValidationReport {
    /// Total number of defective headings and tables.
    pub fn defect_count(&self) -> usize {
        let headings = self.headings.as_ref().map_or(0, HeadingReport::error_count);
        let tables = self.tables.as_ref().map_or(0, TableReport::error_count);
        headings + tables
    }

    /// Check if no defect was found.
    pub fn is_clean(&self) -> bool {
        self.defect_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(index: usize, mismatches: Vec<FormatMismatch>) -> HeadingResult {
        HeadingResult {
            index,
            level: HeadingLevel::clamped(1),
            text: "Intro".to_string(),
            font_size: Some(14.0),
            bold: Some(true),
            style_name: None,
            mismatches,
        }
    }

    #[test]
    fn test_heading_report_counts() {
        let report = HeadingReport {
            headings: vec![
                heading(1, Vec::new()),
                heading(4, vec![FormatMismatch::Bold { expected: true }]),
            ],
            paragraph_count: 5,
            ..Default::default()
        };
        assert_eq!(report.correct_count(), 1);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.erroring().next().map(|h| h.index), Some(4));
    }

    #[test]
    fn test_report_defect_count() {
        let report = ValidationReport {
            metadata: Metadata::default(),
            headings: Some(HeadingReport {
                headings: vec![heading(1, vec![FormatMismatch::Bold { expected: true }])],
                ..Default::default()
            }),
            tables: None,
        };
        assert_eq!(report.defect_count(), 1);
        assert!(!report.is_clean());
    }
}
