//! The validation orchestrator.

use super::result::{HEADING_TEXT_LIMIT, IGNORED_TEXT_LIMIT};
use super::{
    HeadingReport, HeadingResult, IgnoredParagraph, TableReport, TableResult, ValidateOptions,
    ValidationReport,
};
use crate::error::Result;
use crate::model::{truncate_chars, DocumentSnapshot, Metadata, ParagraphView, TableView};
use crate::rules::{check_format, check_table, classify_detailed, Classification};
use crate::source::DocumentSession;
use rayon::prelude::*;

/// Runs the heading and table passes over a document session.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidateOptions,
}

/// What the heading pass made of one paragraph.
enum ParagraphOutcome {
    Empty,
    Unreadable,
    Ignored(IgnoredParagraph),
    Heading(HeadingResult),
    Plain,
}

impl Validator {
    /// Create a validator.
    pub fn new(options: ValidateOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &ValidateOptions {
        &self.options
    }

    /// Validate an open document session.
    ///
    /// Fails only when the session cannot enumerate its paragraphs or tables.
    pub fn validate_session(&self, session: &dyn DocumentSession) -> Result<ValidationReport> {
        let paragraphs = if self.options.check_headings {
            Some(session.paragraphs()?)
        } else {
            None
        };
        let tables = if self.options.check_tables {
            Some(session.tables()?)
        } else {
            None
        };
        Ok(self.run(session.metadata(), paragraphs, tables))
    }

    /// Validate an in-memory snapshot.
    pub fn validate_snapshot(&self, snapshot: &DocumentSnapshot) -> ValidationReport {
        let paragraphs = self
            .options
            .check_headings
            .then_some(snapshot.paragraphs.as_slice());
        let tables = self
            .options
            .check_tables
            .then_some(snapshot.tables.as_slice());
        self.run(&snapshot.metadata, paragraphs, tables)
    }

    fn run(
        &self,
        metadata: &Metadata,
        paragraphs: Option<&[ParagraphView]>,
        tables: Option<&[TableView]>,
    ) -> ValidationReport {
        let heading_pass = || paragraphs.map(|p| self.validate_paragraphs(p));
        let table_pass = || tables.map(|t| self.validate_tables(t));

        let (headings, tables) = if self.options.parallel {
            rayon::join(heading_pass, table_pass)
        } else {
            (heading_pass(), table_pass())
        };

        ValidationReport {
            metadata: metadata.clone(),
            headings,
            tables,
        }
    }

    /// Run the heading pass over paragraphs in document order.
    pub fn validate_paragraphs(&self, paragraphs: &[ParagraphView]) -> HeadingReport {
        let outcomes: Vec<ParagraphOutcome> = if self.options.parallel {
            paragraphs.par_iter().map(paragraph_outcome).collect()
        } else {
            paragraphs.iter().map(paragraph_outcome).collect()
        };

        let mut report = HeadingReport {
            paragraph_count: paragraphs.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                ParagraphOutcome::Empty => report.skipped_empty += 1,
                ParagraphOutcome::Unreadable => report.skipped_unreadable += 1,
                ParagraphOutcome::Ignored(ignored) => report.ignored.push(ignored),
                ParagraphOutcome::Heading(heading) => report.headings.push(heading),
                ParagraphOutcome::Plain => {}
            }
        }

        log::debug!(
            "heading pass: {} paragraphs, {} headings, {} ignored, {} empty",
            report.paragraph_count,
            report.headings.len(),
            report.ignored.len(),
            report.skipped_empty
        );
        report
    }

    /// Run the table pass over tables in document order.
    pub fn validate_tables(&self, tables: &[TableView]) -> TableReport {
        let outcomes: Vec<Option<TableResult>> = if self.options.parallel {
            tables.par_iter().map(table_outcome).collect()
        } else {
            tables.iter().map(table_outcome).collect()
        };

        let table_count = tables.len();
        let tables: Vec<TableResult> = outcomes.into_iter().flatten().collect();
        let report = TableReport {
            skipped: table_count - tables.len(),
            tables,
            table_count,
        };

        log::debug!(
            "table pass: {} tables, {} correct, {} skipped",
            report.table_count,
            report.correct_count(),
            report.skipped
        );
        report
    }
}

fn paragraph_outcome(paragraph: &ParagraphView) -> ParagraphOutcome {
    let classification = match classify_detailed(paragraph) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Skipping paragraph {}: {}", paragraph.index, e);
            return ParagraphOutcome::Unreadable;
        }
    };

    let text = || {
        paragraph
            .text
            .value()
            .map(|t| t.trim().to_string())
            .unwrap_or_default()
    };

    match classification {
        Classification::EmptyText => ParagraphOutcome::Empty,
        Classification::NotAHeading => ParagraphOutcome::Plain,
        Classification::TableCaption(reason) => ParagraphOutcome::Ignored(IgnoredParagraph {
            index: paragraph.index,
            text: truncate_chars(&text(), IGNORED_TEXT_LIMIT),
            style_name: paragraph.style_name.value().cloned(),
            reason,
        }),
        Classification::Heading { level, .. } => ParagraphOutcome::Heading(HeadingResult {
            index: paragraph.index,
            level,
            text: truncate_chars(&text(), HEADING_TEXT_LIMIT),
            font_size: paragraph.font_size.get(),
            bold: paragraph.bold.get(),
            style_name: paragraph.style_name.value().cloned(),
            mismatches: check_format(paragraph, level),
        }),
    }
}

fn table_outcome(table: &TableView) -> Option<TableResult> {
    match check_table(table) {
        Ok(result) => Some(result),
        Err(e) => {
            log::warn!("Skipping table {}: {}", table.index, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attr, BorderStyle, TableGrid};
    use crate::rules::{HeadingLevel, IgnoreReason};

    fn sample() -> DocumentSnapshot {
        let mut doc = DocumentSnapshot::new();
        doc.push_paragraph(
            ParagraphView::new(0, "Introduction")
                .with_style("Heading 1")
                .with_font(14.0, true, false)
                .with_spacing(6.0, 12.0),
        );
        doc.push_paragraph(ParagraphView::new(0, "Body text."));
        doc.push_paragraph(ParagraphView::new(0, "   "));
        doc.push_paragraph(
            ParagraphView::new(0, "Таблица 1 -- Итоги")
                .with_style("Table Caption")
                .with_font(14.0, true, false),
        );
        doc.push_paragraph(ParagraphView::new(0, "Details").with_font(12.0, false, false));
        doc.push_paragraph(ParagraphView::new(0, "Methods").with_font(11.0, true, true));

        let grid = TableGrid::from_strings(vec![vec!["Name", "Value"], vec!["Alpha", "1"]]);
        doc.push_table(
            TableView::new(0, grid)
                .with_header("Таблица заголовок", BorderStyle::Double)
                .with_title("Таблица 1 -- Итоги", "Название: таблица"),
        );
        doc
    }

    #[test]
    fn test_heading_pass_partitions_paragraphs() {
        let report = Validator::default().validate_snapshot(&sample());
        let headings = report.headings.unwrap();

        assert_eq!(headings.paragraph_count, 6);
        assert_eq!(headings.skipped_empty, 1);
        assert_eq!(headings.ignored.len(), 1);
        assert_eq!(headings.ignored[0].index, 4);
        assert_eq!(headings.ignored[0].reason, IgnoreReason::TableTitleStyle);

        let indices: Vec<usize> = headings.headings.iter().map(|h| h.index).collect();
        assert_eq!(indices, vec![1, 6]);
        assert!(headings.headings[0].is_correct());
        assert_eq!(headings.headings[1].level, HeadingLevel::new(4).unwrap());
    }

    #[test]
    fn test_compliant_table() {
        let report = Validator::default().validate_snapshot(&sample());
        let tables = report.tables.unwrap();
        assert_eq!(tables.tables.len(), 1);
        let table = &tables.tables[0];
        assert!(table.is_correct(), "{:?}", table.errors);
        assert!(table.title_correct && table.header_row_correct && table.has_title);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let doc = sample();
        let parallel = Validator::default().validate_snapshot(&doc);
        let sequential = Validator::new(ValidateOptions::new().sequential()).validate_snapshot(&doc);
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_idempotent() {
        let doc = sample();
        let validator = Validator::default();
        assert_eq!(validator.validate_snapshot(&doc), validator.validate_snapshot(&doc));
    }

    #[test]
    fn test_unreadable_elements_are_skipped() {
        let mut doc = sample();
        doc.paragraphs[0].text = Attr::unreadable("range detached");
        doc.tables[0].grid = Attr::unreadable("rows cannot be enumerated");

        let report = Validator::default().validate_snapshot(&doc);
        let headings = report.headings.unwrap();
        assert_eq!(headings.skipped_unreadable, 1);
        assert_eq!(headings.headings.len(), 1);

        let tables = report.tables.unwrap();
        assert_eq!(tables.skipped, 1);
        assert!(tables.tables.is_empty());
    }

    #[test]
    fn test_disabled_passes() {
        let report =
            Validator::new(ValidateOptions::new().headings_only()).validate_snapshot(&sample());
        assert!(report.headings.is_some());
        assert!(report.tables.is_none());
    }
}
