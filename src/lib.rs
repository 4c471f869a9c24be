//! # doclint
//!
//! Structure linter for word-processing documents.
//!
//! This library checks a document's headings against a fixed formatting
//! standard and its tables against a set of layout rules, producing a
//! structured report.
//!
//! ## Quick Start
//!
//! ```no_run
//! use doclint::{render, validate_file};
//!
//! fn main() -> doclint::Result<()> {
//!     // Validate a DOCX file
//!     let report = validate_file("thesis.docx")?;
//!
//!     // Print the summary
//!     let options = render::ReportOptions::default();
//!     println!("{}", render::to_text(&report, &options));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Checks
//!
//! - **Heading classification**: style names first, font metrics as a fallback
//! - **Heading format**: font size, bold, italic and spacing per level
//! - **Table rules**: title, header row, empty cells, trailing periods, capitals
//! - **Parallel processing**: Uses Rayon for both passes

pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod rules;
pub mod source;
pub mod validate;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_docx, DocFormat};
pub use error::{Error, Result};
pub use model::{
    Attr, BorderStyle, CellPos, DocumentSnapshot, Metadata, ParagraphView, TableGrid, TableView,
    TitleView,
};
pub use parser::DocxParser;
pub use render::{JsonFormat, ReportOptions};
pub use rules::{
    check_format, check_table, classify, FormatMismatch, HeadingClassification, HeadingLevel,
    IgnoreReason,
};
pub use source::{DocumentSession, DocumentSource, SourceRegistry};
pub use validate::{
    HeadingReport, HeadingResult, IgnoredParagraph, TableReport, TableResult, ValidateOptions,
    ValidationReport, Validator,
};

use std::path::Path;

/// Validate a document file with default options.
///
/// The format is chosen by extension (`.docx`, `.docm`, `.json`), falling
/// back to the file's leading bytes.
///
/// # Example
///
/// ```no_run
/// use doclint::validate_file;
///
/// let report = validate_file("thesis.docx").unwrap();
/// println!("Defects: {}", report.defect_count());
/// ```
pub fn validate_file<P: AsRef<Path>>(path: P) -> Result<ValidationReport> {
    Doclint::new().validate(path).map(DoclintResult::into_report)
}

/// Validate a document file with custom options.
pub fn validate_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ValidateOptions,
) -> Result<ValidationReport> {
    Doclint::new()
        .with_options(options)
        .validate(path)
        .map(DoclintResult::into_report)
}

/// Validate a document held in memory.
///
/// # Arguments
///
/// * `data` - File content
/// * `ext` - Extension naming the format (e.g. `"docx"`)
pub fn validate_bytes(data: &[u8], ext: &str) -> Result<ValidationReport> {
    Doclint::new()
        .validate_bytes(data, ext)
        .map(DoclintResult::into_report)
}

/// Read a document file into a snapshot of its paragraph and table views.
///
/// # Example
///
/// ```no_run
/// use doclint::{render, snapshot_file, JsonFormat};
///
/// let snapshot = snapshot_file("thesis.docx").unwrap();
/// let json = render::to_json(&snapshot, JsonFormat::Pretty).unwrap();
/// std::fs::write("thesis.json", json).unwrap();
/// ```
pub fn snapshot_file<P: AsRef<Path>>(path: P) -> Result<DocumentSnapshot> {
    let session = SourceRegistry::with_defaults().open(path.as_ref())?;
    session.to_snapshot()
}

/// Validate a file and render the text summary.
pub fn to_text<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(Doclint::new().validate(path)?.to_text())
}

/// Validate a file and render the report as JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    Doclint::new().validate(path)?.to_json(format)
}

/// Builder for validating documents.
///
/// # Example
///
/// ```no_run
/// use doclint::Doclint;
///
/// let summary = Doclint::new()
///     .sequential()
///     .tables_only()
///     .with_max_table_errors(10)
///     .validate("thesis.docx")?
///     .to_text();
/// # Ok::<(), doclint::Error>(())
/// ```
pub struct Doclint {
    validate_options: ValidateOptions,
    report_options: ReportOptions,
    registry: SourceRegistry,
}

impl Doclint {
    /// Create a new builder with the default sources.
    pub fn new() -> Self {
        Self {
            validate_options: ValidateOptions::default(),
            report_options: ReportOptions::default(),
            registry: SourceRegistry::with_defaults(),
        }
    }

    /// Replace the validation options.
    pub fn with_options(mut self, options: ValidateOptions) -> Self {
        self.validate_options = options;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.validate_options = self.validate_options.sequential();
        self
    }

    /// Check headings only.
    pub fn headings_only(mut self) -> Self {
        self.validate_options = self.validate_options.headings_only();
        self
    }

    /// Check tables only.
    pub fn tables_only(mut self) -> Self {
        self.validate_options = self.validate_options.tables_only();
        self
    }

    /// Replace the report options.
    pub fn with_report_options(mut self, options: ReportOptions) -> Self {
        self.report_options = options;
        self
    }

    /// Set the number of errors shown per table.
    pub fn with_max_table_errors(mut self, max: usize) -> Self {
        self.report_options = self.report_options.with_max_table_errors(max);
        self
    }

    /// Register an additional document source.
    pub fn with_source(mut self, source: std::sync::Arc<dyn DocumentSource>) -> Self {
        self.registry.register(source);
        self
    }

    /// Validate a document file.
    pub fn validate<P: AsRef<Path>>(self, path: P) -> Result<DoclintResult> {
        let session = self.registry.open(path.as_ref())?;
        self.finish(session.as_ref())
    }

    /// Validate a document held in memory.
    pub fn validate_bytes(self, data: &[u8], ext: &str) -> Result<DoclintResult> {
        let session = self.registry.open_bytes(data, ext)?;
        self.finish(session.as_ref())
    }

    fn finish(self, session: &dyn DocumentSession) -> Result<DoclintResult> {
        let report = Validator::new(self.validate_options).validate_session(session)?;
        Ok(DoclintResult {
            report,
            report_options: self.report_options,
        })
    }
}

impl Default for Doclint {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of validating a document.
pub struct DoclintResult {
    /// The validation report
    pub report: ValidationReport,
    /// Report options to use
    report_options: ReportOptions,
}

impl DoclintResult {
    /// Render the text summary.
    pub fn to_text(&self) -> String {
        render::to_text(&self.report, &self.report_options)
    }

    /// Render the report as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.report, format)
    }

    /// Check if no defect was found.
    pub fn is_clean(&self) -> bool {
        self.report.is_clean()
    }

    /// Get the report.
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Take the report.
    pub fn into_report(self) -> ValidationReport {
        self.report
    }
}
