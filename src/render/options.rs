//! Report rendering options.

/// Options for rendering a validation report as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Headings listed in the overview
    pub max_headings: usize,

    /// Erroring headings shown with their mismatches
    pub max_erroring_headings: usize,

    /// Errors shown per defective table
    pub max_table_errors: usize,

    /// Width of the style column in the heading overview
    pub style_width: usize,

    /// Characters of heading text shown before eliding with "..."
    pub text_preview: usize,
}

impl ReportOptions {
    /// Create new report options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of headings listed.
    pub fn with_max_headings(mut self, max: usize) -> Self {
        self.max_headings = max;
        self
    }

    /// Set the number of erroring headings shown.
    pub fn with_max_erroring_headings(mut self, max: usize) -> Self {
        self.max_erroring_headings = max;
        self
    }

    /// Set the number of errors shown per table.
    pub fn with_max_table_errors(mut self, max: usize) -> Self {
        self.max_table_errors = max;
        self
    }

    /// Set the style column width.
    pub fn with_style_width(mut self, width: usize) -> Self {
        self.style_width = width;
        self
    }

    /// Set the heading text preview length.
    pub fn with_text_preview(mut self, chars: usize) -> Self {
        self.text_preview = chars;
        self
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            max_headings: 10,
            max_erroring_headings: 5,
            max_table_errors: 3,
            style_width: 20,
            text_preview: 80,
        }
    }
}
