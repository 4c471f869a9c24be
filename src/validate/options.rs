//! Validation options.

/// Options for a validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Run the passes and map elements on the rayon pool
    pub parallel: bool,

    /// Run the heading pass
    pub check_headings: bool,

    /// Run the table pass
    pub check_tables: bool,
}

impl ValidateOptions {
    /// Create new validation options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable the heading pass.
    pub fn with_headings(mut self, check: bool) -> Self {
        self.check_headings = check;
        self
    }

    /// Enable or disable the table pass.
    pub fn with_tables(mut self, check: bool) -> Self {
        self.check_tables = check;
        self
    }

    /// Run the heading pass only.
    pub fn headings_only(mut self) -> Self {
        self.check_headings = true;
        self.check_tables = false;
        self
    }

    /// Run the table pass only.
    pub fn tables_only(mut self) -> Self {
        self.check_headings = false;
        self.check_tables = true;
        self
    }
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            check_headings: true,
            check_tables: true,
        }
    }
}
