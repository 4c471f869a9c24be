//! Validation orchestration and result types.
//!
//! A [`Validator`] runs two independent passes over a document session: the
//! heading pass classifies every paragraph and checks the format of each
//! heading, and the table pass runs the table rules on every table. Elements
//! that cannot be read are logged and left out of the report.

mod options;
mod result;
mod validator;

pub use options::ValidateOptions;
pub use result::{
    HeadingReport, HeadingResult, IgnoredParagraph, TableReport, TableResult, ValidationReport,
    HEADING_TEXT_LIMIT, IGNORED_TEXT_LIMIT,
};
pub use validator::Validator;
