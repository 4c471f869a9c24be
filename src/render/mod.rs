//! Report rendering: human-readable summaries and JSON.

mod json;
mod options;
mod text;

pub use json::{to_json, JsonFormat};
pub use options::ReportOptions;
pub use text::to_text;
