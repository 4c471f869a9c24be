//! Read-only document views consumed by the rule engine.
//!
//! This module defines the boundary between a document source (DOCX
//! package, JSON snapshot, or any other implementation of
//! [`DocumentSession`](crate::source::DocumentSession)) and the validation
//! rules. Every attribute the rules read is an [`Attr`], so a failed read is
//! an ordinary value instead of an aborted pass.

mod attr;
mod document;
mod paragraph;
mod table;

pub use attr::Attr;
pub use document::{DocumentSnapshot, Metadata};
pub use paragraph::ParagraphView;
pub(crate) use paragraph::truncate_chars;
pub use table::{BorderStyle, CellPos, TableGrid, TableView, TitleView};
