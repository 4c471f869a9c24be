//! Structure rules: heading classification, heading format and table checks.
//!
//! Every rule is a pure function over the read-only views in [`crate::model`].

mod classifier;
mod format;
mod markers;
mod standard;
mod table;

pub use classifier::{
    classify, classify_detailed, level_from_metrics, Classification, HeadingClassification,
    IgnoreReason, LevelSource,
};
pub use format::{check_format, FormatMismatch};
pub use markers::{
    contains_any, is_table_title_text, HEADER_ROW_HEADING_TOKENS, HEADER_ROW_TABLE_TOKENS,
    HEADING_STYLE_TOKENS, TABLE_CAPTION_STYLE_TOKENS, TITLE_STYLE_TOKENS,
};
pub use standard::{
    standard_for, Alignment, HeadingLevel, HeadingStandard, FONT_SIZE_TOLERANCE,
    SPACING_TOLERANCE,
};
pub use table::{
    check_header_row, check_table, check_title, find_empty_cells, find_trailing_periods,
    find_uncapitalized_cells, normalize_cell_text, HeaderDefect, TitleDefect,
};
