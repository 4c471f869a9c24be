//! The fixed heading formatting standard.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A heading level, always 1 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    /// Outermost level.
    pub const MIN: u8 = 1;
    /// Innermost level.
    pub const MAX: u8 = 4;

    /// Create a level if `level` is within 1..=4.
    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&level)
            .then_some(HeadingLevel(level))
    }

    /// Create a level, clamping into 1..=4.
    pub fn clamped(level: u64) -> Self {
        HeadingLevel(level.clamp(Self::MIN as u64, Self::MAX as u64) as u8)
    }

    /// Get the numeric level.
    pub fn get(self) -> u8 {
        self.0
    }

    /// All levels, outermost first.
    pub fn all() -> [HeadingLevel; 4] {
        [HeadingLevel(1), HeadingLevel(2), HeadingLevel(3), HeadingLevel(4)]
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        HeadingLevel::new(level).ok_or_else(|| format!("heading level {} is not in 1..=4", level))
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Paragraph alignment, numbered like Word's `WdParagraphAlignment`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left = 0,
    /// Center alignment
    Center = 1,
    /// Right alignment
    Right = 2,
    /// Justified alignment
    Justify = 3,
}

/// Expected formatting for one heading level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeadingStandard {
    /// Font size in points
    pub font_size: f32,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Left indent
    pub left_indent: f32,
    /// Paragraph alignment
    pub alignment: Alignment,
    /// Space before paragraph in points
    pub space_before: f32,
    /// Space after paragraph in points
    pub space_after: f32,
}

/// Allowed font size deviation in points.
pub const FONT_SIZE_TOLERANCE: f32 = 0.5;

/// Allowed spacing deviation in points.
pub const SPACING_TOLERANCE: f32 = 1.0;

const HEADING_STANDARDS: [HeadingStandard; 4] = [
    HeadingStandard {
        font_size: 14.0,
        bold: true,
        italic: false,
        left_indent: 1.5,
        alignment: Alignment::Left,
        space_before: 6.0,
        space_after: 12.0,
    },
    HeadingStandard {
        font_size: 12.0,
        bold: true,
        italic: false,
        left_indent: 1.5,
        alignment: Alignment::Left,
        space_before: 6.0,
        space_after: 6.0,
    },
    HeadingStandard {
        font_size: 11.0,
        bold: true,
        italic: false,
        left_indent: 1.5,
        alignment: Alignment::Left,
        space_before: 6.0,
        space_after: 3.0,
    },
    HeadingStandard {
        font_size: 11.0,
        bold: true,
        italic: true,
        left_indent: 1.5,
        alignment: Alignment::Left,
        space_before: 6.0,
        space_after: 3.0,
    },
];

/// Get the standard for a heading level.
pub fn standard_for(level: HeadingLevel) -> &'static HeadingStandard {
    &HEADING_STANDARDS[(level.get() - 1) as usize]
}
