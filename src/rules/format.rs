//! Heading format checking against the standard.

use super::standard::{
    standard_for, HeadingLevel, HeadingStandard, FONT_SIZE_TOLERANCE, SPACING_TOLERANCE,
};
use crate::error::Result;
use crate::model::ParagraphView;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One way a heading deviates from its level's standard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormatMismatch {
    /// Font size outside tolerance
    FontSize {
        /// Observed size in points
        actual: f32,
        /// Expected size in points
        expected: f32,
    },
    /// Wrong bold flag
    Bold {
        /// Expected flag
        expected: bool,
    },
    /// Wrong italic flag
    Italic {
        /// Expected flag
        expected: bool,
    },
    /// Space before outside tolerance
    SpaceBefore {
        /// Observed spacing in points
        actual: f32,
        /// Expected spacing in points
        expected: f32,
    },
    /// Space after outside tolerance
    SpaceAfter {
        /// Observed spacing in points
        actual: f32,
        /// Expected spacing in points
        expected: f32,
    },
    /// An attribute could not be read; later comparisons were skipped
    Unreadable {
        /// Read failure description
        message: String,
    },
}

impl fmt::Display for FormatMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatMismatch::FontSize { actual, expected } => {
                write!(f, "font size {} pt, expected {} pt", actual, expected)
            }
            FormatMismatch::Bold { expected } => write!(f, "bold: expected {}", on_off(*expected)),
            FormatMismatch::Italic { expected } => {
                write!(f, "italic: expected {}", on_off(*expected))
            }
            FormatMismatch::SpaceBefore { actual, expected } => {
                write!(f, "space before {} pt, expected {} pt", actual, expected)
            }
            FormatMismatch::SpaceAfter { actual, expected } => {
                write!(f, "space after {} pt, expected {} pt", actual, expected)
            }
            FormatMismatch::Unreadable { message } => f.write_str(message),
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

/// Compare a heading paragraph against the standard for `level`.
///
/// Every dimension is checked independently. The first unreadable attribute
/// adds one `Unreadable` entry and ends the comparison; mismatches found
/// before it are kept.
pub fn check_format(paragraph: &ParagraphView, level: HeadingLevel) -> Vec<FormatMismatch> {
    let mut mismatches = Vec::new();
    if let Err(e) = compare(paragraph, standard_for(level), &mut mismatches) {
        log::debug!("paragraph {}: {}", paragraph.index, e);
        mismatches.push(FormatMismatch::Unreadable {
            message: e.to_string(),
        });
    }
    mismatches
}

fn compare(
    p: &ParagraphView,
    std: &HeadingStandard,
    out: &mut Vec<FormatMismatch>,
) -> Result<()> {
    let size = *p.font_size.read("font size")?;
    if (size - std.font_size).abs() > FONT_SIZE_TOLERANCE {
        out.push(FormatMismatch::FontSize {
            actual: size,
            expected: std.font_size,
        });
    }

    if *p.bold.read("bold")? != std.bold {
        out.push(FormatMismatch::Bold { expected: std.bold });
    }

    if *p.italic.read("italic")? != std.italic {
        out.push(FormatMismatch::Italic {
            expected: std.italic,
        });
    }

    if let Some(attr) = &p.space_before {
        let space = *attr.read("space before")?;
        if (space - std.space_before).abs() > SPACING_TOLERANCE {
            out.push(FormatMismatch::SpaceBefore {
                actual: space,
                expected: std.space_before,
            });
        }
    }

    if let Some(attr) = &p.space_after {
        let space = *attr.read("space after")?;
        if (space - std.space_after).abs() > SPACING_TOLERANCE {
            out.push(FormatMismatch::SpaceAfter {
                actual: space,
                expected: std.space_after,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Attr;

    fn level(n: u8) -> HeadingLevel {
        HeadingLevel::new(n).unwrap()
    }

    #[test]
    fn test_compliant_headings() {
        for lvl in HeadingLevel::all() {
            let std = standard_for(lvl);
            let p = ParagraphView::new(1, "Heading")
                .with_font(std.font_size, std.bold, std.italic)
                .with_spacing(std.space_before, std.space_after);
            assert!(check_format(&p, lvl).is_empty(), "level {}", lvl);
        }
    }

    #[test]
    fn test_tolerances() {
        let p = ParagraphView::new(1, "Heading")
            .with_font(14.5, true, false)
            .with_spacing(7.0, 11.0);
        assert!(check_format(&p, level(1)).is_empty());

        let p = ParagraphView::new(1, "Heading")
            .with_font(14.6, true, false)
            .with_spacing(7.5, 12.0);
        let mismatches = check_format(&p, level(1));
        assert_eq!(mismatches.len(), 2);
        assert!(matches!(mismatches[0], FormatMismatch::FontSize { .. }));
        assert!(matches!(mismatches[1], FormatMismatch::SpaceBefore { .. }));
    }

    #[test]
    fn test_all_dimensions_reported() {
        let p = ParagraphView::new(1, "Heading")
            .with_font(10.0, false, true)
            .with_spacing(0.0, 0.0);
        let messages: Vec<String> = check_format(&p, level(1))
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            messages,
            vec![
                "font size 10 pt, expected 14 pt",
                "bold: expected on",
                "italic: expected off",
                "space before 0 pt, expected 6 pt",
                "space after 0 pt, expected 12 pt",
            ]
        );
    }

    #[test]
    fn test_missing_spacing_is_not_checked() {
        let p = ParagraphView::new(1, "Heading").with_font(12.0, true, false);
        assert!(check_format(&p, level(2)).is_empty());
    }

    #[test]
    fn test_unreadable_attribute_stops_comparison() {
        let mut p = ParagraphView::new(1, "Heading")
            .with_font(10.0, true, false)
            .with_spacing(0.0, 0.0);
        p.italic = Attr::unreadable("mixed italic runs");

        let mismatches = check_format(&p, level(1));
        assert_eq!(mismatches.len(), 2);
        assert!(matches!(mismatches[0], FormatMismatch::FontSize { .. }));
        assert_eq!(
            mismatches[1].to_string(),
            "could not read italic: mixed italic runs"
        );
    }
}
