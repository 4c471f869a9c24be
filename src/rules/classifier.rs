//! Heading classification.
//!
//! A paragraph is run through an ordered chain of rules; the first rule that
//! returns a verdict decides. Style names are authoritative when they say
//! something, font metrics are the last resort for documents formatted by
//! hand.

use super::markers::{
    contains_any, first_integer, is_table_title_text, HEADING_STYLE_TOKENS,
    TABLE_CAPTION_STYLE_TOKENS,
};
use super::standard::HeadingLevel;
use crate::error::Result;
use crate::model::ParagraphView;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a paragraph is a heading, and at what level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingClassification {
    /// Not a heading
    NotAHeading,
    /// A heading of the given level
    Heading(HeadingLevel),
}

impl HeadingClassification {
    /// Get the level, if this is a heading.
    pub fn level(&self) -> Option<HeadingLevel> {
        match self {
            HeadingClassification::Heading(level) => Some(*level),
            HeadingClassification::NotAHeading => None,
        }
    }
}

/// Why a heading-like paragraph was excluded from heading analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IgnoreReason {
    /// The style name marks a table or table caption
    TableTitleStyle,
    /// The text reads "Таблица N -- ..."
    TableTitleTextPattern,
}

impl IgnoreReason {
    /// Stable tag for reports.
    pub fn tag(&self) -> &'static str {
        match self {
            IgnoreReason::TableTitleStyle => "table-title-style",
            IgnoreReason::TableTitleTextPattern => "table-title-text-pattern",
        }
    }
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Which signal decided a heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LevelSource {
    /// A heading token in the style name
    StyleName,
    /// Font size and weight
    FontMetrics,
}

/// Detailed classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Text is empty after trimming
    EmptyText,
    /// A table caption, handled by the table rules instead
    TableCaption(IgnoreReason),
    /// A heading
    Heading {
        /// Assigned level
        level: HeadingLevel,
        /// Signal that assigned it
        source: LevelSource,
    },
    /// No heading signal matched
    NotAHeading,
}

impl From<Classification> for HeadingClassification {
    fn from(c: Classification) -> Self {
        match c {
            Classification::Heading { level, .. } => HeadingClassification::Heading(level),
            _ => HeadingClassification::NotAHeading,
        }
    }
}

/// What the rules look at, computed once per paragraph.
struct Candidate<'a> {
    paragraph: &'a ParagraphView,
    text: &'a str,
    style: Option<String>,
}

type Rule = fn(&Candidate<'_>) -> Option<Classification>;

/// Rules in precedence order.
const RULES: &[Rule] = &[
    empty_text,
    caption_style,
    caption_text,
    style_name_level,
    font_metric_level,
];

/// Classify a paragraph.
///
/// A paragraph whose text cannot be read is not a heading.
pub fn classify(paragraph: &ParagraphView) -> HeadingClassification {
    classify_detailed(paragraph)
        .map(HeadingClassification::from)
        .unwrap_or(HeadingClassification::NotAHeading)
}

/// Classify a paragraph, keeping the reason for the verdict.
///
/// Fails only when the paragraph text cannot be read.
pub fn classify_detailed(paragraph: &ParagraphView) -> Result<Classification> {
    let candidate = Candidate {
        paragraph,
        text: paragraph.trimmed_text()?,
        style: paragraph.style_lowercase(),
    };

    Ok(RULES
        .iter()
        .find_map(|rule| rule(&candidate))
        .unwrap_or(Classification::NotAHeading))
}

fn empty_text(candidate: &Candidate<'_>) -> Option<Classification> {
    candidate.text.is_empty().then_some(Classification::EmptyText)
}

fn caption_style(candidate: &Candidate<'_>) -> Option<Classification> {
    let style = candidate.style.as_deref()?;
    contains_any(style, TABLE_CAPTION_STYLE_TOKENS)
        .then_some(Classification::TableCaption(IgnoreReason::TableTitleStyle))
}

fn caption_text(candidate: &Candidate<'_>) -> Option<Classification> {
    is_table_title_text(candidate.text)
        .then_some(Classification::TableCaption(IgnoreReason::TableTitleTextPattern))
}

fn style_name_level(candidate: &Candidate<'_>) -> Option<Classification> {
    let style = candidate.style.as_deref()?;
    if !contains_any(style, HEADING_STYLE_TOKENS) {
        return None;
    }
    let level = first_integer(style).map_or(HeadingLevel::clamped(1), HeadingLevel::clamped);
    Some(Classification::Heading {
        level,
        source: LevelSource::StyleName,
    })
}

fn font_metric_level(candidate: &Candidate<'_>) -> Option<Classification> {
    let p = candidate.paragraph;
    let (size, bold, italic) = match (p.font_size.get(), p.bold.get(), p.italic.get()) {
        (Some(size), Some(bold), Some(italic)) => (size, bold, italic),
        _ => {
            log::debug!(
                "paragraph {}: font metrics unreadable, skipping metric fallback",
                p.index
            );
            return None;
        }
    };
    level_from_metrics(size, bold, italic).map(|level| Classification::Heading {
        level,
        source: LevelSource::FontMetrics,
    })
}

/// Infer a heading level from font metrics alone.
///
/// The italic level-4 rule is checked before the plain level-3 rule because a
/// level-4 size also satisfies the level-3 threshold.
pub fn level_from_metrics(size: f32, bold: bool, italic: bool) -> Option<HeadingLevel> {
    let level = if size >= 13.5 && bold {
        1
    } else if size >= 12.0 && bold {
        2
    } else if size >= 11.0 && bold && italic {
        4
    } else if size >= 10.5 && bold {
        3
    } else {
        return None;
    };
    HeadingLevel::new(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Attr;
    use crate::rules::standard::standard_for;

    fn level(n: u8) -> HeadingLevel {
        HeadingLevel::new(n).unwrap()
    }

    #[test]
    fn test_standard_metrics_classify_to_their_level() {
        for lvl in HeadingLevel::all() {
            let std = standard_for(lvl);
            let p = ParagraphView::new(1, "Section")
                .with_font(std.font_size, std.bold, std.italic);
            assert_eq!(classify(&p), HeadingClassification::Heading(lvl));
        }
    }

    #[test]
    fn test_style_name_beats_metrics() {
        let p = ParagraphView::new(1, "Overview")
            .with_style("Heading 3")
            .with_font(14.0, true, false);
        assert_eq!(
            classify_detailed(&p).unwrap(),
            Classification::Heading {
                level: level(3),
                source: LevelSource::StyleName
            }
        );
    }

    #[test]
    fn test_style_level_extraction() {
        let cases = [
            ("Заголовок 2", 2),
            ("heading", 1),
            ("H4", 4),
            ("Heading 7", 4),
            ("heading 0", 1),
            ("My Heading 12 custom", 4),
        ];
        for (style, expected) in cases {
            let p = ParagraphView::new(1, "Text").with_style(style);
            assert_eq!(
                classify(&p),
                HeadingClassification::Heading(level(expected)),
                "style {:?}",
                style
            );
        }
    }

    #[test]
    fn test_empty_text() {
        let p = ParagraphView::new(1, "   \t ")
            .with_style("Heading 1")
            .with_font(14.0, true, false);
        assert_eq!(classify_detailed(&p).unwrap(), Classification::EmptyText);
    }

    #[test]
    fn test_table_caption_by_text() {
        let p = ParagraphView::new(1, "Таблица 3 -- Итоги")
            .with_style("Heading 1")
            .with_font(14.0, true, false);
        assert_eq!(
            classify_detailed(&p).unwrap(),
            Classification::TableCaption(IgnoreReason::TableTitleTextPattern)
        );
        assert_eq!(classify(&p), HeadingClassification::NotAHeading);
    }

    #[test]
    fn test_table_caption_by_style() {
        let p = ParagraphView::new(1, "Results")
            .with_style("Table Title")
            .with_font(14.0, true, false);
        assert_eq!(
            classify_detailed(&p).unwrap(),
            Classification::TableCaption(IgnoreReason::TableTitleStyle)
        );
    }

    #[test]
    fn test_metric_thresholds() {
        assert_eq!(level_from_metrics(13.5, true, false), Some(level(1)));
        assert_eq!(level_from_metrics(13.4, true, false), Some(level(2)));
        assert_eq!(level_from_metrics(11.5, true, true), Some(level(4)));
        assert_eq!(level_from_metrics(11.5, true, false), Some(level(3)));
        assert_eq!(level_from_metrics(10.5, true, true), Some(level(3)));
        assert_eq!(level_from_metrics(10.4, true, false), None);
        assert_eq!(level_from_metrics(20.0, false, true), None);
    }

    #[test]
    fn test_unreadable_font_falls_through() {
        let mut p = ParagraphView::new(1, "Bold-looking text").with_font(14.0, true, false);
        p.font_size = Attr::unreadable("mixed font sizes across runs");
        assert_eq!(
            classify_detailed(&p).unwrap(),
            Classification::NotAHeading
        );
    }

    #[test]
    fn test_unreadable_style_uses_metrics() {
        let mut p = ParagraphView::new(1, "Chapter").with_font(12.0, true, false);
        p.style_name = Attr::unreadable("style removed");
        assert_eq!(classify(&p), HeadingClassification::Heading(level(2)));
    }

    #[test]
    fn test_unreadable_text_is_an_error() {
        let mut p = ParagraphView::new(1, "x");
        p.text = Attr::unreadable("detached range");
        assert!(classify_detailed(&p).is_err());
        assert_eq!(classify(&p), HeadingClassification::NotAHeading);
    }

    #[test]
    fn test_ignore_reason_serde() {
        let json = serde_json::to_string(&IgnoreReason::TableTitleTextPattern).unwrap();
        assert_eq!(json, "\"table-title-text-pattern\"");
    }
}
