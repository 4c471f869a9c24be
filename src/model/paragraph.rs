//! Paragraph view.

use super::Attr;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Read-only projection of one document paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphView {
    /// 1-based position in the document's paragraph sequence
    pub index: usize,

    /// Raw paragraph text
    pub text: Attr<String>,

    /// Paragraph style name as shown to the user (e.g. "Heading 1")
    pub style_name: Attr<String>,

    /// Font size in points
    pub font_size: Attr<f32>,

    /// Bold text
    pub bold: Attr<bool>,

    /// Italic text
    pub italic: Attr<bool>,

    /// Space before paragraph in points (None when the paragraph kind has no such attribute)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_before: Option<Attr<f32>>,

    /// Space after paragraph in points (None when the paragraph kind has no such attribute)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_after: Option<Attr<f32>>,
}

impl ParagraphView {
    /// Create a plain paragraph: "Normal" style, 12 pt regular text, no spacing attributes.
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: Attr::Value(text.into()),
            style_name: Attr::Value("Normal".to_string()),
            font_size: Attr::Value(12.0),
            bold: Attr::Value(false),
            italic: Attr::Value(false),
            space_before: None,
            space_after: None,
        }
    }

    /// Set the style name.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style_name = Attr::Value(style.into());
        self
    }

    /// Set font size and weight flags.
    pub fn with_font(mut self, size: f32, bold: bool, italic: bool) -> Self {
        self.font_size = Attr::Value(size);
        self.bold = Attr::Value(bold);
        self.italic = Attr::Value(italic);
        self
    }

    /// Set space before and after in points.
    pub fn with_spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before = Some(Attr::Value(before));
        self.space_after = Some(Attr::Value(after));
        self
    }

    /// Get the trimmed text.
    pub fn trimmed_text(&self) -> Result<&str> {
        Ok(self.text.read("paragraph text")?.trim())
    }

    /// Get the lowercased style name, if readable.
    pub fn style_lowercase(&self) -> Option<String> {
        self.style_name.value().map(|s| s.to_lowercase())
    }
}

/// Take at most `max` characters of `text`.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_pos, _)) => text[..byte_pos].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let p = ParagraphView::new(3, "  Introduction \r")
            .with_style("Heading 1")
            .with_font(14.0, true, false)
            .with_spacing(6.0, 12.0);

        assert_eq!(p.index, 3);
        assert_eq!(p.trimmed_text().unwrap(), "Introduction");
        assert_eq!(p.style_lowercase().as_deref(), Some("heading 1"));
        assert_eq!(p.font_size.get(), Some(14.0));
        assert_eq!(p.space_after.as_ref().and_then(|a| a.get()), Some(12.0));
    }

    #[test]
    fn test_unreadable_text() {
        let mut p = ParagraphView::new(1, "x");
        p.text = Attr::unreadable("range is gone");
        assert!(p.trimmed_text().is_err());
    }

    #[test]
    fn test_truncate_chars_cyrillic() {
        assert_eq!(truncate_chars("Заголовок", 3), "Заг");
        assert_eq!(truncate_chars("short", 50), "short");
    }
}
