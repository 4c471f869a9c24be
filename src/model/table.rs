//! Table view types.

use super::Attr;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Read-only projection of one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableView {
    /// 1-based position among the document's tables
    pub index: usize,

    /// Cell grid; unreadable when rows cannot be enumerated
    pub grid: Attr<TableGrid>,

    /// Paragraph style name of the first row
    pub header_style: Attr<String>,

    /// Bottom border line style of the first row
    pub header_bottom_border: Attr<BorderStyle>,

    /// Paragraph immediately preceding the table (None at document start)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleView>,
}

impl TableView {
    /// Create a table with a plain header row (style "Normal", single border) and no title.
    pub fn new(index: usize, grid: TableGrid) -> Self {
        Self {
            index,
            grid: Attr::Value(grid),
            header_style: Attr::Value("Normal".to_string()),
            header_bottom_border: Attr::Value(BorderStyle::Single),
            title: None,
        }
    }

    /// Set the header row style and bottom border.
    pub fn with_header(mut self, style: impl Into<String>, border: BorderStyle) -> Self {
        self.header_style = Attr::Value(style.into());
        self.header_bottom_border = Attr::Value(border);
        self
    }

    /// Set the preceding paragraph.
    pub fn with_title(mut self, text: impl Into<String>, style: impl Into<String>) -> Self {
        self.title = Some(TitleView {
            text: Attr::Value(text.into()),
            style_name: Attr::Value(style.into()),
        });
        self
    }
}

/// The paragraph immediately preceding a table: its candidate title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleView {
    /// Raw paragraph text
    pub text: Attr<String>,

    /// Paragraph style name
    pub style_name: Attr<String>,
}

/// Rows and cells of a table.
///
/// Rows may be ragged: merged cells leave a row with fewer cells than
/// `column_count`, and addressing a missing cell is a read failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableGrid {
    /// Number of grid columns
    pub column_count: usize,

    /// Cell text per row, in reading order
    pub rows: Vec<Vec<Attr<String>>>,
}

impl TableGrid {
    /// Create a grid from rows of cells.
    pub fn new(column_count: usize, rows: Vec<Vec<Attr<String>>>) -> Self {
        Self { column_count, rows }
    }

    /// Create a grid from text values; the column count is the widest row.
    pub fn from_strings<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows: Vec<Vec<Attr<String>>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(|s| Attr::Value(s.into())).collect())
            .collect();
        let column_count = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { column_count, rows }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the raw text of a cell (1-based row and column).
    pub fn cell_text(&self, pos: CellPos) -> Result<&str> {
        let cell = pos
            .row
            .checked_sub(1)
            .and_then(|r| self.rows.get(r))
            .and_then(|row| pos.col.checked_sub(1).and_then(|c| row.get(c)))
            .ok_or_else(|| Error::element_read(format!("cell {}", pos), "no such cell"))?;
        cell.read(&format!("cell {}", pos)).map(String::as_str)
    }

    /// Iterate every (row, column) position of the full grid starting at `first_row`.
    pub fn positions_from(&self, first_row: usize) -> impl Iterator<Item = CellPos> + '_ {
        (first_row.max(1)..=self.row_count())
            .flat_map(move |row| (1..=self.column_count).map(move |col| CellPos::new(row, col)))
    }
}

/// A 1-based (row, column) cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellPos {
    /// 1-based row
    pub row: usize,
    /// 1-based column
    pub col: usize,
}

impl CellPos {
    /// Create a coordinate.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for CellPos {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// Border line style, named after the OOXML `w:val` values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BorderStyle {
    /// No border
    None,
    /// Single line
    Single,
    /// Double line
    Double,
    /// Dotted line
    Dotted,
    /// Dashed line
    Dashed,
    /// Thick single line
    Thick,
    /// Triple line
    Triple,
    /// Cells of the row disagree
    Mixed,
    /// Any other line style
    Other(String),
}

impl BorderStyle {
    /// Word `WdLineStyle` code, where one exists.
    pub fn word_code(&self) -> Option<u32> {
        match self {
            BorderStyle::None => Some(0),
            BorderStyle::Single | BorderStyle::Thick => Some(1),
            BorderStyle::Dotted => Some(2),
            BorderStyle::Dashed => Some(3),
            BorderStyle::Double => Some(7),
            BorderStyle::Triple => Some(8),
            BorderStyle::Mixed | BorderStyle::Other(_) => None,
        }
    }

    /// Check if this is a double line.
    pub fn is_double(&self) -> bool {
        matches!(self, BorderStyle::Double)
    }

    fn as_str(&self) -> &str {
        match self {
            BorderStyle::None => "none",
            BorderStyle::Single => "single",
            BorderStyle::Double => "double",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Thick => "thick",
            BorderStyle::Triple => "triple",
            BorderStyle::Mixed => "mixed",
            BorderStyle::Other(s) => s,
        }
    }
}

impl From<&str> for BorderStyle {
    fn from(val: &str) -> Self {
        match val {
            "none" | "nil" | "" => BorderStyle::None,
            "single" => BorderStyle::Single,
            "double" => BorderStyle::Double,
            "dotted" => BorderStyle::Dotted,
            "dashed" => BorderStyle::Dashed,
            "thick" => BorderStyle::Thick,
            "triple" => BorderStyle::Triple,
            "mixed" => BorderStyle::Mixed,
            other => BorderStyle::Other(other.to_string()),
        }
    }
}

impl From<String> for BorderStyle {
    fn from(val: String) -> Self {
        BorderStyle::from(val.as_str())
    }
}

impl From<BorderStyle> for String {
    fn from(style: BorderStyle) -> Self {
        style.as_str().to_string()
    }
}

impl fmt::Display for BorderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.word_code() {
            Some(code) => write!(f, "{} ({})", self.as_str(), code),
            None => write!(f, "{}", self.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_from_strings() {
        let grid = TableGrid::from_strings(vec![vec!["Name", "Age"], vec!["Alice"]]);
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.column_count, 2);
        assert_eq!(grid.cell_text(CellPos::new(1, 2)).unwrap(), "Age");
    }

    #[test]
    fn test_missing_cell_is_read_error() {
        let grid = TableGrid::from_strings(vec![vec!["Name", "Age"], vec!["Alice"]]);
        let err = grid.cell_text(CellPos::new(2, 2)).unwrap_err();
        assert!(matches!(err, Error::ElementRead { .. }));
        assert!(grid.cell_text(CellPos::new(0, 1)).is_err());
    }

    #[test]
    fn test_positions_from_second_row() {
        let grid = TableGrid::from_strings(vec![vec!["a", "b"], vec!["c", "d"], vec!["e", "f"]]);
        let positions: Vec<_> = grid.positions_from(2).collect();
        assert_eq!(positions.len(), 4);
        assert_eq!(positions[0], CellPos::new(2, 1));
        assert_eq!(positions[3], CellPos::new(3, 2));
    }

    #[test]
    fn test_border_style_codes() {
        assert_eq!(BorderStyle::from("double").word_code(), Some(7));
        assert_eq!(BorderStyle::from("nil"), BorderStyle::None);
        assert_eq!(
            BorderStyle::from("wave"),
            BorderStyle::Other("wave".to_string())
        );
        assert_eq!(BorderStyle::Single.to_string(), "single (1)");
        assert_eq!(BorderStyle::Mixed.to_string(), "mixed");
    }

    #[test]
    fn test_border_style_serde() {
        let json = serde_json::to_string(&BorderStyle::Double).unwrap();
        assert_eq!(json, "\"double\"");
        let style: BorderStyle = serde_json::from_str("\"dotted\"").unwrap();
        assert_eq!(style, BorderStyle::Dotted);
    }
}
