//! Table rules: title, header row, empty cells, trailing periods and
//! capitalization.
//!
//! Each rule runs on its own and never looks at another rule's outcome. A
//! cell that cannot be read is skipped by every cell rule.

use super::markers::{
    contains_any, is_table_title_text, HEADER_ROW_HEADING_TOKENS, HEADER_ROW_TABLE_TOKENS,
    TITLE_STYLE_TOKENS,
};
use crate::error::{Error, Result};
use crate::model::{CellPos, TableGrid, TableView, TitleView};
use crate::validate::TableResult;
use std::fmt;

/// Why a table title failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleDefect {
    /// No paragraph precedes the table
    Absent,
    /// Text does not read "Таблица N -- ..."
    BadPattern(String),
    /// First character is not uppercase
    NotCapitalized,
    /// Style name lacks a table token
    WrongStyle(String),
    /// The title paragraph could not be read
    Unreadable(String),
}

impl fmt::Display for TitleDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TitleDefect::Absent => write!(f, "title absent"),
            TitleDefect::BadPattern(text) => write!(f, "invalid title format: '{}'", text),
            TitleDefect::NotCapitalized => write!(f, "title must start with a capital letter"),
            TitleDefect::WrongStyle(style) => write!(
                f,
                "invalid title style: '{}' (must contain 'таблица' or 'table')",
                style
            ),
            TitleDefect::Unreadable(reason) => write!(f, "could not check title: {}", reason),
        }
    }
}

/// Why a header row failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderDefect {
    /// The table has no rows at all
    NoRows,
    /// Style name lacks a table token or a heading token
    WrongStyle(String),
    /// Bottom border is not a double line
    NoDoubleBorder(String),
    /// The header style could not be read
    StyleUnreadable(String),
    /// The header border could not be read
    BorderUnreadable(String),
}

impl fmt::Display for HeaderDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderDefect::NoRows => write!(f, "table has no rows"),
            HeaderDefect::WrongStyle(style) => write!(f, "invalid header row style: '{}'", style),
            HeaderDefect::NoDoubleBorder(line) => write!(
                f,
                "missing double line under header row (line style: {})",
                line
            ),
            HeaderDefect::StyleUnreadable(reason) => {
                write!(f, "could not check header row style: {}", reason)
            }
            HeaderDefect::BorderUnreadable(reason) => {
                write!(f, "could not check header border: {}", reason)
            }
        }
    }
}

/// Check the paragraph preceding a table.
///
/// Conditions are checked in order (presence, pattern, capitalization,
/// style) and the first failure is returned. On success the cleaned title
/// text is returned.
pub fn check_title(title: Option<&TitleView>) -> std::result::Result<String, TitleDefect> {
    let title = title.ok_or(TitleDefect::Absent)?;

    let text = title
        .text
        .read("title text")
        .map_err(|e| TitleDefect::Unreadable(e.to_string()))?
        .replace('\r', "");
    let text = text.trim();

    if !is_table_title_text(text) {
        return Err(TitleDefect::BadPattern(text.to_string()));
    }

    if !text.chars().next().is_some_and(char::is_uppercase) {
        return Err(TitleDefect::NotCapitalized);
    }

    let style = title
        .style_name
        .read("title style")
        .map_err(|e| TitleDefect::Unreadable(e.to_string()))?;
    if !contains_any(style, TITLE_STYLE_TOKENS) {
        return Err(TitleDefect::WrongStyle(style.clone()));
    }

    Ok(text.to_string())
}

/// Check the first row's style and bottom border.
///
/// Style and border are checked independently; every defect found is
/// returned.
pub fn check_header_row(table: &TableView, grid: &TableGrid) -> Vec<HeaderDefect> {
    if grid.row_count() == 0 {
        return vec![HeaderDefect::NoRows];
    }

    let mut defects = Vec::new();

    match table.header_style.read("header row style") {
        Ok(style) => {
            if !contains_any(style, HEADER_ROW_TABLE_TOKENS)
                || !contains_any(style, HEADER_ROW_HEADING_TOKENS)
            {
                defects.push(HeaderDefect::WrongStyle(style.clone()));
            }
        }
        Err(e) => defects.push(HeaderDefect::StyleUnreadable(e.to_string())),
    }

    match table.header_bottom_border.read("header bottom border") {
        Ok(border) => {
            if !border.is_double() {
                defects.push(HeaderDefect::NoDoubleBorder(border.to_string()));
            }
        }
        Err(e) => defects.push(HeaderDefect::BorderUnreadable(e.to_string())),
    }

    defects
}

/// Strip control characters and line breaks, then trim.
pub fn normalize_cell_text(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Scan `positions`, keeping those whose normalized text satisfies `pred`.
fn scan_cells(
    grid: &TableGrid,
    positions: impl Iterator<Item = CellPos>,
    pred: impl Fn(&str) -> bool,
) -> Vec<CellPos> {
    positions
        .filter(|pos| match grid.cell_text(*pos) {
            Ok(raw) => pred(&normalize_cell_text(raw)),
            Err(e) => {
                log::debug!("skipping cell: {}", e);
                false
            }
        })
        .collect()
}

/// Every cell whose normalized text is empty.
pub fn find_empty_cells(grid: &TableGrid) -> Vec<CellPos> {
    scan_cells(grid, grid.positions_from(1), str::is_empty)
}

/// Every cell whose normalized text ends with a period.
pub fn find_trailing_periods(grid: &TableGrid) -> Vec<CellPos> {
    scan_cells(grid, grid.positions_from(1), |text| text.ends_with('.'))
}

/// Every data cell (row 2 onward) starting with a letter that is not uppercase.
pub fn find_uncapitalized_cells(grid: &TableGrid) -> Vec<CellPos> {
    scan_cells(grid, grid.positions_from(2), |text| {
        text.chars()
            .next()
            .is_some_and(|c| c.is_alphabetic() && !c.is_uppercase())
    })
}

/// Run all five table rules and aggregate them.
///
/// Fails only when the table grid itself cannot be read.
pub fn check_table(table: &TableView) -> Result<TableResult> {
    let grid = table
        .grid
        .read("rows")
        .map_err(|e| Error::TableStructure {
            table: table.index,
            reason: e.to_string(),
        })?;

    let title = check_title(table.title.as_ref());
    let header = check_header_row(table, grid);
    let empty_cells = find_empty_cells(grid);
    let cells_with_period = find_trailing_periods(grid);
    let cells_without_capital = find_uncapitalized_cells(grid);

    let mut errors = Vec::new();
    if let Err(defect) = &title {
        errors.push(defect.to_string());
    }
    errors.extend(header.iter().map(ToString::to_string));
    errors.extend(
        empty_cells
            .iter()
            .map(|p| format!("empty cell at row {}, column {}", p.row, p.col)),
    );
    errors.extend(
        cells_with_period
            .iter()
            .map(|p| format!("trailing period at row {}, column {}", p.row, p.col)),
    );
    errors.extend(
        cells_without_capital
            .iter()
            .map(|p| format!("missing capital letter at row {}, column {}", p.row, p.col)),
    );

    let candidate_title = table
        .title
        .as_ref()
        .and_then(|t| t.text.value())
        .map(|t| t.replace('\r', "").trim().to_string())
        .filter(|t| !t.is_empty());
    let unreadable_title = table.title.as_ref().is_some_and(|t| !t.text.is_readable());

    Ok(TableResult {
        index: table.index,
        has_title: candidate_title.is_some() || unreadable_title,
        title: candidate_title,
        title_correct: title.is_ok(),
        header_row_correct: header.is_empty(),
        empty_cells,
        cells_with_period,
        cells_without_capital,
        errors,
    })
}
