//! Plain text rendering for validation reports.

use super::ReportOptions;
use crate::model::truncate_chars;
use crate::validate::{HeadingReport, HeadingResult, TableReport, TableResult, ValidationReport};

/// Render a report as a human-readable summary.
pub fn to_text(report: &ValidationReport, options: &ReportOptions) -> String {
    let mut lines = Vec::new();

    match &report.headings {
        Some(headings) => heading_section(headings, options, &mut lines),
        None => lines.push("Heading check skipped".to_string()),
    }
    lines.push(String::new());
    match &report.tables {
        Some(tables) => table_section(tables, options, &mut lines),
        None => lines.push("Table check skipped".to_string()),
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn heading_section(report: &HeadingReport, options: &ReportOptions, lines: &mut Vec<String>) {
    lines.push("Heading check results".to_string());
    lines.push(format!("Total headings: {}", report.headings.len()));
    lines.push(format!("Correct: {}", report.correct_count()));
    lines.push(format!("With errors: {}", report.error_count()));
    if report.skipped_unreadable > 0 {
        lines.push(format!("Unreadable paragraphs skipped: {}", report.skipped_unreadable));
    }

    for heading in report.headings.iter().take(options.max_headings) {
        lines.push(overview_line(heading, options));
    }

    if report.error_count() > 0 {
        lines.push(String::new());
        lines.push("Heading errors:".to_string());
        for heading in report.erroring().take(options.max_erroring_headings) {
            lines.push(String::new());
            lines.push(format!(
                "Paragraph {} (level {}):",
                heading.index, heading.level
            ));
            lines.push(format!("Text: '{}'", preview(&heading.text, options.text_preview)));
            lines.extend(heading.mismatches.iter().map(|m| format!("  - {}", m)));
        }
    } else if !report.headings.is_empty() {
        lines.push(String::new());
        lines.push("All headings are correct.".to_string());
    } else {
        lines.push(String::new());
        lines.push("No headings found.".to_string());
    }
}

fn overview_line(heading: &HeadingResult, options: &ReportOptions) -> String {
    let font = heading
        .font_size
        .map_or_else(|| format!("{:>4}", "?"), |size| format!("{:4.1}", size));
    let style = truncate_chars(
        heading.style_name.as_deref().unwrap_or("?"),
        options.style_width,
    );
    format!(
        "L{} | font {} | style {:<width$} | text {}",
        heading.level,
        font,
        style,
        heading.text,
        width = options.style_width
    )
}

fn preview(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", truncate_chars(text, max))
    } else {
        text.to_string()
    }
}

fn table_section(report: &TableReport, options: &ReportOptions, lines: &mut Vec<String>) {
    lines.push("Table check results".to_string());
    lines.push(format!("Tables found: {}", report.table_count));
    if report.skipped > 0 {
        lines.push(format!("Unreadable tables skipped: {}", report.skipped));
    }
    lines.push(String::new());

    for table in &report.tables {
        table_block(table, options, lines);
        lines.push(String::new());
    }

    lines.push(format!("Correct tables: {}", report.correct_count()));
    lines.push(format!("Tables with errors: {}", report.error_count()));

    if report.error_count() == 0 && !report.tables.is_empty() {
        lines.push(String::new());
        lines.push("All tables are correct.".to_string());
    }
}

fn table_block(table: &TableResult, options: &ReportOptions, lines: &mut Vec<String>) {
    if table.is_correct() {
        lines.push(format!("Table {}: correct", table.index));
        if let Some(title) = &table.title {
            lines.push(format!("  Title: {}", title));
        }
        return;
    }

    lines.push(format!("Table {}: errors found", table.index));
    lines.extend(
        table
            .errors
            .iter()
            .take(options.max_table_errors)
            .map(|e| format!("  - {}", e)),
    );
    if table.errors.len() > options.max_table_errors {
        lines.push(format!(
            "  ... and {} more errors",
            table.errors.len() - options.max_table_errors
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellPos, Metadata};
    use crate::rules::{FormatMismatch, HeadingLevel};

    fn heading(index: usize, text: &str, mismatches: Vec<FormatMismatch>) -> HeadingResult {
        HeadingResult {
            index,
            level: HeadingLevel::clamped(2),
            text: text.to_string(),
            font_size: Some(12.0),
            bold: Some(true),
            style_name: Some("Heading 2 with a very long style name".to_string()),
            mismatches,
        }
    }

    fn table(index: usize, errors: &[&str]) -> TableResult {
        TableResult {
            index,
            title: Some("Таблица 1 -- Итоги".to_string()),
            has_title: true,
            title_correct: true,
            header_row_correct: errors.is_empty(),
            empty_cells: Vec::new(),
            cells_with_period: vec![CellPos::new(2, 1)],
            cells_without_capital: Vec::new(),
            errors: errors.iter().map(|e| e.to_string()).collect(),
        }
    }

    fn report(headings: Vec<HeadingResult>, tables: Vec<TableResult>) -> ValidationReport {
        ValidationReport {
            metadata: Metadata::default(),
            headings: Some(HeadingReport {
                headings,
                ..Default::default()
            }),
            tables: Some(TableReport {
                table_count: tables.len(),
                tables,
                skipped: 0,
            }),
        }
    }

    #[test]
    fn test_overview_line() {
        let line = overview_line(&heading(3, "Methods", Vec::new()), &ReportOptions::default());
        assert_eq!(line, "L2 | font 12.0 | style Heading 2 with a ver | text Methods");
    }

    #[test]
    fn test_all_correct() {
        let text = to_text(
            &report(vec![heading(1, "Intro", Vec::new())], vec![table(1, &[])]),
            &ReportOptions::default(),
        );
        assert!(text.contains("Total headings: 1"));
        assert!(text.contains("All headings are correct."));
        assert!(text.contains("Table 1: correct"));
        assert!(text.contains("  Title: Таблица 1 -- Итоги"));
        assert!(text.contains("All tables are correct."));
    }

    #[test]
    fn test_errors_are_limited() {
        let long_text = "x".repeat(90);
        let bad = heading(7, &long_text, vec![FormatMismatch::Bold { expected: true }]);
        let errors = ["title absent", "e2", "e3", "e4", "e5"];
        let text = to_text(
            &report(vec![bad], vec![table(2, &errors)]),
            &ReportOptions::default(),
        );
        assert!(text.contains("Paragraph 7 (level 2):"));
        assert!(text.contains(&format!("Text: '{}...'", "x".repeat(80))));
        assert!(text.contains("  - bold: expected on"));
        assert!(text.contains("Table 2: errors found"));
        assert!(text.contains("  - e3"));
        assert!(!text.contains("  - e4"));
        assert!(text.contains("  ... and 2 more errors"));
        assert!(text.contains("Tables with errors: 1"));
        assert!(!text.contains("All tables are correct."));
    }

    #[test]
    fn test_empty_and_skipped() {
        let mut empty = report(Vec::new(), Vec::new());
        assert!(to_text(&empty, &ReportOptions::default()).contains("No headings found."));
        empty.tables = None;
        assert!(to_text(&empty, &ReportOptions::default()).contains("Table check skipped"));
    }
}
