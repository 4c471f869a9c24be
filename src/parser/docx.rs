//! DOCX package parser.

use super::styles::{border_of, ResolvedRun, RunProps, Spacing, StyleSheet, TableBorders};
use super::{collect_block_nodes, is_wml, wml, wml_attr, WML_NS};
use crate::error::{Error, Result};
use crate::model::{
    Attr, BorderStyle, DocumentSnapshot, Metadata, ParagraphView, TableGrid, TableView, TitleView,
};
use chrono::{DateTime, Utc};
use roxmltree::Node;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";
const STYLES_PART: &str = "word/styles.xml";
const CORE_PART: &str = "docProps/core.xml";

const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
const DCTERMS_NS: &str = "http://purl.org/dc/terms/";

/// DOCX document parser.
///
/// Holds the XML parts needed for validation; [`DocxParser::parse`] builds
/// the paragraph and table views.
pub struct DocxParser {
    document_xml: String,
    styles_xml: Option<String>,
    core_xml: Option<String>,
}

impl DocxParser {
    /// Open a DOCX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_archive(ZipArchive::new(file)?)
    }

    /// Read a DOCX package from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_archive(ZipArchive::new(std::io::Cursor::new(data))?)
    }

    fn from_archive<R: Read + Seek>(mut zip: ZipArchive<R>) -> Result<Self> {
        let document_xml = read_part(&mut zip, DOCUMENT_PART)?.ok_or_else(|| {
            Error::InvalidDocx(format!("missing {} (is this a DOCX file?)", DOCUMENT_PART))
        })?;
        Ok(Self {
            document_xml,
            styles_xml: read_part(&mut zip, STYLES_PART)?,
            core_xml: read_part(&mut zip, CORE_PART)?,
        })
    }

    /// Parse the package into a document snapshot.
    pub fn parse(&self) -> Result<DocumentSnapshot> {
        let styles = match &self.styles_xml {
            Some(xml) => StyleSheet::parse(xml)?,
            None => {
                log::debug!("No {}, using built-in style defaults", STYLES_PART);
                StyleSheet::default()
            }
        };

        let xml = roxmltree::Document::parse(&self.document_xml)?;
        let body = wml(xml.root_element(), "body")
            .ok_or_else(|| Error::InvalidDocx("missing w:body".into()))?;

        let mut walker = BodyWalker {
            styles: &styles,
            snapshot: DocumentSnapshot::new(),
            previous: None,
        };
        walker.walk_body(body);

        let mut snapshot = walker.snapshot;
        if let Some(core) = &self.core_xml {
            apply_core_properties(core, &mut snapshot.metadata);
        }

        log::debug!(
            "Parsed DOCX: {} paragraphs, {} tables",
            snapshot.paragraphs.len(),
            snapshot.tables.len()
        );
        Ok(snapshot)
    }

    /// Parse only the document metadata.
    pub fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::default();
        if let Some(core) = &self.core_xml {
            apply_core_properties(core, &mut metadata);
        }
        metadata
    }
}

fn read_part<R: Read + Seek>(zip: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    match zip.by_name(name) {
        Ok(mut part) => {
            let mut content = String::new();
            part.read_to_string(&mut content)?;
            Ok(Some(content))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Walks the body in document order, emitting views.
struct BodyWalker<'s> {
    styles: &'s StyleSheet,
    snapshot: DocumentSnapshot,
    /// The most recently emitted paragraph, as a title candidate
    previous: Option<TitleView>,
}

impl BodyWalker<'_> {
    fn walk_body(&mut self, body: Node) {
        for node in collect_block_nodes(body) {
            if is_wml(node, "p") {
                self.emit_paragraph(node);
            } else if is_wml(node, "tbl") {
                self.emit_table(node);
            }
        }
    }

    fn emit_paragraph(&mut self, p: Node) -> ParagraphView {
        let view = self.paragraph_view(p);
        self.previous = Some(TitleView {
            text: view.text.clone(),
            style_name: view.style_name.clone(),
        });
        self.snapshot.push_paragraph(view.clone());
        view
    }

    fn emit_table(&mut self, tbl: Node) {
        let title = self.previous.take();
        let rows: Vec<Node> = collect_block_nodes(tbl)
            .into_iter()
            .filter(|n| is_wml(*n, "tr"))
            .collect();

        let mut grid_rows = Vec::with_capacity(rows.len());
        let mut header_styles = Vec::new();
        for (row_idx, row) in rows.iter().enumerate() {
            let cells: Vec<Node> = collect_block_nodes(*row)
                .into_iter()
                .filter(|n| is_wml(*n, "tc"))
                .collect();
            let mut row_cells = Vec::with_capacity(cells.len());
            for cell in cells {
                let paragraphs = self.walk_cell(cell);
                if row_idx == 0 {
                    header_styles.extend(paragraphs.iter().map(|p| p.style_name.clone()));
                }
                row_cells.push(cell_text(cell, &paragraphs));
            }
            grid_rows.push(row_cells);
        }

        let grid_columns = wml(tbl, "tblGrid")
            .map(|g| g.children().filter(|n| is_wml(*n, "gridCol")).count())
            .unwrap_or(0);
        let column_count = if grid_columns > 0 {
            grid_columns
        } else {
            grid_rows.iter().map(Vec::len).max().unwrap_or(0)
        };

        let table = TableView {
            index: 0,
            grid: Attr::Value(TableGrid::new(column_count, grid_rows)),
            header_style: common_style(header_styles, self.styles),
            header_bottom_border: self.header_border(tbl, &rows),
            title,
        };
        self.snapshot.push_table(table);
    }

    /// Emit a cell's paragraphs (including nested tables) and return its own.
    fn walk_cell(&mut self, tc: Node) -> Vec<ParagraphView> {
        let mut own = Vec::new();
        for node in collect_block_nodes(tc) {
            if is_wml(node, "p") {
                own.push(self.emit_paragraph(node));
            } else if is_wml(node, "tbl") {
                self.walk_nested_table(node);
            }
        }
        own
    }

    /// Nested tables contribute paragraphs but are not document tables.
    fn walk_nested_table(&mut self, tbl: Node) {
        for row in collect_block_nodes(tbl).into_iter().filter(|n| is_wml(*n, "tr")) {
            for cell in collect_block_nodes(row).into_iter().filter(|n| is_wml(*n, "tc")) {
                self.walk_cell(cell);
            }
        }
    }

    fn paragraph_view(&self, p: Node) -> ParagraphView {
        let ppr = wml(p, "pPr");
        let style_id = ppr.and_then(|pr| wml_attr(pr, "pStyle"));

        let mut runs = Vec::new();
        collect_runs(p, &mut runs);
        let text: String = runs.iter().map(|r| run_text(*r)).collect();

        let resolved: Vec<_> = runs
            .iter()
            .filter(|r| !run_text(**r).trim().is_empty())
            .map(|r| {
                let rpr = wml(*r, "rPr");
                let char_style = rpr.and_then(|pr| wml_attr(pr, "rStyle"));
                self.styles
                    .resolve_run(RunProps::from_rpr(rpr), char_style, style_id)
            })
            .collect();
        let resolved = if resolved.is_empty() {
            vec![self.styles.resolve_run(RunProps::default(), None, style_id)]
        } else {
            resolved
        };

        let (before, after) = self.styles.resolve_spacing(Spacing::from_ppr(ppr), style_id);

        ParagraphView {
            index: 0,
            text: Attr::Value(text),
            style_name: Attr::Value(self.styles.paragraph_style_name(style_id)),
            font_size: font_size_of(&resolved),
            bold: uniform(resolved.iter().map(|r| r.bold), "bold settings"),
            italic: uniform(resolved.iter().map(|r| r.italic), "italic settings"),
            space_before: Some(Attr::Value(before)),
            space_after: Some(Attr::Value(after)),
        }
    }

    /// Line style under the first row: cell borders, then table borders, then the table style.
    fn header_border(&self, tbl: Node, rows: &[Node]) -> Attr<BorderStyle> {
        let Some(first) = rows.first() else {
            return Attr::Value(BorderStyle::None);
        };

        let tbl_pr = wml(tbl, "tblPr");
        let direct = TableBorders::from_tbl_pr(tbl_pr);
        let mut inherited = self
            .styles
            .table_borders(tbl_pr.and_then(|pr| wml_attr(pr, "tblStyle")));
        if !first_row_look(tbl_pr) {
            inherited.first_row_bottom = None;
        }
        let table_level = direct
            .under_first_row(rows.len())
            .or_else(|| inherited.under_first_row(rows.len()))
            .unwrap_or(BorderStyle::None);

        let per_cell: Vec<BorderStyle> = collect_block_nodes(*first)
            .into_iter()
            .filter(|n| is_wml(*n, "tc"))
            .map(|tc| {
                wml(tc, "tcPr")
                    .and_then(|pr| wml(pr, "tcBorders"))
                    .and_then(|b| border_of(b, "bottom"))
                    .unwrap_or_else(|| table_level.clone())
            })
            .collect();

        match per_cell.split_first() {
            None => Attr::Value(table_level),
            Some((head, rest)) if rest.iter().all(|b| b == head) => Attr::Value(head.clone()),
            Some(_) => Attr::Value(BorderStyle::Mixed),
        }
    }
}

/// Collect the runs of a paragraph in reading order.
///
/// Descends into hyperlinks, insertions, smart tags, fields and content
/// controls; skips paragraph properties and deleted text.
fn collect_runs<'a>(node: Node<'a, 'a>, runs: &mut Vec<Node<'a, 'a>>) {
    for child in node.children().filter(Node::is_element) {
        if child.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match child.tag_name().name() {
            "r" => runs.push(child),
            "pPr" | "del" | "moveFrom" | "rPr" => {}
            _ => collect_runs(child, runs),
        }
    }
}

fn run_text(run: Node) -> String {
    let mut text = String::new();
    for child in run.children().filter(Node::is_element) {
        if child.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match child.tag_name().name() {
            "t" => text.push_str(child.text().unwrap_or("")),
            "tab" => text.push('\t'),
            "br" | "cr" => text.push('\n'),
            "noBreakHyphen" => text.push('-'),
            _ => {}
        }
    }
    text
}

/// A value shared by every run, or unreadable when runs disagree.
fn uniform<T: PartialEq + Copy>(mut values: impl Iterator<Item = T>, what: &str) -> Attr<T> {
    match values.next() {
        Some(first) if values.all(|v| v == first) => Attr::Value(first),
        Some(_) => Attr::unreadable(format!("mixed {} across runs", what)),
        None => Attr::unreadable(format!("no runs to read {} from", what)),
    }
}

/// The font size shared by every run; a malformed `w:sz` makes it unreadable.
fn font_size_of(runs: &[ResolvedRun]) -> Attr<f32> {
    if let Some(raw) = runs.iter().find_map(|r| r.size.as_ref().err()) {
        return Attr::unreadable(format!("invalid w:sz value '{}'", raw));
    }
    uniform(
        runs.iter().filter_map(|r| r.size.as_ref().ok().copied()),
        "font sizes",
    )
}

/// Whether `w:tblLook` leaves the table style's first-row formatting on.
///
/// Reads the `w:firstRow` flag, falling back to bit 0x0020 of the legacy
/// hex `w:val`. A table without `w:tblLook` uses first-row formatting.
fn first_row_look(tbl_pr: Option<Node>) -> bool {
    let Some(look) = tbl_pr.and_then(|pr| wml(pr, "tblLook")) else {
        return true;
    };
    if let Some(flag) = look.attribute((WML_NS, "firstRow")) {
        return !matches!(flag, "0" | "false" | "off");
    }
    look.attribute((WML_NS, "val"))
        .and_then(|v| u32::from_str_radix(v, 16).ok())
        .map_or(true, |bits| bits & 0x0020 != 0)
}

/// Cell text as its paragraphs joined by carriage returns.
fn cell_text(tc: Node, paragraphs: &[ParagraphView]) -> Attr<String> {
    let continues_merge = wml(tc, "tcPr")
        .and_then(|pr| wml(pr, "vMerge"))
        .is_some_and(|vm| vm.attribute((WML_NS, "val")).map_or(true, |v| v == "continue"));
    if continues_merge {
        return Attr::unreadable("cell is part of a vertical merge");
    }

    let texts: Vec<&str> = paragraphs
        .iter()
        .filter_map(|p| p.text.value().map(String::as_str))
        .collect();
    Attr::Value(texts.join("\r"))
}

/// The style shared by every paragraph of the header row.
fn common_style(styles: Vec<Attr<String>>, sheet: &StyleSheet) -> Attr<String> {
    let mut names = styles.into_iter().filter_map(|s| s.value().cloned());
    match names.next() {
        None => Attr::Value(sheet.paragraph_style_name(None)),
        Some(first) => {
            if names.all(|n| n == first) {
                Attr::Value(first)
            } else {
                Attr::unreadable("header row paragraphs use different styles")
            }
        }
    }
}

fn apply_core_properties(xml: &str, metadata: &mut Metadata) {
    let doc = match roxmltree::Document::parse(xml) {
        Ok(doc) => doc,
        Err(e) => {
            log::warn!("Ignoring unreadable {}: {}", CORE_PART, e);
            return;
        }
    };
    let root = doc.root_element();
    let field = |ns: &str, name: &str| {
        root.children()
            .find(|n| n.tag_name().name() == name && n.tag_name().namespace() == Some(ns))
            .and_then(|n| n.text())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    metadata.title = field(DC_NS, "title");
    metadata.author = field(DC_NS, "creator");
    metadata.created = field(DCTERMS_NS, "created").and_then(|s| parse_w3c_date(&s));
    metadata.modified = field(DCTERMS_NS, "modified").and_then(|s| parse_w3c_date(&s));
}

/// Parse a W3CDTF timestamp ("2024-03-01T10:00:00Z").
fn parse_w3c_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_w3c_date() {
        let dt = parse_w3c_date("2024-03-01T10:00:00Z").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 3);
        assert!(parse_w3c_date("2023-12-31").is_some());
        assert!(parse_w3c_date("yesterday").is_none());
    }

    #[test]
    fn test_uniform() {
        assert_eq!(uniform([12.0, 12.0].into_iter(), "font sizes"), Attr::Value(12.0));
        assert!(!uniform([12.0, 14.0].into_iter(), "font sizes").is_readable());
    }

    #[test]
    fn test_run_text() {
        let xml = r#"<w:r xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:t>A</w:t><w:tab/><w:t xml:space="preserve">B </w:t><w:br/></w:r>"#;
        let doc = roxmltree::Document::parse(xml).unwrap();
        assert_eq!(run_text(doc.root_element()), "A\tB \n");
    }

    #[test]
    fn test_font_size_of() {
        let run = |size: std::result::Result<f32, String>| ResolvedRun {
            size,
            bold: false,
            italic: false,
        };
        assert_eq!(font_size_of(&[run(Ok(12.0)), run(Ok(12.0))]), Attr::Value(12.0));
        assert_eq!(
            font_size_of(&[run(Ok(12.0)), run(Err("huge".into()))]),
            Attr::unreadable("invalid w:sz value 'huge'")
        );
    }

    #[test]
    fn test_first_row_look() {
        let look = |attrs: &str| {
            format!(
                r#"<w:tblPr xmlns:w="{}"><w:tblLook {}/></w:tblPr>"#,
                WML_NS, attrs
            )
        };
        for (xml, expected) in [
            (look(r#"w:firstRow="1" w:val="0000""#), true),
            (look(r#"w:firstRow="0" w:val="04A0""#), false),
            (look(r#"w:val="04A0""#), true),
            (look(r#"w:val="0400""#), false),
            (format!(r#"<w:tblPr xmlns:w="{}"/>"#, WML_NS), true),
        ] {
            let doc = roxmltree::Document::parse(&xml).unwrap();
            assert_eq!(first_row_look(Some(doc.root_element())), expected, "{}", xml);
        }
        assert!(first_row_look(None));
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(
            DocxParser::from_bytes(b"plain text"),
            Err(Error::InvalidDocx(_))
        ));
    }
}
