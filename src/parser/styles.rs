//! Style sheet resolution for `word/styles.xml`.

use super::{is_wml, twips_attr, wml, wml_attr, wml_bool, WML_NS};
use crate::error::Result;
use crate::model::BorderStyle;
use roxmltree::Node;
use std::collections::HashMap;

/// Font size Word uses when nothing in the style hierarchy sets one.
pub(crate) const DEFAULT_FONT_SIZE: f32 = 10.0;

const DEFAULT_PARAGRAPH_STYLE: &str = "Normal";

/// Run properties that may be left unset at any level of the hierarchy.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RunProps {
    /// Size in points, or the raw `w:sz` value when it is not a valid size
    pub size: Option<std::result::Result<f32, String>>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
}

impl RunProps {
    /// Read `w:sz`, `w:b` and `w:i` from an `w:rPr` element.
    pub fn from_rpr(rpr: Option<Node>) -> Self {
        let Some(rpr) = rpr else {
            return Self::default();
        };
        Self {
            size: wml_attr(rpr, "sz").map(parse_half_points),
            bold: wml_bool(rpr, "b"),
            italic: wml_bool(rpr, "i"),
        }
    }
}

/// Convert a `w:sz` half-point value to points.
fn parse_half_points(raw: &str) -> std::result::Result<f32, String> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|half_points| half_points.is_finite() && *half_points > 0.0)
        .map(|half_points| half_points / 2.0)
        .ok_or_else(|| raw.to_string())
}

/// Fully resolved run formatting.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedRun {
    /// Size in points, or the malformed `w:sz` value that decided it
    pub size: std::result::Result<f32, String>,
    pub bold: bool,
    pub italic: bool,
}

/// Paragraph spacing in points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Spacing {
    pub before: Option<f32>,
    pub after: Option<f32>,
}

impl Spacing {
    /// Read `w:spacing` from a `w:pPr` element.
    pub fn from_ppr(ppr: Option<Node>) -> Self {
        match ppr.and_then(|p| wml(p, "spacing")) {
            Some(spacing) => Self {
                before: twips_attr(spacing, "before"),
                after: twips_attr(spacing, "after"),
            },
            None => Self::default(),
        }
    }

    fn or(self, fallback: &Spacing) -> Self {
        Self {
            before: self.before.or(fallback.before),
            after: self.after.or(fallback.after),
        }
    }
}

/// Horizontal borders that can sit under a table's first row.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TableBorders {
    pub bottom: Option<BorderStyle>,
    pub inside_h: Option<BorderStyle>,
    /// Bottom border of the conditional first-row formatting
    pub first_row_bottom: Option<BorderStyle>,
}

impl TableBorders {
    /// Read `w:tblBorders` from a `w:tblPr` element.
    pub fn from_tbl_pr(tbl_pr: Option<Node>) -> Self {
        let borders = tbl_pr.and_then(|pr| wml(pr, "tblBorders"));
        Self {
            bottom: borders.and_then(|b| border_of(b, "bottom")),
            inside_h: borders.and_then(|b| border_of(b, "insideH")),
            first_row_bottom: None,
        }
    }

    /// Border below the first row of a table with `row_count` rows.
    pub fn under_first_row(&self, row_count: usize) -> Option<BorderStyle> {
        if let Some(style) = &self.first_row_bottom {
            return Some(style.clone());
        }
        if row_count > 1 {
            self.inside_h.clone()
        } else {
            self.bottom.clone()
        }
    }

    fn or(self, fallback: &TableBorders) -> Self {
        Self {
            bottom: self.bottom.or_else(|| fallback.bottom.clone()),
            inside_h: self.inside_h.or_else(|| fallback.inside_h.clone()),
            first_row_bottom: self
                .first_row_bottom
                .or_else(|| fallback.first_row_bottom.clone()),
        }
    }
}

/// The line style of border `edge` inside a borders element.
pub(crate) fn border_of(borders: Node, edge: &str) -> Option<BorderStyle> {
    wml_attr(borders, edge).map(BorderStyle::from)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StyleKind {
    Paragraph,
    Character,
    Table,
    Other,
}

#[derive(Debug, Clone)]
struct StyleDef {
    id: String,
    name: String,
    kind: StyleKind,
    based_on: Option<String>,
    run: RunProps,
    spacing: Spacing,
    borders: TableBorders,
}

/// Parsed `word/styles.xml`.
#[derive(Debug, Clone, Default)]
pub(crate) struct StyleSheet {
    styles: HashMap<String, StyleDef>,
    default_run: RunProps,
    default_spacing: Spacing,
    default_paragraph: Option<String>,
    default_table: Option<String>,
}

impl StyleSheet {
    /// Parse a styles part.
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(xml)?;
        let root = doc.root_element();
        let mut sheet = StyleSheet::default();

        if let Some(defaults) = wml(root, "docDefaults") {
            sheet.default_run = RunProps::from_rpr(
                wml(defaults, "rPrDefault").and_then(|d| wml(d, "rPr")),
            );
            sheet.default_spacing =
                Spacing::from_ppr(wml(defaults, "pPrDefault").and_then(|d| wml(d, "pPr")));
        }

        for node in root.children().filter(|n| is_wml(*n, "style")) {
            let Some(id) = node.attribute((WML_NS, "styleId")) else {
                continue;
            };
            let kind = match node.attribute((WML_NS, "type")) {
                Some("paragraph") => StyleKind::Paragraph,
                Some("character") => StyleKind::Character,
                Some("table") => StyleKind::Table,
                _ => StyleKind::Other,
            };
            let is_default = matches!(node.attribute((WML_NS, "default")), Some("1" | "true"));
            match kind {
                StyleKind::Paragraph if is_default => sheet.default_paragraph = Some(id.to_string()),
                StyleKind::Table if is_default => sheet.default_table = Some(id.to_string()),
                _ => {}
            }

            let tbl_pr = wml(node, "tblPr");
            let mut borders = TableBorders::from_tbl_pr(tbl_pr);
            borders.first_row_bottom = node
                .children()
                .filter(|n| is_wml(*n, "tblStylePr"))
                .find(|n| n.attribute((WML_NS, "type")) == Some("firstRow"))
                .and_then(|cond| wml(cond, "tcPr"))
                .and_then(|tc_pr| wml(tc_pr, "tcBorders"))
                .and_then(|b| border_of(b, "bottom"));

            sheet.styles.insert(
                id.to_string(),
                StyleDef {
                    id: id.to_string(),
                    name: wml_attr(node, "name").unwrap_or(id).to_string(),
                    kind,
                    based_on: wml_attr(node, "basedOn").map(str::to_string),
                    run: RunProps::from_rpr(wml(node, "rPr")),
                    spacing: Spacing::from_ppr(wml(node, "pPr")),
                    borders,
                },
            );
        }

        log::debug!("Parsed {} styles", sheet.styles.len());
        Ok(sheet)
    }

    /// A style followed by its `basedOn` ancestors, stopping at cycles.
    fn chain(&self, id: Option<&str>) -> Vec<&StyleDef> {
        let mut chain: Vec<&StyleDef> = Vec::new();
        let mut next = id;
        while let Some(id) = next {
            let Some(style) = self.styles.get(id) else {
                break;
            };
            if chain.iter().any(|s| s.id == style.id) {
                log::warn!("Style '{}' inherits from itself", style.id);
                break;
            }
            chain.push(style);
            next = style.based_on.as_deref();
        }
        chain
    }

    /// The paragraph style id in effect for an explicit `w:pStyle` value.
    pub fn paragraph_style_id<'a>(&'a self, explicit: Option<&'a str>) -> Option<&'a str> {
        explicit.or(self.default_paragraph.as_deref())
    }

    /// The user-facing name of a paragraph style.
    ///
    /// Unknown ids are returned as-is; a missing id is the default paragraph style.
    pub fn paragraph_style_name(&self, explicit: Option<&str>) -> String {
        match self.paragraph_style_id(explicit) {
            Some(id) => self
                .styles
                .get(id)
                .map_or_else(|| id.to_string(), |s| s.name.clone()),
            None => DEFAULT_PARAGRAPH_STYLE.to_string(),
        }
    }

    /// Resolve run formatting: direct, character style, paragraph style, defaults.
    pub fn resolve_run(
        &self,
        direct: RunProps,
        char_style: Option<&str>,
        para_style: Option<&str>,
    ) -> ResolvedRun {
        let char_chain: Vec<&StyleDef> = self
            .chain(char_style)
            .into_iter()
            .filter(|style| style.kind == StyleKind::Character)
            .collect();
        let para_chain = self.chain(self.paragraph_style_id(para_style));

        let size = direct
            .size
            .or_else(|| char_chain.iter().find_map(|style| style.run.size.clone()))
            .or_else(|| para_chain.iter().find_map(|style| style.run.size.clone()))
            .or_else(|| self.default_run.size.clone())
            .unwrap_or(Ok(DEFAULT_FONT_SIZE));

        ResolvedRun {
            size,
            bold: self.toggle(direct.bold, &char_chain, &para_chain, |run| run.bold),
            italic: self.toggle(direct.italic, &char_chain, &para_chain, |run| run.italic),
        }
    }

    /// Resolve a toggle property such as `w:b` or `w:i`.
    ///
    /// Direct formatting is absolute. Otherwise the nearest value in the
    /// character style chain is XORed with the nearest value in the
    /// paragraph style chain; document defaults apply when neither sets it.
    fn toggle(
        &self,
        direct: Option<bool>,
        char_chain: &[&StyleDef],
        para_chain: &[&StyleDef],
        get: impl Fn(&RunProps) -> Option<bool>,
    ) -> bool {
        if let Some(value) = direct {
            return value;
        }
        let from_char = char_chain.iter().find_map(|style| get(&style.run));
        let from_para = para_chain.iter().find_map(|style| get(&style.run));
        match (from_char, from_para) {
            (None, None) => get(&self.default_run).unwrap_or(false),
            (from_char, from_para) => from_char.unwrap_or(false) ^ from_para.unwrap_or(false),
        }
    }

    /// Resolve paragraph spacing in points, defaulting to zero.
    pub fn resolve_spacing(&self, direct: Spacing, para_style: Option<&str>) -> (f32, f32) {
        let mut spacing = direct;
        for style in self.chain(self.paragraph_style_id(para_style)) {
            spacing = spacing.or(&style.spacing);
        }
        spacing = spacing.or(&self.default_spacing);
        (spacing.before.unwrap_or(0.0), spacing.after.unwrap_or(0.0))
    }

    /// Borders a table inherits from its style (or the default table style).
    pub fn table_borders(&self, table_style: Option<&str>) -> TableBorders {
        let id = table_style.or(self.default_table.as_deref());
        self.chain(id)
            .into_iter()
            .fold(TableBorders::default(), |acc, style| acc.or(&style.borders))
    }
}
