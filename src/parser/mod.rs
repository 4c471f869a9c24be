//! DOCX parsing module.
//!
//! Reads the WordprocessingML parts of a `.docx` package and projects them
//! into the paragraph and table views the rules consume.

mod docx;
mod styles;

pub use docx::DocxParser;

use roxmltree::Node;

pub(crate) const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Check if `node` is the WordprocessingML element `name`.
fn is_wml(node: Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(WML_NS)
}

/// First WordprocessingML child named `name`.
fn wml<'a>(node: Node<'a, 'a>, name: &str) -> Option<Node<'a, 'a>> {
    node.children().find(|n| is_wml(*n, name))
}

/// The `w:val` attribute of the first child named `child`.
fn wml_attr<'a>(node: Node<'a, 'a>, child: &str) -> Option<&'a str> {
    wml(node, child).and_then(|n| n.attribute((WML_NS, "val")))
}

/// A toggle property such as `<w:b/>` or `<w:i w:val="0"/>`.
fn wml_bool(parent: Node, name: &str) -> Option<bool> {
    wml(parent, name).map(|n| {
        n.attribute((WML_NS, "val"))
            .map_or(true, |v| !matches!(v, "0" | "false" | "off"))
    })
}

/// A twips attribute converted to points.
fn twips_attr(node: Node, attr: &str) -> Option<f32> {
    node.attribute((WML_NS, attr))
        .and_then(|v| v.parse::<f32>().ok())
        .map(|twips| twips / 20.0)
}

/// Children of `parent`, descending through content controls (`w:sdt`).
fn collect_block_nodes<'a>(parent: Node<'a, 'a>) -> Vec<Node<'a, 'a>> {
    let mut nodes = Vec::new();
    for child in parent.children().filter(Node::is_element) {
        if is_wml(child, "sdt") {
            if let Some(content) = wml(child, "sdtContent") {
                nodes.extend(collect_block_nodes(content));
            }
        } else {
            nodes.push(child);
        }
    }
    nodes
}
