//! Output formats for headings and TOC trees.

use mdtoc_core::{walk, Heading, TocNode};
use serde::Serialize;

use crate::error::Result;

// =============================================================================
// JSON Output
// =============================================================================

#[derive(Serialize, Debug, PartialEq)]
pub struct JsonHeading<'a> {
    pub level: u8,
    pub text: &'a str,
    pub id: &'a str,
}

impl<'a> From<&'a Heading> for JsonHeading<'a> {
    fn from(heading: &'a Heading) -> Self {
        Self {
            level: heading.level,
            text: &heading.text,
            id: &heading.id,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct JsonTocNode<'a> {
    pub level: u8,
    pub text: &'a str,
    pub id: &'a str,
    pub children: Vec<JsonTocNode<'a>>,
}

impl<'a> From<&'a TocNode> for JsonTocNode<'a> {
    fn from(node: &'a TocNode) -> Self {
        Self {
            level: node.heading.level,
            text: &node.heading.text,
            id: &node.heading.id,
            children: node.children.iter().map(JsonTocNode::from).collect(),
        }
    }
}

pub fn headings_json(headings: &[Heading]) -> Result<String> {
    let records: Vec<JsonHeading<'_>> = headings.iter().map(JsonHeading::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

pub fn toc_json(toc: &[TocNode]) -> Result<String> {
    let nodes: Vec<JsonTocNode<'_>> = toc.iter().map(JsonTocNode::from).collect();
    Ok(serde_json::to_string_pretty(&nodes)?)
}

// =============================================================================
// Text Output
// =============================================================================

/// One heading per line, written back as ATX headings with their anchors.
pub fn headings_text(headings: &[Heading]) -> String {
    let mut out = String::new();
    for h in headings {
        out.push_str(&format!(
            "{} {} {{#{}}}\n",
            "#".repeat(h.level as usize),
            h.text,
            h.id
        ));
    }
    out
}

/// The tree as a nested Markdown list of links.
pub fn toc_text(toc: &[TocNode]) -> String {
    let mut out = String::new();
    for (depth, node) in walk(toc) {
        out.push_str(&format!(
            "{}- [{}]({})\n",
            "  ".repeat(depth),
            node.heading.text,
            node.heading.fragment()
        ));
    }
    out
}

// =============================================================================
// HTML Output
// =============================================================================

/// Marker shown on entries that have children.
const TOGGLE_OPEN: &str = "\u{25bc}";

/// The tree as a `<ul class="toc-list">` fragment for a collapsible sidebar.
///
/// Every entry is `li.toc-level-N > div.toc-item > (span.toc-toggle, a)`,
/// followed by `ul.toc-children` when it has children. Leaf toggles are
/// empty and carry the `empty` class.
pub fn toc_html(toc: &[TocNode]) -> String {
    let mut out = String::from("<ul class=\"toc-list\">\n");
    for node in toc {
        write_html_node(&mut out, node, 1);
    }
    out.push_str("</ul>\n");
    out
}

fn write_html_node(out: &mut String, node: &TocNode, depth: usize) {
    let pad = "  ".repeat(depth);
    let toggle = if node.is_leaf() {
        "<span class=\"toc-toggle empty\"></span>".to_string()
    } else {
        format!("<span class=\"toc-toggle\">{TOGGLE_OPEN}</span>")
    };

    out.push_str(&format!(
        "{pad}<li class=\"toc-level-{}\"><div class=\"toc-item\">{toggle}<a href=\"#{}\">{}</a></div>",
        node.level(),
        escape_html(&node.heading.id),
        escape_html(&node.heading.text)
    ));

    if node.is_leaf() {
        out.push_str("</li>\n");
        return;
    }

    out.push_str(&format!("\n{pad}  <ul class=\"toc-children\">\n"));
    for child in &node.children {
        write_html_node(out, child, depth + 2);
    }
    out.push_str(&format!("{pad}  </ul>\n{pad}</li>\n"));
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdtoc_core::{build_toc, extract_headings};

    fn toc(input: &str) -> Vec<TocNode> {
        build_toc(&extract_headings(input))
    }

    #[test]
    fn test_headings_text() {
        let headings = extract_headings("# Intro\n## Setup\n## Setup\n");
        assert_eq!(
            headings_text(&headings),
            "# Intro {#intro}\n## Setup {#setup}\n## Setup {#setup-1}\n"
        );
    }

    #[test]
    fn test_toc_text() {
        assert_eq!(
            toc_text(&toc("# A\n## B\n### C\n# D\n")),
            "- [A](#a)\n  - [B](#b)\n    - [C](#c)\n- [D](#d)\n"
        );
    }

    #[test]
    fn test_toc_html_leaf() {
        assert_eq!(
            toc_html(&toc("## Only")),
            "<ul class=\"toc-list\">\n  <li class=\"toc-level-2\"><div class=\"toc-item\">\
             <span class=\"toc-toggle empty\"></span><a href=\"#only\">Only</a></div></li>\n</ul>\n"
        );
    }

    #[test]
    fn test_toc_html_nesting() {
        let html = toc_html(&toc("# A\n## B\n"));
        assert!(html.contains("<span class=\"toc-toggle\">\u{25bc}</span><a href=\"#a\">A</a>"));
        assert!(html.contains("<ul class=\"toc-children\">"));
        assert!(html.contains("<li class=\"toc-level-2\">"));
        assert_eq!(html.matches("<ul").count(), html.matches("</ul>").count());
        assert_eq!(html.matches("<li").count(), html.matches("</li>").count());
    }

    #[test]
    fn test_toc_html_escapes() {
        let html = toc_html(&toc("# Fish & Chips > Peas {#a\"b}"));
        assert!(html.contains("href=\"#a&quot;b\""));
        assert!(html.contains(">Fish &amp; Chips &gt; Peas<"));
    }

    #[test]
    fn test_headings_json() {
        let json = headings_json(&extract_headings("## 2.0 Release")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{"level": 2, "text": "2.0 Release", "id": "heading-2-0-release"}])
        );
    }

    #[test]
    fn test_toc_json_nests_children() {
        let json = toc_json(&toc("# A\n## B\n")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["children"][0]["id"], "b");
        assert_eq!(value[0]["children"][0]["children"], serde_json::json!([]));
    }
}
