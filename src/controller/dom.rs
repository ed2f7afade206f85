//! Minimal node tree for the results container
//!
//! The container only ever holds `pre` content blocks, `hr` separators and,
//! inside blocks, text nodes and `mark` highlights. Text is always stored as
//! text nodes and escaped on serialization, so result strings can never
//! inject markup.

use askama::{Html as HtmlEscaper, MarkupDisplay};
use std::fmt::{self, Write};

/// Id of the results container on the page
pub const RESULTS_ID: &str = "results";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Preformatted content block, one per result
    Pre,
    /// Separator after each block
    Hr,
    /// Highlighted match
    Mark,
}

impl Tag {
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Pre => "pre",
            Tag::Hr => "hr",
            Tag::Mark => "mark",
        }
    }

    fn is_void(&self) -> bool {
        matches!(self, Tag::Hr)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    pub fn element(tag: Tag, children: Vec<Node>) -> Self {
        Node::Element(Element { tag, children })
    }

    /// Concatenated text of this node and its descendants
    #[allow(dead_code)]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    fn write_html(&self, out: &mut String) -> fmt::Result {
        match self {
            Node::Text(text) => write!(out, "{}", MarkupDisplay::new_unsafe(text.as_str(), HtmlEscaper)),
            Node::Element(element) => {
                write!(out, "<{}>", element.tag.name())?;
                if element.tag.is_void() {
                    return Ok(());
                }
                for child in &element.children {
                    child.write_html(out)?;
                }
                write!(out, "</{}>", element.tag.name())
            }
        }
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => match element.tag {
                Tag::Hr => out.push_str("\n---\n\n"),
                Tag::Mark => {
                    out.push_str("**");
                    for child in &element.children {
                        child.write_text(out);
                    }
                    out.push_str("**");
                }
                Tag::Pre => {
                    for child in &element.children {
                        child.write_text(out);
                    }
                }
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub children: Vec<Node>,
}

/// The results container, fully owned and rewritten by the controller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsContainer {
    children: Vec<Node>,
}

impl ResultsContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn append(&mut self, node: Node) {
        self.children.push(node);
    }

    #[allow(dead_code)]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    /// Content blocks (`pre` elements) in document order
    #[allow(dead_code)]
    pub fn blocks(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) if element.tag == Tag::Pre => Some(element),
            _ => None,
        })
    }

    /// Number of `mark` elements anywhere in the container
    #[allow(dead_code)]
    pub fn mark_count(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes
                .iter()
                .map(|node| match node {
                    Node::Element(element) => {
                        usize::from(element.tag == Tag::Mark) + count(&element.children)
                    }
                    Node::Text(_) => 0,
                })
                .sum()
        }
        count(&self.children)
    }

    /// Serialize as the HTML fragment `<div id="results">...</div>`
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) -> fmt::Result {
        write!(out, "<div id=\"{}\">", RESULTS_ID)?;
        for child in &self.children {
            child.write_html(out)?;
        }
        out.write_str("</div>")
    }

    /// Plain-text rendering for terminals: marks as `**match**`, separators as `---`
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.write_text(&mut out);
        }
        out
    }
}
