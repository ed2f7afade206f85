//! Highlighting query matches inside rendered content blocks

use super::dom::{Node, ResultsContainer, Tag};
use crate::error::AppError;
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;

/// How the query text is turned into a matcher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HighlightMode {
    /// The query is a regular expression, used unescaped
    #[default]
    Pattern,
    /// The query is a literal substring; metacharacters are escaped
    Literal,
}

/// Compile the matcher for one search cycle
pub fn build_matcher(
    query: &str,
    case_sensitive: bool,
    mode: HighlightMode,
) -> Result<Regex, AppError> {
    let pattern = match mode {
        HighlightMode::Pattern => Cow::Borrowed(query),
        HighlightMode::Literal => Cow::Owned(regex::escape(query)),
    };

    let matcher = RegexBuilder::new(&pattern)
        .case_insensitive(!case_sensitive)
        .build()?;
    Ok(matcher)
}

/// Wrap every match of `query` in each content block in a `mark` element
///
/// Only `pre` blocks of the container are scanned. Matching is global and
/// case-insensitive unless `case_sensitive` is set. Returns the number of
/// marks inserted. On an invalid pattern the container is left untouched.
///
/// Calling this twice on the same content wraps the existing marks' text
/// again; callers run it once per render.
pub fn highlight_results(
    container: &mut ResultsContainer,
    query: &str,
    case_sensitive: bool,
    mode: HighlightMode,
) -> Result<usize, AppError> {
    let matcher = build_matcher(query, case_sensitive, mode)?;

    let mut marks = 0;
    for node in container.children_mut() {
        if let Node::Element(block) = node {
            if block.tag == Tag::Pre {
                let children = std::mem::take(&mut block.children);
                block.children = wrap_matches(children, &matcher, &mut marks);
            }
        }
    }
    Ok(marks)
}

fn wrap_matches(nodes: Vec<Node>, matcher: &Regex, marks: &mut usize) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Text(text) => split_text(text, matcher, marks, &mut out),
            Node::Element(mut element) => {
                let children = std::mem::take(&mut element.children);
                element.children = wrap_matches(children, matcher, marks);
                out.push(Node::Element(element));
            }
        }
    }
    out
}

fn split_text(text: String, matcher: &Regex, marks: &mut usize, out: &mut Vec<Node>) {
    let mut last = 0;
    let mut pieces = Vec::new();

    for found in matcher.find_iter(&text) {
        // an empty match has nothing to wrap
        if found.start() == found.end() {
            continue;
        }
        if found.start() > last {
            pieces.push(Node::text(&text[last..found.start()]));
        }
        pieces.push(Node::element(Tag::Mark, vec![Node::text(found.as_str())]));
        *marks += 1;
        last = found.end();
    }

    if pieces.is_empty() {
        out.push(Node::Text(text));
        return;
    }
    if last < text.len() {
        pieces.push(Node::text(&text[last..]));
    }
    out.extend(pieces);
}
