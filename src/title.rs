//! Title Extraction
//!
//! The document title and a "short" title with the site name stripped.
//! Both read the tree before preprocessing touches it.

use crate::patterns::TITLE_SEPARATORS;
use crate::tags::HEADING_TAGS;
use crate::tree::{normalize_spaces, NodeId, Tree};

/// Ids of elements that commonly hold the article headline.
const TITLE_IDS: [&str; 3] = ["title", "head", "heading"];

/// Classes of elements that commonly hold the article headline.
const TITLE_CLASSES: [&str; 7] = [
    "pageTitle",
    "news_title",
    "title",
    "head",
    "heading",
    "contentheading",
    "small_header_red",
];

/// Headings searched for a headline contained in the page title.
const HEADLINE_TAGS: [&str; 3] = ["h1", "h2", "h3"];

/// Shortest and longest acceptable short title, exclusive.
const SHORT_TITLE_BOUNDS: (usize, usize) = (15, 150);

/// Text of the `<title>` element, normalized to one line. Empty when absent.
#[must_use]
pub fn document_title(tree: &Tree) -> String {
    tree.find_first(tree.root(), "title")
        .map(|t| tree.inner_text(t))
        .unwrap_or_default()
}

/// The page title: `<title>` when present and non-empty, else the first
/// heading in document order, else "".
#[must_use]
pub fn extract_title(tree: &Tree) -> String {
    let title = document_title(tree);
    if !title.is_empty() {
        return title;
    }
    tree.select(tree.root(), &HEADING_TAGS)
        .into_iter()
        .map(|h| tree.inner_text(h))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// The page title without the site name.
///
/// A headline found on the page (an `h1`-`h3` or a title-like element) that
/// appears verbatim in the title wins. Otherwise the title is split on
/// common separators. A result shorter than 16 or longer than 149
/// characters falls back to the full title.
#[must_use]
pub fn short_title(tree: &Tree) -> String {
    let orig = document_title(tree);
    if orig.is_empty() {
        return extract_title(tree);
    }

    let title = headline_in_title(tree, &orig).unwrap_or_else(|| split_title(&orig));

    let len = title.chars().count();
    if len <= SHORT_TITLE_BOUNDS.0 || len >= SHORT_TITLE_BOUNDS.1 {
        return orig;
    }
    title
}

/// Longest headline contained in `orig`; ties go to the first seen.
fn headline_in_title(tree: &Tree, orig: &str) -> Option<String> {
    let unquoted = orig.replace('"', "");
    let mut best: Option<String> = None;

    for node in headline_candidates(tree) {
        let text = tree.inner_text(node);
        let qualifies = text.split_whitespace().count() >= 2
            && text.chars().count() >= 15
            && unquoted.contains(&text.replace('"', ""));
        if qualifies && best.as_ref().is_none_or(|b| text.chars().count() > b.chars().count()) {
            best = Some(text);
        }
    }

    best
}

fn headline_candidates(tree: &Tree) -> Vec<NodeId> {
    let mut nodes = tree.select(tree.root(), &HEADLINE_TAGS);
    nodes.extend(
        tree.descendants(tree.root())
            .into_iter()
            .filter(|n| tree.is_element(*n) && is_title_like(tree, *n)),
    );
    nodes
}

fn is_title_like(tree: &Tree, node: NodeId) -> bool {
    let by_id = tree.attr(node, "id").is_some_and(|id| TITLE_IDS.contains(&id));
    let by_class = tree
        .attr(node, "class")
        .is_some_and(|class| class.split_whitespace().any(|c| TITLE_CLASSES.contains(&c)));
    by_id || by_class
}

/// Split "Headline | Site" style titles.
fn split_title(orig: &str) -> String {
    for separator in TITLE_SEPARATORS {
        if !orig.contains(separator) {
            continue;
        }
        let parts: Vec<&str> = orig.split(separator).collect();
        if let Some(first) = parts.first().filter(|p| word_count(p) >= 4) {
            return normalize_spaces(first);
        }
        if let Some(last) = parts.last().filter(|p| word_count(p) >= 4) {
            return normalize_spaces(last);
        }
    }

    if orig.contains(": ") {
        let parts: Vec<&str> = orig.split(": ").collect();
        if let Some(last) = parts.last().filter(|p| word_count(p) >= 4) {
            return normalize_spaces(last);
        }
        if let Some((_, rest)) = orig.split_once(": ") {
            return normalize_spaces(rest);
        }
    }

    orig.to_string()
}

fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}
