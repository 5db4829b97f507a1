//! Link Density
//!
//! Ratio of anchor text to total text in an element. Navigation blocks,
//! tag clouds and "related" lists sit close to 1.0, article prose close to 0.

use crate::tree::{NodeId, Tree};

/// Total character length of the text inside anchors below `id`.
///
/// Nested anchors (invalid, but the parser can produce them) are counted once.
#[must_use]
pub fn link_text_len(tree: &Tree, id: NodeId) -> usize {
    let mut len = 0;
    for link in tree.select(id, &["a"]) {
        let nested = tree
            .ancestors(link)
            .take_while(|a| *a != id)
            .any(|a| tree.is_tag(a, "a"));
        if !nested {
            len += tree.text_len(link);
        }
    }
    if tree.is_tag(id, "a") {
        return tree.text_len(id);
    }
    len
}

/// Link density of an element: `link_text_len / max(text_len, 1)`.
///
/// An element without text has density 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn link_density(tree: &Tree, id: NodeId) -> f64 {
    let total = tree.text_len(id);
    if total == 0 {
        return 0.0;
    }
    link_text_len(tree, id) as f64 / total as f64
}
