//! Subtree Statistics
//!
//! Text length, link text, commas and element counts of every subtree,
//! folded bottom-up so each node is summarized from its children's
//! summaries. The cleaner refreshes a node after its children were cleaned
//! and so never walks a subtree twice.

use std::collections::HashMap;

use crate::tags;
use crate::tree::{NodeData, NodeId, Tree};

/// Whitespace-normalized extent of a run of text.
///
/// `chars` is the length after collapsing whitespace runs to one space and
/// trimming, exactly what [`Tree::text_len`] reports. The edge flags record
/// whether whitespace was trimmed at either end, so two spans can be joined
/// without looking at their text again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextSpan {
    /// Normalized character count.
    pub chars: usize,
    /// Whitespace was trimmed at the start.
    pub starts_ws: bool,
    /// Whitespace was trimmed at the end.
    pub ends_ws: bool,
}

impl TextSpan {
    /// Span of a single text run.
    #[must_use]
    pub fn of(text: &str) -> Self {
        let words = text.split_whitespace();
        let (count, chars) = words.fold((0usize, 0usize), |(n, c), w| (n + 1, c + w.chars().count()));
        Self {
            chars: chars + count.saturating_sub(1),
            starts_ws: text.chars().next().is_some_and(char::is_whitespace),
            ends_ws: text.chars().next_back().is_some_and(char::is_whitespace),
        }
    }

    /// The span of `self` followed by `next`.
    #[must_use]
    pub fn join(self, next: Self) -> Self {
        match (self.chars, next.chars) {
            (0, _) => Self {
                chars: next.chars,
                starts_ws: self.starts_ws || next.starts_ws,
                ends_ws: if next.chars == 0 {
                    self.ends_ws || next.ends_ws
                } else {
                    next.ends_ws
                },
            },
            (_, 0) => Self {
                chars: self.chars,
                starts_ws: self.starts_ws,
                ends_ws: self.ends_ws || next.starts_ws,
            },
            _ => Self {
                chars: self.chars + next.chars + usize::from(self.ends_ws || next.starts_ws),
                starts_ws: self.starts_ws,
                ends_ws: next.ends_ws,
            },
        }
    }
}

/// Summary of one subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeStats {
    /// Text of the subtree.
    pub text: TextSpan,
    /// Normalized length of text inside anchors; nested anchors count once.
    pub link_chars: usize,
    /// Commas in the text.
    pub commas: usize,
    /// `<p>` elements strictly below the node.
    pub p: usize,
    /// `<img>` elements strictly below the node.
    pub img: usize,
    /// `<li>` elements strictly below the node.
    pub li: usize,
    /// `<input>` elements strictly below the node.
    pub input: usize,
    /// `<embed>` elements strictly below the node.
    pub embed: usize,
    /// The node or a descendant is embedded media.
    pub media: bool,
}

impl NodeStats {
    /// Normalized text length.
    #[inline]
    #[must_use]
    pub fn text_len(&self) -> usize {
        self.text.chars
    }

    /// `link_chars / text_len`, 0 without text.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn link_density(&self) -> f64 {
        if self.text.chars == 0 {
            return 0.0;
        }
        self.link_chars as f64 / self.text.chars as f64
    }

    /// A wrapper that holds embedded media and no text.
    #[must_use]
    pub fn is_media_only(&self) -> bool {
        self.media && self.text.chars == 0
    }
}

/// Per-node [`NodeStats`] of one subtree.
#[derive(Debug, Default)]
pub struct StatsCache {
    stats: HashMap<NodeId, NodeStats>,
}

impl StatsCache {
    /// Summarize every node at or below `root`.
    #[must_use]
    pub fn build(tree: &Tree, root: NodeId) -> Self {
        let mut cache = Self::default();
        // (node, expanded) pairs; a node is summarized once its children are
        let mut stack = vec![(root, false)];
        while let Some((n, expanded)) = stack.pop() {
            if expanded || tree.children(n).is_empty() {
                cache.refresh(tree, n);
            } else {
                stack.push((n, true));
                stack.extend(tree.children(n).iter().map(|c| (*c, false)));
            }
        }
        cache
    }

    /// Summary of `id`; the default summary for unknown nodes.
    #[must_use]
    pub fn get(&self, id: NodeId) -> NodeStats {
        self.stats.get(&id).copied().unwrap_or_default()
    }

    /// Recompute `id` from its current children, whose summaries must be
    /// up to date. Returns the new summary.
    pub fn refresh(&mut self, tree: &Tree, id: NodeId) -> NodeStats {
        let stats = match tree.data(id) {
            NodeData::Text(text) => NodeStats {
                text: TextSpan::of(text),
                commas: text.matches(',').count(),
                ..NodeStats::default()
            },
            NodeData::Element(el) => {
                let mut stats = self.fold_children(tree, id);
                if el.name == "a" {
                    stats.link_chars = stats.text.chars;
                }
                stats.media |= tags::is_media(&el.name);
                stats
            }
            NodeData::Document => self.fold_children(tree, id),
        };
        self.stats.insert(id, stats);
        stats
    }

    fn fold_children(&self, tree: &Tree, id: NodeId) -> NodeStats {
        let mut acc = NodeStats::default();
        for child in tree.children(id) {
            let c = self.get(*child);
            acc.text = acc.text.join(c.text);
            acc.link_chars += c.link_chars;
            acc.commas += c.commas;
            acc.p += c.p;
            acc.img += c.img;
            acc.li += c.li;
            acc.input += c.input;
            acc.embed += c.embed;
            acc.media |= c.media;
            match tree.tag_name(*child) {
                Some("p") => acc.p += 1,
                Some("img") => acc.img += 1,
                Some("li") => acc.li += 1,
                Some("input") => acc.input += 1,
                Some("embed") => acc.embed += 1,
                _ => {}
            }
        }
        acc
    }
}
