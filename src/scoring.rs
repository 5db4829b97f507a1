//! Content Scoring
//!
//! Every block element with enough direct text earns points for its tag, its
//! class/id and its text. The points flow to the parent in full and to the
//! grandparent at half weight, so the container that gathers the most
//! paragraphs ends up with the highest score.

use std::collections::HashMap;

use log::trace;

use crate::options::Pass;
use crate::tags;
use crate::tree::{NodeId, Tree};

/// Content scores keyed by node identity.
///
/// A node that was never scored has score 0. Iteration follows insertion
/// order, which for [`score_tree`] is the order in which nodes were first
/// reached.
#[derive(Debug, Clone, Default)]
pub struct ScoreMap {
    order: Vec<NodeId>,
    scores: HashMap<NodeId, f64>,
}

impl ScoreMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Score of a node, 0 when absent.
    #[must_use]
    pub fn get(&self, id: NodeId) -> f64 {
        self.scores.get(&id).copied().unwrap_or(0.0)
    }

    /// Check if the node has an entry.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.scores.contains_key(&id)
    }

    /// Set the score of a node.
    pub fn set(&mut self, id: NodeId, score: f64) {
        if self.scores.insert(id, score).is_none() {
            self.order.push(id);
        }
    }

    /// Add to a node's score, seeding it with `seed` when absent.
    pub fn add(&mut self, id: NodeId, seed: f64, delta: f64) {
        let entry = self.scores.entry(id).or_insert_with(|| {
            self.order.push(id);
            seed
        });
        *entry += delta;
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.order.iter().map(|id| (*id, self.get(*id)))
    }

    /// Number of scored nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if nothing was scored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Weight of an element's tag.
#[must_use]
pub fn tag_weight(tag: &str, pass: &Pass<'_>) -> f64 {
    let t = pass.thresholds();
    match tag {
        "p" | "pre" | "blockquote" | "td" => t.paragraph_tag_weight,
        "div" | "article" | "section" | "main" => t.container_tag_weight,
        "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" | "form" => t.list_tag_weight,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" => t.heading_tag_weight,
        _ => 0.0,
    }
}

/// Class/id weight: each of `class` and `id` adds the class weight when it
/// matches the positive keywords and subtracts it when it matches the
/// negative keywords. Relaxed passes skip the penalty.
#[must_use]
pub fn class_weight(tree: &Tree, id: NodeId, pass: &Pass<'_>) -> f64 {
    let options = pass.options;
    let step = pass.thresholds().class_weight;
    let mut weight = 0.0;

    for name in ["class", "id"] {
        let Some(value) = tree.attr(id, name) else {
            continue;
        };
        if !pass.relaxed && options.negative_keywords.is_match(value) {
            weight -= step;
        }
        if options.positive_keywords.is_match(value) {
            weight += step;
        }
    }

    weight
}

/// Tag weight plus class weight, the score a node starts from.
#[must_use]
pub fn seed_score(tree: &Tree, id: NodeId, pass: &Pass<'_>) -> f64 {
    let tag = tree.tag_name(id).unwrap_or_default();
    tag_weight(tag, pass) + class_weight(tree, id, pass)
}

/// Points earned by a run of text: one per comma and one per
/// `chars_per_point` characters, the latter capped at `max_length_points`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn text_score(text: &str, pass: &Pass<'_>) -> f64 {
    let t = pass.thresholds();
    let commas = text.matches(',').count();
    let length_points = (text.chars().count() / t.chars_per_point.max(1)).min(t.max_length_points);
    (commas + length_points) as f64
}

/// Score the whole tree.
///
/// Elements are visited in document order; only non-inline elements whose
/// direct text is at least `pass.min_text_length` characters earn points.
/// Document scaffolding (`html`, `head`, `title`) neither earns nor
/// receives points.
#[must_use]
pub fn score_tree(tree: &Tree, pass: &Pass<'_>) -> ScoreMap {
    let mut scores = ScoreMap::new();
    let share = pass.thresholds().grandparent_share;

    for node in tree.descendants(tree.root()) {
        let Some(tag) = tree.tag_name(node) else {
            continue;
        };
        if tags::is_inline(tag) || tags::is_non_content(tag) {
            continue;
        }
        let text = tree.direct_text(node);
        if text.chars().count() < pass.min_text_length {
            continue;
        }

        let score = seed_score(tree, node, pass) + text_score(&text, pass);
        scores.add(node, 0.0, score);
        trace!("scored <{tag}> {score:.1}");

        let Some(parent) = tree.parent(node).filter(|p| is_content_element(tree, *p)) else {
            continue;
        };
        scores.add(parent, seed_score(tree, parent, pass), score);

        if let Some(grandparent) = tree.parent(parent).filter(|g| is_content_element(tree, *g)) {
            scores.add(grandparent, seed_score(tree, grandparent, pass), score * share);
        }
    }

    scores
}

/// An element that may hold article content.
fn is_content_element(tree: &Tree, id: NodeId) -> bool {
    tree.tag_name(id).is_some_and(|t| !tags::is_non_content(t))
}
