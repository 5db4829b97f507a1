//! Candidate Selection
//!
//! Picks the highest-scoring element, discounted by its link density, and
//! grows it into an article container by pulling in qualifying siblings.

use std::cmp::Ordering;

use log::debug;

use crate::link_density::link_density;
use crate::options::Pass;
use crate::patterns::SENTENCE_END;
use crate::scoring::ScoreMap;
use crate::tags::{self, TABLE_PLUMBING_TAGS};
use crate::tree::{NodeId, Tree};

/// An element considered as the article root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// The element.
    pub id: NodeId,
    /// Its raw content score.
    pub score: f64,
}

/// Outcome of [`select_article`].
#[derive(Debug, Clone, Copy)]
pub struct Selection {
    /// The winning candidate, or `body` with score 0 when nothing was scored.
    pub candidate: Candidate,
    /// Detached synthetic `div` holding the winner and its qualifying siblings.
    pub container: NodeId,
    /// True when the ScoreMap was empty and the body was used instead.
    pub fallback: bool,
}

#[derive(Debug, Clone, Copy)]
struct Ranked {
    candidate: Candidate,
    effective: f64,
    density: f64,
    depth: usize,
}

impl Ranked {
    /// Higher effective score first, then shallower. Equal ranks keep
    /// document order because callers scan in document order.
    fn beats(&self, other: &Ranked) -> bool {
        match self.effective.partial_cmp(&other.effective) {
            Some(Ordering::Greater) => true,
            Some(Ordering::Less) | None => false,
            Some(Ordering::Equal) => self.depth < other.depth,
        }
    }
}

/// Score discounted by link density: `score * (1 - link_density)`.
#[must_use]
pub fn effective_score(tree: &Tree, candidate: Candidate) -> f64 {
    candidate.score * (1.0 - link_density(tree, candidate.id))
}

/// Rank all scored elements and return the best one. Document scaffolding
/// (`html`, `head`, `title`) never qualifies.
///
/// When the winner is link-heavy, the best candidate with acceptable link
/// density whose effective score is within `link_density_tolerance` of the
/// winner's is preferred. A table row or row group that wins is replaced by
/// its `table`.
#[must_use]
pub fn best_candidate(tree: &Tree, scores: &ScoreMap, pass: &Pass<'_>) -> Option<Candidate> {
    let t = pass.thresholds();

    // document order, attached nodes only
    let ranked: Vec<Ranked> = tree
        .descendants(tree.root())
        .into_iter()
        .filter(|id| {
            scores.contains(*id) && tree.tag_name(*id).is_some_and(|t| !tags::is_non_content(t))
        })
        .map(|id| {
            let candidate = Candidate {
                id,
                score: scores.get(id),
            };
            let density = link_density(tree, id);
            Ranked {
                candidate,
                effective: candidate.score * (1.0 - density),
                density,
                depth: tree.depth(id),
            }
        })
        .collect();

    let winner = pick(ranked.iter())?;
    if winner.density <= t.max_link_density {
        return Some(enclosing_table(tree, winner.candidate));
    }

    let floor = winner.effective - winner.effective.abs() * t.link_density_tolerance;
    let alternative = pick(
        ranked
            .iter()
            .filter(|r| r.density <= t.max_link_density && r.effective >= floor),
    );
    match alternative {
        Some(alt) => {
            debug!(
                "winner link density {:.2} too high, preferring {:?}",
                winner.density, alt.candidate.id
            );
            Some(enclosing_table(tree, alt.candidate))
        }
        None => Some(enclosing_table(tree, winner.candidate)),
    }
}

/// `tr`, `tbody`, `thead` and `tfoot` only make sense inside their table;
/// a winner among them is lifted to the nearest enclosing `table`, keeping
/// its score.
fn enclosing_table(tree: &Tree, candidate: Candidate) -> Candidate {
    let is_plumbing = tree
        .tag_name(candidate.id)
        .is_some_and(|t| TABLE_PLUMBING_TAGS.contains(&t));
    if !is_plumbing {
        return candidate;
    }
    match tree.ancestors(candidate.id).find(|a| tree.is_tag(*a, "table")) {
        Some(table) => {
            debug!("lifting table row winner to its <table>");
            Candidate {
                id: table,
                score: candidate.score,
            }
        }
        None => candidate,
    }
}

fn pick<'a>(ranked: impl Iterator<Item = &'a Ranked>) -> Option<Ranked> {
    let mut best: Option<Ranked> = None;
    for r in ranked {
        if best.is_none_or(|b| r.beats(&b)) {
            best = Some(*r);
        }
    }
    best
}

/// Select the article and move it, with qualifying siblings, into a new
/// detached `div`.
///
/// An empty `scores` falls back to the `body` element (score 0). When the
/// body is the article, its children rather than the body itself are moved
/// into the container.
pub fn select_article(tree: &mut Tree, scores: &ScoreMap, pass: &Pass<'_>) -> Selection {
    let container = tree.create_element("div");

    let Some(winner) = best_candidate(tree, scores, pass) else {
        let body = tree
            .find_first(tree.root(), "body")
            .or_else(|| tree.find_first(tree.root(), "html"))
            .unwrap_or_else(|| tree.root());
        debug!("no candidate scored, falling back to <body>");
        for child in tree.children(body).to_vec() {
            tree.append_child(container, child);
        }
        return Selection {
            candidate: Candidate { id: body, score: 0.0 },
            container,
            fallback: true,
        };
    };

    debug!(
        "best candidate <{}> score {:.1}",
        tree.tag_name(winner.id).unwrap_or_default(),
        winner.score
    );
    if tree.is_tag(winner.id, "body") {
        for child in tree.children(winner.id).to_vec() {
            tree.append_child(container, child);
        }
    } else {
        grow_siblings(tree, scores, winner, container, pass);
    }
    Selection {
        candidate: winner,
        container,
        fallback: false,
    }
}

/// Append the winner and every qualifying element sibling to `container`,
/// in document order.
fn grow_siblings(
    tree: &mut Tree,
    scores: &ScoreMap,
    winner: Candidate,
    container: NodeId,
    pass: &Pass<'_>,
) {
    let Some(parent) = tree.parent(winner.id) else {
        tree.append_child(container, winner.id);
        return;
    };

    let t = pass.thresholds();
    let threshold = t.sibling_score_floor.max(winner.score * t.sibling_score_ratio);

    let siblings: Vec<NodeId> = tree.element_children(parent).collect();
    for sibling in siblings {
        if sibling == winner.id || sibling_qualifies(tree, scores, sibling, threshold, pass) {
            tree.append_child(container, sibling);
        }
    }
}

fn sibling_qualifies(
    tree: &Tree,
    scores: &ScoreMap,
    sibling: NodeId,
    threshold: f64,
    pass: &Pass<'_>,
) -> bool {
    if scores.contains(sibling) && scores.get(sibling) >= threshold {
        return true;
    }
    if !tree.is_tag(sibling, "p") {
        return false;
    }

    let t = pass.thresholds();
    let density = link_density(tree, sibling);
    let text = tree.inner_text(sibling);
    let len = text.chars().count();

    if len > t.sibling_paragraph_length {
        density < t.max_link_density
    } else {
        density == 0.0 && SENTENCE_END.is_match(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::score_tree;
    use crate::Options;

    fn parse(html: &str) -> Tree {
        match Tree::parse(html) {
            Ok(tree) => tree,
            Err(err) => panic!("parse failed: {err}"),
        }
    }

    fn first(tree: &Tree, name: &str) -> NodeId {
        match tree.find_first(tree.root(), name) {
            Some(id) => id,
            None => panic!("no <{name}>"),
        }
    }

    fn by_id(tree: &Tree, ident: &str) -> NodeId {
        match tree
            .descendants(tree.root())
            .into_iter()
            .find(|n| tree.attr(*n, "id") == Some(ident))
        {
            Some(id) => id,
            None => panic!("no #{ident}"),
        }
    }

    fn paragraph(words: usize) -> String {
        format!("<p>{}</p>", "word, ".repeat(words))
    }

    #[test]
    fn test_highest_score_wins() {
        let options = Options::default();
        let pass = Pass::strict(&options);
        let tree = parse(&format!(
            r#"<div id="small">{}</div><div id="big">{}{}{}</div>"#,
            paragraph(10),
            paragraph(10),
            paragraph(10),
            paragraph(10)
        ));
        let scores = score_tree(&tree, &pass);
        let best = best_candidate(&tree, &scores, &pass);
        assert_eq!(best.map(|c| c.id), Some(by_id(&tree, "big")));
    }

    #[test]
    fn test_tie_goes_to_shallower_node() {
        let mut scores = ScoreMap::new();
        let tree = parse("<div><section><p>text</p></section></div>");
        let options = Options::default();
        let pass = Pass::strict(&options);
        let div = first(&tree, "div");
        let section = first(&tree, "section");
        scores.set(section, 12.0);
        scores.set(div, 12.0);
        assert_eq!(best_candidate(&tree, &scores, &pass).map(|c| c.id), Some(div));
    }

    #[test]
    fn test_tie_at_same_depth_goes_to_document_order() {
        let mut scores = ScoreMap::new();
        let tree = parse(r#"<div id="a">x</div><div id="b">y</div>"#);
        let options = Options::default();
        let pass = Pass::strict(&options);
        let a = by_id(&tree, "a");
        let b = by_id(&tree, "b");
        scores.set(b, 5.0);
        scores.set(a, 5.0);
        assert_eq!(best_candidate(&tree, &scores, &pass).map(|c| c.id), Some(a));
    }

    #[test]
    fn test_link_heavy_winner_is_replaced() {
        let mut scores = ScoreMap::new();
        let tree = parse(
            r#"<div id="nav"><a href="/1">Some link text here</a> tail</div>
               <div id="prose">Plain prose with no links at all in it.</div>"#,
        );
        let options = Options::default();
        let pass = Pass::strict(&options);
        let nav = by_id(&tree, "nav");
        let prose = by_id(&tree, "prose");
        // nav: density ~0.8, effective ~20 ; prose: effective 15
        scores.set(nav, 100.0);
        scores.set(prose, 15.0);
        assert_eq!(best_candidate(&tree, &scores, &pass).map(|c| c.id), Some(prose));

        // outside the tolerance band the link-heavy winner stays
        scores.set(prose, 2.0);
        assert_eq!(best_candidate(&tree, &scores, &pass).map(|c| c.id), Some(nav));
    }

    #[test]
    fn test_empty_scores_fall_back_to_body() {
        let options = Options::default();
        let pass = Pass::strict(&options);
        let mut tree = parse("<p>hi</p><p>there</p>");
        let scores = ScoreMap::new();
        let selection = select_article(&mut tree, &scores, &pass);
        assert!(selection.fallback);
        assert_eq!(selection.candidate.id, first(&tree, "body"));
        assert!((selection.candidate.score).abs() < f64::EPSILON);
        assert_eq!(tree.outer_html(selection.container), "<div><p>hi</p><p>there</p></div>");
    }

    #[test]
    fn test_body_winner_contributes_children() {
        let options = Options::default();
        let pass = Pass::strict(&options);
        let mut tree = parse("<p>A single paragraph that is long enough to be scored.</p>");
        let scores = score_tree(&tree, &pass);
        let selection = select_article(&mut tree, &scores, &pass);
        // p and body tie, the shallower body wins
        assert_eq!(selection.candidate.id, first(&tree, "body"));
        assert!(!selection.fallback);
        assert_eq!(
            tree.outer_html(selection.container),
            "<div><p>A single paragraph that is long enough to be scored.</p></div>"
        );
    }

    #[test]
    fn test_head_is_never_selected() {
        let options = Options::default();
        let pass = Pass::strict(&options);
        let tree = parse(
            "<html><head><title>A rather long page title that exceeds the limit</title></head>\
             <body><p>Hi there.</p></body></html>",
        );
        let mut scores = ScoreMap::new();
        scores.set(first(&tree, "head"), 50.0);
        scores.set(first(&tree, "title"), 50.0);
        scores.set(first(&tree, "p"), 1.0);
        assert_eq!(best_candidate(&tree, &scores, &pass).map(|c| c.id), Some(first(&tree, "p")));
    }

    #[test]
    fn test_table_row_winner_is_lifted_to_table() {
        let options = Options::default();
        let pass = Pass::strict(&options);
        let mut tree = parse(
            "<table><tr><td>Fifty characters of text in one single table cell here.</td></tr></table>",
        );
        let scores = score_tree(&tree, &pass);
        let table = first(&tree, "table");
        let selection = select_article(&mut tree, &scores, &pass);

        assert_eq!(selection.candidate.id, table);
        assert!(tree.outer_html(selection.container).starts_with("<div><table><tbody><tr><td>"));
    }

    #[test]
    fn test_sibling_growth() {
        let options = Options::default();
        let pass = Pass::strict(&options);
        let long = "This paragraph is comfortably longer than eighty characters, so it joins the article.";
        let mut tree = parse(&format!(
            r#"<div id="main">{p}{p}{p}</div>
               <p id="long">{long}</p>
               <p id="short">Short but final.</p>
               <p id="fragment">no sentence end</p>
               <p id="linked"><a href="/x">Short link.</a></p>
               <ul id="list"><li>one</li></ul>"#,
            p = paragraph(12)
        ));
        let scores = score_tree(&tree, &pass);
        let main = by_id(&tree, "main");
        let selection = select_article(&mut tree, &scores, &pass);

        assert_eq!(selection.candidate.id, main);
        let kept: Vec<_> = tree
            .children(selection.container)
            .iter()
            .filter_map(|c| tree.attr(*c, "id"))
            .collect();
        assert_eq!(kept, vec!["main", "long", "short"]);
    }
}
