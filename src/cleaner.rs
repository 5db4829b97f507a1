//! Content Cleaning
//!
//! Post-processes the selected article container in three passes:
//!
//! 1. media and links: lazy images are promoted, tiny images dropped and
//!    `href`/`src` made absolute;
//! 2. structure, bottom-up: headings, negative-keyword blocks, link lists,
//!    conditionally suspicious containers and empty elements are removed;
//! 3. attributes outside the allow-list are stripped.
//!
//! Cleaning never fails. When a rule cannot decide, the element stays.

use log::trace;
use url::Url;

use crate::options::Pass;
use crate::scoring::{class_weight, ScoreMap};
use crate::stats::{NodeStats, StatsCache};
use crate::tags::{self, KEEP_WHEN_EMPTY_TAG_SET};
use crate::tree::{NodeId, Tree};
use crate::url_utils::create_absolute_url;

/// Attributes kept on output elements.
pub const ALLOWED_ATTRIBUTES: [&str; 4] = ["href", "src", "alt", "title"];

/// Attributes lazy-loading scripts keep the real image URL in.
pub const LAZY_IMAGE_ATTRIBUTES: [&str; 3] = ["data-src", "data-original", "data-lazy-src"];

/// Elements that are useless without a `src`.
const SRC_REQUIRED_TAGS: [&str; 4] = ["img", "iframe", "video", "embed"];

/// Clean the subtree rooted at `container`. The container itself is never
/// removed.
pub fn clean(
    tree: &mut Tree,
    container: NodeId,
    scores: &ScoreMap,
    pass: &Pass<'_>,
    base_url: Option<&Url>,
) {
    fix_media_and_links(tree, container, pass, base_url);
    clean_structure(tree, container, scores, pass);
    strip_attributes(tree, container);
}

// =============================================================================
// Media and links
// =============================================================================

fn fix_media_and_links(tree: &mut Tree, container: NodeId, pass: &Pass<'_>, base_url: Option<&Url>) {
    // dropped elements are not descended into
    let mut stack: Vec<NodeId> = tree.element_children(container).collect();
    while let Some(node) = stack.pop() {
        if tree.is_tag(node, "img") {
            promote_lazy_image(tree, node);
            if is_too_small(tree, node, pass.options.min_image_size) {
                trace!("dropping small image");
                tree.detach(node);
                continue;
            }
        }

        if !resolve_references(tree, node, base_url) {
            trace!("dropping <{}> without usable src", tree.tag_name(node).unwrap_or_default());
            tree.detach(node);
            continue;
        }

        stack.extend(tree.element_children(node));
    }
}

/// Copy a lazy-loading attribute into `src` when `src` is missing.
pub fn promote_lazy_image(tree: &mut Tree, img: NodeId) {
    if tree.attr(img, "src").is_some_and(|s| !s.trim().is_empty()) {
        return;
    }
    let lazy = LAZY_IMAGE_ATTRIBUTES
        .iter()
        .find_map(|name| tree.attr(img, name).filter(|v| !v.trim().is_empty()))
        .map(str::to_string);
    if let Some(src) = lazy {
        tree.set_attr(img, "src", &src);
    }
}

/// Check the declared `width`/`height` against `min_size`. Undeclared or
/// unparseable dimensions never disqualify an image.
#[must_use]
pub fn is_too_small(tree: &Tree, img: NodeId, min_size: u32) -> bool {
    ["width", "height"].iter().any(|name| {
        tree.attr(img, name)
            .and_then(parse_dimension)
            .is_some_and(|px| px < min_size)
    })
}

fn parse_dimension(value: &str) -> Option<u32> {
    let value = value.trim();
    let value = value.strip_suffix("px").unwrap_or(value).trim();
    value.parse().ok()
}

/// Make `href` and `src` absolute. Returns false when the element must be
/// dropped because its `src` is missing or unusable.
fn resolve_references(tree: &mut Tree, node: NodeId, base_url: Option<&Url>) -> bool {
    let tag = tree.tag_name(node).unwrap_or_default().to_string();
    let needs_src = SRC_REQUIRED_TAGS.contains(&tag.as_str());

    match tree.attr(node, "src").map(str::to_string) {
        Some(src) => match resolve(&src, base_url) {
            Some(resolved) => tree.set_attr(node, "src", &resolved),
            None if needs_src => return false,
            None => tree.remove_attr(node, "src"),
        },
        None if needs_src => {
            // <video><source src=…></video> carries its URL on the children
            if !(tag == "video" && tree.find_first(node, "source").is_some()) {
                return false;
            }
        }
        None => {}
    }

    if let Some(href) = tree.attr(node, "href").map(str::to_string) {
        match resolve(&href, base_url) {
            Some(resolved) => tree.set_attr(node, "href", &resolved),
            None => tree.remove_attr(node, "href"),
        }
    }

    true
}

fn resolve(reference: &str, base_url: Option<&Url>) -> Option<String> {
    match base_url {
        Some(base) => create_absolute_url(reference, base),
        None if reference.trim().is_empty() => None,
        None => Some(reference.to_string()),
    }
}

// =============================================================================
// Structure
// =============================================================================

fn clean_structure(tree: &mut Tree, container: NodeId, scores: &ScoreMap, pass: &Pass<'_>) {
    let mut stats = StatsCache::build(tree, container);
    let mut remaining = stats.get(container).text_len();

    // children are final before their parent is looked at
    for node in tree.post_order_elements(container) {
        if node == container {
            continue;
        }
        let summary = stats.refresh(tree, node);
        let verdict = Verdict {
            tree: &*tree,
            stats: &stats,
            node,
            summary,
            remaining,
        };
        if let Some(reason) = verdict.removal_reason(scores, pass) {
            trace!("dropping <{}>: {reason}", tree.tag_name(node).unwrap_or_default());
            tree.detach(node);
            remaining = remaining.saturating_sub(summary.text_len());
        }
    }
}

/// Everything the structural rules know about one element.
struct Verdict<'t> {
    tree: &'t Tree,
    stats: &'t StatsCache,
    node: NodeId,
    summary: NodeStats,
    /// Text length still in the container.
    remaining: usize,
}

impl Verdict<'_> {
    fn removal_reason(&self, scores: &ScoreMap, pass: &Pass<'_>) -> Option<&'static str> {
        let tree = self.tree;
        let tag = tree.tag_name(self.node)?;
        let s = &self.summary;
        let t = pass.thresholds();

        if tags::is_heading(tag)
            && (class_weight(tree, self.node, pass) < 0.0
                || s.link_density() > t.max_heading_link_density)
        {
            return Some("bad heading");
        }

        // a wrapper around an embed or video is judged by the media rules alone
        let media_only = s.is_media_only();

        if !pass.relaxed && !media_only && self.is_negative_boilerplate(pass) {
            return Some("negative keyword");
        }

        if tags::LINK_LIST_TAGS.contains(&tag)
            && s.link_density() > t.max_link_density
            && s.text_len() < pass.min_text_length
        {
            return Some("link list");
        }

        if !media_only && tags::CONDITIONAL_TAGS.contains(&tag) {
            if let Some(reason) = self.conditional_reason(tag, scores, pass) {
                if !self.rescued_by_siblings(pass) {
                    return Some(reason);
                }
            }
        }

        if s.text_len() == 0 && !s.media && !KEEP_WHEN_EMPTY_TAG_SET.contains(tag) {
            return Some("empty");
        }

        None
    }

    /// Class/id matches the negative keywords and the element holds no more
    /// than `keep_text_share` of the text still in the container.
    #[allow(clippy::cast_precision_loss)]
    fn is_negative_boilerplate(&self, pass: &Pass<'_>) -> bool {
        let names = self.tree.class_and_id(self.node);
        if !pass.options.negative_keywords.is_match(&names) {
            return false;
        }
        if self.remaining == 0 {
            return true;
        }
        let share = self.summary.text_len() as f64 / self.remaining as f64;
        share <= pass.thresholds().keep_text_share
    }

    /// The readability heuristics for `table ul ol div form`.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
    fn conditional_reason(&self, tag: &str, scores: &ScoreMap, pass: &Pass<'_>) -> Option<&'static str> {
        let t = pass.thresholds();
        let s = &self.summary;
        let weight = class_weight(self.tree, self.node, pass);
        if weight + scores.get(self.node) < 0.0 {
            return Some("negative score");
        }

        if s.commas >= t.conditional_comma_limit {
            return None;
        }

        // list items start 100 behind so only long lists count
        let li = s.li as i64 - 100;
        let content_length = s.text_len();
        let density = s.link_density();
        let short = content_length < pass.min_text_length;

        if s.p > 0 && s.img as f64 > 1.0 + s.p as f64 * 1.3 {
            Some("too many images")
        } else if li > s.p as i64 && tag != "ul" && tag != "ol" {
            Some("more list items than paragraphs")
        } else if s.input as f64 > s.p as f64 / 3.0 {
            Some("too many inputs")
        } else if short && !s.media {
            Some("too short without media")
        } else if short && s.img > 2 {
            Some("too short with many images")
        } else if weight < t.class_weight && density > 0.2 {
            Some("too many links for its weight")
        } else if weight >= t.class_weight && density > 0.5 {
            Some("too many links")
        } else if (s.embed == 1 && content_length < 75) || s.embed > 1 {
            Some("embeds with little text")
        } else if content_length == 0 && !s.media {
            Some("no content")
        } else {
            None
        }
    }

    /// Text-rich neighbours vouch for an element flagged by the conditional
    /// rules.
    fn rescued_by_siblings(&self, pass: &Pass<'_>) -> bool {
        let tree = self.tree;
        let Some(parent) = tree.parent(self.node) else {
            return false;
        };
        let siblings = tree.children(parent);
        let Some(pos) = siblings.iter().position(|c| *c == self.node) else {
            return false;
        };
        let around = self.nearest_text(siblings[pos + 1..].iter())
            + self.nearest_text(siblings[..pos].iter().rev());
        around > pass.thresholds().conditional_sibling_text
    }

    /// Text length of the first element with text among `siblings`.
    fn nearest_text<'a>(&self, mut siblings: impl Iterator<Item = &'a NodeId>) -> usize {
        siblings
            .find_map(|c| {
                let len = self.stats.get(*c).text_len();
                (self.tree.is_element(*c) && len > 0).then_some(len)
            })
            .unwrap_or(0)
    }
}

// =============================================================================
// Attributes
// =============================================================================

/// Remove every attribute outside [`ALLOWED_ATTRIBUTES`].
pub fn strip_attributes(tree: &mut Tree, container: NodeId) {
    for node in tree.descendants(container) {
        tree.retain_attrs(node, |name, _| {
            ALLOWED_ATTRIBUTES.iter().any(|a| a.eq_ignore_ascii_case(name))
        });
    }
}
