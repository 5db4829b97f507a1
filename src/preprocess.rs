//! Document Preprocessing
//!
//! Removes nodes that can never contribute content and normalizes the tree
//! before scoring. Every step mutates the tree irreversibly; the facade keeps
//! a pristine copy for the retry pass and reads the titles beforehand.

use log::trace;

use crate::options::Pass;
use std::collections::HashSet;

use crate::tags::{self, BLOCK_CHILD_TAG_SET, DENYLIST_TAG_SET, PRESENTATIONAL_TAG_SET};
use crate::tree::{NodeId, Tree};

/// Run all preprocessing steps in order.
pub fn preprocess(tree: &mut Tree, pass: &Pass<'_>) {
    remove_head(tree);
    remove_denylisted(tree);
    remove_empty_anchors(tree);
    unwrap_presentational(tree);
    normalize_whitespace(tree);
    if !pass.relaxed {
        remove_unlikely_candidates(tree, pass);
    }
    transform_misused_divs(tree);
}

/// Drop `<head>`; nothing in it is article content.
pub fn remove_head(tree: &mut Tree) {
    for head in tree.select(tree.root(), &["head"]) {
        tree.detach(head);
    }
}

/// Drop script/style-like elements.
pub fn remove_denylisted(tree: &mut Tree) {
    for node in tree.descendants(tree.root()) {
        if tree.tag_name(node).is_some_and(|t| DENYLIST_TAG_SET.contains(t)) {
            tree.detach(node);
        }
    }
}

/// Drop anchors that carry neither text nor media (`<a name="top"></a>`).
pub fn remove_empty_anchors(tree: &mut Tree) {
    for node in tree.descendants(tree.root()) {
        if tree.is_tag(node, "a") && tree.text_len(node) == 0 && !tree.has_media(node) {
            tree.detach(node);
        }
    }
}

/// Replace styling wrappers such as `<font>` by their children.
pub fn unwrap_presentational(tree: &mut Tree) {
    for node in tree.descendants(tree.root()) {
        if tree
            .tag_name(node)
            .is_some_and(|t| PRESENTATIONAL_TAG_SET.contains(t))
        {
            tree.unwrap(node);
        }
    }
}

/// Collapse whitespace runs in text outside `<pre>` to a single space.
pub fn normalize_whitespace(tree: &mut Tree) {
    // `pre` subtrees are never entered
    let mut stack = vec![tree.root()];
    while let Some(node) = stack.pop() {
        if tree.is_tag(node, "pre") {
            continue;
        }
        if let Some(text) = tree.text(node) {
            let collapsed = collapse_whitespace(text);
            if collapsed != text {
                tree.set_text(node, collapsed);
            }
            continue;
        }
        stack.extend(tree.children(node).iter().copied());
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Drop elements whose class/id reads like a comment box, menu or sidebar,
/// unless it also reads like an article container.
pub fn remove_unlikely_candidates(tree: &mut Tree, pass: &Pass<'_>) {
    let options = pass.options;
    // removed subtrees are not descended into
    let mut stack = vec![tree.root()];
    while let Some(node) = stack.pop() {
        if let Some(tag) = tree.tag_name(node).filter(|t| !matches!(*t, "html" | "body")) {
            let names = tree.class_and_id(node);
            if names.len() >= 2
                && options.unlikely_candidates.is_match(&names)
                && !options.maybe_candidates.is_match(&names)
            {
                trace!("removing unlikely candidate <{tag}> {names:?}");
                tree.detach(node);
                continue;
            }
        }
        stack.extend(tree.element_children(node));
    }
}

/// Turn `div`s used as paragraphs into `p`, and wrap loose inline runs of
/// the remaining `div`s into paragraphs.
pub fn transform_misused_divs(tree: &mut Tree) {
    // Renaming a div to `p` and wrapping runs in `p` both keep a block where
    // there was one, so the containment test can be answered up front.
    let with_block = elements_with_block_descendant(tree);
    for node in tree.descendants(tree.root()) {
        if !tree.is_tag(node, "div") {
            continue;
        }
        if with_block.contains(&node) {
            wrap_inline_runs(tree, node);
        } else {
            tree.rename(node, "p");
        }
    }
}

/// Elements with a `BLOCK_CHILD_TAGS` element strictly below them.
fn elements_with_block_descendant(tree: &Tree) -> HashSet<NodeId> {
    let mut found = HashSet::new();
    // reversed pre-order visits every node after all of its descendants
    for node in tree.descendants(tree.root()).into_iter().rev() {
        let has_block = tree.element_children(node).any(|c| {
            found.contains(&c) || tree.tag_name(c).is_some_and(|t| BLOCK_CHILD_TAG_SET.contains(t))
        });
        if has_block {
            found.insert(node);
        }
    }
    found
}

/// Group consecutive text/inline children of `div` into `<p>` elements.
/// `<br>`s separate runs and are dropped.
fn wrap_inline_runs(tree: &mut Tree, div: NodeId) {
    let children: Vec<NodeId> = tree.children(div).to_vec();
    let mut run: Vec<NodeId> = Vec::new();
    for child in children {
        let inline = tree.tag_name(child).is_none_or(tags::is_inline);
        if tree.is_tag(child, "br") {
            flush_run(tree, &mut run);
            tree.detach(child);
        } else if inline {
            run.push(child);
        } else {
            flush_run(tree, &mut run);
        }
    }
    flush_run(tree, &mut run);
}

fn flush_run(tree: &mut Tree, run: &mut Vec<NodeId>) {
    let nodes = std::mem::take(run);
    let Some(&first) = nodes.first() else {
        return;
    };
    let has_text = nodes
        .iter()
        .any(|n| !tree.text_content(*n).trim().is_empty());
    if !has_text {
        return;
    }
    let p = tree.create_element("p");
    tree.insert_before(first, p);
    for n in nodes {
        tree.append_child(p, n);
    }
}
