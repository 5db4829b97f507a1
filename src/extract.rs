//! Core content extraction pipeline.
//!
//! Titles are read from the untouched tree. The tree is then preprocessed,
//! scored, reduced to the best candidate and its siblings, and cleaned. When
//! the cleaned text is shorter than `retry_length`, the pipeline runs once
//! more on a pristine copy with relaxed thresholds and the longer of the two
//! outputs wins.

use log::{debug, warn};
use url::Url;

use crate::cleaner::clean;
use crate::options::{Options, Pass};
use crate::preprocess::preprocess;
use crate::result::ExtractResult;
use crate::scoring::score_tree;
use crate::selector::select_article;
use crate::title;
use crate::tree::{NodeId, Tree};
use crate::url_utils::parse_base_url;

/// Outcome of a single pass over the tree.
struct PassOutput {
    tree: Tree,
    container: NodeId,
    text: String,
    fallback: bool,
}

impl PassOutput {
    fn text_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Main entry point for content extraction from a parsed tree.
pub(crate) fn extract_content(tree: Tree, options: &Options) -> ExtractResult {
    let mut warnings = Vec::new();

    let title = title::extract_title(&tree);
    let short_title = title::short_title(&tree);
    debug!("title: {title:?}");

    let base_url = resolve_base_url(options, &mut warnings);

    let strict = run_pass(tree.clone(), &Pass::strict(options), base_url.as_ref());
    let mut passes = 1;
    let mut best = strict;

    if best.text_len() < options.retry_length {
        debug!(
            "strict pass yielded {} chars (< {}), retrying relaxed",
            best.text_len(),
            options.retry_length
        );
        let relaxed = run_pass(tree, &Pass::relaxed(options), base_url.as_ref());
        passes = 2;
        if relaxed.text_len() > best.text_len() {
            best = relaxed;
        }
    }

    if best.fallback {
        warnings.push("No content candidate found - used the whole <body>".to_string());
    }

    let fragment = best.tree.outer_html(best.container);
    let content_html = if options.enclose_with_html_tag {
        format!("<html><body>{fragment}</body></html>")
    } else {
        fragment
    };

    debug!("extracted {} chars in {passes} pass(es)", best.text_len());

    ExtractResult {
        content_html,
        content_text: best.text,
        title,
        short_title,
        passes,
        warnings,
    }
}

/// Preprocess, score, select and clean one copy of the tree.
fn run_pass(mut tree: Tree, pass: &Pass<'_>, base_url: Option<&Url>) -> PassOutput {
    preprocess(&mut tree, pass);
    let scores = score_tree(&tree, pass);
    debug!("{} elements scored (relaxed: {})", scores.len(), pass.relaxed);

    let selection = select_article(&mut tree, &scores, pass);
    clean(&mut tree, selection.container, &scores, pass, base_url);

    let text = tree.block_text(selection.container);
    PassOutput {
        tree,
        container: selection.container,
        text,
        fallback: selection.fallback,
    }
}

/// A configured base URL that is not absolute is ignored with a warning.
fn resolve_base_url(options: &Options, warnings: &mut Vec<String>) -> Option<Url> {
    let raw = options.url.as_deref()?;
    match parse_base_url(raw) {
        Ok(url) => Some(url),
        Err(err) => {
            warn!("{err}, links are left unresolved");
            warnings.push(err.to_string());
            None
        }
    }
}
