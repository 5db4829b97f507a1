//! # rs-readability
//!
//! Readability-style main content extraction for web pages.
//!
//! The library scores every block of a parsed HTML document by its text,
//! tag and class names, picks the element most likely to hold the article,
//! and returns a cleaned fragment of it: navigation, advertisements, comment
//! sections and footers are stripped, links are made absolute.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_readability::{extract, Options};
//!
//! let html = r#"<html><head><title>My Article</title></head>
//! <body><article><p>Main content here.</p></article></body></html>"#;
//!
//! let result = extract(html)?;
//! println!("Title: {}", result.title);
//! println!("Content: {}", result.content_text);
//! # Ok::<(), rs_readability::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! 1. **Preprocess**: drop scripts and styles, unwrap presentational tags,
//!    remove regions whose class or id reads like boilerplate
//! 2. **Score**: award points to elements with enough text and propagate
//!    them to parents and grandparents
//! 3. **Select**: take the best-scoring element (discounted by link density)
//!    plus its qualifying siblings
//! 4. **Clean**: remove link lists, suspicious containers and empty nodes,
//!    resolve URLs, strip attributes
//!
//! When the result is short, the pipeline runs once more with relaxed
//! thresholds.

mod error;
mod extract;
mod options;
mod result;

/// Arena DOM tree, parse bridge and serializer.
pub mod tree;

/// Tag catalogs used by the extraction passes.
pub mod tags;

/// Default keyword patterns and user-configurable keyword sets.
pub mod patterns;

/// Link density of elements.
pub mod link_density;

/// URL utilities for validation and resolution.
pub mod url_utils;

/// Tree normalization before scoring.
pub mod preprocess;

/// Content scoring and score propagation.
pub mod scoring;

/// Bottom-up text and element statistics of subtrees.
pub mod stats;

/// Best candidate selection and sibling growth.
pub mod selector;

/// Post-processing of the selected content.
pub mod cleaner;

/// Title and short title extraction.
pub mod title;

/// Character encoding detection and transcoding.
pub mod encoding;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::{Options, Pass, Thresholds};
pub use result::ExtractResult;
pub use tree::{NodeId, Tree};

/// Extracts main content from an HTML document using default options.
///
/// # Arguments
///
/// * `html` - The HTML document as a string slice
///
/// # Returns
///
/// Returns `Ok(ExtractResult)` on success. Returns [`Error::Parse`] only when
/// the parser produces no `<html>` element.
///
/// # Example
///
/// ```rust
/// use rs_readability::extract;
///
/// let html = "<html><body><article>Content</article></body></html>";
/// let result = extract(html)?;
/// println!("{}", result.content_text);
/// # Ok::<(), rs_readability::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract(html: &str) -> Result<ExtractResult> {
    extract_with_options(html, &Options::default())
}

/// Extracts main content from an HTML document with custom options.
///
/// # Arguments
///
/// * `html` - The HTML document as a string slice
/// * `options` - Configuration options for extraction behavior
///
/// # Example
///
/// ```rust
/// use rs_readability::{extract_with_options, Options};
///
/// let html = "<html><body><article>Content</article></body></html>";
/// let options = Options {
///     url: Some("https://example.com/post/1".to_string()),
///     enclose_with_html_tag: false,
///     ..Options::default()
/// };
/// let result = extract_with_options(html, &options)?;
/// assert!(result.content_html.starts_with("<div>"));
/// # Ok::<(), rs_readability::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract_with_options(html: &str, options: &Options) -> Result<ExtractResult> {
    let tree = Tree::parse(html)?;
    Ok(extract_tree(tree, options))
}

/// Extracts main content from an already parsed tree.
///
/// Consumes the tree: the passes mutate it.
#[must_use]
pub fn extract_tree(tree: Tree, options: &Options) -> ExtractResult {
    extract::extract_content(tree, options)
}

/// Extracts main content from HTML bytes with automatic encoding detection.
///
/// # Character Encoding
///
/// The function detects encoding from:
/// - `<meta charset="...">`
/// - `<meta http-equiv="Content-Type" content="...; charset=...">`
/// - Defaults to UTF-8 if no declaration found
///
/// Invalid characters are replaced with � (Unicode replacement character)
/// rather than causing errors.
///
/// # Example
///
/// ```rust
/// use rs_readability::extract_bytes;
///
/// // ISO-8859-1 encoded HTML with charset declaration
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><article>Caf\xE9</article></body></html>";
/// let result = extract_bytes(html)?;
/// assert!(result.content_text.contains("Café"));
/// # Ok::<(), rs_readability::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract_bytes(html: &[u8]) -> Result<ExtractResult> {
    extract_bytes_with_options(html, &Options::default())
}

/// Extracts main content from HTML bytes with custom options and automatic
/// encoding detection.
#[allow(clippy::missing_errors_doc)]
pub fn extract_bytes_with_options(html: &[u8], options: &Options) -> Result<ExtractResult> {
    let html_str = encoding::transcode_to_utf8(html);
    extract_with_options(&html_str, options)
}
