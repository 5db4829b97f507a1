//! Result types for extraction output.

use serde::Serialize;

/// Result of content extraction from an HTML document.
///
/// Created fresh for every call; nothing is cached between extractions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractResult {
    /// Cleaned article markup, a full `<html><body>` document or a bare
    /// `<div>` fragment depending on `Options::enclose_with_html_tag`.
    pub content_html: String,

    /// Plain text of the cleaned article, one line per block.
    pub content_text: String,

    /// Page title (`<title>`, else the first heading, else empty).
    pub title: String,

    /// Page title with the site name stripped.
    pub short_title: String,

    /// Number of extraction passes run: 1, or 2 when the relaxed retry ran.
    pub passes: u8,

    /// Warnings encountered during extraction.
    ///
    /// Non-fatal issues such as:
    /// - No candidate scored (the whole body was used)
    /// - The configured base URL was not absolute and was ignored
    pub warnings: Vec<String>,
}

impl ExtractResult {
    /// Character count of the extracted text.
    #[must_use]
    pub fn text_len(&self) -> usize {
        self.content_text.chars().count()
    }

    /// Check if the relaxed retry ran.
    #[must_use]
    pub fn retried(&self) -> bool {
        self.passes > 1
    }
}
