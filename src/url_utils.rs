//! URL Utility Functions
//!
//! String-level resolution of `href`/`src` values against the document's
//! base URL. Nothing here performs network access.

use url::Url;

use crate::error::{Error, Result};

/// Schemes left untouched by resolution.
const OPAQUE_PREFIXES: [&str; 4] = ["data:", "javascript:", "mailto:", "tel:"];

/// Check if a string is a valid absolute http(s) URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Parse the configured base URL.
///
/// Only absolute http(s) URLs are accepted as a base.
pub fn parse_base_url(s: &str) -> Result<Url> {
    match is_absolute_url(s) {
        (true, Some(url)) => Ok(url),
        _ => Err(Error::InvalidUrl(s.trim().to_string())),
    }
}

/// Check if a reference must be kept exactly as written.
///
/// Fragment-only links point inside the document and opaque schemes carry
/// their payload inline.
#[must_use]
pub fn is_opaque_reference(s: &str) -> bool {
    let s = s.trim_start();
    s.starts_with('#')
        || OPAQUE_PREFIXES
            .iter()
            .any(|p| s.get(..p.len()).is_some_and(|head| head.eq_ignore_ascii_case(p)))
}

/// Convert a relative or absolute URL to absolute form.
///
/// # Arguments
/// * `url_str` - The URL to resolve (can be relative or absolute)
/// * `base` - The base URL for resolution
///
/// # Returns
/// * The absolute URL string, the input itself for opaque references, or
///   `None` when the reference is empty or cannot be joined to the base.
#[must_use]
pub fn create_absolute_url(url_str: &str, base: &Url) -> Option<String> {
    let url_str = url_str.trim();

    if url_str.is_empty() {
        return None;
    }

    if is_opaque_reference(url_str) {
        return Some(url_str.to_string());
    }

    let (is_abs, _) = is_absolute_url(url_str);
    if is_abs {
        return Some(url_str.to_string());
    }

    base.join(url_str).ok().map(|resolved| resolved.to_string())
}
