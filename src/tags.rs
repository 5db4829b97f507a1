//! Tag catalogs used by the extraction passes.
//!
//! Arrays are kept for iteration and documentation, `HashSet`s for O(1) lookup.

use std::collections::HashSet;
use std::sync::LazyLock;

// === Tag Lists (arrays for iteration) ===

/// Elements removed outright by the preprocessor.
pub static DENYLIST_TAGS: [&str; 9] = [
    "script", "style", "noscript", "template", "link", "meta", "textarea", "select", "button",
];

/// Purely presentational wrappers, replaced by their children.
pub static PRESENTATIONAL_TAGS: [&str; 7] =
    ["font", "center", "big", "basefont", "blink", "marquee", "nobr"];

/// Phrasing content. Text inside these counts as the direct text of the
/// nearest block ancestor.
pub static INLINE_TAGS: [&str; 33] = [
    "a", "abbr", "acronym", "b", "bdi", "bdo", "br", "cite", "code", "data", "del", "dfn", "em",
    "font", "i", "img", "ins", "kbd", "label", "mark", "q", "s", "samp", "small", "span",
    "strike", "strong", "sub", "sup", "time", "tt", "u", "var",
];

/// Elements whose presence inside a `div` means the div is a real container
/// rather than a misused paragraph.
pub static BLOCK_CHILD_TAGS: [&str; 10] =
    ["a", "blockquote", "dl", "div", "img", "ol", "p", "pre", "table", "ul"];

/// Embedded media. An element holding one of these is never "empty".
pub static MEDIA_TAGS: [&str; 9] = [
    "img", "iframe", "video", "audio", "embed", "object", "picture", "source", "svg",
];

/// Headings.
pub static HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Void elements, serialized without a closing tag.
pub static VOID_TAGS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements kept by the cleaner even when they hold no text.
pub static KEEP_WHEN_EMPTY_TAGS: [&str; 11] = [
    "br", "hr", "td", "th", "tr", "thead", "tbody", "tfoot", "col", "colgroup", "wbr",
];

/// Document scaffolding that never holds article content. Neither scored
/// nor selected.
pub static NON_CONTENT_TAGS: [&str; 4] = ["html", "head", "title", "base"];

/// Table rows and row groups. Only meaningful inside a `table`, so a winner
/// among them is replaced by the enclosing table.
pub static TABLE_PLUMBING_TAGS: [&str; 4] = ["tbody", "thead", "tfoot", "tr"];

/// Containers examined by the cleaner's conditional pass.
pub static CONDITIONAL_TAGS: [&str; 5] = ["table", "ul", "ol", "div", "form"];

/// Containers dropped when link-heavy and short.
pub static LINK_LIST_TAGS: [&str; 5] = ["table", "ul", "ol", "dl", "form"];

// === Tag Sets (HashSets for O(1) lookup) ===

/// `DENYLIST_TAGS` as a `HashSet`
pub static DENYLIST_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| DENYLIST_TAGS.into_iter().collect());

/// `PRESENTATIONAL_TAGS` as a `HashSet`
pub static PRESENTATIONAL_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| PRESENTATIONAL_TAGS.into_iter().collect());

/// `INLINE_TAGS` as a `HashSet`
pub static INLINE_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| INLINE_TAGS.into_iter().collect());

/// `BLOCK_CHILD_TAGS` as a `HashSet`
pub static BLOCK_CHILD_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| BLOCK_CHILD_TAGS.into_iter().collect());

/// `MEDIA_TAGS` as a `HashSet`
pub static MEDIA_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| MEDIA_TAGS.into_iter().collect());

/// `VOID_TAGS` as a `HashSet`
pub static VOID_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| VOID_TAGS.into_iter().collect());

/// `KEEP_WHEN_EMPTY_TAGS` as a `HashSet`
pub static KEEP_WHEN_EMPTY_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| KEEP_WHEN_EMPTY_TAGS.into_iter().collect());

/// `NON_CONTENT_TAGS` as a `HashSet`
pub static NON_CONTENT_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NON_CONTENT_TAGS.into_iter().collect());

// === Helper Functions ===

/// Check if a tag is phrasing content.
#[inline]
#[must_use]
pub fn is_inline(tag: &str) -> bool {
    INLINE_TAG_SET.contains(tag)
}

/// Check if a tag is embedded media.
#[inline]
#[must_use]
pub fn is_media(tag: &str) -> bool {
    MEDIA_TAG_SET.contains(tag)
}

/// Check if a tag is a heading (`h1`-`h6`).
#[inline]
#[must_use]
pub fn is_heading(tag: &str) -> bool {
    HEADING_TAGS.contains(&tag)
}

/// Check if a tag is document scaffolding (`html`, `head`, ...).
#[inline]
#[must_use]
pub fn is_non_content(tag: &str) -> bool {
    NON_CONTENT_TAG_SET.contains(tag)
}

/// Check if a tag is a void element.
#[inline]
#[must_use]
pub fn is_void(tag: &str) -> bool {
    VOID_TAG_SET.contains(tag)
}
