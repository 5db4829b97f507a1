//! Keyword patterns matched against `class` and `id` attributes.
//!
//! The defaults are compiled once using `LazyLock` and cloned into each
//! [`Options`](crate::Options); `Regex` clones share the compiled program, so
//! callers can tune the sets per extraction without any global state.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::error::Result;

// =============================================================================
// Default Keyword Patterns
// =============================================================================

/// Class/id names that mark a likely article container.
pub static POSITIVE_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)article|body|content|entry|hentry|main|page|pagination|post|text|blog|story")
        .expect("POSITIVE_KEYWORDS regex")
});

/// Class/id names that mark boilerplate.
pub static NEGATIVE_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)combx|comment|com-|contact|foot|footer|footnote|masthead|media|meta|outbrain|promo|related|scroll|shoutbox|sidebar|sponsor|shopping|tags|tool|widget",
    )
    .expect("NEGATIVE_KEYWORDS regex")
});

/// Class/id names of regions dropped before scoring in the strict pass.
pub static UNLIKELY_CANDIDATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)combx|comment|community|disqus|extra|foot|header|menu|remark|rss|shoutbox|sidebar|sponsor|ad-break|agegate|pagination|pager|popup|tweet|twitter",
    )
    .expect("UNLIKELY_CANDIDATES regex")
});

/// Class/id names that rescue an element from the unlikely-candidate sweep.
pub static MAYBE_CANDIDATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)and|article|body|column|main|shadow").expect("MAYBE_CANDIDATES regex")
});

// =============================================================================
// Text Patterns
// =============================================================================

/// A sentence end: a period followed by a space or the end of the text.
pub static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.( |$)").expect("SENTENCE_END regex"));

/// Separators between an article title and the site name.
pub static TITLE_SEPARATORS: [&str; 4] = [" | ", " - ", " :: ", " / "];

// =============================================================================
// Keyword Sets
// =============================================================================

/// A set of case-insensitive patterns; matches when any member matches.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    patterns: Vec<Regex>,
}

impl KeywordSet {
    /// Compile a set from user-supplied patterns.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rs_readability::patterns::KeywordSet;
    ///
    /// let set = KeywordSet::new(["promo-box", r"^ad-\d+$"])?;
    /// assert!(set.is_match("sidebar promo-box"));
    /// assert!(set.is_match("AD-42"));
    /// # Ok::<(), rs_readability::Error>(())
    /// ```
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| RegexBuilder::new(p.as_ref()).case_insensitive(true).build())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Wrap an already compiled pattern.
    #[must_use]
    pub fn from_regex(regex: Regex) -> Self {
        Self {
            patterns: vec![regex],
        }
    }

    /// A set that never matches.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if any pattern matches.
    #[must_use]
    pub fn is_match(&self, haystack: &str) -> bool {
        !haystack.is_empty() && self.patterns.iter().any(|p| p.is_match(haystack))
    }

    /// Check if the set has no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Default positive keyword set.
#[must_use]
pub fn default_positive() -> KeywordSet {
    KeywordSet::from_regex(POSITIVE_KEYWORDS.clone())
}

/// Default negative keyword set.
#[must_use]
pub fn default_negative() -> KeywordSet {
    KeywordSet::from_regex(NEGATIVE_KEYWORDS.clone())
}

/// Default unlikely-candidate set.
#[must_use]
pub fn default_unlikely() -> KeywordSet {
    KeywordSet::from_regex(UNLIKELY_CANDIDATES.clone())
}

/// Default rescue set for unlikely candidates.
#[must_use]
pub fn default_maybe() -> KeywordSet {
    KeywordSet::from_regex(MAYBE_CANDIDATES.clone())
}
