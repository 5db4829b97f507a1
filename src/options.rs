//! Configuration options for content extraction.
//!
//! `Options` is resolved once per extraction call and never mutated by the
//! pipeline. The numeric heuristics live in [`Thresholds`] so they can be
//! tuned as a table rather than hunted down as literals.

use crate::patterns::{self, KeywordSet};

/// Configuration options for content extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_readability::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     url: Some("https://example.com/news/story.html".to_string()),
///     enclose_with_html_tag: false,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Minimum characters of direct text for an element to be scored.
    ///
    /// Default: `25`
    pub min_text_length: usize,

    /// Minimum length of the extracted text. Shorter output triggers one
    /// retry with relaxed thresholds.
    ///
    /// Default: `250`
    pub retry_length: usize,

    /// Base URL used to make `href`/`src` attributes absolute.
    ///
    /// Default: `None`
    pub url: Option<String>,

    /// Class/id patterns that raise an element's score.
    ///
    /// Default: [`patterns::POSITIVE_KEYWORDS`]
    pub positive_keywords: KeywordSet,

    /// Class/id patterns that lower an element's score and get it dropped
    /// by the cleaner.
    ///
    /// Default: [`patterns::NEGATIVE_KEYWORDS`]
    pub negative_keywords: KeywordSet,

    /// Class/id patterns removed before scoring in the strict pass.
    ///
    /// Default: [`patterns::UNLIKELY_CANDIDATES`]
    pub unlikely_candidates: KeywordSet,

    /// Class/id patterns that exempt an element from `unlikely_candidates`.
    ///
    /// Default: [`patterns::MAYBE_CANDIDATES`]
    pub maybe_candidates: KeywordSet,

    /// Images declaring a width or height below this (in pixels) are dropped.
    ///
    /// Default: `32`
    pub min_image_size: u32,

    /// Wrap the output in `<html><body>`; when false only the content
    /// fragment is returned.
    ///
    /// Default: `true`
    pub enclose_with_html_tag: bool,

    /// Tunable heuristic constants.
    pub thresholds: Thresholds,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_text_length: 25,
            retry_length: 250,
            url: None,
            positive_keywords: patterns::default_positive(),
            negative_keywords: patterns::default_negative(),
            unlikely_candidates: patterns::default_unlikely(),
            maybe_candidates: patterns::default_maybe(),
            min_image_size: 32,
            enclose_with_html_tag: true,
            thresholds: Thresholds::default(),
        }
    }
}

/// Heuristic constants of the scoring, selection and cleaning passes.
///
/// The defaults are the values readability implementations have converged
/// on; treat them as a starting point for tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    /// Weight of paragraph-like tags (`p`, `pre`, `blockquote`, `td`).
    pub paragraph_tag_weight: f64,
    /// Weight of generic containers (`div`, `article`, `section`, `main`).
    pub container_tag_weight: f64,
    /// Weight of list, form and definition tags.
    pub list_tag_weight: f64,
    /// Weight of headings and `th`.
    pub heading_tag_weight: f64,
    /// Bonus/penalty applied per matching `class` or `id`.
    pub class_weight: f64,
    /// Characters of text per point of length bonus.
    pub chars_per_point: usize,
    /// Cap of the length bonus.
    pub max_length_points: usize,
    /// Share of a node's score that reaches its grandparent.
    pub grandparent_share: f64,
    /// Link density above which a candidate or list is considered navigation.
    pub max_link_density: f64,
    /// When the winner is link-heavy, an alternative within this fraction of
    /// its effective score is preferred.
    pub link_density_tolerance: f64,
    /// Siblings scoring at least this fraction of the winner are appended.
    pub sibling_score_ratio: f64,
    /// Lower bound of the sibling threshold.
    pub sibling_score_floor: f64,
    /// Paragraph siblings longer than this are appended when not link-heavy.
    pub sibling_paragraph_length: usize,
    /// `min_text_length` of the relaxed retry pass.
    pub relaxed_min_text_length: usize,
    /// Link density above which a heading is dropped.
    pub max_heading_link_density: f64,
    /// Share of the remaining text above which a negative-keyword element is kept.
    pub keep_text_share: f64,
    /// Elements with this many commas skip conditional cleaning.
    pub conditional_comma_limit: usize,
    /// Neighbouring text length that rescues an element from conditional cleaning.
    pub conditional_sibling_text: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            paragraph_tag_weight: 5.0,
            container_tag_weight: 3.0,
            list_tag_weight: -3.0,
            heading_tag_weight: -5.0,
            class_weight: 25.0,
            chars_per_point: 100,
            max_length_points: 3,
            grandparent_share: 0.5,
            max_link_density: 0.25,
            link_density_tolerance: 0.5,
            sibling_score_ratio: 0.2,
            sibling_score_floor: 10.0,
            sibling_paragraph_length: 80,
            relaxed_min_text_length: 10,
            max_heading_link_density: 0.33,
            keep_text_share: 0.5,
            conditional_comma_limit: 10,
            conditional_sibling_text: 1000,
        }
    }
}

/// Per-pass view of the options: the strict pass uses them as configured,
/// the retry relaxes a few of them.
#[derive(Debug, Clone, Copy)]
pub struct Pass<'a> {
    /// The caller's options.
    pub options: &'a Options,
    /// Effective minimum direct-text length for scoring.
    pub min_text_length: usize,
    /// Relaxed passes skip the negative-keyword penalty and the
    /// unlikely-candidate sweep.
    pub relaxed: bool,
}

impl<'a> Pass<'a> {
    /// The first pass, options as configured.
    #[must_use]
    pub fn strict(options: &'a Options) -> Self {
        Self {
            options,
            min_text_length: options.min_text_length,
            relaxed: false,
        }
    }

    /// The retry pass.
    #[must_use]
    pub fn relaxed(options: &'a Options) -> Self {
        Self {
            options,
            min_text_length: options
                .thresholds
                .relaxed_min_text_length
                .min(options.min_text_length),
            relaxed: true,
        }
    }

    /// Heuristic constants of this pass.
    #[inline]
    #[must_use]
    pub fn thresholds(&self) -> &'a Thresholds {
        &self.options.thresholds
    }
}
