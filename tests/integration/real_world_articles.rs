//! Integration tests for real-world article extraction
//!
//! Tests extraction from realistic HTML samples representing various page layouts.

use rs_readability::{extract, extract_bytes, extract_with_options, Options};

/// Test fixture path helper
fn fixture_path(name: &str) -> String {
    format!(
        "{}/tests/integration/fixtures/{}",
        env!("CARGO_MANIFEST_DIR"),
        name
    )
}

fn read_fixture(name: &str) -> String {
    match std::fs::read_to_string(fixture_path(name)) {
        Ok(html) => html,
        Err(err) => panic!("Failed to read fixture {name}: {err}"),
    }
}

#[test]
fn test_extract_news_article() {
    let html = read_fixture("news_article.html");

    match extract(&html) {
        Ok(result) => {
            assert_eq!(result.passes, 1, "A long article needs no retry");
            assert!(result.warnings.is_empty(), "Unexpected warnings: {:?}", result.warnings);

            // Main article content is present
            assert!(result.content_text.contains("Dr. Maria Johnson"));
            assert!(result.content_text.contains("between Greenland and Iceland"));

            // Boilerplate is gone
            for noise in [
                "Popular Posts",
                "Ten beaches",
                "Subscribe to our newsletter",
                "All rights reserved",
                "Opinion",
            ] {
                assert!(!result.content_text.contains(noise), "{noise} should be removed");
            }
            assert!(!result.content_html.contains("<script"));
            assert!(!result.content_html.contains("class="));
        }
        Err(err) => panic!("Extraction failed: {err:?}"),
    }
}

#[test]
fn test_news_article_titles() {
    let html = read_fixture("news_article.html");

    match extract(&html) {
        Ok(result) => {
            assert_eq!(
                result.title,
                "Researchers map the deep currents of the North Atlantic | Coastal Herald"
            );
            assert_eq!(
                result.short_title,
                "Researchers map the deep currents of the North Atlantic"
            );
        }
        Err(err) => panic!("Extraction failed: {err:?}"),
    }
}

#[test]
fn test_news_article_links_resolve_against_base_url() {
    let html = read_fixture("news_article.html");
    let options = Options {
        url: Some("https://herald.example.com/science/currents".to_string()),
        ..Options::default()
    };

    match extract_with_options(&html, &options) {
        Ok(result) => {
            assert!(result.warnings.is_empty());
            assert!(result
                .content_html
                .contains(r#"href="https://herald.example.com/staff/ellen-marsh""#));
            assert!(result
                .content_html
                .contains(r#"src="https://herald.example.com/images/float-deployment.jpg""#));
        }
        Err(err) => panic!("Extraction failed: {err:?}"),
    }
}

#[test]
fn test_extract_blog_post_with_br_paragraphs() {
    let html = read_fixture("blog_post.html");

    match extract(&html) {
        Ok(result) => {
            assert!(result.content_text.contains("the tokenizer needed"));
            assert!(result.content_text.contains("precedence climbing"));
            assert!(result.content_text.contains("closures in an afternoon"));
            assert!(result.content_html.contains("parse_expr"));

            // Loose text between <br> runs becomes paragraphs
            assert!(result.content_html.matches("<p>").count() >= 3);

            // Comments and navigation are gone
            assert!(!result.content_text.contains("Great write-up"));
            assert!(!result.content_text.contains("bytecode VM"));
            assert!(!result.content_text.contains("Archive"));
        }
        Err(err) => panic!("Extraction failed: {err:?}"),
    }
}

#[test]
fn test_blog_post_short_title_uses_entry_heading() {
    let html = read_fixture("blog_post.html");

    match extract(&html) {
        Ok(result) => {
            assert_eq!(result.title, "Notes on writing a small interpreter - Field Notes");
            assert_eq!(result.short_title, "Notes on writing a small interpreter");
        }
        Err(err) => panic!("Extraction failed: {err:?}"),
    }
}

#[test]
fn test_fixture_bytes_match_string_extraction() {
    let html = read_fixture("blog_post.html");

    match (extract(&html), extract_bytes(html.as_bytes())) {
        (Ok(from_str), Ok(from_bytes)) => assert_eq!(from_str, from_bytes),
        (Err(err), _) | (_, Err(err)) => panic!("Extraction failed: {err:?}"),
    }
}
