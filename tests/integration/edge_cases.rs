//! Edge case integration tests
//!
//! Tests for unusual inputs, boundary conditions and degenerate layouts.

use rs_readability::{extract, extract_with_options, Options};

#[test]
fn test_extract_minimal_html() {
    let html = "<html><body><p>Minimal content.</p></body></html>";

    match extract(html) {
        Ok(result) => {
            assert!(
                result.content_text.contains("Minimal"),
                "Should extract minimal content"
            );
            assert_eq!(result.passes, 2, "Short output triggers the relaxed retry");
        }
        Err(err) => panic!("Extraction failed: {err:?}"),
    }
}

#[test]
fn test_extract_empty_body() {
    let html = "<html><body></body></html>";

    match extract(html) {
        Ok(result) => {
            assert!(result.content_text.is_empty());
            assert!(
                result.warnings.iter().any(|w| w.contains("<body>")),
                "Fallback should be reported: {:?}",
                result.warnings
            );
        }
        Err(err) => panic!("Extraction failed: {err:?}"),
    }
}

#[test]
fn test_extract_no_body() {
    let html = "<html><head><title>No Body</title></head></html>";

    match extract(html) {
        Ok(result) => {
            assert_eq!(result.title, "No Body");
            assert!(result.content_text.is_empty());
        }
        Err(err) => panic!("Extraction failed: {err:?}"),
    }
}

#[test]
fn test_extract_whitespace_only() {
    let html = format!("<html><body>{}</body></html>", " \n\t".repeat(10_000));

    match extract(&html) {
        Ok(result) => assert!(result.content_text.is_empty()),
        Err(err) => panic!("Extraction failed: {err:?}"),
    }
}

#[test]
fn test_extract_unicode_content() {
    let html = "<html><body><div class=\"content\">\
                <p>\u{6771}\u{4eac}\u{3067}\u{306f}\u{671d}\u{304b}\u{3089}\u{96e8}\u{304c}\u{964d}\u{308a}\u{7d9a}\u{3044}\u{3066}\u{3044}\u{307e}\u{3059}\u{3002}\u{5348}\u{5f8c}\u{306b}\u{306f}\u{6b62}\u{3080}\u{898b}\u{8fbc}\u{307f}\u{3067}\u{3059}\u{3002}</p>\
                <p>\u{645}\u{631}\u{62d}\u{628}\u{627} \u{628}\u{627}\u{644}\u{639}\u{627}\u{644}\u{645}, this paragraph mixes scripts and emoji \u{1F30D} freely.</p>\
                </div></body></html>";

    match extract(html) {
        Ok(result) => {
            assert!(result.content_text.contains("\u{6771}\u{4eac}"));
            assert!(result.content_text.contains("\u{1F30D}"));
        }
        Err(err) => panic!("Extraction failed: {err:?}"),
    }
}

#[test]
fn test_extract_table_layout() {
    let row = "<tr><td>Layout tables still carry real prose, sentence after sentence, \
               as older sites often built whole pages out of them.</td></tr>";
    let html = format!(
        "<html><body><table class=\"layout\"><tr><td><a href=\"/\">Home</a></td></tr>{}</table></body></html>",
        row.repeat(4)
    );

    match extract(&html) {
        Ok(result) => {
            assert!(result.content_text.contains("Layout tables still carry real prose"));
        }
        Err(err) => panic!("Extraction failed: {err:?}"),
    }
}

#[test]
fn test_lazy_image_is_promoted() {
    let prose = "<p>The gallery opened on Saturday with a retrospective, spanning four decades of work.</p>";
    let html = format!(
        r#"<html><body><div class="article">{prose}<p><img data-src="https://cdn.example.com/painting.jpg" alt="A painting"></p>{prose}</div></body></html>"#
    );

    match extract(&html) {
        Ok(result) => {
            assert!(result
                .content_html
                .contains(r#"src="https://cdn.example.com/painting.jpg""#));
            assert!(!result.content_html.contains("data-src"));
        }
        Err(err) => panic!("Extraction failed: {err:?}"),
    }
}

#[test]
fn test_image_without_src_is_dropped() {
    let prose = "<p>The gallery opened on Saturday with a retrospective, spanning four decades of work.</p>";
    let html = format!(
        r#"<html><body><div class="article">{prose}<img alt="missing source">{prose}</div></body></html>"#
    );

    match extract(&html) {
        Ok(result) => assert!(!result.content_html.contains("<img")),
        Err(err) => panic!("Extraction failed: {err:?}"),
    }
}

#[test]
fn test_headings_only_page() {
    let html = "<html><body><h1>Heading one</h1><h2>Heading two</h2><h3>Heading three</h3></body></html>";

    match extract(html) {
        Ok(result) => {
            assert_eq!(result.title, "Heading one");
            assert_eq!(result.passes, 2);
        }
        Err(err) => panic!("Extraction failed: {err:?}"),
    }
}

#[test]
fn test_fragment_mode_without_retry() {
    let html = "<html><body><p>Short but sufficient when retries are off.</p></body></html>";
    let options = Options {
        enclose_with_html_tag: false,
        retry_length: 0,
        ..Options::default()
    };

    match extract_with_options(html, &options) {
        Ok(result) => {
            assert_eq!(result.passes, 1);
            assert!(!result.content_html.starts_with("<html>"));
            assert!(result.content_text.contains("Short but sufficient"));
        }
        Err(err) => panic!("Extraction failed: {err:?}"),
    }
}
