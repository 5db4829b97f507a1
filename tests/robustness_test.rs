//! Inputs that stress the parser bridge and the tree passes.

use rs_readability::{extract, extract_tree, Options, Tree};

#[test]
fn empty_input_yields_empty_content() {
    match extract("") {
        Ok(result) => {
            assert_eq!(result.content_text, "");
            assert_eq!(result.content_html, "<html><body><div></div></body></html>");
            assert_eq!(result.passes, 2);
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn plain_text_input_is_extracted() {
    let text = "Just some plain text without any markup, long enough to be considered content.";
    match extract(text) {
        Ok(result) => assert_eq!(result.content_text, text),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn deeply_nested_markup_does_not_overflow() {
    let depth = 1_000;
    let html = format!(
        "<html><body>{}<p>Deep paragraph with enough text to be scored, finally.</p>{}</body></html>",
        "<div>".repeat(depth),
        "</div>".repeat(depth)
    );
    match extract(&html) {
        Ok(result) => assert!(result.content_text.contains("Deep paragraph")),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn unclosed_and_misnested_tags_are_tolerated() {
    let html = "<html><body><div><p>First unclosed paragraph, with a comma or two, here.\
                <p>Second <b>bold <i>nested</b> text</i> continues the story further on.\
                <div>Loose text</span></body>";
    match extract(html) {
        Ok(result) => {
            assert!(result.content_text.contains("First unclosed paragraph"));
            assert!(result.content_text.contains("continues the story"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn scripts_styles_and_comments_never_leak() {
    let html = r#"<html><head><style>.x { color: red }</style></head><body>
        <script>var SCRIPT_TEXT = 1;</script>
        <!-- COMMENT_TEXT -->
        <div class="content">
          <p>Visible paragraph text that forms the article, with a comma, and more words.</p>
          <noscript>NOSCRIPT_TEXT please enable javascript</noscript>
        </div></body></html>"#;
    match extract(html) {
        Ok(result) => {
            assert!(result.content_text.contains("Visible paragraph"));
            for leak in ["SCRIPT_TEXT", "COMMENT_TEXT", "NOSCRIPT_TEXT", "color: red"] {
                assert!(!result.content_html.contains(leak), "{leak} leaked");
            }
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn special_characters_are_escaped_in_html() {
    let html = "<html><body><p>Prices rose 5% &lt;&gt; &amp; more, per the report \"Q3\" released today.</p></body></html>";
    match extract(html) {
        Ok(result) => {
            assert!(result.content_text.contains("5% <> & more"));
            assert!(result.content_html.contains("5% &lt;&gt; &amp; more"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn extract_tree_matches_extract() {
    let html = "<html><head><title>Tree API</title></head><body><p>A paragraph parsed ahead of time, then handed over.</p></body></html>";
    let tree = match Tree::parse(html) {
        Ok(tree) => tree,
        Err(err) => panic!("parse failed: {err}"),
    };
    let from_tree = extract_tree(tree, &Options::default());
    match extract(html) {
        Ok(result) => assert_eq!(result, from_tree),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn concurrent_extractions_share_options() {
    let options = Options::default();
    let html = "<html><body><div><p>Thread-safe extraction of the same page, over and over again.</p></div></body></html>";

    let results: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| rs_readability::extract_with_options(html, &options)))
            .collect();
        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(Ok(result)) => result.content_html,
                Ok(Err(err)) => panic!("extraction failed: {err}"),
                Err(_) => panic!("worker panicked"),
            })
            .collect()
    });

    assert!(results.windows(2).all(|w| w[0] == w[1]));
}
