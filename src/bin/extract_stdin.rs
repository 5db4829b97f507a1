//! Simple CLI that reads HTML from stdin and outputs JSON to stdout.
//!
//! Usage: `extract_stdin [BASE_URL] < page.html`
//!
//! Set `RUST_LOG=rs_readability=debug` to trace the extraction passes.

use rs_readability::{extract_bytes_with_options, Options};
use serde::Serialize;
use std::io::{self, Read};

#[derive(Serialize)]
struct Output {
    title: String,
    short_title: String,
    content_html: String,
    content_text: String,
}

fn main() {
    env_logger::init();

    let mut html = Vec::new();
    if io::stdin().read_to_end(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let options = Options {
        url: std::env::args().nth(1),
        ..Options::default()
    };

    let output = match extract_bytes_with_options(&html, &options) {
        Ok(r) => {
            for warning in &r.warnings {
                log::warn!("{warning}");
            }
            Output {
                title: r.title,
                short_title: r.short_title,
                content_html: r.content_html,
                content_text: r.content_text,
            }
        }
        Err(err) => {
            eprintln!("Extraction failed: {err}");
            Output {
                title: String::new(),
                short_title: String::new(),
                content_html: String::new(),
                content_text: String::new(),
            }
        }
    };

    println!("{}", serde_json::to_string(&output).unwrap_or_default());
}
