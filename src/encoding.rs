//! Character encoding detection and transcoding.
//!
//! Raw page bytes are decoded to UTF-8 before parsing. The charset is taken
//! from a byte order mark, else from a `<meta>` declaration near the top of
//! the document, else UTF-8 is assumed.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use log::debug;
use regex::Regex;

/// Bytes examined for a `<meta>` charset declaration.
const SNIFF_LIMIT: usize = 1024;

/// `charset=` inside a `<meta>` tag. Covers both `<meta charset="...">` and
/// `<meta http-equiv="Content-Type" content="text/html; charset=...">`.
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\b[^>]*?charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#).expect("valid regex")
});

/// Detect the character encoding of HTML bytes.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LIMIT)]);
    declared_charset(&head)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        // a <meta> can't truthfully declare UTF-16: the bytes we just read
        // as ASCII prove otherwise
        .map_or(UTF_8, Encoding::output_encoding)
}

/// Charset label declared by the first `<meta>` that has one.
fn declared_charset(head: &str) -> Option<String> {
    META_CHARSET_RE
        .captures(head)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Transcode HTML bytes to a UTF-8 string.
///
/// Malformed sequences become U+FFFD rather than errors.
///
/// # Examples
///
/// ```
/// use rs_readability::encoding::transcode_to_utf8;
///
/// let html = b"<html><body>Hello, World!</body></html>";
/// let utf8_str = transcode_to_utf8(html);
/// assert!(utf8_str.contains("Hello, World!"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    let (decoded, used, had_errors) = encoding.decode(html);
    if had_errors {
        debug!("malformed {} input, replaced invalid sequences", used.name());
    }
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_from_meta_charset() {
        let html = br#"<html><head><meta charset="utf-8"></head><body>Test</body></html>"#;
        assert_eq!(detect_encoding(html), UTF_8);

        // ISO-8859-1 is an alias of windows-1252 for the web
        let html = br#"<html><head><meta charset="ISO-8859-1"></head></html>"#;
        assert_eq!(detect_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn detect_from_http_equiv() {
        let html = br#"<META HTTP-EQUIV="content-type" CONTENT="text/html; CHARSET=Shift_JIS">"#;
        assert_eq!(detect_encoding(html).name(), "Shift_JIS");
    }

    #[test]
    fn bom_wins_over_meta() {
        let mut html = vec![0xFF, 0xFE];
        for unit in "<meta charset=\"latin1\">".encode_utf16() {
            html.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(detect_encoding(&html).name(), "UTF-16LE");
    }

    #[test]
    fn meta_utf16_is_read_as_utf8() {
        let html = br#"<meta charset="utf-16">"#;
        assert_eq!(detect_encoding(html), UTF_8);
    }

    #[test]
    fn declaration_past_sniff_limit_is_ignored() {
        let mut html = vec![b' '; SNIFF_LIMIT];
        html.extend_from_slice(br#"<meta charset="windows-1251">"#);
        assert_eq!(detect_encoding(&html), UTF_8);
    }

    #[test]
    fn transcode_windows1252_to_utf8() {
        let html = b"<html><head><meta charset=\"windows-1252\"></head><body>\x93Caf\xE9\x94</body></html>";
        let result = transcode_to_utf8(html);
        assert!(result.contains("\u{201C}Caf\u{e9}\u{201D}"));
    }

    #[test]
    fn transcode_strips_utf8_bom() {
        let html = b"\xEF\xBB\xBF<p>Hi</p>";
        assert_eq!(transcode_to_utf8(html), "<p>Hi</p>");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let html = b"<html><body>Test \xFF\xFE Invalid</body></html>";
        let result = transcode_to_utf8(html);
        assert!(result.contains("Test"));
        assert!(result.contains('\u{FFFD}'));
        assert!(result.contains("Invalid"));
    }
}
