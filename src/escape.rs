//! HTML escaping utilities.
//!
//! The escape sets are deliberately minimal: `&`, `<`, `>` in text
//! content, plus `"` inside attribute values. Fast-path optimized: scans
//! for the first escapable character, then bulk-copies segments between
//! escapes.

use memchr::{memchr, memchr3};

/// Escape text content into the output buffer.
///
/// Escapes `&`, `<` and `>`; everything else is copied through untouched.
///
/// # Example
/// ```
/// use minimark::escape::escape_text_into;
///
/// let mut out = String::new();
/// escape_text_into(&mut out, "a < b & c > d");
/// assert_eq!(out, "a &lt; b &amp; c &gt; d");
/// ```
pub fn escape_text_into(out: &mut String, input: &str) {
    let bytes = input.as_bytes();
    let mut pos = 0;
    // All escapable characters are ASCII, so byte offsets from memchr are
    // always char boundaries.
    while let Some(i) = memchr3(b'&', b'<', b'>', &bytes[pos..]) {
        let at = pos + i;
        out.push_str(&input[pos..at]);
        out.push_str(escape_seq(bytes[at]));
        pos = at + 1;
    }
    out.push_str(&input[pos..]);
}

/// Escape an attribute value into the output buffer.
///
/// Escapes `&`, `<`, `>` and additionally `"`.
///
/// # Example
/// ```
/// use minimark::escape::escape_attr_into;
///
/// let mut out = String::new();
/// escape_attr_into(&mut out, "a \"b\"");
/// assert_eq!(out, "a &quot;b&quot;");
/// ```
pub fn escape_attr_into(out: &mut String, input: &str) {
    let bytes = input.as_bytes();
    let mut pos = 0;
    loop {
        let rest = &bytes[pos..];
        let next = match (memchr3(b'&', b'<', b'>', rest), memchr(b'"', rest)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        };
        match next {
            Some(i) => {
                let at = pos + i;
                out.push_str(&input[pos..at]);
                out.push_str(escape_seq(bytes[at]));
                pos = at + 1;
            }
            None => {
                out.push_str(&input[pos..]);
                return;
            }
        }
    }
}

/// Escape text content and return a fresh String.
///
/// Prefer [`escape_text_into`] to reuse buffers.
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 8);
    escape_text_into(&mut out, input);
    out
}

#[inline]
fn escape_seq(b: u8) -> &'static str {
    match b {
        b'&' => "&amp;",
        b'<' => "&lt;",
        b'>' => "&gt;",
        b'"' => "&quot;",
        _ => unreachable!(),
    }
}
