//! Textual stylesheet minification
//!
//! This is a fixed sequence of regex substitutions, not a CSS parser.
//! Comment-like text inside string literals is stripped as a comment, and
//! whitespace next to `, > ~ +` is removed even inside attribute selectors
//! and `calc()` expressions.

use once_cell::sync::Lazy;
use regex::Regex;

/// Whitespace as ECMAScript `\s` defines it: Rust's `\s` leaves out U+FEFF
/// (a byte-order mark at the start of a fragment) and adds U+0085.
const WS: &str = r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

/// Block comments, non-greedy, spanning lines
static COMMENT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("Invalid COMMENT_REGEX pattern"));

static WHITESPACE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("[{}]+", WS)).expect("Invalid WHITESPACE_REGEX pattern"));

/// Whitespace on either side of a structural delimiter
static DELIMITER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("[{ws}]*([{{}}:;,>~+])[{ws}]*", ws = WS))
        .expect("Invalid DELIMITER_REGEX pattern")
});

fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Minify a stylesheet
///
/// Steps, in order: drop block comments, collapse whitespace runs to one
/// space, drop whitespace around `{ } : ; , > ~ +`, turn `;}` into `}`,
/// then trim the result.
pub fn minify(css: &str) -> String {
    let without_comments = COMMENT_REGEX.replace_all(css, "");
    let collapsed = WHITESPACE_REGEX.replace_all(&without_comments, " ");
    let tightened = DELIMITER_REGEX.replace_all(&collapsed, "$1");
    let closed = tightened.replace(";}", "}");
    closed.trim_matches(is_whitespace).to_string()
}
