//! Link detection for outbound message bodies.
//!
//! Partial links count the same as full URLs: any `word.tld` shaped token is
//! treated as a link.

use regex::RegexSet;
use std::sync::LazyLock;

/// Top-level domains that flag a token as a link even without a scheme.
pub const FLAGGED_TLDS: [&str; 12] = [
    "com", "org", "net", "edu", "gov", "mil", "io", "co", "me", "tv", "app", "dev",
];

/// Link-shortening hosts that are blocked when followed by a path.
pub const LINK_SHORTENERS: [&str; 10] = [
    "bit.ly",
    "t.co",
    "tinyurl.com",
    "goo.gl",
    "ow.ly",
    "is.gd",
    "buff.ly",
    "rebrand.ly",
    "cutt.ly",
    "tiny.cc",
];

fn hyperlink_patterns() -> Vec<String> {
    let shorteners = LINK_SHORTENERS
        .iter()
        .map(|host| regex::escape(host))
        .collect::<Vec<_>>()
        .join("|");

    vec![
        // scheme URL
        r"(?i)https?://\S+".to_string(),
        // www. prefix
        r"(?i)\bwww\.\S+".to_string(),
        // bare token.tld
        r"(?i)\b[a-z0-9-]+\.[a-z]{2,}\b".to_string(),
        format!(r"(?i)\b(?:{shorteners})/\S*"),
        format!(r"(?i)\b\S+\.(?:{})\b", FLAGGED_TLDS.join("|")),
    ]
}

static HYPERLINK_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(hyperlink_patterns()).expect("hyperlink patterns are valid regular expressions")
});

/// Returns true when any link rule matches anywhere in `text`.
pub fn contains_hyperlink(text: &str) -> bool {
    HYPERLINK_PATTERNS.is_match(text)
}
