//! Embedded phone-number detection.
//!
//! Any number-shaped token in the body rejects the message.

use regex::RegexSet;
use std::sync::LazyLock;

/// N11 service codes that are rejected as standalone tokens.
pub const RESERVED_SHORT_CODES: [&str; 7] = ["911", "311", "411", "511", "611", "711", "811"];

fn phone_patterns() -> Vec<String> {
    vec![
        // North-American 3-3-4 with optional parens and separators
        r"\(?\b\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b".to_string(),
        // any run of ten digits, including 1-prefixed and longer runs
        r"\d{10}".to_string(),
        // +CC followed by up to three digit groups
        r"\+\d{1,3}(?:[-.\s]?\d{1,4}){0,3}".to_string(),
        r"(?i)\d{3}[-.\s]?\d{4}\s*(?:extension|ext\.?|x)\s*\d{1,5}\b".to_string(),
        // toll-free, vanity letters allowed
        r"(?i)\b1[-.\s]?8(?:00|33|44|55|66|77|88)[-.\s]?[a-z0-9]{3}[-.\s]?[a-z0-9]{4}\b"
            .to_string(),
        format!(r"\b(?:{})\b", RESERVED_SHORT_CODES.join("|")),
    ]
}

static PHONE_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(phone_patterns()).expect("phone patterns are valid regular expressions")
});

/// Returns true when any phone-number rule matches anywhere in `text`.
pub fn contains_phone_number(text: &str) -> bool {
    PHONE_PATTERNS.is_match(text)
}
