use mansite::compliance::{MAX_MESSAGE_CHARS, RejectionReason, ValidationResult, validate};
use mansite::segments::{self, MIN_BREAK_INDEX, SEGMENT_CHARS};

fn reason(text: &str) -> Option<RejectionReason> {
    validate(text).rejection()
}

#[test]
fn rules_apply_in_order_links_then_phones_then_length() {
    let link_and_phone = "call 555-123-4567 or see example.com";
    assert_eq!(reason(link_and_phone), Some(RejectionReason::HyperlinkDetected));

    let long_with_phone = format!("{} 555-123-4567", "a".repeat(MAX_MESSAGE_CHARS));
    assert_eq!(
        reason(&long_with_phone),
        Some(RejectionReason::PhoneNumberDetected)
    );

    let long_with_link = format!("{} www.example.com", "a".repeat(MAX_MESSAGE_CHARS));
    assert_eq!(
        reason(&long_with_link),
        Some(RejectionReason::HyperlinkDetected)
    );
}

#[test]
fn length_boundary_is_inclusive() {
    assert_eq!(
        validate(&"a".repeat(MAX_MESSAGE_CHARS)),
        ValidationResult::Compliant
    );
    assert_eq!(
        reason(&"a".repeat(MAX_MESSAGE_CHARS + 1)),
        Some(RejectionReason::TooLong)
    );
}

#[test]
fn validation_is_deterministic() {
    for text in [
        "Hello, how are you?",
        "Check this out: https://example.com/x",
        "Call me at 555-123-4567",
        "",
    ] {
        assert_eq!(validate(text), validate(text), "{text}");
    }
}

#[test]
fn every_split_segment_fits_and_reconstructs_the_message() {
    let samples = [
        "word ".repeat(40).trim().to_string(),
        "x".repeat(321),
        format!("{} {}", "a".repeat(150), "b".repeat(300)),
        "The quick brown fox jumps over the lazy dog. ".repeat(9),
        "\u{1F680} liftoff ".repeat(40).trim().to_string(),
        format!("x{}", "\u{1F30D}".repeat(200)),
    ];

    for text in &samples {
        let parts = segments::split(text);
        assert!(!parts.is_empty());
        for part in &parts {
            assert!(part.encode_utf16().count() <= SEGMENT_CHARS);
        }

        let strip = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
        assert_eq!(strip(&parts.concat()), strip(text));
    }
}

#[test]
fn whitespace_breaks_never_land_before_the_window() {
    let text = format!("{} {}", "a".repeat(MIN_BREAK_INDEX - 10), "b".repeat(200));
    let parts = segments::split(&text);
    assert_eq!(parts[0].chars().count(), SEGMENT_CHARS);
}

#[test]
fn segment_metadata_follows_count() {
    for len in [1, 160, 161, 320, 321, 480] {
        let text = "z".repeat(len);
        let expected = segments::count(&text);
        for (i, segment) in segments::segments(&text).iter().enumerate() {
            assert_eq!(segment.ordinal, i + 1);
            assert_eq!(segment.total_segments, expected);
        }
    }
}

#[test]
fn empty_message_has_no_segments() {
    assert!(segments::split("").is_empty());
    assert!(segments::segments("").is_empty());
}
