//! SMS segmentation for compliant messages.
//!
//! [`count`] is the fixed-bucket estimate stored with each record and
//! [`split`] produces the text actually handed to the provider. The two are
//! computed independently and can disagree when whitespace breaks land early.

use crate::compliance::message_length;
use serde::Serialize;

/// Maximum UTF-16 code units carried by one segment.
pub const SEGMENT_CHARS: usize = 160;
/// Earliest index at which a whitespace break is accepted.
pub const MIN_BREAK_INDEX: usize = 140;
/// Upper bound reported by [`count`].
pub const MAX_SEGMENTS: usize = 3;

/// One provider-sized chunk of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub text: String,
    /// 1-based position.
    pub ordinal: usize,
    pub total_segments: usize,
}

/// Number of segments billed for `text`: 1, 2 or 3.
#[must_use]
pub fn count(text: &str) -> usize {
    let len = message_length(text);
    if len <= SEGMENT_CHARS {
        1
    } else if len <= SEGMENT_CHARS * 2 {
        2
    } else {
        MAX_SEGMENTS
    }
}

/// Byte offset of the break for `text`, which must exceed [`SEGMENT_CHARS`].
///
/// Positions are UTF-16 code units. A hard break that would land inside a
/// surrogate pair moves back one unit.
fn break_offset(text: &str) -> usize {
    let mut unit = 0;
    let mut soft = None;
    let mut hard = None;

    for (offset, ch) in text.char_indices() {
        if unit > SEGMENT_CHARS {
            break;
        }
        if unit >= MIN_BREAK_INDEX && ch.is_whitespace() {
            soft = Some(offset);
        }
        unit += ch.len_utf16();
        if unit > SEGMENT_CHARS && hard.is_none() {
            hard = Some(offset);
        }
    }

    soft.or(hard).unwrap_or(text.len())
}

/// Split `text` into segments of at most [`SEGMENT_CHARS`] code units.
///
/// Breaks on the last whitespace between index 140 and 160, falling back to a
/// hard break at 160. The remainder after each break is trimmed.
#[must_use]
pub fn split(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        if message_length(remaining) <= SEGMENT_CHARS {
            parts.push(remaining.to_string());
            break;
        }

        let offset = break_offset(remaining);
        parts.push(remaining[..offset].to_string());
        remaining = remaining[offset..].trim();
    }

    parts
}

/// [`split`] annotated with ordinals; `total_segments` comes from [`count`].
#[must_use]
pub fn segments(text: &str) -> Vec<Segment> {
    let total_segments = count(text);
    split(text)
        .into_iter()
        .enumerate()
        .map(|(index, text)| Segment {
            text,
            ordinal: index + 1,
            total_segments,
        })
        .collect()
}
