//! Outbound message compliance rules.
//!
//! One validator serves every caller: the send path, the form's inline
//! feedback endpoint and the `check` command all go through [`validate`].

pub mod hyperlink;
pub mod phone;

pub use hyperlink::contains_hyperlink;
pub use phone::contains_phone_number;

use serde::{Deserialize, Serialize};

/// Longest accepted message, in UTF-16 code units.
pub const MAX_MESSAGE_CHARS: usize = 480;

/// Why a message was refused.
///
/// `Display` is the user-facing text; [`RejectionReason::code`] is the stable
/// identifier used in JSON responses.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    thiserror::Error,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RejectionReason {
    #[error("Messages cannot contain links or web addresses.")]
    HyperlinkDetected,
    #[error("Messages cannot contain phone numbers.")]
    PhoneNumberDetected,
    #[error("Messages cannot be longer than 480 characters.")]
    TooLong,
}

impl RejectionReason {
    pub fn code(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Compliant,
    Rejected { reason: RejectionReason },
}

impl ValidationResult {
    pub fn is_compliant(self) -> bool {
        matches!(self, Self::Compliant)
    }

    pub fn rejection(self) -> Option<RejectionReason> {
        match self {
            Self::Compliant => None,
            Self::Rejected { reason } => Some(reason),
        }
    }

    pub fn into_result(self) -> Result<(), RejectionReason> {
        self.rejection().map_or(Ok(()), Err)
    }
}

/// Message length in UTF-16 code units, the unit carriers bill by.
pub fn message_length(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Classify `text`, reporting only the first failing rule.
///
/// Rules run in a fixed order: links, then phone numbers, then length.
pub fn validate(text: &str) -> ValidationResult {
    let reason = if contains_hyperlink(text) {
        RejectionReason::HyperlinkDetected
    } else if contains_phone_number(text) {
        RejectionReason::PhoneNumberDetected
    } else if message_length(text) > MAX_MESSAGE_CHARS {
        RejectionReason::TooLong
    } else {
        return ValidationResult::Compliant;
    };

    ValidationResult::Rejected { reason }
}
