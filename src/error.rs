use crate::compliance::RejectionReason;
use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `Mansite`.
///
/// Library callers can match on these to decide how to answer the end user;
/// binaries and startup code continue to use `anyhow::Result` for context
/// chains.
#[derive(Debug, Error)]
pub enum MansiteError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── SMS provider ────────────────────────────────────────────────────
    #[error("provider: {0}")]
    Provider(#[from] ProviderError),

    // ── Message log ─────────────────────────────────────────────────────
    #[error("store: {0}")]
    Store(#[from] StoreError),

    // ── Send pipeline ───────────────────────────────────────────────────
    #[error("relay: {0}")]
    Relay(#[from] RelayError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{field} is required for the {provider} provider")]
    MissingCredential {
        provider: &'static str,
        field: &'static str,
    },
}

// ─── Provider errors ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} request failed: {message}")]
    Request {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} authentication failed")]
    Auth { provider: &'static str },

    #[error("{provider} did not queue the message (status: {status})")]
    NotQueued {
        provider: &'static str,
        status: String,
    },

    #[error("{provider} returned an unexpected response: {message}")]
    InvalidResponse {
        provider: &'static str,
        message: String,
    },
}

// ─── Store errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("sqlx: {0}")]
    Sqlx(#[from] sqlx::Error),
}

// ─── Relay errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Phone number and message are required")]
    MissingFields,

    #[error(transparent)]
    Rejected(#[from] RejectionReason),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, MansiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_correctly() {
        let err = MansiteError::Config(ConfigError::Validation("bad port".into()));
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn missing_credential_names_field() {
        let err = ConfigError::MissingCredential {
            provider: "telnyx",
            field: "TELNYX_API_KEY",
        };
        assert_eq!(
            err.to_string(),
            "TELNYX_API_KEY is required for the telnyx provider"
        );
    }

    #[test]
    fn not_queued_displays_status() {
        let err = MansiteError::Provider(ProviderError::NotQueued {
            provider: "telnyx",
            status: "sending_failed".into(),
        });
        assert!(err.to_string().contains("sending_failed"));
    }

    #[test]
    fn rejection_is_transparent() {
        let err = RelayError::from(RejectionReason::HyperlinkDetected);
        assert_eq!(err.to_string(), RejectionReason::HyperlinkDetected.to_string());
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let err: MansiteError = anyhow_err.into();
        assert!(err.to_string().contains("something went wrong"));
    }
}
