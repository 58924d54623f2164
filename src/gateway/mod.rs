//! Axum-based HTTP gateway for the send form.
//!
//! - Request body size limits (64KB max)
//! - Request timeouts (30s)
//! - CORS for the configured origins

mod handlers;
mod server;

pub use server::{run_gateway, run_gateway_with_listener};

use crate::relay::Relay;
use std::sync::Arc;

/// Maximum request body size (64KB)
pub const MAX_BODY_SIZE: usize = 65_536;
/// Request timeout (30s)
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
}

/// `POST /api/send-message` body
#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageBody {
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /api/validate` body
#[derive(Debug, Default, serde::Deserialize)]
pub struct ValidateBody {
    #[serde(default)]
    pub message: String,
}
