//! Send pipeline shared by the HTTP gateway and the CLI.
//!
//! Validation runs before any I/O. Store failures are logged and never stop a
//! send; provider failures mark the record `failed` and are returned.

use crate::compliance::{self, ValidationResult};
use crate::config::Config;
use crate::error::RelayError;
use crate::providers::{self, SmsProvider};
use crate::segments::{self, Segment};
use crate::store::{MessageStatus, MessageStore, NewMessage, SqliteMessageStore};
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// A send request as received from a caller.
#[derive(Debug, Clone, Default)]
pub struct SendRequest {
    pub phone_number: String,
    pub message: String,
    pub ip_address: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOutcome {
    /// Provider id of the first segment
    pub message_id: String,
    /// `None` when the log insert failed
    pub record_id: Option<String>,
    /// Segments handed to the provider
    pub segments: usize,
}

/// Validation verdict plus segmentation for inline feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCheck {
    pub result: ValidationResult,
    pub length: usize,
    pub segment_count: usize,
    pub segments: Vec<Segment>,
}

pub struct Relay {
    provider: Arc<dyn SmsProvider>,
    store: Arc<dyn MessageStore>,
}

/// The message exactly as it is validated, split and sent.
fn outgoing(text: &str) -> &str {
    text.trim()
}

fn digest(text: &str) -> String {
    let full = hex::encode(Sha256::digest(text.as_bytes()));
    full[..12].to_string()
}

impl Relay {
    pub fn new(provider: Arc<dyn SmsProvider>, store: Arc<dyn MessageStore>) -> Self {
        Self { provider, store }
    }

    /// Build the configured provider and open the message log.
    pub async fn from_config(config: &Config) -> crate::error::Result<Self> {
        let provider = providers::create_provider(&config.provider)?;
        let store = SqliteMessageStore::connect(&config.database_url()).await?;
        Ok(Self::new(provider, Arc::new(store)))
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Run the validator and the splitter without sending anything.
    pub fn check(text: &str) -> MessageCheck {
        let text = outgoing(text);
        MessageCheck {
            result: compliance::validate(text),
            length: compliance::message_length(text),
            segment_count: segments::count(text),
            segments: segments::segments(text),
        }
    }

    pub async fn send(&self, request: SendRequest) -> Result<SendOutcome, RelayError> {
        let phone_number = request.phone_number.trim();
        let message = outgoing(&request.message);
        if phone_number.is_empty() || message.is_empty() {
            return Err(RelayError::MissingFields);
        }

        let digest = digest(message);
        if let Err(reason) = compliance::validate(message).into_result() {
            tracing::info!(
                digest_sha256 = %digest,
                reason = reason.code(),
                "message rejected by compliance rules"
            );
            return Err(reason.into());
        }

        let parts = segments::split(message);
        let segment_count = segments::count(message);

        let record_id = match self
            .store
            .insert_pending(NewMessage {
                phone_number: phone_number.to_string(),
                message: message.to_string(),
                ip_address: request.ip_address.clone(),
                user_agent: request.user_agent.clone(),
                segment_count,
                provider: self.provider.name().to_string(),
            })
            .await
        {
            Ok(record) => Some(record.id),
            Err(e) => {
                tracing::error!(digest_sha256 = %digest, "failed to log message: {e}");
                None
            }
        };

        tracing::info!(
            provider = self.provider.name(),
            from = self.provider.from_number(),
            digest_sha256 = %digest,
            segments = parts.len(),
            record_id = record_id.as_deref().unwrap_or("-"),
            "sending message"
        );

        let mut first_message_id = None;
        for (index, part) in parts.iter().enumerate() {
            match self.provider.send(phone_number, part).await {
                Ok(receipt) => {
                    tracing::debug!(
                        ordinal = index + 1,
                        message_id = %receipt.message_id,
                        status = %receipt.status,
                        "segment accepted"
                    );
                    first_message_id.get_or_insert(receipt.message_id);
                }
                Err(e) => {
                    tracing::error!(
                        provider = self.provider.name(),
                        ordinal = index + 1,
                        "send failed: {e}"
                    );
                    self.mark(record_id.as_deref(), MessageStatus::Failed, None)
                        .await;
                    return Err(e.into());
                }
            }
        }

        let message_id = first_message_id.unwrap_or_default();
        self.mark(
            record_id.as_deref(),
            MessageStatus::Queued,
            Some(&message_id),
        )
        .await;

        Ok(SendOutcome {
            message_id,
            record_id,
            segments: parts.len(),
        })
    }

    async fn mark(&self, record_id: Option<&str>, status: MessageStatus, message_id: Option<&str>) {
        let Some(id) = record_id else {
            return;
        };
        if let Err(e) = self.store.update_status(id, status, message_id).await {
            tracing::error!(record_id = id, %status, "failed to update message status: {e}");
        }
    }
}
