use super::http_client::build_provider_client;
use super::scrub::api_error;
use super::traits::{SendFuture, SendReceipt, SmsProvider};
use crate::error::ProviderError;
use serde::Deserialize;

const NAME: &str = "telnyx";

/// Telnyx Messaging API v2 (`POST /v2/messages`).
pub struct TelnyxProvider {
    api_key: String,
    from_number: String,
    messaging_profile_id: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct MessageEnvelope {
    data: MessageData,
}

#[derive(Debug, Deserialize)]
struct MessageData {
    id: String,
    #[serde(default)]
    to: Vec<Recipient>,
}

#[derive(Debug, Deserialize)]
struct Recipient {
    #[serde(default)]
    status: String,
}

impl TelnyxProvider {
    pub fn new(
        api_key: String,
        from_number: String,
        messaging_profile_id: Option<String>,
        base_url: &str,
    ) -> Self {
        Self {
            api_key,
            from_number,
            messaging_profile_id,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_provider_client(),
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/v2/messages", self.base_url)
    }

    fn request_body(&self, to: &str, text: &str) -> serde_json::Value {
        let mut body = serde_json::json!({
            "from": self.from_number,
            "to": to,
            "text": text,
        });
        if let Some(profile) = &self.messaging_profile_id {
            body["messaging_profile_id"] = serde_json::Value::String(profile.clone());
        }
        body
    }

    async fn send_message(&self, to: &str, text: &str) -> Result<SendReceipt, ProviderError> {
        let resp = self
            .client
            .post(self.messages_url())
            .bearer_auth(&self.api_key)
            .json(&self.request_body(to, text))
            .send()
            .await
            .map_err(|e| ProviderError::Request {
                provider: NAME,
                message: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(api_error(NAME, resp).await);
        }

        let envelope: MessageEnvelope =
            resp.json()
                .await
                .map_err(|e| ProviderError::InvalidResponse {
                    provider: NAME,
                    message: e.to_string(),
                })?;

        // Telnyx reports per-recipient status; a single `to` means one entry.
        let status = envelope
            .data
            .to
            .first()
            .map(|r| r.status.clone())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "unknown".to_string());

        if status != "queued" {
            return Err(ProviderError::NotQueued {
                provider: NAME,
                status,
            });
        }

        Ok(SendReceipt {
            message_id: envelope.data.id,
            status,
        })
    }
}

impl SmsProvider for TelnyxProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn from_number(&self) -> &str {
        &self.from_number
    }

    fn send<'a>(&'a self, to: &'a str, text: &'a str) -> SendFuture<'a> {
        Box::pin(self.send_message(to, text))
    }
}
