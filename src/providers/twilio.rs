use super::http_client::build_provider_client;
use super::scrub::api_error;
use super::traits::{SendFuture, SendReceipt, SmsProvider};
use crate::error::ProviderError;
use serde::Deserialize;

const NAME: &str = "twilio";

/// Twilio Programmable Messaging (`POST /2010-04-01/Accounts/{sid}/Messages.json`).
pub struct TwilioProvider {
    account_sid: String,
    auth_token: String,
    from_number: String,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
    #[serde(default)]
    status: String,
}

impl TwilioProvider {
    pub fn new(account_sid: String, auth_token: String, from_number: String, base_url: &str) -> Self {
        Self {
            account_sid,
            auth_token,
            from_number,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_provider_client(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        )
    }

    async fn send_message(&self, to: &str, text: &str) -> Result<SendReceipt, ProviderError> {
        let form = [
            ("To", to),
            ("From", self.from_number.as_str()),
            ("Body", text),
        ];

        let resp = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await
            .map_err(|e| ProviderError::Request {
                provider: NAME,
                message: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(api_error(NAME, resp).await);
        }

        let message: MessageResource =
            resp.json()
                .await
                .map_err(|e| ProviderError::InvalidResponse {
                    provider: NAME,
                    message: e.to_string(),
                })?;

        // Twilio accepts with `accepted`/`queued`; only terminal failures are errors here.
        if matches!(message.status.as_str(), "failed" | "undelivered") {
            return Err(ProviderError::NotQueued {
                provider: NAME,
                status: message.status,
            });
        }

        Ok(SendReceipt {
            message_id: message.sid,
            status: message.status,
        })
    }
}

impl SmsProvider for TwilioProvider {
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
