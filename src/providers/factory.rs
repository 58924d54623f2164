use super::telnyx::TelnyxProvider;
use super::traits::SmsProvider;
use super::twilio::TwilioProvider;
use crate::config::{ProviderConfig, ProviderKind};
use crate::error::ConfigError;
use std::sync::Arc;

/// Return a trimmed, non-empty credential or the error naming it.
fn required(
    value: Option<&str>,
    provider: &'static str,
    field: &'static str,
) -> Result<String, ConfigError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ConfigError::MissingCredential { provider, field })
}

/// Build the configured provider. Missing credentials fail here, at startup,
/// rather than on the first send.
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn SmsProvider>, ConfigError> {
    match config.kind {
        ProviderKind::Telnyx => {
            let telnyx = &config.telnyx;
            let api_key = required(telnyx.api_key.as_deref(), "telnyx", "TELNYX_API_KEY")?;
            let from_number = required(
                telnyx.from_number.as_deref(),
                "telnyx",
                "TELNYX_PHONE_NUMBER",
            )?;
            let profile = telnyx
                .messaging_profile_id
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string);
            Ok(Arc::new(TelnyxProvider::new(
                api_key,
                from_number,
                profile,
                &telnyx.api_base_url,
            )))
        }
        ProviderKind::Twilio => {
            let twilio = &config.twilio;
            let account_sid = required(
                twilio.account_sid.as_deref(),
                "twilio",
                "TWILIO_ACCOUNT_SID",
            )?;
            let auth_token =
                required(twilio.auth_token.as_deref(), "twilio", "TWILIO_AUTH_TOKEN")?;
            let from_number = required(
                twilio.from_number.as_deref(),
                "twilio",
                "TWILIO_PHONE_NUMBER",
            )?;
            Ok(Arc::new(TwilioProvider::new(
                account_sid,
                auth_token,
                from_number,
                &twilio.api_base_url,
            )))
        }
    }
}
