use super::Config;
use crate::config::ProviderKind;

/// First non-empty value among `keys`.
fn first_env(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| std::env::var(key).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn override_option(slot: &mut Option<String>, keys: &[&str]) {
    if let Some(value) = first_env(keys) {
        *slot = Some(value);
    }
}

impl Config {
    /// Apply `MANSITE_*` variables and the provider-native variable names.
    pub fn apply_env_overrides(&mut self) {
        if let Some(kind) = first_env(&["MANSITE_PROVIDER", "MESSAGING_PROVIDER"]) {
            match kind.parse::<ProviderKind>() {
                Ok(kind) => self.provider.kind = kind,
                Err(_) => tracing::warn!(value = %kind, "ignoring unknown messaging provider"),
            }
        }

        let telnyx = &mut self.provider.telnyx;
        override_option(&mut telnyx.api_key, &["TELNYX_API_KEY"]);
        override_option(&mut telnyx.from_number, &["TELNYX_PHONE_NUMBER"]);
        override_option(
            &mut telnyx.messaging_profile_id,
            &["TELNYX_MESSAGING_PROFILE_ID"],
        );

        let twilio = &mut self.provider.twilio;
        override_option(&mut twilio.account_sid, &["TWILIO_ACCOUNT_SID"]);
        override_option(&mut twilio.auth_token, &["TWILIO_AUTH_TOKEN"]);
        override_option(&mut twilio.from_number, &["TWILIO_PHONE_NUMBER"]);

        override_option(
            &mut self.database.url,
            &["MANSITE_DATABASE_URL", "DATABASE_URL"],
        );

        if let Some(port_str) = first_env(&["MANSITE_GATEWAY_PORT", "PORT"])
            && let Ok(port) = port_str.parse::<u16>()
        {
            self.gateway.port = port;
        }

        if let Some(host) = first_env(&["MANSITE_GATEWAY_HOST", "HOST"]) {
            self.gateway.host = host;
        }
    }
}
