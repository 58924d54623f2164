use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderKind {
    #[default]
    Telnyx,
    Twilio,
}

/// Which SMS provider to use and its credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub kind: ProviderKind,
    #[serde(default)]
    pub telnyx: TelnyxConfig,
    #[serde(default)]
    pub twilio: TwilioConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelnyxConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    /// Sending number in E.164 format
    #[serde(default)]
    pub from_number: Option<String>,
    #[serde(default)]
    pub messaging_profile_id: Option<String>,
    #[serde(default = "default_telnyx_base_url")]
    pub api_base_url: String,
}

fn default_telnyx_base_url() -> String {
    "https://api.telnyx.com".into()
}

impl Default for TelnyxConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            from_number: None,
            messaging_profile_id: None,
            api_base_url: default_telnyx_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwilioConfig {
    #[serde(default)]
    pub account_sid: Option<String>,
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Sending number in E.164 format
    #[serde(default)]
    pub from_number: Option<String>,
    #[serde(default = "default_twilio_base_url")]
    pub api_base_url: String,
}

fn default_twilio_base_url() -> String {
    "https://api.twilio.com".into()
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: None,
            auth_token: None,
            from_number: None,
            api_base_url: default_twilio_base_url(),
        }
    }
}
