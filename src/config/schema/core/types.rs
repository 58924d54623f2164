use super::super::{DatabaseConfig, GatewayConfig, ProviderConfig};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding config.toml and the default database - not serialized
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub provider: ProviderConfig,
}

impl Config {
    pub fn database_url(&self) -> String {
        self.database.resolve_url(&self.data_dir)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.host.trim().is_empty() {
            return Err(ConfigError::Validation("gateway.host must not be empty".into()));
        }

        if self.gateway.cors_origins.iter().any(|o| o.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "gateway.cors_origins must not contain empty entries".into(),
            ));
        }

        for (name, url) in [
            ("provider.telnyx.api_base_url", &self.provider.telnyx.api_base_url),
            ("provider.twilio.api_base_url", &self.provider.twilio.api_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be an http(s) URL, got {url:?}"
                )));
            }
        }

        Ok(())
    }
}
