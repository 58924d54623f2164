use super::Config;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::Path;

fn presence(value: Option<&String>) -> &'static str {
    if value.is_some_and(|v| !v.is_empty()) {
        "Set"
    } else {
        "Not set"
    }
}

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Self::load_or_init_in(&home.join(".mansite"))
    }

    /// Load `config.toml` from `data_dir`, writing defaults on first run.
    ///
    /// Environment overrides are applied after the file is read and are never
    /// written back.
    pub fn load_or_init_in(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join("config.toml");

        if !data_dir.exists() {
            fs::create_dir_all(data_dir).context("Failed to create .mansite directory")?;
        }

        let mut config = if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            config.config_path.clone_from(&config_path);
            config.data_dir = data_dir.to_path_buf();
            config
        } else {
            let config = Self {
                config_path: config_path.clone(),
                data_dir: data_dir.to_path_buf(),
                ..Self::default()
            };
            config.save()?;
            config
        };

        config.apply_env_overrides();
        config.validate()?;
        config.log_secret_presence();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }

    /// Log which credentials are configured, never their values.
    pub fn log_secret_presence(&self) {
        let telnyx = &self.provider.telnyx;
        let twilio = &self.provider.twilio;
        let database = if self.database.url.is_some() {
            "configured"
        } else {
            "default"
        };
        tracing::info!(
            provider = %self.provider.kind,
            database,
            telnyx_api_key = presence(telnyx.api_key.as_ref()),
            telnyx_from_number = presence(telnyx.from_number.as_ref()),
            twilio_account_sid = presence(twilio.account_sid.as_ref()),
            twilio_auth_token = presence(twilio.auth_token.as_ref()),
            twilio_from_number = presence(twilio.from_number.as_ref()),
            "configuration loaded"
        );
    }
}
