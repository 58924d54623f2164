use serde::{Deserialize, Serialize};
use std::path::Path;

/// Message log database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL; defaults to `messages.db` next to the config file
    #[serde(default)]
    pub url: Option<String>,
}

impl DatabaseConfig {
    pub fn resolve_url(&self, data_dir: &Path) -> String {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map_or_else(
                || format!("sqlite://{}", data_dir.join("messages.db").display()),
                ToOwned::to_owned,
            )
    }
}
