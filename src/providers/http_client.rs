use reqwest::Client;
use std::time::Duration;

/// Provider calls happen inside a gateway request, so keep well under the
/// gateway's own timeout.
pub const PROVIDER_TIMEOUT_SECS: u64 = 20;

pub fn build_provider_client() -> Client {
    build_provider_client_with_timeout(PROVIDER_TIMEOUT_SECS)
}

pub fn build_provider_client_with_timeout(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .unwrap_or_else(|_| Client::new())
}
