mod core;
mod database;
mod gateway;
mod provider;

pub use core::Config;
pub use database::DatabaseConfig;
pub use gateway::GatewayConfig;
pub use provider::{ProviderConfig, ProviderKind, TelnyxConfig, TwilioConfig};
