pub mod schema;

pub use schema::{
    Config, DatabaseConfig, GatewayConfig, ProviderConfig, ProviderKind, TelnyxConfig,
    TwilioConfig,
};
