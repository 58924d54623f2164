pub mod factory;
pub mod http_client;
pub mod scrub;
pub mod telnyx;
pub mod traits;
pub mod twilio;

pub use factory::create_provider;
#[allow(unused_imports)]
pub use scrub::{api_error, sanitize_api_error, scrub_secret_patterns};
pub use traits::{SendFuture, SendReceipt, SmsProvider};
