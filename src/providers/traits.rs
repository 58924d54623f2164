use crate::error::ProviderError;
use std::future::Future;
use std::pin::Pin;

/// Provider acknowledgement for one submitted segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    /// Provider-assigned message identifier
    pub message_id: String,
    /// Provider status at submission time (e.g. `queued`)
    pub status: String,
}

pub type SendFuture<'a> =
    Pin<Box<dyn Future<Output = Result<SendReceipt, ProviderError>> + Send + 'a>>;

/// Outbound SMS transport. Implement for any messaging provider.
pub trait SmsProvider: Send + Sync {
    /// Short provider name used in logs and stored records
    fn name(&self) -> &'static str;

    /// Number messages are sent from
    fn from_number(&self) -> &str;

    /// Submit one segment to `to`
    fn send<'a>(&'a self, to: &'a str, text: &'a str) -> SendFuture<'a>;
}
