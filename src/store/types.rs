use serde::{Deserialize, Serialize};

/// Delivery status of a logged message.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MessageStatus {
    Pending,
    Queued,
    Sent,
    Failed,
}

/// Fields supplied by the caller when logging a new send attempt.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub phone_number: String,
    pub message: String,
    pub ip_address: String,
    pub user_agent: String,
    pub segment_count: usize,
    pub provider: String,
}

/// One row of the `messages` log table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRecord {
    pub id: String,
    pub phone_number: String,
    pub message: String,
    pub ip_address: String,
    pub user_agent: String,
    pub status: MessageStatus,
    pub segment_count: usize,
    pub provider: String,
    pub provider_message_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
