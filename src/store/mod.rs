pub mod sqlite;
pub mod types;

use crate::error::StoreError;
use std::future::Future;
use std::pin::Pin;

pub use sqlite::SqliteMessageStore;
pub use types::{MessageRecord, MessageStatus, NewMessage};

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Async persistence contract for the outbound message log.
pub trait MessageStore: Send + Sync {
    /// Log a send attempt with status `pending`.
    fn insert_pending(&self, message: NewMessage) -> StoreFuture<'_, MessageRecord>;

    /// Move a record to `status`. Errors with `NotFound` for an unknown id.
    fn update_status<'a>(
        &'a self,
        id: &'a str,
        status: MessageStatus,
        provider_message_id: Option<&'a str>,
    ) -> StoreFuture<'a, ()>;

    fn get<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<MessageRecord>>;

    /// Newest first.
    fn list_recent(&self, limit: usize) -> StoreFuture<'_, Vec<MessageRecord>>;
}
