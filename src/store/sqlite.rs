use super::types::{MessageRecord, MessageStatus, NewMessage};
use super::{MessageStore, StoreFuture};
use crate::error::StoreError;
use chrono::{SecondsFormat, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use std::str::FromStr;
use uuid::Uuid;

const SELECT_COLUMNS: &str = "SELECT id, phone_number, message, ip_address, user_agent, status,
        segment_count, provider, provider_message_id, created_at, updated_at
 FROM messages";

/// SQLite-backed message log using sqlx async pool.
pub struct SqliteMessageStore {
    pool: SqlitePool,
}

impl SqliteMessageStore {
    /// Open `url`, creating the database file if it does not exist.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;
        Self::new(pool).await
    }

    /// Create a new store with an existing pool and create the schema.
    pub async fn new(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS messages (
                 id TEXT PRIMARY KEY,
                 phone_number TEXT NOT NULL,
                 message TEXT NOT NULL,
                 ip_address TEXT NOT NULL,
                 user_agent TEXT NOT NULL,
                 status TEXT NOT NULL DEFAULT 'pending',
                 segment_count INTEGER NOT NULL,
                 provider TEXT NOT NULL,
                 provider_message_id TEXT,
                 created_at TEXT NOT NULL,
                 updated_at TEXT NOT NULL
             )",
        )
        .execute(&pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_messages_created_at ON messages(created_at)")
            .execute(&pool)
            .await?;

        Ok(Self { pool })
    }
}

// Fixed width so lexical order matches time order.
fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn map_message_row(row: &SqliteRow) -> Result<MessageRecord, StoreError> {
    let status_raw: String = row.try_get("status")?;
    let status = MessageStatus::from_str(&status_raw)
        .map_err(|e| {
            sqlx::Error::Decode(format!("unknown status {status_raw}: {e:?}").into())
        })?;
    let segment_count: i64 = row.try_get("segment_count")?;

    Ok(MessageRecord {
        id: row.try_get("id")?,
        phone_number: row.try_get("phone_number")?,
        message: row.try_get("message")?,
        ip_address: row.try_get("ip_address")?,
        user_agent: row.try_get("user_agent")?,
        status,
        segment_count: usize::try_from(segment_count).unwrap_or_default(),
        provider: row.try_get("provider")?,
        provider_message_id: row.try_get("provider_message_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl MessageStore for SqliteMessageStore {
    fn insert_pending(&self, message: NewMessage) -> StoreFuture<'_, MessageRecord> {
        Box::pin(async move {
            let id = Uuid::new_v4().to_string();
            let timestamp = now();
            let status = MessageStatus::Pending;
            let segment_count = i64::try_from(message.segment_count).unwrap_or(i64::MAX);

            sqlx::query(
                "INSERT INTO messages (id, phone_number, message, ip_address, user_agent, status,
                                       segment_count, provider, provider_message_id, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NULL, $9, $9)",
            )
            .bind(&id)
            .bind(&message.phone_number)
            .bind(&message.message)
            .bind(&message.ip_address)
            .bind(&message.user_agent)
            .bind(<&'static str>::from(status))
            .bind(segment_count)
            .bind(&message.provider)
            .bind(&timestamp)
            .execute(&self.pool)
            .await?;

            Ok(MessageRecord {
                id,
                phone_number: message.phone_number,
                message: message.message,
                ip_address: message.ip_address,
                user_agent: message.user_agent,
                status,
                segment_count: message.segment_count,
                provider: message.provider,
                provider_message_id: None,
                created_at: timestamp.clone(),
                updated_at: timestamp,
            })
        })
    }

    fn update_status<'a>(
        &'a self,
        id: &'a str,
        status: MessageStatus,
        provider_message_id: Option<&'a str>,
    ) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let timestamp = now();
            // Keep an earlier provider id when the update carries none.
            let result = sqlx::query(
                "UPDATE messages
                 SET status = $1,
                     provider_message_id = COALESCE($2, provider_message_id),
                     updated_at = $3
                 WHERE id = $4",
            )
            .bind(<&'static str>::from(status))
            .bind(provider_message_id)
            .bind(&timestamp)
            .bind(id)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound(id.to_string()));
            }
            Ok(())
        })
    }

    fn get<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<MessageRecord>> {
        Box::pin(async move {
            let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

            row.map(|r| map_message_row(&r)).transpose()
        })
    }

    fn list_recent(&self, limit: usize) -> StoreFuture<'_, Vec<MessageRecord>> {
        Box::pin(async move {
            let limit = i64::try_from(limit).unwrap_or(i64::MAX);
            let rows = sqlx::query(&format!(
                "{SELECT_COLUMNS} ORDER BY created_at DESC, rowid DESC LIMIT $1"
            ))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

            rows.iter().map(map_message_row).collect()
        })
    }
}
