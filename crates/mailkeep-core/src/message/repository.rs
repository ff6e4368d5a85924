//! Message storage repository (single-table protocol).

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::debug;

use super::model::StoredMessage;
use crate::source::FetchedMessage;
use crate::store::{MessageStore, StoreError};

/// Repository for persisted messages.
#[derive(Debug)]
pub struct MessageRepository {
    pool: SqlitePool,
}

impl MessageRepository {
    /// Create a new repository with the given database path.
    ///
    /// Creates the database and tables if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn new(database_path: &str) -> Result<Self, StoreError> {
        let url = format!("sqlite:{database_path}?mode=rwc");
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        let repo = Self { pool };
        repo.initialize().await?;
        Ok(repo)
    }

    /// Create an in-memory repository for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let repo = Self { pool };
        repo.initialize().await?;
        Ok(repo)
    }

    /// Initialize database schema.
    async fn initialize(&self) -> Result<(), StoreError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                uidl TEXT NOT NULL UNIQUE,
                subject TEXT NOT NULL DEFAULT '',
                body TEXT NOT NULL DEFAULT '',
                from_address TEXT NOT NULL DEFAULT '',
                to_address TEXT NOT NULL DEFAULT '',
                received_at TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // Index for the received-timestamp ordering used by list_all
        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_messages_received_at ON messages(received_at)
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Persist a single message and return its generated row id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] if a row with the same uidl
    /// already exists, or [`StoreError::Unavailable`] for any other
    /// database failure.
    pub async fn insert(&self, message: &StoredMessage) -> Result<i64, StoreError> {
        let result = sqlx::query(
            r"
            INSERT INTO messages
                (uidl, subject, body, from_address, to_address, received_at, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&message.uidl)
        .bind(&message.subject)
        .bind(&message.body)
        .bind(&message.from)
        .bind(&message.to)
        .bind(message.received_at.to_rfc3339())
        .bind(message.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Persist a batch of messages in one all-or-nothing transaction.
    ///
    /// If any insert fails, the transaction is rolled back and no row of
    /// the batch becomes visible.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert in the batch fails.
    pub async fn insert_many(&self, messages: &[StoredMessage]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        for message in messages {
            sqlx::query(
                r"
                INSERT INTO messages
                    (uidl, subject, body, from_address, to_address, received_at, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                ",
            )
            .bind(&message.uidl)
            .bind(&message.subject)
            .bind(&message.body)
            .bind(&message.from)
            .bind(&message.to)
            .bind(message.received_at.to_rfc3339())
            .bind(message.created_at.to_rfc3339())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Return every uidl that has already been persisted.
    ///
    /// This is the dedup window consulted before inserting new messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn known_uidls(&self) -> Result<HashSet<String>, StoreError> {
        let rows = sqlx::query(r"SELECT uidl FROM messages")
            .fetch_all(&self.pool)
            .await?;

        let uidls: HashSet<String> = rows.iter().map(|row| row.get("uidl")).collect();
        debug!(count = uidls.len(), "loaded dedup window");

        Ok(uidls)
    }

    /// List all persisted messages, newest received first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<StoredMessage>, StoreError> {
        let rows = sqlx::query(
            r"
            SELECT id, uidl, subject, body, from_address, to_address, received_at, created_at
            FROM messages
            ORDER BY received_at DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        let messages = rows
            .iter()
            .filter_map(|row| {
                let received_at_str: String = row.get("received_at");
                let created_at_str: String = row.get("created_at");

                let received_at = DateTime::parse_from_rfc3339(&received_at_str)
                    .ok()?
                    .with_timezone(&Utc);
                let created_at = DateTime::parse_from_rfc3339(&created_at_str)
                    .ok()?
                    .with_timezone(&Utc);

                Some(StoredMessage {
                    id: Some(row.get::<i64, _>("id")),
                    uidl: row.get("uidl"),
                    subject: row.get("subject"),
                    body: row.get("body"),
                    from: row.get("from_address"),
                    to: row.get("to_address"),
                    received_at,
                    created_at,
                })
            })
            .collect();

        Ok(messages)
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    async fn dedup_window(&self) -> Result<Option<HashSet<String>>, StoreError> {
        Ok(Some(self.known_uidls().await?))
    }

    async fn persist(&self, message: &FetchedMessage) -> Result<i64, StoreError> {
        self.insert(&StoredMessage::from_fetched(message)).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn stored(uidl: &str, received_at: DateTime<Utc>) -> StoredMessage {
        StoredMessage {
            id: None,
            uidl: uidl.to_string(),
            subject: format!("Subject {uidl}"),
            body: "Body".to_string(),
            from: "sender@example.com".to_string(),
            to: "inbox@example.com".to_string(),
            received_at,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_newest_first() {
        let repo = MessageRepository::in_memory().await.unwrap();
        let now = Utc::now();

        repo.insert(&stored("old", now - Duration::hours(2)))
            .await
            .unwrap();
        repo.insert(&stored("new", now)).await.unwrap();
        repo.insert(&stored("mid", now - Duration::hours(1)))
            .await
            .unwrap();

        let messages = repo.list_all().await.unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].uidl, "new");
        assert_eq!(messages[1].uidl, "mid");
        assert_eq!(messages[2].uidl, "old");
        assert!(messages[0].id.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_uidl_is_rejected() {
        let repo = MessageRepository::in_memory().await.unwrap();
        let now = Utc::now();

        repo.insert(&stored("uidl-1", now)).await.unwrap();
        let err = repo.insert(&stored("uidl-1", now)).await.unwrap_err();

        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_known_uidls() {
        let repo = MessageRepository::in_memory().await.unwrap();
        let now = Utc::now();

        assert!(repo.known_uidls().await.unwrap().is_empty());

        repo.insert(&stored("a", now)).await.unwrap();
        repo.insert(&stored("b", now)).await.unwrap();

        let known = repo.known_uidls().await.unwrap();
        assert_eq!(known.len(), 2);
        assert!(known.contains("a"));
        assert!(known.contains("b"));
    }

    #[tokio::test]
    async fn test_insert_many_is_all_or_nothing() {
        let repo = MessageRepository::in_memory().await.unwrap();
        let now = Utc::now();

        repo.insert(&stored("existing", now)).await.unwrap();

        // "existing" collides, so the whole batch must roll back
        let batch = vec![stored("fresh", now), stored("existing", now)];
        let err = repo.insert_many(&batch).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));

        let messages = repo.list_all().await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].uidl, "existing");
    }

    #[tokio::test]
    async fn test_insert_many_commits_clean_batch() {
        let repo = MessageRepository::in_memory().await.unwrap();
        let now = Utc::now();

        let batch = vec![stored("a", now), stored("b", now), stored("c", now)];
        repo.insert_many(&batch).await.unwrap();

        assert_eq!(repo.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_dedup_window_reflects_rows() {
        let repo = MessageRepository::in_memory().await.unwrap();
        repo.insert(&stored("seen", Utc::now())).await.unwrap();

        let window = repo.dedup_window().await.unwrap();
        let window = window.unwrap();
        assert!(window.contains("seen"));
        assert!(!window.contains("unseen"));
    }
}
