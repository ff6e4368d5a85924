//! Legacy two-table storage repository.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::debug;

use super::model::{Inquiry, ReplyTicket};
use crate::source::FetchedMessage;
use crate::store::{MessageStore, StoreError};

/// Repository for the legacy inquiry/reply-ticket table pair.
#[derive(Debug)]
pub struct LegacyRepository {
    pool: SqlitePool,
}

impl LegacyRepository {
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
    ///
    /// Neither table has a source-identifier column; that is what makes
    /// this protocol unable to deduplicate.
    async fn initialize(&self) -> Result<(), StoreError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS inquiries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                sender_name TEXT NOT NULL DEFAULT '',
                sender_email TEXT NOT NULL DEFAULT '',
                subject TEXT NOT NULL DEFAULT '',
                body TEXT NOT NULL DEFAULT '',
                received_at TEXT NOT NULL,
                disposition INTEGER NOT NULL,
                routed_to TEXT NOT NULL DEFAULT '',
                category TEXT NOT NULL DEFAULT ''
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS reply_tickets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                inquiry_id INTEGER NOT NULL REFERENCES inquiries(id),
                sender_email TEXT NOT NULL DEFAULT '',
                sender_name TEXT NOT NULL DEFAULT '',
                subject TEXT NOT NULL DEFAULT '',
                body TEXT NOT NULL DEFAULT '',
                sent_at TEXT NOT NULL,
                status INTEGER NOT NULL,
                handler TEXT NOT NULL DEFAULT '',
                attachment_name TEXT NOT NULL DEFAULT '',
                attachment_display_name TEXT NOT NULL DEFAULT '',
                attachment_size TEXT NOT NULL DEFAULT '0',
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Persist one message as an inquiry plus a linked reply ticket,
    /// returning the inquiry's generated id.
    ///
    /// Both rows are written inside a single transaction: the inquiry
    /// first, because the ticket needs its generated id, so the two
    /// inserts cannot be reordered or batched. If the ticket insert
    /// fails, the transaction rolls back and the inquiry row never
    /// becomes visible.
    ///
    /// # Errors
    ///
    /// Returns an error if either insert or the commit fails.
    pub async fn insert_linked(&self, message: &FetchedMessage) -> Result<i64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let inquiry = Inquiry::from_fetched(message);
        let result = sqlx::query(
            r"
            INSERT INTO inquiries
                (sender_name, sender_email, subject, body, received_at,
                 disposition, routed_to, category)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&inquiry.sender_name)
        .bind(&inquiry.sender_email)
        .bind(&inquiry.subject)
        .bind(&inquiry.body)
        .bind(inquiry.received_at.to_rfc3339())
        .bind(inquiry.disposition.code())
        .bind(&inquiry.routed_to)
        .bind(&inquiry.category)
        .execute(&mut *tx)
        .await?;

        let inquiry_id = result.last_insert_rowid();

        let ticket = ReplyTicket::for_inquiry(message, inquiry_id);
        sqlx::query(
            r"
            INSERT INTO reply_tickets
                (inquiry_id, sender_email, sender_name, subject, body, sent_at,
                 status, handler, attachment_name, attachment_display_name,
                 attachment_size, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(ticket.inquiry_id)
        .bind(&ticket.sender_email)
        .bind(&ticket.sender_name)
        .bind(&ticket.subject)
        .bind(&ticket.body)
        .bind(ticket.sent_at.to_rfc3339())
        .bind(ticket.status.code())
        .bind(&ticket.handler)
        .bind(&ticket.attachment_name)
        .bind(&ticket.attachment_display_name)
        .bind(&ticket.attachment_size)
        .bind(ticket.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!(inquiry_id, "persisted linked inquiry and reply ticket");

        Ok(inquiry_id)
    }
}

#[async_trait]
impl MessageStore for LegacyRepository {
    /// The legacy tables keep no source identifiers, so there is no
    /// window to deduplicate against.
    async fn dedup_window(&self) -> Result<Option<HashSet<String>>, StoreError> {
        Ok(None)
    }

    async fn persist(&self, message: &FetchedMessage) -> Result<i64, StoreError> {
        self.insert_linked(message).await
    }
}
