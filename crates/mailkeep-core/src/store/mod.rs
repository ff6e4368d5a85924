//! Persistence store contract and mode selection.
//!
//! The ingestion orchestrator only talks to [`MessageStore`]; which
//! write protocol sits behind it is decided once, when the store is
//! opened from settings.

use std::collections::HashSet;

use async_trait::async_trait;
use thiserror::Error;

use crate::legacy::LegacyRepository;
use crate::message::MessageRepository;
use crate::settings::{DuplicatePolicy, Settings, StoreMode};
use crate::source::FetchedMessage;
use crate::Error as CrateError;

/// Errors a persistence operation can report.
///
/// Unlike source errors these are isolated per message: the ingestion
/// loop records them and moves on.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write; the message was
    /// already persisted (possibly by a concurrent pass).
    #[error("duplicate message: {0}")]
    Duplicate(String),

    /// Any other database failure.
    #[error("store unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                return Self::Duplicate(db.message().to_string());
            }
        }
        Self::Unavailable(err)
    }
}

/// A write surface the ingestion orchestrator can persist messages to.
#[async_trait]
pub trait MessageStore {
    /// The set of already-persisted source identifiers, or `None` when
    /// the active protocol has no identifier column to deduplicate on.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup query fails.
    async fn dedup_window(&self) -> Result<Option<HashSet<String>>, StoreError>;

    /// Durably persist one message, returning the generated row id.
    ///
    /// Each call is its own atomic unit: on failure no partial rows of
    /// this message remain visible.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; already-committed messages
    /// from the same pass are unaffected.
    async fn persist(&self, message: &FetchedMessage) -> Result<i64, StoreError>;
}

/// A persistence store opened in exactly one of the two write protocols.
#[derive(Debug)]
pub enum Store {
    /// Single-table protocol with uidl deduplication.
    Single(MessageRepository),
    /// Legacy two-table protocol, duplicates allowed by explicit choice.
    Legacy(LegacyRepository),
}

impl Store {
    /// Open the store selected by the settings.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if the settings select the
    /// legacy protocol with [`DuplicatePolicy::Reject`], or a store
    /// error if the database cannot be opened.
    pub async fn open(settings: &Settings) -> crate::Result<Self> {
        match settings.store {
            StoreMode::Single => Ok(Self::Single(
                MessageRepository::new(&settings.database_path).await?,
            )),
            StoreMode::Legacy {
                duplicates: DuplicatePolicy::AllowReingestion,
            } => Ok(Self::Legacy(
                LegacyRepository::new(&settings.database_path).await?,
            )),
            StoreMode::Legacy {
                duplicates: DuplicatePolicy::Reject,
            } => Err(CrateError::Config(
                "legacy tables cannot deduplicate and the duplicate policy rejects re-ingestion"
                    .to_string(),
            )),
        }
    }
}

#[async_trait]
impl MessageStore for Store {
    async fn dedup_window(&self) -> Result<Option<HashSet<String>>, StoreError> {
        match self {
            Self::Single(repo) => repo.dedup_window().await,
            Self::Legacy(repo) => repo.dedup_window().await,
        }
    }

    async fn persist(&self, message: &FetchedMessage) -> Result<i64, StoreError> {
        match self {
            Self::Single(repo) => repo.persist(message).await,
            Self::Legacy(repo) => repo.persist(message).await,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::settings::SourceConfig;

    fn settings(store: StoreMode) -> Settings {
        Settings {
            database_path: ":memory:".to_string(),
            source: SourceConfig::default(),
            store,
        }
    }

    #[tokio::test]
    async fn test_open_single_supports_dedup() {
        let store = Store::open(&settings(StoreMode::Single)).await.unwrap();
        assert!(matches!(store, Store::Single(_)));

        let window = store.dedup_window().await.unwrap();
        assert_eq!(window, Some(HashSet::new()));
    }

    #[tokio::test]
    async fn test_open_legacy_has_no_dedup_window() {
        let store = Store::open(&settings(StoreMode::Legacy {
            duplicates: DuplicatePolicy::AllowReingestion,
        }))
        .await
        .unwrap();

        assert!(store.dedup_window().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_open_legacy_reject_policy_refuses() {
        let err = Store::open(&settings(StoreMode::Legacy {
            duplicates: DuplicatePolicy::Reject,
        }))
        .await
        .unwrap_err();

        assert!(matches!(err, CrateError::Config(_)));
    }
}
