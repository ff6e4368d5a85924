//! Error types for the core library.

use thiserror::Error;

use crate::source::SourceError;
use crate::store::StoreError;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Fetching from the mail source failed; the ingestion pass was aborted.
    #[error("mail source error: {0}")]
    Source(#[from] SourceError),

    /// A persistence operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// An ingestion pass attempted messages but persisted none of them.
    ///
    /// Carries the first recorded per-message failure; the rest were
    /// logged as they occurred.
    #[error("no messages persisted; first failure on message {uidl}: {source}")]
    NothingPersisted {
        /// Identifier of the first message whose persistence failed.
        uidl: String,
        /// The underlying store failure.
        source: StoreError,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
