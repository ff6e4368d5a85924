//! Mail source adapter contract.

use async_trait::async_trait;

use super::model::FetchedMessage;

/// Errors an adapter can report while fetching from the remote mailbox.
///
/// Both variants abort the whole ingestion pass; there is no per-message
/// recovery at the source level.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The mailbox could not be reached (connect, list, or read failure).
    #[error("mail source unavailable: {0}")]
    Unavailable(String),

    /// The mailbox rejected the configured credentials.
    #[error("mail source authentication failed: {0}")]
    Authentication(String),
}

/// A remote mailbox the ingestion pipeline can fetch from.
///
/// Implementations own the whole connection lifecycle per call:
/// connect, authenticate, list, fetch, disconnect. A call either returns
/// the complete set of available messages or an error — never a partial
/// result. Calls must be safe to repeat; fetching does not delete or
/// mark messages on the server.
#[async_trait]
pub trait MailSource {
    /// Fetches every message currently available in the mailbox.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the mailbox cannot be reached or the
    /// credentials are rejected.
    async fn fetch_all(&self) -> Result<Vec<FetchedMessage>, SourceError>;
}
