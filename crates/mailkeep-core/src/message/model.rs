//! Stored message model.

use chrono::{DateTime, Utc};

use crate::source::FetchedMessage;

/// A message as persisted in the single-table protocol.
///
/// Rows are created once by ingestion and never mutated or deleted by
/// this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    /// Generated row id (`None` until persisted).
    pub id: Option<i64>,
    /// Stable unique identifier from the mail source. Unique per row.
    pub uidl: String,
    /// Message subject.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// When the message was received by the mailbox.
    pub received_at: DateTime<Utc>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

impl StoredMessage {
    /// Builds a storable record from a fetched message.
    #[must_use]
    pub fn from_fetched(message: &FetchedMessage) -> Self {
        Self {
            id: None,
            uidl: message.uidl.clone(),
            subject: message.subject.clone(),
            body: message.body.clone(),
            from: message.from.clone(),
            to: message.to.clone(),
            received_at: message.received_at,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fetched_copies_fields() {
        let fetched = FetchedMessage {
            uidl: "uidl-42".to_string(),
            subject: "Hello".to_string(),
            body: "Body text".to_string(),
            from: "sender@example.com".to_string(),
            to: "inbox@example.com".to_string(),
            received_at: Utc::now(),
        };

        let stored = StoredMessage::from_fetched(&fetched);
        assert_eq!(stored.id, None);
        assert_eq!(stored.uidl, "uidl-42");
        assert_eq!(stored.subject, "Hello");
        assert_eq!(stored.received_at, fetched.received_at);
        assert!(stored.created_at >= fetched.received_at);
    }
}
