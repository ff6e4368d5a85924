//! Fetched message model.

use chrono::{DateTime, Utc};

/// A message as returned by a mail source, before persistence.
///
/// Lives in memory for the duration of one ingestion pass only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedMessage {
    /// Stable unique identifier assigned by the mail source (UIDL).
    pub uidl: String,
    /// Message subject.
    pub subject: String,
    /// Message body (plain text preferred, HTML as fallback).
    pub body: String,
    /// Sender address, possibly with a display name ("Name <addr>").
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// When the message was received by the mailbox.
    pub received_at: DateTime<Utc>,
}

impl FetchedMessage {
    /// Returns the sender's display name, falling back to the address.
    ///
    /// For `"Jane Doe <jane@example.com>"` this is `"Jane Doe"`; for a
    /// bare address it is the address itself.
    #[must_use]
    pub fn sender_name(&self) -> &str {
        match self.from.split_once('<') {
            Some((name, _)) if !name.trim().is_empty() => name.trim(),
            _ => self.from.trim(),
        }
    }

    /// Returns the sender's bare address.
    ///
    /// For `"Jane Doe <jane@example.com>"` this is `"jane@example.com"`.
    #[must_use]
    pub fn sender_address(&self) -> &str {
        match self.from.split_once('<') {
            Some((_, rest)) => rest.trim_end().trim_end_matches('>'),
            None => self.from.trim(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_from(from: &str) -> FetchedMessage {
        FetchedMessage {
            uidl: "uidl-1".to_string(),
            subject: String::new(),
            body: String::new(),
            from: from.to_string(),
            to: "inbox@example.com".to_string(),
            received_at: Utc::now(),
        }
    }

    #[test]
    fn test_sender_name_with_display_name() {
        let msg = message_from("Jane Doe <jane@example.com>");
        assert_eq!(msg.sender_name(), "Jane Doe");
        assert_eq!(msg.sender_address(), "jane@example.com");
    }

    #[test]
    fn test_sender_name_bare_address() {
        let msg = message_from("jane@example.com");
        assert_eq!(msg.sender_name(), "jane@example.com");
        assert_eq!(msg.sender_address(), "jane@example.com");
    }

    #[test]
    fn test_sender_name_empty_display_name() {
        let msg = message_from("<jane@example.com>");
        assert_eq!(msg.sender_name(), "<jane@example.com>");
        assert_eq!(msg.sender_address(), "jane@example.com");
    }
}
