//! Legacy inquiry and reply-ticket models.

use chrono::{DateTime, Utc};

use crate::source::FetchedMessage;

/// Routing target a fresh inquiry is addressed to.
const DEFAULT_ROUTING_TARGET: &str = "frontdesk";

/// Category tag applied to inquiries created by mail ingestion.
const DEFAULT_CATEGORY: &str = "general";

/// Disposition of an inquiry, stored as the legacy numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disposition {
    /// Handled by an operator (legacy code 1).
    Processed,
    /// Not yet looked at (legacy code 2).
    #[default]
    Unprocessed,
    /// Set aside for later (legacy code 3).
    Deferred,
}

impl Disposition {
    /// Legacy numeric code as stored in the database.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Processed => 1,
            Self::Unprocessed => 2,
            Self::Deferred => 3,
        }
    }

    /// Parse from the legacy numeric code; unknown codes map to
    /// `Unprocessed`.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Processed,
            3 => Self::Deferred,
            _ => Self::Unprocessed,
        }
    }
}

/// Processing status of a reply ticket, stored as the legacy numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TicketStatus {
    /// Soft-deleted (legacy code 0).
    Deleted,
    /// Waiting for an operator (legacy code 1).
    #[default]
    Pending,
    /// Closed (legacy code 2).
    Closed,
}

impl TicketStatus {
    /// Legacy numeric code as stored in the database.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Deleted => 0,
            Self::Pending => 1,
            Self::Closed => 2,
        }
    }

    /// Parse from the legacy numeric code; unknown codes map to `Pending`.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Deleted,
            2 => Self::Closed,
            _ => Self::Pending,
        }
    }
}

/// The parent row of the legacy pair: one inquiry per ingested message.
///
/// Created first in the transaction; its generated id is what the
/// reply ticket references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inquiry {
    /// Generated row id (`None` until persisted).
    pub id: Option<i64>,
    /// Sender display name.
    pub sender_name: String,
    /// Sender email address.
    pub sender_email: String,
    /// Message subject.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// When the message was received.
    pub received_at: DateTime<Utc>,
    /// Handling state of the inquiry.
    pub disposition: Disposition,
    /// Who the inquiry is routed to.
    pub routed_to: String,
    /// Category tag.
    pub category: String,
}

impl Inquiry {
    /// Builds a fresh, unprocessed inquiry from a fetched message.
    #[must_use]
    pub fn from_fetched(message: &FetchedMessage) -> Self {
        Self {
            id: None,
            sender_name: message.sender_name().to_string(),
            sender_email: message.sender_address().to_string(),
            subject: message.subject.clone(),
            body: message.body.clone(),
            received_at: message.received_at,
            disposition: Disposition::Unprocessed,
            routed_to: DEFAULT_ROUTING_TARGET.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

/// The child row of the legacy pair.
///
/// Must always reference an [`Inquiry`] row created in the same
/// transaction; an orphaned ticket is an invariant violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTicket {
    /// Generated row id (`None` until persisted).
    pub id: Option<i64>,
    /// Id of the parent inquiry row.
    pub inquiry_id: i64,
    /// Sender email address.
    pub sender_email: String,
    /// Sender display name.
    pub sender_name: String,
    /// Message subject.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// When the message was sent.
    pub sent_at: DateTime<Utc>,
    /// Processing status of the ticket.
    pub status: TicketStatus,
    /// Operator the ticket is assigned to (empty until assigned).
    pub handler: String,
    /// Stored attachment file name (empty when there is none).
    pub attachment_name: String,
    /// Attachment name as shown to operators.
    pub attachment_display_name: String,
    /// Attachment size; the legacy column is text, "0" when absent.
    pub attachment_size: String,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

impl ReplyTicket {
    /// Builds a pending ticket for a fetched message, linked to the
    /// inquiry row with the given id.
    #[must_use]
    pub fn for_inquiry(message: &FetchedMessage, inquiry_id: i64) -> Self {
        Self {
            id: None,
            inquiry_id,
            sender_email: message.sender_address().to_string(),
            sender_name: message.sender_name().to_string(),
            subject: message.subject.clone(),
            body: message.body.clone(),
            sent_at: message.received_at,
            status: TicketStatus::Pending,
            handler: String::new(),
            attachment_name: String::new(),
            attachment_display_name: String::new(),
            attachment_size: "0".to_string(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetched() -> FetchedMessage {
        FetchedMessage {
            uidl: "uidl-7".to_string(),
            subject: "Question".to_string(),
            body: "How do I...".to_string(),
            from: "Jane Doe <jane@example.com>".to_string(),
            to: "support@example.com".to_string(),
            received_at: Utc::now(),
        }
    }

    #[test]
    fn test_disposition_codes_round_trip() {
        for disposition in [
            Disposition::Processed,
            Disposition::Unprocessed,
            Disposition::Deferred,
        ] {
            assert_eq!(Disposition::from_code(disposition.code()), disposition);
        }
        assert_eq!(Disposition::from_code(99), Disposition::Unprocessed);
    }

    #[test]
    fn test_ticket_status_codes_round_trip() {
        for status in [
            TicketStatus::Deleted,
            TicketStatus::Pending,
            TicketStatus::Closed,
        ] {
            assert_eq!(TicketStatus::from_code(status.code()), status);
        }
        assert_eq!(TicketStatus::from_code(99), TicketStatus::Pending);
    }

    #[test]
    fn test_inquiry_defaults() {
        let inquiry = Inquiry::from_fetched(&fetched());
        assert_eq!(inquiry.id, None);
        assert_eq!(inquiry.sender_name, "Jane Doe");
        assert_eq!(inquiry.sender_email, "jane@example.com");
        assert_eq!(inquiry.disposition, Disposition::Unprocessed);
        assert_eq!(inquiry.routed_to, DEFAULT_ROUTING_TARGET);
    }

    #[test]
    fn test_ticket_defaults() {
        let ticket = ReplyTicket::for_inquiry(&fetched(), 42);
        assert_eq!(ticket.inquiry_id, 42);
        assert_eq!(ticket.status, TicketStatus::Pending);
        assert_eq!(ticket.attachment_size, "0");
        assert!(ticket.handler.is_empty());
    }
}
