//! # mailkeep-core
//!
//! Mailbox ingestion pipeline for `MailKeep`.
//!
//! This crate provides:
//! - The [`MailSource`] contract an adapter implements to list a remote
//!   mailbox (POP3, IMAP, a test fake — the wire protocol lives outside
//!   this crate)
//! - Durable persistence of fetched messages, either into a single
//!   uidl-deduplicated table or into the legacy inquiry/reply-ticket
//!   table pair
//! - The ingestion orchestrator that ties the two together for one pass:
//!   fetch, deduplicate, persist, aggregate the outcome

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
pub mod ingest;
pub mod legacy;
pub mod message;
pub mod settings;
pub mod source;
pub mod store;

pub use error::{Error, Result};
pub use ingest::{IngestFailure, IngestReport, run_ingestion};
pub use legacy::{Disposition, Inquiry, LegacyRepository, ReplyTicket, TicketStatus};
pub use message::{MessageRepository, StoredMessage};
pub use settings::{
    DuplicatePolicy, Security, Settings, SourceConfig, StoreMode, ValidationError,
    ValidationResult, validate_source_config,
};
pub use source::{FetchedMessage, MailSource, SourceError};
pub use store::{MessageStore, Store, StoreError};
