//! Mail source contract.
//!
//! This module defines the seam between the ingestion pipeline and
//! whatever actually talks to the remote mailbox. An adapter implements
//! [`MailSource`]; the orchestrator never sees protocol details.

mod adapter;
mod model;

pub use adapter::{MailSource, SourceError};
pub use model::FetchedMessage;
