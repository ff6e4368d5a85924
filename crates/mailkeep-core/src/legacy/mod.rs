//! Legacy two-table message persistence.
//!
//! Some deployments still record each ingested message as an inquiry
//! row plus a linked reply-ticket row, the shape the downstream
//! reply-handling system expects. The two rows are written inside one
//! transaction, parent first, because the child references the parent's
//! generated id.
//!
//! The legacy tables carry no source identifier column, so this protocol
//! cannot deduplicate. See [`crate::settings::DuplicatePolicy`].

mod model;
mod repository;

pub use model::{Disposition, Inquiry, ReplyTicket, TicketStatus};
pub use repository::LegacyRepository;
