//! Single-table message persistence.
//!
//! The current persistence protocol: one row per ingested message, with
//! a uniqueness constraint on the source identifier so the dedup lookup
//! has a backstop.

mod model;
mod repository;

pub use model::StoredMessage;
pub use repository::MessageRepository;
