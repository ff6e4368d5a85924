//! Deployment settings.
//!
//! Configuration loading itself (files, environment) belongs to the
//! embedding application; this module only defines the typed settings
//! the core consumes and their validation.

mod model;
mod validation;

pub use model::{DuplicatePolicy, Security, Settings, SourceConfig, StoreMode};
pub use validation::{ValidationError, ValidationResult, validate_source_config};
