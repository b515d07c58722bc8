//! Error types.
//!
//! [`SchemaError`]/[`SchemaErrors`] describe why a validator rejected a value.
//! [`NormalizeError`] is the one failure a normalizer lets escape to its
//! caller, and [`ConfigError`] covers malformed normalizer options.

mod normalize_error;
mod schema_error;

pub use normalize_error::{ConfigError, NormalizeError};
pub use schema_error::{SchemaError, SchemaErrors};
