//! # Salvage
//!
//! Normalizing validators that produce a value instead of failing.
//!
//! ## Overview
//!
//! A normalizer wraps a [`Validator`] with a defaulting policy. Input that is
//! absent, null, or the wrong shape never reaches the validator: depending on
//! the configured [`Allow`] mode and `preserve` flag it is passed through
//! unchanged or replaced by a fallback. Input of the right shape is validated,
//! and validation failures are absorbed into the fallback too. The only error
//! a caller ever sees is a sequence element rejected by a validator that has
//! no fallback of its own.
//!
//! ## Core Types
//!
//! - [`RecordNormalizer`]: validates a JSON object atomically
//! - [`SequenceNormalizer`]: validates a JSON array element by element, with
//!   a strict mode that drops elements instead of keeping replacements
//! - [`resolve`]: the fallback-resolution step both normalizers share
//! - [`Validator`] / [`Checked`]: the capability normalizers wrap, and its
//!   result flagging whether a replacement was used
//! - [`Schema`]: primitive string, number and object schemas
//!
//! ## Example
//!
//! ```rust
//! use salvage::{Allow, Normalize, Schema};
//! use serde_json::json;
//!
//! let orders = Normalize::sequence(
//!     Normalize::record(Schema::object().field("value", Schema::number())),
//! )
//! .allow(Allow::Optional)
//! .fallback(json!([]));
//!
//! // absent input passes through untouched
//! assert_eq!(orders.normalize(None).unwrap(), None);
//! // null is not allowed, so it is replaced
//! assert_eq!(orders.normalize(Some(&json!(null))).unwrap(), Some(json!([])));
//! // bad elements fall back individually
//! assert_eq!(
//!     orders.normalize(Some(&json!([{"value": 1}, "junk"]))).unwrap(),
//!     Some(json!([{"value": 1}, null]))
//! );
//! ```

pub mod error;
pub mod normalize;
pub mod path;
pub mod schema;
pub mod validator;

pub use error::{ConfigError, NormalizeError, SchemaError, SchemaErrors};
pub use normalize::{
    resolve, Allow, Emptiness, Normalize, NormalizeOptions, RecordNormalizer, RecordShape,
    Resolution, SequenceNormalizer, SequenceShape, Shape,
};
pub use path::{JsonPath, PathSegment};
pub use schema::{NumberSchema, ObjectSchema, Schema, SchemaLike, StringSchema};
pub use validator::{Checked, Validator};

/// Type alias for validation results using SchemaErrors
pub type ValidationResult<T> = stillwater::Validation<T, SchemaErrors>;
