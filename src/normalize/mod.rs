//! Normalizing validators.
//!
//! A normalizer wraps a [`Validator`] with a defaulting policy: which empty
//! sentinels are acceptable ([`Allow`]), whether accepted empties pass through
//! (`preserve`), and what to return instead of rejected input (`fallback`).
//! Every call goes through [`resolve`] first and only reaches the validator
//! when the input has the right shape.
//!
//! Normalizers implement [`Validator`] themselves, so they nest: a sequence
//! of records, a record whose fields default individually, and so on.

mod options;
mod policy;
mod record;
mod resolve;
mod sequence;

pub use options::NormalizeOptions;
pub use policy::{Allow, Emptiness};
pub use record::RecordNormalizer;
pub use resolve::{resolve, RecordShape, Resolution, SequenceShape, Shape};
pub use sequence::SequenceNormalizer;

use crate::validator::Validator;

/// Entry point for creating normalizers.
///
/// Each normalizer has a builder form and an options form; both produce the
/// same configuration.
///
/// # Example
///
/// ```rust
/// use salvage::{Allow, Normalize, NormalizeOptions, Schema};
/// use serde_json::json;
///
/// let built = Normalize::sequence(Schema::string())
///     .allow(Allow::Optional)
///     .fallback(json!([]));
///
/// let configured = Normalize::sequence_with(
///     Schema::string(),
///     NormalizeOptions::new().allow(Allow::Optional).fallback(json!([])),
/// );
///
/// assert_eq!(built.options(), configured.options());
/// assert_eq!(built.normalize(None).unwrap(), None);
/// assert_eq!(built.normalize(Some(&json!(null))).unwrap(), Some(json!([])));
/// ```
pub struct Normalize;

impl Normalize {
    /// Creates a record normalizer around `validator`.
    pub fn record<V: Validator>(validator: V) -> RecordNormalizer<V> {
        RecordNormalizer::new(validator)
    }

    /// Creates a record normalizer with explicit options.
    pub fn record_with<V: Validator>(validator: V, options: NormalizeOptions) -> RecordNormalizer<V> {
        RecordNormalizer::with_options(validator, options)
    }

    /// Creates a sequence normalizer around an element validator.
    pub fn sequence<V: Validator>(validator: V) -> SequenceNormalizer<V> {
        SequenceNormalizer::new(validator)
    }

    /// Creates a sequence normalizer with explicit options.
    pub fn sequence_with<V: Validator>(
        validator: V,
        options: NormalizeOptions,
    ) -> SequenceNormalizer<V> {
        SequenceNormalizer::with_options(validator, options)
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<RecordNormalizer<crate::schema::ObjectSchema>>();
    assert_sync::<RecordNormalizer<crate::schema::ObjectSchema>>();
    assert_send::<SequenceNormalizer<crate::schema::StringSchema>>();
    assert_sync::<SequenceNormalizer<crate::schema::StringSchema>>();
};
