//! The validator capability normalizers are built around.
//!
//! A [`Validator`] looks at one raw value and either accepts it (possibly in a
//! coerced form) or rejects it. Accepting comes in two flavours, reported by
//! [`Checked::substituted`]: the value itself was fine, or the validator
//! swallowed a failure and handed back a replacement. Sequence normalizers in
//! strict mode keep only the first kind.
//!
//! Everything in [`crate::schema`] implements `Validator` through
//! [`SchemaLike`](crate::schema::SchemaLike), and both normalizers implement it
//! directly, so normalizers nest inside each other and inside object fields.

use serde_json::Value;
use stillwater::Validation;

use crate::error::SchemaErrors;
use crate::path::JsonPath;

/// The accepted outcome of [`Validator::check`].
#[derive(Debug, Clone, PartialEq)]
pub struct Checked {
    /// Accepted value; `None` means the result is absent.
    pub value: Option<Value>,
    /// True when `value` is a replacement rather than the input itself.
    pub substituted: bool,
}

impl Checked {
    /// The input (or its coerced form) was accepted as-is.
    pub fn native(value: Option<Value>) -> Self {
        Self {
            value,
            substituted: false,
        }
    }

    /// The input was rejected and `value` stands in for it.
    pub fn substituted(value: Option<Value>) -> Self {
        Self {
            value,
            substituted: true,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        self.value
    }
}

/// A capability that checks, and possibly coerces, a single raw value.
///
/// `value` is `None` when the input is absent (a missing record field, or an
/// absent top-level input) and `Some(&Value::Null)` for an explicit null.
/// Implementations must be deterministic and free of side effects; the
/// `Send + Sync` bound lets one instance be shared by concurrent callers.
///
/// # Example
///
/// ```rust
/// use salvage::{JsonPath, Normalize, Schema, Validator};
/// use serde_json::json;
///
/// // A plain schema never substitutes.
/// let number = Schema::number();
/// let checked = number.check(Some(&json!(3)), &JsonPath::root()).into_result().unwrap();
/// assert!(!checked.substituted);
///
/// // A normalizer reports when it fell back.
/// let record = Normalize::record(Schema::object().field("value", Schema::number()));
/// let checked = record.check(Some(&json!("nope")), &JsonPath::root()).into_result().unwrap();
/// assert!(checked.substituted);
/// assert_eq!(checked.value, Some(json!(null)));
/// ```
pub trait Validator: Send + Sync {
    /// Checks `value`, located at `path`.
    fn check(&self, value: Option<&Value>, path: &JsonPath) -> Validation<Checked, SchemaErrors>;
}
