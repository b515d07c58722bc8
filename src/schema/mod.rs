//! Primitive schemas.
//!
//! These are the building blocks normalizers wrap. A schema only accepts or
//! rejects; it never substitutes a fallback. Wrap it in a
//! [`Normalize`](crate::Normalize) normalizer to get defaulting behaviour.
//!
//! # Example
//!
//! ```rust
//! use salvage::{Schema, JsonPath};
//! use serde_json::json;
//!
//! let schema = Schema::object().field("value", Schema::number());
//!
//! assert!(schema.validate(&json!({"value": 42}), &JsonPath::root()).is_success());
//! assert!(schema.validate(&json!({"uid": "123"}), &JsonPath::root()).is_failure());
//! ```

mod numeric;
mod object;
mod string;
mod traits;

pub use numeric::NumberSchema;
pub use object::ObjectSchema;
pub use string::StringSchema;
pub use traits::SchemaLike;

pub(crate) use traits::value_type_name;

/// Entry point for creating primitive schemas.
pub struct Schema;

impl Schema {
    /// Creates a string schema. Call [`StringSchema::coerce`] to also accept
    /// numbers and booleans.
    ///
    /// ```rust
    /// use salvage::{Schema, JsonPath};
    /// use serde_json::json;
    ///
    /// let schema = Schema::string().max_len(3);
    /// assert!(schema.validate(&json!("abc"), &JsonPath::root()).is_success());
    /// assert!(schema.validate(&json!("abcd"), &JsonPath::root()).is_failure());
    /// ```
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Creates a number schema.
    pub fn number() -> NumberSchema {
        NumberSchema::new()
    }

    /// Creates an object schema. With no fields it accepts any object.
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }
}
