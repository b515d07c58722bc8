//! Object schema validation.
//!
//! [`ObjectSchema`] validates JSON objects field by field. Field validators
//! are any [`Validator`], so a field can be a plain schema or another
//! normalizer that absorbs its own failures.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::JsonPath;
use crate::validator::Validator;

use super::traits::{finish, type_error, SchemaLike};

struct FieldDef {
    validator: Box<dyn Validator>,
    required: bool,
}

/// A schema for validating JSON objects.
///
/// Fields added with [`field`](Self::field) are always handed to their
/// validator, as absent when missing. A plain schema rejects that with a
/// `required` error; a nested normalizer applies its own allow policy.
/// Fields added with [`optional`](Self::optional) are skipped when missing.
///
/// Unknown properties are kept by default, so `ObjectSchema::new()` accepts
/// any object unchanged.
///
/// # Example
///
/// ```rust
/// use salvage::{JsonPath, Normalize, Schema};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("name", Schema::string().min_len(1))
///     .field("tags", Normalize::sequence(Schema::string()).fallback(json!([])))
///     .optional("nickname", Schema::string());
///
/// let result = schema.validate(&json!({"name": "Ada", "tags": "oops"}), &JsonPath::root());
/// assert_eq!(
///     result.into_result().unwrap(),
///     json!({"name": "Ada", "tags": []}).as_object().unwrap().clone()
/// );
/// ```
pub struct ObjectSchema {
    fields: IndexMap<String, FieldDef>,
    additional_properties: bool,
    type_error_message: Option<String>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            additional_properties: true,
            type_error_message: None,
        }
    }

    /// Adds a field whose validator sees every input, present or absent.
    pub fn field<V>(mut self, name: impl Into<String>, validator: V) -> Self
    where
        V: Validator + 'static,
    {
        self.fields.insert(
            name.into(),
            FieldDef {
                validator: Box::new(validator),
                required: true,
            },
        );
        self
    }

    /// Adds a field that is skipped entirely when missing.
    pub fn optional<V>(mut self, name: impl Into<String>, validator: V) -> Self
    where
        V: Validator + 'static,
    {
        self.fields.insert(
            name.into(),
            FieldDef {
                validator: Box::new(validator),
                required: false,
            },
        );
        self
    }

    /// Keeps (`true`, the default) or rejects unknown properties.
    pub fn additional_properties(mut self, allow: bool) -> Self {
        self.additional_properties = allow;
        self
    }

    /// Sets the message used when the input is not an object.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    pub fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
    ) -> Validation<Map<String, Value>, SchemaErrors> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => return type_error(&self.type_error_message, "object", value, path),
        };

        let mut errors = Vec::new();
        let mut validated = Map::new();

        for (name, field_def) in &self.fields {
            let field_value = obj.get(name);
            if field_value.is_none() && !field_def.required {
                continue;
            }

            let field_path = path.push_field(name);
            match field_def.validator.check(field_value, &field_path) {
                Validation::Success(checked) => {
                    // an absent result leaves the key out
                    if let Some(v) = checked.into_value() {
                        validated.insert(name.clone(), v);
                    }
                }
                Validation::Failure(e) => errors.extend(e),
            }
        }

        for (key, value) in obj {
            if self.fields.contains_key(key) {
                continue;
            }
            if self.additional_properties {
                validated.insert(key.clone(), value.clone());
            } else {
                errors.push(
                    SchemaError::new(path.push_field(key), format!("unknown field '{}'", key))
                        .with_code("additional_property"),
                );
            }
        }

        finish(validated, errors)
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for ObjectSchema {
    type Output = Map<String, Value>;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, SchemaErrors> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate(value, path).map(Value::Object)
    }
}
