//! Traits shared by the primitive schemas.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::JsonPath;
use crate::validator::{Checked, Validator};

/// A schema that validates a present JSON value.
///
/// Schemas know nothing about absent input or fallbacks: they accept or
/// reject. The blanket [`Validator`] impl below adapts them to the
/// normalizer-facing contract, rejecting absent input with a `required` error
/// and reporting every accepted value as native.
pub trait SchemaLike: Send + Sync {
    /// The output type produced by successful validation.
    type Output;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, SchemaErrors>;

    /// Validates a value and returns the result as a `serde_json::Value`.
    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors>;
}

impl<S: SchemaLike> Validator for S {
    fn check(&self, value: Option<&Value>, path: &JsonPath) -> Validation<Checked, SchemaErrors> {
        match value {
            Some(value) => self
                .validate_to_value(value, path)
                .map(|v| Checked::native(Some(v))),
            None => Validation::Failure(SchemaErrors::single(
                SchemaError::new(path.clone(), "value is required")
                    .with_code("required")
                    .with_expected("value")
                    .with_got("absent"),
            )),
        }
    }
}

pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Builds the `invalid_type` failure every schema reports on a wrong shape.
pub(crate) fn type_error<T>(
    custom: &Option<String>,
    expected: &'static str,
    value: &Value,
    path: &JsonPath,
) -> Validation<T, SchemaErrors> {
    let message = custom
        .clone()
        .unwrap_or_else(|| format!("expected {}", expected));
    Validation::Failure(SchemaErrors::single(
        SchemaError::new(path.clone(), message)
            .with_code("invalid_type")
            .with_got(value_type_name(value))
            .with_expected(expected),
    ))
}

/// Folds accumulated errors into a validation result.
pub(crate) fn finish<T>(value: T, errors: Vec<SchemaError>) -> Validation<T, SchemaErrors> {
    match SchemaErrors::from_vec(errors) {
        None => Validation::Success(value),
        Some(errors) => Validation::Failure(errors),
    }
}
