//! Numeric schema validation.
//!
//! [`NumberSchema`] accepts JSON numbers, optionally coercing numeric strings
//! and booleans, and checks range and integrality constraints.

use serde_json::{Number, Value};
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::traits::{finish, type_error, SchemaLike};

#[derive(Clone)]
enum NumberConstraint {
    Min { value: f64, message: Option<String> },
    Max { value: f64, message: Option<String> },
    Integer { message: Option<String> },
}

/// A schema for validating numeric values.
///
/// Coercion never applies to null, arrays or objects: a number schema with
/// no fallback around it rejects `[[1]]` outright, which is what a sequence
/// normalizer surfaces as a hard error.
///
/// # Example
///
/// ```rust
/// use salvage::{Schema, JsonPath};
/// use serde_json::{json, Number};
///
/// let schema = Schema::number().coerce().min(0.0);
///
/// let result = schema.validate(&json!(" 12 "), &JsonPath::root());
/// assert_eq!(result.into_result().unwrap(), Number::from(12));
///
/// let result = schema.validate(&json!(-1), &JsonPath::root());
/// assert!(result.is_failure());
/// ```
#[derive(Clone)]
pub struct NumberSchema {
    constraints: Vec<NumberConstraint>,
    coerce: bool,
    type_error_message: Option<String>,
}

impl NumberSchema {
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            coerce: false,
            type_error_message: None,
        }
    }

    /// Accepts numeric strings (surrounding whitespace ignored) and booleans
    /// (`true` is 1, `false` is 0).
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }

    /// Adds an inclusive lower bound.
    pub fn min(mut self, value: f64) -> Self {
        self.constraints.push(NumberConstraint::Min {
            value,
            message: None,
        });
        self
    }

    /// Adds an inclusive upper bound.
    pub fn max(mut self, value: f64) -> Self {
        self.constraints.push(NumberConstraint::Max {
            value,
            message: None,
        });
        self
    }

    /// Rejects numbers with a fractional part.
    pub fn integer(mut self) -> Self {
        self.constraints
            .push(NumberConstraint::Integer { message: None });
        self
    }

    /// Overrides the message of the most recent constraint, or of the type
    /// check when no constraint has been added yet.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.constraints.last_mut() {
            Some(NumberConstraint::Min { message: m, .. })
            | Some(NumberConstraint::Max { message: m, .. })
            | Some(NumberConstraint::Integer { message: m }) => *m = Some(message.into()),
            None => self.type_error_message = Some(message.into()),
        }
        self
    }

    pub fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Number, SchemaErrors> {
        let number = match (value, self.coerce) {
            (Value::Number(n), _) => n.clone(),
            (Value::String(s), true) => match parse_number(s) {
                Some(n) => n,
                None => {
                    return Validation::Failure(SchemaErrors::single(
                        SchemaError::new(path.clone(), "string is not a number")
                            .with_code("invalid_number")
                            .with_got(s.clone())
                            .with_expected("numeric string"),
                    ))
                }
            },
            (Value::Bool(b), true) => Number::from(u8::from(*b)),
            _ => return type_error(&self.type_error_message, "number", value, path),
        };

        let errors: Vec<SchemaError> = match number.as_f64() {
            Some(n) => self
                .constraints
                .iter()
                .filter_map(|c| check_constraint(c, n, path))
                .collect(),
            None => Vec::new(),
        };

        finish(number, errors)
    }
}

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for NumberSchema {
    type Output = Number;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, SchemaErrors> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate(value, path).map(Value::Number)
    }
}

/// Integers stay integers so `"12"` coerces to `12`, not `12.0`.
fn parse_number(s: &str) -> Option<Number> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::from(i));
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

fn check_constraint(
    constraint: &NumberConstraint,
    value: f64,
    path: &JsonPath,
) -> Option<SchemaError> {
    match constraint {
        NumberConstraint::Min { value: min, message } => (value < *min).then(|| {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("must be at least {}, got {}", min, value));
            SchemaError::new(path.clone(), msg)
                .with_code("min_value")
                .with_expected(format!("at least {}", min))
                .with_got(value.to_string())
        }),
        NumberConstraint::Max { value: max, message } => (value > *max).then(|| {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("must be at most {}, got {}", max, value));
            SchemaError::new(path.clone(), msg)
                .with_code("max_value")
                .with_expected(format!("at most {}", max))
                .with_got(value.to_string())
        }),
        NumberConstraint::Integer { message } => (value.fract() != 0.0).then(|| {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("expected integer, got {}", value));
            SchemaError::new(path.clone(), msg)
                .with_code("not_integer")
                .with_expected("integer")
                .with_got(value.to_string())
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unwrap_success<T, E: std::fmt::Debug>(v: Validation<T, E>) -> T {
        v.into_result().unwrap()
    }

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_accepts_integers_and_floats() {
        let schema = NumberSchema::new();
        assert_eq!(
            unwrap_success(schema.validate(&json!(42), &JsonPath::root())),
            Number::from(42)
        );
        assert!(schema.validate(&json!(4.25), &JsonPath::root()).is_success());
    }

    #[test]
    fn test_plain_schema_rejects_numeric_strings() {
        let errors = unwrap_failure(NumberSchema::new().validate(&json!("42"), &JsonPath::root()));
        assert_eq!(errors.first().code, "invalid_type");
    }

    #[test]
    fn test_coerce_strings_and_booleans() {
        let schema = NumberSchema::new().coerce();
        assert_eq!(
            schema.validate_to_value(&json!("12"), &JsonPath::root()).into_result().unwrap(),
            json!(12)
        );
        assert_eq!(
            schema.validate_to_value(&json!("2.5"), &JsonPath::root()).into_result().unwrap(),
            json!(2.5)
        );
        assert_eq!(
            schema.validate_to_value(&json!(true), &JsonPath::root()).into_result().unwrap(),
            json!(1)
        );
    }

    #[test]
    fn test_coerce_rejects_nested_array() {
        let schema = NumberSchema::new().coerce();
        let errors = unwrap_failure(schema.validate(&json!([[1]]), &JsonPath::root().push_index(0)));
        assert_eq!(errors.first().code, "invalid_type");
        assert_eq!(errors.first().path.to_string(), "[0]");
    }

    #[test]
    fn test_coerce_rejects_garbage_strings() {
        let schema = NumberSchema::new().coerce();
        let errors = unwrap_failure(schema.validate(&json!("12abc"), &JsonPath::root()));
        assert_eq!(errors.first().code, "invalid_number");
    }

    #[test]
    fn test_range_and_integer_constraints_accumulate() {
        let schema = NumberSchema::new().min(10.0).integer();
        let errors = unwrap_failure(schema.validate(&json!(2.5), &JsonPath::root()));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.with_code("min_value").len(), 1);
        assert_eq!(errors.with_code("not_integer").len(), 1);
    }

    #[test]
    fn test_custom_constraint_message() {
        let schema = NumberSchema::new().max(5.0).error("too many");
        let errors = unwrap_failure(schema.validate(&json!(6), &JsonPath::root()));
        assert_eq!(errors.first().message, "too many");
    }
}
