//! Record normalization.

use serde_json::Value;
use stillwater::Validation;
use tracing::debug;

use crate::error::SchemaErrors;
use crate::path::JsonPath;
use crate::schema::ObjectSchema;
use crate::validator::{Checked, Validator};

use super::options::NormalizeOptions;
use super::policy::Allow;
use super::resolve::{resolve, RecordShape, Resolution};

/// Normalizes a single keyed record.
///
/// After fallback resolution, a JSON object is handed whole to the inner
/// validator. Success returns the validated value; failure returns the
/// fallback. There is no partial result: to default individual fields, make
/// those fields normalizers themselves.
///
/// Never fails. Used as a [`Validator`] it always succeeds, flagging the
/// result as substituted whenever the fallback was used.
///
/// # Example
///
/// ```rust
/// use salvage::{Allow, Normalize, Schema};
/// use serde_json::json;
///
/// let normalizer = Normalize::record(Schema::object().field("value", Schema::number()));
///
/// assert_eq!(normalizer.normalize(Some(&json!({"value": 42}))), Some(json!({"value": 42})));
/// assert_eq!(normalizer.normalize(Some(&json!("not-an-object"))), Some(json!(null)));
///
/// let replacing = normalizer.fallback(json!("X")).preserve(false).allow(Allow::Nullish);
/// assert_eq!(replacing.normalize(None), Some(json!("X")));
/// ```
pub struct RecordNormalizer<V> {
    validator: V,
    options: NormalizeOptions,
}

impl<V: Validator> RecordNormalizer<V> {
    /// Wraps `validator` with the default options.
    pub fn new(validator: V) -> Self {
        Self::with_options(validator, NormalizeOptions::default())
    }

    /// Wraps `validator` with explicit options. `strict_elements` is ignored.
    pub fn with_options(validator: V, options: NormalizeOptions) -> Self {
        Self { validator, options }
    }

    pub fn fallback(mut self, fallback: impl Into<Option<Value>>) -> Self {
        self.options = self.options.fallback(fallback);
        self
    }

    pub fn allow(mut self, allow: Allow) -> Self {
        self.options = self.options.allow(allow);
        self
    }

    pub fn preserve(mut self, preserve: bool) -> Self {
        self.options = self.options.preserve(preserve);
        self
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Normalizes `value` (`None` meaning absent).
    pub fn normalize(&self, value: Option<&Value>) -> Option<Value> {
        self.normalize_at(value, &JsonPath::root()).into_value()
    }

    fn normalize_at(&self, value: Option<&Value>, path: &JsonPath) -> Checked {
        match resolve::<RecordShape>(value, &self.options) {
            Resolution::PassThroughEmpty(value) => Checked::native(value),
            Resolution::ReplacedEmpty(fallback) | Resolution::ReplacedInvalidShape(fallback) => {
                Checked::substituted(fallback)
            }
            Resolution::ProceedToValidate(record) => match self.validator.check(Some(record), path) {
                Validation::Success(checked) => checked,
                Validation::Failure(errors) => {
                    debug!(
                        path = %path,
                        errors = errors.len(),
                        code = %errors.first().code,
                        "record rejected, using fallback"
                    );
                    Checked::substituted(self.options.fallback_value().cloned())
                }
            },
        }
    }
}

impl<V: Validator> Validator for RecordNormalizer<V> {
    fn check(&self, value: Option<&Value>, path: &JsonPath) -> Validation<Checked, SchemaErrors> {
        Validation::Success(self.normalize_at(value, path))
    }
}

/// Accepts any JSON object unchanged.
impl Default for RecordNormalizer<ObjectSchema> {
    fn default() -> Self {
        Self::new(ObjectSchema::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NumberSchema, StringSchema};
    use serde_json::json;

    fn value_record() -> RecordNormalizer<ObjectSchema> {
        RecordNormalizer::new(ObjectSchema::new().field("value", NumberSchema::new()))
    }

    #[test]
    fn test_valid_record_passes() {
        assert_eq!(
            value_record().normalize(Some(&json!({"value": 42}))),
            Some(json!({"value": 42}))
        );
    }

    #[test]
    fn test_coerced_record_is_returned() {
        let normalizer =
            RecordNormalizer::new(ObjectSchema::new().field("value", NumberSchema::new().coerce()));
        assert_eq!(
            normalizer.normalize(Some(&json!({"value": "7"}))),
            Some(json!({"value": 7}))
        );
    }

    #[test]
    fn test_invalid_record_uses_fallback_whole() {
        let normalizer = value_record().fallback(json!({"value": 0}));
        assert_eq!(
            normalizer.normalize(Some(&json!({"value": "x", "other": 1}))),
            Some(json!({"value": 0}))
        );
    }

    #[test]
    fn test_wrong_shape_uses_fallback() {
        let normalizer = value_record().fallback(json!("F"));
        for value in [json!("not-an-object"), json!([{"value": 1}]), json!(3)] {
            assert_eq!(normalizer.normalize(Some(&value)), Some(json!("F")));
        }
    }

    #[test]
    fn test_default_accepts_any_object() {
        let normalizer: RecordNormalizer<ObjectSchema> = RecordNormalizer::default();
        assert_eq!(
            normalizer.normalize(Some(&json!({"anything": [1, 2]}))),
            Some(json!({"anything": [1, 2]}))
        );
        assert_eq!(normalizer.normalize(None), None);
        assert_eq!(normalizer.normalize(Some(&json!(null))), Some(json!(null)));
    }

    #[test]
    fn test_validator_skipped_for_empties() {
        // a validator that rejects everything would otherwise force the fallback
        let normalizer = RecordNormalizer::new(StringSchema::new()).fallback(json!("F"));
        assert_eq!(normalizer.normalize(None), None);
        assert_eq!(normalizer.normalize(Some(&json!({}))), Some(json!("F")));
    }

    #[test]
    fn test_check_reports_substitution() {
        let normalizer = value_record();
        let path = JsonPath::root();

        let accepted = normalizer
            .check(Some(&json!({"value": 1})), &path)
            .into_result()
            .unwrap();
        assert!(!accepted.substituted);

        let replaced = normalizer
            .check(Some(&json!({"uid": "1"})), &path)
            .into_result()
            .unwrap();
        assert!(replaced.substituted);
        assert_eq!(replaced.value, Some(json!(null)));

        let passed = normalizer.check(None, &path).into_result().unwrap();
        assert!(!passed.substituted);
        assert_eq!(passed.value, None);
    }

    #[test]
    fn test_nested_normalizer_substitution_propagates() {
        let inner = value_record().fallback(json!({"value": -1}));
        let outer = RecordNormalizer::new(inner).fallback(json!("outer"));

        let checked = outer
            .check(Some(&json!({"value": "bad"})), &JsonPath::root())
            .into_result()
            .unwrap();
        assert_eq!(checked.value, Some(json!({"value": -1})));
        assert!(checked.substituted);
    }
}
