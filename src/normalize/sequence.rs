//! Sequence normalization.
//!
//! Two failure policies meet here: whatever replacement the element validator
//! applies on its own, and this normalizer's strict flag.
//!
//! | element outcome             | non-strict             | strict           |
//! |-----------------------------|------------------------|------------------|
//! | accepted natively           | kept                   | kept             |
//! | replaced by the validator   | replacement kept       | dropped          |
//! | rejected, no replacement    | whole call fails       | whole call fails |

use serde_json::Value;
use stillwater::Validation;
use tracing::debug;

use crate::error::{NormalizeError, SchemaError, SchemaErrors};
use crate::path::JsonPath;
use crate::schema::StringSchema;
use crate::validator::{Checked, Validator};

use super::options::NormalizeOptions;
use super::policy::Allow;
use super::resolve::{resolve, Resolution, SequenceShape};

/// Normalizes an ordered sequence element by element.
///
/// # Example
///
/// ```rust
/// use salvage::{Normalize, Schema};
/// use serde_json::json;
///
/// let records = Normalize::record(Schema::object().field("value", Schema::number()));
/// let input = json!([{"value": 123}, {"uid": "123"}]);
///
/// let lenient = Normalize::sequence(records);
/// assert_eq!(
///     lenient.normalize(Some(&input)).unwrap(),
///     Some(json!([{"value": 123}, null]))
/// );
///
/// let strict = lenient.strict(true);
/// assert_eq!(strict.normalize(Some(&input)).unwrap(), Some(json!([{"value": 123}])));
/// ```
pub struct SequenceNormalizer<V> {
    validator: V,
    options: NormalizeOptions,
}

impl<V: Validator> SequenceNormalizer<V> {
    /// Wraps the element validator with the default options.
    pub fn new(validator: V) -> Self {
        Self::with_options(validator, NormalizeOptions::default())
    }

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

    /// Drops elements the validator did not accept natively.
    pub fn strict(mut self, strict: bool) -> Self {
        self.options = self.options.strict_elements(strict);
        self
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Normalizes `value` (`None` meaning absent).
    ///
    /// Fails only when an element is rejected by a validator with no
    /// replacement of its own. Strictness does not absorb that failure.
    pub fn normalize(&self, value: Option<&Value>) -> Result<Option<Value>, NormalizeError> {
        self.normalize_at(value, &JsonPath::root())
            .into_result()
            .map(Checked::into_value)
            .map_err(NormalizeError::Rejected)
    }

    fn normalize_at(
        &self,
        value: Option<&Value>,
        path: &JsonPath,
    ) -> Validation<Checked, SchemaErrors> {
        match resolve::<SequenceShape>(value, &self.options) {
            Resolution::PassThroughEmpty(value) => Validation::Success(Checked::native(value)),
            Resolution::ReplacedEmpty(fallback) | Resolution::ReplacedInvalidShape(fallback) => {
                Validation::Success(Checked::substituted(fallback))
            }
            Resolution::ProceedToValidate(items) => self
                .normalize_elements(items, path)
                .map(|elements| Checked::native(Some(Value::Array(elements)))),
        }
    }

    fn normalize_elements(
        &self,
        items: &[Value],
        path: &JsonPath,
    ) -> Validation<Vec<Value>, SchemaErrors> {
        let strict = self.options.is_strict();
        let mut elements = Vec::with_capacity(items.len());
        let mut errors: Vec<SchemaError> = Vec::new();

        for (index, item) in items.iter().enumerate() {
            let item_path = path.push_index(index);
            match self.validator.check(Some(item), &item_path) {
                Validation::Success(checked) if strict && checked.substituted => {
                    debug!(path = %item_path, "dropping substituted element");
                }
                Validation::Success(checked) => {
                    // arrays have no holes, so an absent result is stored as null
                    elements.push(checked.into_value().unwrap_or(Value::Null));
                }
                Validation::Failure(e) => errors.extend(e),
            }
        }

        match SchemaErrors::from_vec(errors) {
            None => Validation::Success(elements),
            Some(errors) => {
                debug!(
                    path = %path,
                    errors = errors.len(),
                    "sequence rejected by element validator"
                );
                Validation::Failure(errors)
            }
        }
    }
}

impl<V: Validator> Validator for SequenceNormalizer<V> {
    fn check(&self, value: Option<&Value>, path: &JsonPath) -> Validation<Checked, SchemaErrors> {
        self.normalize_at(value, path)
    }
}

/// Coerces every scalar element to a string.
///
/// Null, array and object elements cannot be coerced and fail the call with
/// [`NormalizeError::Rejected`]; wrap a normalizer as the element validator
/// to default them instead.
impl Default for SequenceNormalizer<StringSchema> {
    fn default() -> Self {
        Self::new(StringSchema::new().coerce())
    }
}
