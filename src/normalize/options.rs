//! Normalizer configuration.

use serde_json::Value;

use crate::error::ConfigError;
use crate::schema::value_type_name;

use super::policy::Allow;

/// Defaulting policy shared by both normalizers.
///
/// | option            | default  |
/// |-------------------|----------|
/// | `fallback`        | `null`   |
/// | `allow`           | nullish  |
/// | `preserve`        | `true`   |
/// | `strict_elements` | `false`  |
///
/// `strict_elements` is only read by
/// [`SequenceNormalizer`](super::SequenceNormalizer).
///
/// # Example
///
/// ```rust
/// use salvage::{Allow, NormalizeOptions};
/// use serde_json::json;
///
/// let options = NormalizeOptions::new()
///     .fallback(json!("X"))
///     .allow(Allow::Optional)
///     .preserve(false);
///
/// assert_eq!(options.fallback_value(), Some(&json!("X")));
/// assert_eq!(options.allow_mode(), Allow::Optional);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOptions {
    fallback: Option<Value>,
    allow: Allow,
    preserve: bool,
    strict_elements: bool,
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self {
            fallback: Some(Value::Null),
            allow: Allow::default(),
            preserve: true,
            strict_elements: false,
        }
    }

    /// Sets the value returned for rejected or replaced input.
    ///
    /// Passing `None` makes the fallback an absent value.
    pub fn fallback(mut self, fallback: impl Into<Option<Value>>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn allow(mut self, allow: Allow) -> Self {
        self.allow = allow;
        self
    }

    /// Whether an accepted empty sentinel is returned unchanged (`true`) or
    /// replaced by the fallback (`false`).
    pub fn preserve(mut self, preserve: bool) -> Self {
        self.preserve = preserve;
        self
    }

    /// Whether sequence elements the validator did not accept natively are
    /// dropped (`true`) or kept as the validator's replacement (`false`).
    pub fn strict_elements(mut self, strict: bool) -> Self {
        self.strict_elements = strict;
        self
    }

    pub fn fallback_value(&self) -> Option<&Value> {
        self.fallback.as_ref()
    }

    pub fn allow_mode(&self) -> Allow {
        self.allow
    }

    pub fn preserves_empty(&self) -> bool {
        self.preserve
    }

    pub fn is_strict(&self) -> bool {
        self.strict_elements
    }

    /// Reads options from a JSON object.
    ///
    /// Recognized keys are `fallback`, `allow`, `preserve` and
    /// `strictElements`; omitted keys keep their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use salvage::{Allow, NormalizeOptions};
    /// use serde_json::json;
    ///
    /// let options = NormalizeOptions::from_json(&json!({
    ///     "fallback": [],
    ///     "allow": "nullable",
    ///     "strictElements": true
    /// })).unwrap();
    ///
    /// assert_eq!(options.fallback_value(), Some(&json!([])));
    /// assert_eq!(options.allow_mode(), Allow::Nullable);
    /// assert!(options.preserves_empty());
    /// assert!(options.is_strict());
    ///
    /// assert!(NormalizeOptions::from_json(&json!({"preserve": "yes"})).is_err());
    /// ```
    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let obj = value
            .as_object()
            .ok_or_else(|| ConfigError::NotAnObject(value_type_name(value)))?;

        let mut options = Self::new();
        for (key, v) in obj {
            options = match key.as_str() {
                "fallback" => options.fallback(v.clone()),
                "allow" => {
                    let mode = v.as_str().ok_or_else(|| invalid(key, "a string", v))?;
                    options.allow(mode.parse()?)
                }
                "preserve" => {
                    options.preserve(v.as_bool().ok_or_else(|| invalid(key, "a boolean", v))?)
                }
                "strictElements" => options
                    .strict_elements(v.as_bool().ok_or_else(|| invalid(key, "a boolean", v))?),
                other => return Err(ConfigError::UnknownOption(other.to_string())),
            };
        }
        Ok(options)
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(key: &str, expected: &'static str, got: &Value) -> ConfigError {
    ConfigError::InvalidOption {
        key: key.to_string(),
        expected,
        got: value_type_name(got),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = NormalizeOptions::default();
        assert_eq!(options.fallback_value(), Some(&Value::Null));
        assert_eq!(options.allow_mode(), Allow::Nullish);
        assert!(options.preserves_empty());
        assert!(!options.is_strict());
    }

    #[test]
    fn test_absent_fallback() {
        let options = NormalizeOptions::new().fallback(None);
        assert_eq!(options.fallback_value(), None);
    }

    #[test]
    fn test_from_json_empty_object_is_default() {
        assert_eq!(
            NormalizeOptions::from_json(&json!({})),
            Ok(NormalizeOptions::default())
        );
    }

    #[test]
    fn test_from_json_explicit_null_fallback() {
        let options = NormalizeOptions::from_json(&json!({"fallback": null, "preserve": false}))
            .unwrap();
        assert_eq!(options.fallback_value(), Some(&Value::Null));
        assert!(!options.preserves_empty());
    }

    #[test]
    fn test_from_json_rejects_unknown_key() {
        assert_eq!(
            NormalizeOptions::from_json(&json!({"strict": true})),
            Err(ConfigError::UnknownOption("strict".to_string()))
        );
    }

    #[test]
    fn test_from_json_rejects_bad_allow() {
        assert_eq!(
            NormalizeOptions::from_json(&json!({"allow": "sometimes"})),
            Err(ConfigError::UnknownAllowMode("sometimes".to_string()))
        );
        assert_eq!(
            NormalizeOptions::from_json(&json!({"allow": 1})),
            Err(ConfigError::InvalidOption {
                key: "allow".to_string(),
                expected: "a string",
                got: "number",
            })
        );
    }

    #[test]
    fn test_from_json_requires_object() {
        assert_eq!(
            NormalizeOptions::from_json(&json!([])),
            Err(ConfigError::NotAnObject("array"))
        );
    }
}
