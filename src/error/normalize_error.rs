use super::SchemaErrors;

/// Failure surfaced by a normalizer.
///
/// Shape mismatches, disallowed empties and element failures absorbed by a
/// fallback never produce this error. It only appears when the inner
/// validator rejects an element and has no fallback of its own.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    /// The inner validator refused a value and nothing absorbed the failure.
    #[error("{0}")]
    Rejected(SchemaErrors),
}

impl NormalizeError {
    /// Returns the validator errors behind this failure.
    pub fn errors(&self) -> &SchemaErrors {
        match self {
            NormalizeError::Rejected(errors) => errors,
        }
    }
}

impl From<SchemaErrors> for NormalizeError {
    fn from(errors: SchemaErrors) -> Self {
        NormalizeError::Rejected(errors)
    }
}

/// Errors raised while reading normalizer options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The `allow` option named a mode that does not exist.
    #[error("unknown allow mode '{0}', expected one of none, optional, nullable, nullish")]
    UnknownAllowMode(String),

    /// The options object carried a key no normalizer recognizes.
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    /// A recognized option had a value of the wrong type.
    #[error("option '{key}' must be {expected}, got {got}")]
    InvalidOption {
        key: String,
        expected: &'static str,
        got: &'static str,
    },

    /// The options were not given as a JSON object.
    #[error("options must be an object, got {0}")]
    NotAnObject(&'static str),
}
