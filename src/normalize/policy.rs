//! Empty-sentinel policy.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde_json::Value;

use crate::error::ConfigError;

/// Which empty sentinels a normalizer accepts as valid input.
///
/// The default is [`Allow::Nullish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Allow {
    /// Neither null nor absent is accepted.
    None,
    /// Only an absent value is accepted.
    Optional,
    /// Only an explicit null is accepted.
    Nullable,
    /// Both null and absent are accepted.
    #[default]
    Nullish,
}

/// How [`Allow::classify`] sees an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emptiness {
    /// An empty sentinel this mode accepts.
    AllowedEmpty,
    /// An empty sentinel this mode does not accept.
    DisallowedEmpty,
    /// Anything that is not null or absent, whatever its shape.
    NotEmpty,
}

impl Allow {
    /// Every mode, in declaration order.
    pub const ALL: [Allow; 4] = [Allow::None, Allow::Optional, Allow::Nullable, Allow::Nullish];

    /// Classifies `value` (`None` meaning absent) under this mode.
    ///
    /// # Example
    ///
    /// ```rust
    /// use salvage::{Allow, Emptiness};
    /// use serde_json::json;
    ///
    /// assert_eq!(Allow::Optional.classify(None), Emptiness::AllowedEmpty);
    /// assert_eq!(Allow::Optional.classify(Some(&json!(null))), Emptiness::DisallowedEmpty);
    /// assert_eq!(Allow::Optional.classify(Some(&json!("x"))), Emptiness::NotEmpty);
    /// ```
    pub fn classify(self, value: Option<&Value>) -> Emptiness {
        match (self, value) {
            (_, Some(v)) if !v.is_null() => Emptiness::NotEmpty,
            (Allow::Nullish, _) => Emptiness::AllowedEmpty,
            (Allow::Nullable, Some(_)) => Emptiness::AllowedEmpty,
            (Allow::Optional, None) => Emptiness::AllowedEmpty,
            (Allow::None, _) | (Allow::Nullable, None) | (Allow::Optional, Some(_)) => {
                Emptiness::DisallowedEmpty
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Allow::None => "none",
            Allow::Optional => "optional",
            Allow::Nullable => "nullable",
            Allow::Nullish => "nullish",
        }
    }
}

impl Display for Allow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Allow {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Allow::None),
            "optional" => Ok(Allow::Optional),
            "nullable" => Ok(Allow::Nullable),
            "nullish" => Ok(Allow::Nullish),
            other => Err(ConfigError::UnknownAllowMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classification_table() {
        let null = json!(null);
        let cases = [
            (Allow::None, None, Emptiness::DisallowedEmpty),
            (Allow::None, Some(&null), Emptiness::DisallowedEmpty),
            (Allow::Optional, None, Emptiness::AllowedEmpty),
            (Allow::Optional, Some(&null), Emptiness::DisallowedEmpty),
            (Allow::Nullable, None, Emptiness::DisallowedEmpty),
            (Allow::Nullable, Some(&null), Emptiness::AllowedEmpty),
            (Allow::Nullish, None, Emptiness::AllowedEmpty),
            (Allow::Nullish, Some(&null), Emptiness::AllowedEmpty),
        ];

        for (allow, value, expected) in cases {
            assert_eq!(allow.classify(value), expected, "{} / {:?}", allow, value);
        }
    }

    #[test]
    fn test_non_empty_values_ignore_mode() {
        let values = [json!(0), json!(""), json!(false), json!([]), json!({}), json!("x")];
        for allow in Allow::ALL {
            for value in &values {
                assert_eq!(allow.classify(Some(value)), Emptiness::NotEmpty);
            }
        }
    }

    #[test]
    fn test_parse_round_trips_display() {
        for allow in Allow::ALL {
            assert_eq!(allow.to_string().parse::<Allow>(), Ok(allow));
        }
    }

    #[test]
    fn test_parse_unknown_mode() {
        assert_eq!(
            "maybe".parse::<Allow>(),
            Err(ConfigError::UnknownAllowMode("maybe".to_string()))
        );
    }

    #[test]
    fn test_default_is_nullish() {
        assert_eq!(Allow::default(), Allow::Nullish);
    }
}
