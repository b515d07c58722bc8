//! Fallback resolution shared by both normalizers.
//!
//! Every call runs the same decision before any validator is touched:
//!
//! 1. classify the input with the configured [`Allow`](super::Allow) mode;
//! 2. an accepted empty passes through (`preserve`) or becomes the fallback;
//! 3. a rejected empty is treated like any other wrong-shape input;
//! 4. input of the wrong shape becomes the fallback;
//! 5. everything else proceeds to validation.
//!
//! The order is load-bearing: step 4 relies on allowed empties having been
//! handled by step 2.

use serde_json::Value;
use tracing::trace;

use super::options::NormalizeOptions;
use super::policy::Emptiness;

/// The structural precondition a normalizer puts on its input.
pub trait Shape {
    /// What validation receives once the shape check passes.
    type Target: ?Sized;

    /// Name used in diagnostics.
    const NAME: &'static str;

    /// Returns the input viewed as [`Self::Target`], or `None` on mismatch.
    fn accept(value: &Value) -> Option<&Self::Target>;
}

/// An ordered sequence: a JSON array.
#[derive(Debug, Clone, Copy)]
pub struct SequenceShape;

impl Shape for SequenceShape {
    type Target = [Value];
    const NAME: &'static str = "sequence";

    fn accept(value: &Value) -> Option<&[Value]> {
        value.as_array().map(Vec::as_slice)
    }
}

/// A plain keyed record: a JSON object, validated as the whole value.
#[derive(Debug, Clone, Copy)]
pub struct RecordShape;

impl Shape for RecordShape {
    type Target = Value;
    const NAME: &'static str = "record";

    fn accept(value: &Value) -> Option<&Value> {
        value.is_object().then_some(value)
    }
}

/// Outcome of [`resolve`].
#[derive(Debug, PartialEq)]
pub enum Resolution<'a, T: ?Sized> {
    /// An accepted empty returned unchanged.
    PassThroughEmpty(Option<Value>),
    /// An accepted empty replaced by the fallback.
    ReplacedEmpty(Option<Value>),
    /// A disallowed empty or wrong-shape input replaced by the fallback.
    ReplacedInvalidShape(Option<Value>),
    /// Input of the right shape, to be validated.
    ProceedToValidate(&'a T),
}

impl<T: ?Sized> Resolution<'_, T> {
    fn label(&self) -> &'static str {
        match self {
            Resolution::PassThroughEmpty(_) => "pass_through_empty",
            Resolution::ReplacedEmpty(_) => "replaced_empty",
            Resolution::ReplacedInvalidShape(_) => "replaced_invalid_shape",
            Resolution::ProceedToValidate(_) => "proceed_to_validate",
        }
    }
}

/// Decides what happens to `value` (`None` meaning absent) before validation.
///
/// # Example
///
/// ```rust
/// use salvage::{resolve, Allow, NormalizeOptions, Resolution, SequenceShape};
/// use serde_json::json;
///
/// let options = NormalizeOptions::new().allow(Allow::Optional);
///
/// assert_eq!(resolve::<SequenceShape>(None, &options), Resolution::PassThroughEmpty(None));
/// assert_eq!(
///     resolve::<SequenceShape>(Some(&json!(null)), &options),
///     Resolution::ReplacedInvalidShape(Some(json!(null)))
/// );
/// ```
pub fn resolve<'a, S: Shape>(
    value: Option<&'a Value>,
    options: &NormalizeOptions,
) -> Resolution<'a, S::Target> {
    let allow = options.allow_mode();
    let emptiness = allow.classify(value);

    let resolution = match emptiness {
        Emptiness::AllowedEmpty if options.preserves_empty() => {
            Resolution::PassThroughEmpty(value.cloned())
        }
        Emptiness::AllowedEmpty => Resolution::ReplacedEmpty(options.fallback_value().cloned()),
        Emptiness::DisallowedEmpty | Emptiness::NotEmpty => match value.and_then(S::accept) {
            Some(target) => Resolution::ProceedToValidate(target),
            None => Resolution::ReplacedInvalidShape(options.fallback_value().cloned()),
        },
    };

    trace!(
        shape = S::NAME,
        allow = %allow,
        emptiness = ?emptiness,
        outcome = resolution.label(),
        "resolved input"
    );

    resolution
}
