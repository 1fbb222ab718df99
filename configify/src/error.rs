//! Errors produced while coercing raw strings into typed values.

use thiserror::Error;

/// Reasons a raw configuration string could not be coerced.
///
/// Sources collapse every variant into "not found"; the detail exists for
/// logging and for callers using [`crate::coerce`] directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CoerceError {
    /// The value was empty where a non-empty value is required.
    #[error("value is empty")]
    Empty,

    /// The value is not a base-10 integer after normalisation.
    #[error("invalid integer '{value}': {reason}")]
    Integer {
        /// Raw value as received.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// The value is not a floating point number.
    #[error("invalid float '{value}': {reason}")]
    Float {
        /// Raw value as received.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// The value is neither `true` nor `false`.
    #[error("invalid boolean '{0}': expected 'true' or 'false'")]
    Bool(String),

    /// The value does not follow the `1h2m3s` duration grammar.
    #[error("invalid duration '{value}': {reason}")]
    Duration {
        /// Raw value as received.
        value: String,
        /// What went wrong.
        reason: &'static str,
    },

    /// The value is neither a `YYYY-MM-DD` date nor an RFC 3339 timestamp.
    #[error("invalid timestamp '{value}': {reason}")]
    Timestamp {
        /// Raw value as received.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// A typed value was stored, but of a different type than requested.
    #[error("expected {expected} but found {found}")]
    Mismatch {
        /// Type the caller asked for.
        expected: &'static str,
        /// Type actually stored.
        found: &'static str,
    },

    /// The value parsed, but does not fit the requested numeric type.
    #[error("value '{value}' is out of range for {target}")]
    OutOfRange {
        /// Value rendered for display.
        value: String,
        /// Name of the requested type.
        target: &'static str,
    },
}

impl CoerceError {
    pub(crate) fn duration(value: &str, reason: &'static str) -> Self {
        Self::Duration {
            value: value.to_owned(),
            reason,
        }
    }
}
