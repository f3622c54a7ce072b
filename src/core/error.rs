use chrono::NaiveDate;
use thiserror::Error;

use super::types::Country;

/// Errors that can occur while generating a person or a civic number.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    /// The requested country has no civic number generator.
    #[error("unsupported country '{0}'")]
    UnsupportedCountry(String),

    /// Every candidate within the retry cap failed its checksum constraint.
    #[error("gave up generating a {country} civic number after {attempts} attempts")]
    GenerationExhausted {
        /// Country whose generator ran out of attempts.
        country: Country,
        /// Number of candidates tried.
        attempts: usize,
    },

    /// Age or year bounds that cannot produce a birth date.
    #[error("invalid age constraints: {0}")]
    InvalidAgeConstraints(String),

    /// The birth date cannot be written in the target number format.
    #[error("birth date {0} cannot be encoded as a civic number")]
    UnencodableBirthDate(NaiveDate),
}

/// A civic number that failed format or checksum validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CivicNumberError {
    /// The rejected input.
    pub value: String,
    /// Why the value failed validation.
    pub reason: String,
}

impl CivicNumberError {
    pub(crate) fn new(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for CivicNumberError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid civic number '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for CivicNumberError {}
