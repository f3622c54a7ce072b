//! Country-specific civic number generation and validation.
//!
//! Each country module produces numbers that pass the real-world check digit
//! algorithm of that country while being drawn at random. All randomness comes
//! from the caller-supplied RNG, so a seeded RNG gives reproducible numbers.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use civicgen::civic::{self, norway};
//! use civicgen::{Country, Sex};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let birthday = NaiveDate::from_ymd_opt(1990, 5, 14).unwrap();
//!
//! let outcome = norway::generate_with_format(
//!     &mut rng,
//!     birthday,
//!     Sex::Male,
//!     norway::NorwegianFormat::Fodselsnummer,
//! )
//! .unwrap();
//!
//! assert!(outcome.number.as_str().starts_with("140590"));
//! assert!(civic::validate_civic_number(Country::Norway, outcome.number.as_str()).is_ok());
//! ```

pub mod norway;
pub mod spain;
pub mod sweden;

use std::fmt;

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::{CivicNumberError, Country, GenerationError, Sex};

pub use norway::NorwegianFormat;
pub use spain::SpanishFormat;
pub use sweden::SwedishFormat;

/// A generated civic number in its country's canonical string form.
///
/// Only produced by the generators in this module (or accepted from a
/// registry after validation), so it always satisfies its country's checksum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CivicNumber(String);

impl CivicNumber {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CivicNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CivicNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The concrete number format a civic number was generated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CivicFormat {
    Swedish(SwedishFormat),
    Norwegian(NorwegianFormat),
    Spanish(SpanishFormat),
}

impl CivicFormat {
    pub fn country(self) -> Country {
        match self {
            Self::Swedish(_) => Country::Sweden,
            Self::Norwegian(_) => Country::Norway,
            Self::Spanish(_) => Country::Spain,
        }
    }
}

/// Result of a single generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CivicOutcome {
    pub number: CivicNumber,
    pub format: CivicFormat,
    /// The birth date consistent with `number`.
    ///
    /// Equal to the requested birthday for every offline generator; registry
    /// lookups may return a number for a different day, in which case this is
    /// the date that number encodes.
    pub birthday: NaiveDate,
}

/// Generate a civic number for `country`, picking a sub-format at random.
///
/// `birthday` and `sex` are ignored for Spain, whose formats encode neither.
pub fn generate_civic_number<R: Rng + ?Sized>(
    rng: &mut R,
    country: Country,
    birthday: NaiveDate,
    sex: Sex,
) -> Result<CivicOutcome, GenerationError> {
    match country {
        Country::Sweden => sweden::generate(rng, birthday, sex),
        Country::Norway => norway::generate(rng, birthday, sex),
        Country::Spain => Ok(spain::generate(rng, birthday)),
    }
}

/// Validate a civic number for `country` and report which format it is in.
pub fn validate_civic_number(country: Country, value: &str) -> Result<CivicFormat, CivicNumberError> {
    match country {
        Country::Sweden => sweden::validate(value).map(CivicFormat::Swedish),
        Country::Norway => norway::validate(value).map(CivicFormat::Norwegian),
        Country::Spain => spain::validate(value).map(CivicFormat::Spanish),
    }
}

/// Pick one of `items` uniformly.
pub(crate) fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> T {
    items[rng.random_range(0..items.len())]
}
