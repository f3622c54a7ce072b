//! Norwegian fødselsnummer and D-number.
//!
//! Layout: `DDMMYY` + 3-digit individual number + two mod-11 check digits.
//! The individual number is drawn from 000–499 with odd values for men and
//! even values for women. A D-number adds 40 to the day of month.

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{CivicFormat, CivicNumber, CivicOutcome};
use crate::core::checksum::{parse_digits, push_digits, weighted_mod11};
use crate::core::{CivicNumberError, Country, GenerationError, Sex};

/// Weights for the first check digit (over digits 0–8).
pub const K1_WEIGHTS: [u8; 9] = [3, 7, 6, 1, 8, 9, 4, 5, 2];

/// Weights for the second check digit (over digits 0–9).
pub const K2_WEIGHTS: [u8; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

/// Candidates tried before giving up.
pub const MAX_ATTEMPTS: usize = 1000;

const D_NUMBER_DAY_OFFSET: u32 = 40;

/// Individual numbers are drawn from `0..INDIVIDUAL_SPAN`.
const INDIVIDUAL_SPAN: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NorwegianFormat {
    /// Birth number for registered residents.
    Fodselsnummer,
    /// Temporary number for non-residents, day of month + 40.
    DNummer,
}

impl NorwegianFormat {
    pub const ALL: [Self; 2] = [Self::Fodselsnummer, Self::DNummer];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        super::pick(rng, &Self::ALL)
    }

    fn day_offset(self) -> u32 {
        match self {
            Self::Fodselsnummer => 0,
            Self::DNummer => D_NUMBER_DAY_OFFSET,
        }
    }
}

/// Generate a fødselsnummer or D-number, chosen at random.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    birthday: NaiveDate,
    sex: Sex,
) -> Result<CivicOutcome, GenerationError> {
    let format = NorwegianFormat::random(rng);
    debug!(?format, %birthday, "generating Norwegian civic number");
    generate_with_format(rng, birthday, sex, format)
}

/// Generate a number in the given format.
///
/// Individual numbers whose check digit would be 10 are discarded and a new
/// one is drawn, up to [`MAX_ATTEMPTS`] times.
///
/// # Errors
///
/// Returns [`GenerationError::GenerationExhausted`] if every candidate was
/// rejected.
pub fn generate_with_format<R: Rng + ?Sized>(
    rng: &mut R,
    birthday: NaiveDate,
    sex: Sex,
    format: NorwegianFormat,
) -> Result<CivicOutcome, GenerationError> {
    let mut date = Vec::with_capacity(6);
    push_digits(&mut date, birthday.day() + format.day_offset(), 2);
    push_digits(&mut date, birthday.month(), 2);
    push_digits(&mut date, birthday.year().rem_euclid(100) as u32, 2);

    for attempt in 0..MAX_ATTEMPTS {
        let individual = 2 * rng.random_range(0..INDIVIDUAL_SPAN / 2) + sex.parity();
        match complete_number(&date, individual) {
            Some(digits) => {
                let number: String = digits.iter().map(|&d| char::from(b'0' + d)).collect();
                return Ok(CivicOutcome {
                    number: CivicNumber::new(number),
                    format: CivicFormat::Norwegian(format),
                    birthday,
                });
            }
            None => trace!(attempt, individual, "check digit would be 10, resampling"),
        }
    }

    Err(GenerationError::GenerationExhausted {
        country: Country::Norway,
        attempts: MAX_ATTEMPTS,
    })
}

/// Append the individual number and both check digits to the date digits.
fn complete_number(date: &[u8], individual: u32) -> Option<[u8; 11]> {
    let mut digits = date.to_vec();
    push_digits(&mut digits, individual, 3);

    let first: [u8; 9] = std::array::from_fn(|i| digits[i]);
    digits.push(weighted_mod11(&first, &K1_WEIGHTS)?);

    let second: [u8; 10] = std::array::from_fn(|i| digits[i]);
    digits.push(weighted_mod11(&second, &K2_WEIGHTS)?);

    Some(std::array::from_fn(|i| digits[i]))
}

/// Validate a fødselsnummer or D-number and report which one it is.
///
/// The century is not encoded, so 29 February is accepted for any year.
pub fn validate(value: &str) -> Result<NorwegianFormat, CivicNumberError> {
    let digits = parse_digits(value)
        .filter(|d| d.len() == 11)
        .ok_or_else(|| CivicNumberError::new(value, "expected 11 digits"))?;

    let day = u32::from(digits[0] * 10 + digits[1]);
    let month = u32::from(digits[2] * 10 + digits[3]);
    let (format, real_day) = if day > D_NUMBER_DAY_OFFSET {
        (NorwegianFormat::DNummer, day - D_NUMBER_DAY_OFFSET)
    } else {
        (NorwegianFormat::Fodselsnummer, day)
    };
    if NaiveDate::from_ymd_opt(2000, month, real_day).is_none() {
        return Err(CivicNumberError::new(
            value,
            format!("day {day} and month {month} do not form a date"),
        ));
    }

    let first: [u8; 9] = std::array::from_fn(|i| digits[i]);
    if weighted_mod11(&first, &K1_WEIGHTS) != Some(digits[9]) {
        return Err(CivicNumberError::new(value, "first check digit mismatch"));
    }
    let second: [u8; 10] = std::array::from_fn(|i| digits[i]);
    if weighted_mod11(&second, &K2_WEIGHTS) != Some(digits[10]) {
        return Err(CivicNumberError::new(value, "second check digit mismatch"));
    }

    Ok(format)
}
