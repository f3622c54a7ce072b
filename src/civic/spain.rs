//! Spanish DNI and NIE.
//!
//! Both formats end in a control letter taken from [`CONTROL_LETTERS`] at the
//! index `number mod 23`. An NIE replaces its leading X/Y/Z with 0/1/2 before
//! the modulus is taken. Neither format encodes a birth date or sex.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CivicFormat, CivicNumber, CivicOutcome};
use crate::core::CivicNumberError;

/// Control letter alphabet, indexed by `number mod 23`.
pub const CONTROL_LETTERS: &[u8; 23] = b"TRWAGMYFPDXBNJZSQVHLCKE";

/// NIE prefixes in the order of the digit they stand for.
pub const NIE_PREFIXES: [char; 3] = ['X', 'Y', 'Z'];

const DNI_SPAN: u32 = 100_000_000;
const NIE_SPAN: u32 = 10_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpanishFormat {
    /// Documento Nacional de Identidad: 8 digits + letter.
    Dni,
    /// Número de Identidad de Extranjero: X/Y/Z + 7 digits + letter.
    Nie,
}

impl SpanishFormat {
    pub const ALL: [Self; 2] = [Self::Dni, Self::Nie];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        super::pick(rng, &Self::ALL)
    }
}

/// Generate a DNI or NIE, chosen at random.
///
/// `birthday` is carried through to the outcome unchanged.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, birthday: NaiveDate) -> CivicOutcome {
    let format = SpanishFormat::random(rng);
    debug!(?format, "generating Spanish civic number");
    generate_with_format(rng, birthday, format)
}

pub fn generate_with_format<R: Rng + ?Sized>(
    rng: &mut R,
    birthday: NaiveDate,
    format: SpanishFormat,
) -> CivicOutcome {
    let number = match format {
        SpanishFormat::Dni => dni_from_number(rng.random_range(0..DNI_SPAN)),
        SpanishFormat::Nie => {
            let prefix = super::pick(rng, &NIE_PREFIXES);
            nie_from_parts(prefix, rng.random_range(0..NIE_SPAN))
        }
    };

    CivicOutcome {
        number: CivicNumber::new(number),
        format: CivicFormat::Spanish(format),
        birthday,
    }
}

/// Control letter for `number`.
pub fn control_letter(number: u32) -> char {
    char::from(CONTROL_LETTERS[(number % 23) as usize])
}

/// Format a DNI from its numeric part.
///
/// Values above 99 999 999 are reduced modulo 10⁸.
///
/// ```
/// assert_eq!(civicgen::civic::spain::dni_from_number(12_345_678), "12345678Z");
/// ```
pub fn dni_from_number(number: u32) -> String {
    let number = number % DNI_SPAN;
    format!("{number:08}{}", control_letter(number))
}

/// Format an NIE from its prefix letter and 7-digit number.
///
/// The control letter is computed over the prefix digit followed by the
/// number (`X1234567` is checked as `01234567`). Unknown prefixes are treated
/// as `X`, and numbers are reduced modulo 10⁷.
pub fn nie_from_parts(prefix: char, number: u32) -> String {
    let prefix_digit = nie_prefix_digit(prefix).unwrap_or(0);
    let prefix = NIE_PREFIXES[prefix_digit as usize];
    let number = number % NIE_SPAN;
    let letter = control_letter(prefix_digit * NIE_SPAN + number);
    format!("{prefix}{number:07}{letter}")
}

fn nie_prefix_digit(prefix: char) -> Option<u32> {
    NIE_PREFIXES
        .iter()
        .position(|&p| p == prefix.to_ascii_uppercase())
        .map(|i| i as u32)
}

/// Validate a DNI or NIE and report which one it is.
///
/// Letters must be upper case; separators are not accepted.
pub fn validate(value: &str) -> Result<SpanishFormat, CivicNumberError> {
    if value.len() != 9 || !value.is_ascii() {
        return Err(CivicNumberError::new(value, "expected 9 ASCII characters"));
    }

    let (format, prefix_digit, digits) = match value.chars().next() {
        Some(c @ ('X' | 'Y' | 'Z')) => (SpanishFormat::Nie, nie_prefix_digit(c), &value[1..8]),
        _ => (SpanishFormat::Dni, Some(0), &value[..8]),
    };
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CivicNumberError::new(value, "number part must be digits"));
    }
    let number: u32 = digits
        .parse()
        .map_err(|_| CivicNumberError::new(value, "number part must be digits"))?;
    let full = prefix_digit.unwrap_or(0) * NIE_SPAN + number;

    let expected = control_letter(full);
    let actual = value.chars().last().unwrap_or_default();
    if actual != expected {
        return Err(CivicNumberError::new(
            value,
            format!("control letter should be '{expected}', found '{actual}'"),
        ));
    }

    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn birthday() -> NaiveDate {
        NaiveDate::from_ymd_opt(1980, 1, 1).unwrap()
    }

    #[test]
    fn known_dni() {
        // 12345678 mod 23 = 14 → 'Z'
        assert_eq!(dni_from_number(12_345_678), "12345678Z");
        assert_eq!(dni_from_number(0), "00000000T");
        assert_eq!(dni_from_number(5), "00000005M");
    }

    #[test]
    fn known_nie() {
        // X1234567 → 01234567 mod 23 = 19 → 'L'
        assert_eq!(nie_from_parts('X', 1_234_567), "X1234567L");
        // Y1234567 → 11234567 mod 23 = 10 → 'X'
        assert_eq!(nie_from_parts('Y', 1_234_567), "Y1234567X");
        // Z1234567 → 21234567 mod 23 = 1 → 'R'
        assert_eq!(nie_from_parts('Z', 1_234_567), "Z1234567R");
    }

    #[test]
    fn nie_prefix_is_case_insensitive() {
        assert_eq!(nie_from_parts('y', 0), nie_from_parts('Y', 0));
    }

    #[test]
    fn generated_numbers_validate() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for format in SpanishFormat::ALL {
            for _ in 0..100 {
                let out = generate_with_format(&mut rng, birthday(), format);
                assert_eq!(validate(out.number.as_str()), Ok(format));
                assert_eq!(out.number.as_str().len(), 9);
            }
        }
    }

    #[test]
    fn validate_rejects_wrong_letter() {
        assert!(validate("12345678Z").is_ok());
        assert!(validate("12345678M").is_err());
        assert!(validate("X1234567L").is_ok());
        // control letter computed without the prefix substitution
        assert!(validate("Y1234567L").is_err());
    }

    #[test]
    fn validate_rejects_malformed() {
        assert!(validate("").is_err());
        assert!(validate("1234567Z").is_err());
        assert!(validate("1234A678Z").is_err());
        assert!(validate("W1234567L").is_err());
        assert!(validate("12345678ñ").is_err());
    }
}
