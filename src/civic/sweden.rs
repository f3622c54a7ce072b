//! Swedish personnummer, samordningsnummer and TF-number.
//!
//! All three are written in the 12-character long form starting with
//! `YYYYMMDD`. Personnummer and samordningsnummer continue with a 3-digit
//! serial (last digit odd for men, even for women) and a Luhn check digit
//! computed over the 9-digit short form `YYMMDDNNN`. A samordningsnummer adds
//! 60 to the day of month.
//!
//! TF-numbers are placeholder numbers assigned in healthcare. They are
//! written as `YYYYMMDDTF` followed by `10` for men and `20` for women.

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CivicFormat, CivicNumber, CivicOutcome};
use crate::core::checksum::{luhn_check_digit, parse_digits, push_digits};
use crate::core::{CivicNumberError, GenerationError, Sex};

/// Added to the day of month in a samordningsnummer.
pub const COORDINATION_DAY_OFFSET: u32 = 60;

const MALE_TF_SUFFIX: &str = "10";
const FEMALE_TF_SUFFIX: &str = "20";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwedishFormat {
    Personnummer,
    /// Coordination number, day of month + 60.
    Samordningsnummer,
    /// Temporary placeholder number.
    TfNummer,
}

impl SwedishFormat {
    pub const ALL: [Self; 3] = [Self::Personnummer, Self::Samordningsnummer, Self::TfNummer];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        super::pick(rng, &Self::ALL)
    }
}

/// Generate a Swedish civic number in a randomly chosen format.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    birthday: NaiveDate,
    sex: Sex,
) -> Result<CivicOutcome, GenerationError> {
    let format = SwedishFormat::random(rng);
    debug!(?format, %birthday, "generating Swedish civic number");
    generate_with_format(rng, birthday, sex, format)
}

/// Generate a Swedish civic number in the given format.
///
/// # Errors
///
/// Returns [`GenerationError::UnencodableBirthDate`] if the year of birth
/// does not fit in four digits.
pub fn generate_with_format<R: Rng + ?Sized>(
    rng: &mut R,
    birthday: NaiveDate,
    sex: Sex,
    format: SwedishFormat,
) -> Result<CivicOutcome, GenerationError> {
    if !(0..=9999).contains(&birthday.year()) {
        return Err(GenerationError::UnencodableBirthDate(birthday));
    }

    let number = match format {
        SwedishFormat::Personnummer => luhn_number(rng, birthday, sex, 0),
        SwedishFormat::Samordningsnummer => {
            luhn_number(rng, birthday, sex, COORDINATION_DAY_OFFSET)
        }
        SwedishFormat::TfNummer => return generate_tf_number(birthday, sex),
    };

    Ok(CivicOutcome {
        number: CivicNumber::new(number),
        format: CivicFormat::Swedish(format),
        birthday,
    })
}

/// Build the TF-number for `birthday` and `sex`.
///
/// Needs no randomness: the suffix is fixed per sex.
pub fn generate_tf_number(birthday: NaiveDate, sex: Sex) -> Result<CivicOutcome, GenerationError> {
    if !(0..=9999).contains(&birthday.year()) {
        return Err(GenerationError::UnencodableBirthDate(birthday));
    }
    let suffix = match sex {
        Sex::Male => MALE_TF_SUFFIX,
        Sex::Female => FEMALE_TF_SUFFIX,
    };
    let number = format!(
        "{:04}{:02}{:02}TF{suffix}",
        birthday.year(),
        birthday.month(),
        birthday.day()
    );

    Ok(CivicOutcome {
        number: CivicNumber::new(number),
        format: CivicFormat::Swedish(SwedishFormat::TfNummer),
        birthday,
    })
}

fn luhn_number<R: Rng + ?Sized>(rng: &mut R, birthday: NaiveDate, sex: Sex, day_offset: u32) -> String {
    let year = birthday.year() as u32;
    let month = birthday.month();
    let day = birthday.day() + day_offset;
    let serial = rng.random_range(0..100u32) * 10 + 2 * rng.random_range(0..5u32) + sex.parity();

    let mut short = Vec::with_capacity(9);
    push_digits(&mut short, year % 100, 2);
    push_digits(&mut short, month, 2);
    push_digits(&mut short, day, 2);
    push_digits(&mut short, serial, 3);
    let check = luhn_check_digit(&short);

    format!("{year:04}{month:02}{day:02}{serial:03}{check}")
}

/// Validate a 12-character Swedish civic number and report its format.
pub fn validate(value: &str) -> Result<SwedishFormat, CivicNumberError> {
    decode(value).map(|(format, _)| format)
}

/// The real birth date encoded in a valid Swedish civic number.
///
/// The samordningsnummer day offset is removed.
pub fn decode_birth_date(value: &str) -> Option<NaiveDate> {
    decode(value).ok().map(|(_, date)| date)
}

/// The sex encoded in a valid Swedish civic number.
pub fn sex_of(value: &str) -> Option<Sex> {
    match validate(value).ok()? {
        SwedishFormat::TfNummer if value.ends_with(MALE_TF_SUFFIX) => Some(Sex::Male),
        SwedishFormat::TfNummer => Some(Sex::Female),
        _ => Some(Sex::from_digit(value.as_bytes()[10] - b'0')),
    }
}

fn decode(value: &str) -> Result<(SwedishFormat, NaiveDate), CivicNumberError> {
    if value.len() != 12 || !value.is_ascii() {
        return Err(CivicNumberError::new(value, "expected 12 ASCII characters"));
    }

    if &value[8..10] == "TF" {
        let date = parse_date(value, 0)?;
        let suffix = &value[10..];
        if suffix != MALE_TF_SUFFIX && suffix != FEMALE_TF_SUFFIX {
            return Err(CivicNumberError::new(
                value,
                format!("unknown TF suffix '{suffix}'"),
            ));
        }
        return Ok((SwedishFormat::TfNummer, date));
    }

    let digits = parse_digits(value)
        .ok_or_else(|| CivicNumberError::new(value, "expected 12 digits or a TF-number"))?;
    let encoded_day = u32::from(digits[6] * 10 + digits[7]);
    let (format, offset) = if encoded_day > COORDINATION_DAY_OFFSET {
        (SwedishFormat::Samordningsnummer, COORDINATION_DAY_OFFSET)
    } else {
        (SwedishFormat::Personnummer, 0)
    };
    let date = parse_date(value, offset)?;

    let expected = luhn_check_digit(&digits[2..11]);
    if digits[11] != expected {
        return Err(CivicNumberError::new(
            value,
            format!("check digit should be {expected}, found {}", digits[11]),
        ));
    }

    Ok((format, date))
}

/// Parse the leading `YYYYMMDD`, subtracting `day_offset` from the day.
fn parse_date(value: &str, day_offset: u32) -> Result<NaiveDate, CivicNumberError> {
    let field = |range: std::ops::Range<usize>| -> Result<u32, CivicNumberError> {
        parse_digits(&value[range])
            .map(|digits| digits.iter().fold(0, |acc, &d| acc * 10 + u32::from(d)))
            .ok_or_else(|| CivicNumberError::new(value, "date part must be digits"))
    };
    let year = field(0..4)?;
    let month = field(4..6)?;
    let day = field(6..8)?.saturating_sub(day_offset);

    NaiveDate::from_ymd_opt(year as i32, month, day).ok_or_else(|| {
        CivicNumberError::new(value, format!("{year:04}-{month:02}-{day:02} is not a date"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn personnummer_layout() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let out = generate_with_format(&mut rng, date(1981, 12, 18), Sex::Male, SwedishFormat::Personnummer)
            .unwrap();
        let s = out.number.as_str();
        assert_eq!(s.len(), 12);
        assert!(s.starts_with("19811218"));
        assert_eq!((s.as_bytes()[10] - b'0') % 2, 1);
        assert_eq!(validate(s), Ok(SwedishFormat::Personnummer));
        assert_eq!(sex_of(s), Some(Sex::Male));
    }

    #[test]
    fn samordningsnummer_offsets_day() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let out = generate_with_format(&mut rng, date(1990, 3, 31), Sex::Female, SwedishFormat::Samordningsnummer)
            .unwrap();
        let s = out.number.as_str();
        assert!(s.starts_with("19900391"));
        assert_eq!(validate(s), Ok(SwedishFormat::Samordningsnummer));
        assert_eq!(decode_birth_date(s), Some(date(1990, 3, 31)));
        assert_eq!(sex_of(s), Some(Sex::Female));
        assert_eq!(out.birthday, date(1990, 3, 31));
    }

    #[test]
    fn tf_number_encodes_sex() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let male = generate_with_format(&mut rng, date(2004, 7, 1), Sex::Male, SwedishFormat::TfNummer).unwrap();
        let female = generate_with_format(&mut rng, date(2004, 7, 1), Sex::Female, SwedishFormat::TfNummer).unwrap();
        assert_eq!(male.number.as_str(), "20040701TF10");
        assert_eq!(female.number.as_str(), "20040701TF20");
        assert_eq!(sex_of(male.number.as_str()), Some(Sex::Male));
        assert_eq!(sex_of(female.number.as_str()), Some(Sex::Female));
        assert_eq!(validate("20040701TF30").ok(), None);
    }

    #[test]
    fn known_personnummer_validates() {
        // 811218-9876 in long form
        assert_eq!(validate("198112189876"), Ok(SwedishFormat::Personnummer));
        assert_eq!(decode_birth_date("198112189876"), Some(date(1981, 12, 18)));
        assert!(validate("198112189877").is_err());
    }

    #[test]
    fn rejects_impossible_dates() {
        // 1981-02-30
        assert!(validate("198102309876").is_err());
        // encoded day 92 → real day 32
        assert!(validate("198101929876").is_err());
        // day 00
        assert!(validate("198101009876").is_err());
        assert!(validate("19810101TF1").is_err());
        assert!(validate("198113XXTF10").is_err());
    }

    #[test]
    fn five_digit_year_is_unencodable() {
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let birthday = date(10_000, 1, 1);
        let err = generate_with_format(&mut rng, birthday, Sex::Male, SwedishFormat::Personnummer).unwrap_err();
        assert!(matches!(err, GenerationError::UnencodableBirthDate(d) if d == birthday));
    }
}
