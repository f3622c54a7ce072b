//! Sources for the non-civic fields of a [`Person`](super::Person).

use chrono::{Days, Months, NaiveDate};
use fake::Fake;
use fake::faker::address::raw::{BuildingNumber, CityName, StateName, StreetName};
use fake::faker::internet::raw::FreeEmailProvider;
use fake::faker::name::raw::{FirstName, LastName};
use fake::faker::phone_number::raw::PhoneNumber;
use fake::locales::{AR_SA, DE_DE, Data, EN, FR_FR, JA_JP, PT_BR, ZH_CN, ZH_TW};
use rand::Rng;

use super::error::GenerationError;
use super::types::{AgeConstraints, AgeMode, Language, Sex};

/// Supplies names, addresses, contact details and birth dates.
///
/// Implementations draw all randomness from the passed RNG so that a seeded
/// RNG reproduces the same person.
pub trait PersonDataProvider {
    fn first_name<R: Rng + ?Sized>(&self, rng: &mut R, sex: Sex) -> String;

    fn last_name<R: Rng + ?Sized>(&self, rng: &mut R, sex: Sex) -> String;

    fn street_address<R: Rng + ?Sized>(&self, rng: &mut R) -> String;

    fn city<R: Rng + ?Sized>(&self, rng: &mut R) -> String;

    fn state<R: Rng + ?Sized>(&self, rng: &mut R) -> String;

    /// A birth date satisfying `constraints`, with ages measured at `reference`.
    fn birthdate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        constraints: &AgeConstraints,
        reference: NaiveDate,
    ) -> Result<NaiveDate, GenerationError> {
        let (earliest, latest) = birthdate_range(constraints, reference)?;
        random_date_between(rng, earliest, latest)
    }

    fn phone_number<R: Rng + ?Sized>(&self, rng: &mut R) -> String;

    fn email<R: Rng + ?Sized>(&self, rng: &mut R, first_name: &str, last_name: &str) -> String;
}

/// [`PersonDataProvider`] backed by the `fake` crate's locale data.
///
/// The locale word lists are not split by sex, so the `sex` argument does not
/// influence names.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakerProvider {
    language: Language,
}

impl FakerProvider {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

/// Run `$body` with `$locale` bound to the faker locale for `$lang`.
macro_rules! with_locale {
    ($lang:expr, |$locale:ident| $body:expr) => {
        match $lang {
            Language::English => fake_with(EN, |$locale| $body),
            Language::French => fake_with(FR_FR, |$locale| $body),
            Language::German => fake_with(DE_DE, |$locale| $body),
            Language::BrazilianPortuguese => fake_with(PT_BR, |$locale| $body),
            Language::Japanese => fake_with(JA_JP, |$locale| $body),
            Language::SimplifiedChinese => fake_with(ZH_CN, |$locale| $body),
            Language::TraditionalChinese => fake_with(ZH_TW, |$locale| $body),
            Language::Arabic => fake_with(AR_SA, |$locale| $body),
        }
    };
}

fn fake_with<L: Data + Copy>(locale: L, f: impl FnOnce(L) -> String) -> String {
    f(locale)
}

impl PersonDataProvider for FakerProvider {
    fn first_name<R: Rng + ?Sized>(&self, rng: &mut R, _sex: Sex) -> String {
        with_locale!(self.language, |l| FirstName(l).fake_with_rng(rng))
    }

    fn last_name<R: Rng + ?Sized>(&self, rng: &mut R, _sex: Sex) -> String {
        with_locale!(self.language, |l| LastName(l).fake_with_rng(rng))
    }

    fn street_address<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        with_locale!(self.language, |l| {
            let number: String = BuildingNumber(l).fake_with_rng(rng);
            let street: String = StreetName(l).fake_with_rng(rng);
            format!("{number} {street}")
        })
    }

    fn city<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        with_locale!(self.language, |l| CityName(l).fake_with_rng(rng))
    }

    fn state<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        with_locale!(self.language, |l| StateName(l).fake_with_rng(rng))
    }

    fn phone_number<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        with_locale!(self.language, |l| PhoneNumber(l).fake_with_rng(rng))
    }

    fn email<R: Rng + ?Sized>(&self, rng: &mut R, first_name: &str, last_name: &str) -> String {
        let domain: String = with_locale!(self.language, |l| FreeEmailProvider(l).fake_with_rng(rng));
        let local = match (email_part(first_name), email_part(last_name)) {
            (first, last) if !first.is_empty() && !last.is_empty() => {
                format!("{first}.{last}")
            }
            (first, last) if !first.is_empty() || !last.is_empty() => format!("{first}{last}"),
            _ => format!("user{}", rng.random_range(100..10_000u32)),
        };
        format!("{local}@{domain}")
    }
}

/// Lower-case ASCII alphanumerics of `name`.
fn email_part(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Earliest and latest birth dates allowed by `constraints`.
pub fn birthdate_range(
    constraints: &AgeConstraints,
    reference: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), GenerationError> {
    let out_of_range = || {
        GenerationError::InvalidAgeConstraints(format!(
            "{}–{} ({:?}) yields no representable birth date",
            constraints.min(),
            constraints.max(),
            constraints.mode()
        ))
    };

    match constraints.mode() {
        AgeMode::Age => {
            // Someone aged `max` was born after the day `max + 1` years ago.
            let earliest = reference
                .checked_sub_months(Months::new(constraints.max().saturating_add(1).saturating_mul(12)))
                .and_then(|d| d.succ_opt())
                .ok_or_else(out_of_range)?;
            let latest = reference
                .checked_sub_months(Months::new(constraints.min().saturating_mul(12)))
                .ok_or_else(out_of_range)?;
            Ok((earliest, latest))
        }
        AgeMode::Year => {
            let earliest =
                NaiveDate::from_ymd_opt(constraints.min() as i32, 1, 1).ok_or_else(out_of_range)?;
            let latest =
                NaiveDate::from_ymd_opt(constraints.max() as i32, 12, 31).ok_or_else(out_of_range)?;
            Ok((earliest, latest))
        }
    }
}

/// Uniformly random date in `earliest..=latest`.
pub fn random_date_between<R: Rng + ?Sized>(
    rng: &mut R,
    earliest: NaiveDate,
    latest: NaiveDate,
) -> Result<NaiveDate, GenerationError> {
    let span = (latest - earliest).num_days();
    if span < 0 {
        return Err(GenerationError::InvalidAgeConstraints(format!(
            "{earliest} is after {latest}"
        )));
    }
    let offset = rng.random_range(0..=span as u64);
    earliest
        .checked_add_days(Days::new(offset))
        .ok_or_else(|| GenerationError::InvalidAgeConstraints(format!("{earliest} + {offset} days overflows")))
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
    fn age_range_bounds() {
        let constraints = AgeConstraints::age(18, 80).unwrap();
        let (earliest, latest) = birthdate_range(&constraints, date(2024, 6, 15)).unwrap();
        assert_eq!(earliest, date(1943, 6, 16));
        assert_eq!(latest, date(2006, 6, 15));
    }

    #[test]
    fn age_range_handles_leap_day_reference() {
        let constraints = AgeConstraints::age(1, 1).unwrap();
        let (earliest, latest) = birthdate_range(&constraints, date(2024, 2, 29)).unwrap();
        assert_eq!(latest, date(2023, 2, 28));
        assert_eq!(earliest, date(2022, 3, 1));
    }

    #[test]
    fn year_range_bounds() {
        let constraints = AgeConstraints::year(1990, 1992).unwrap();
        let (earliest, latest) = birthdate_range(&constraints, date(2024, 6, 15)).unwrap();
        assert_eq!(earliest, date(1990, 1, 1));
        assert_eq!(latest, date(1992, 12, 31));
    }

    #[test]
    fn random_dates_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let (lo, hi) = (date(2000, 1, 1), date(2000, 1, 10));
        for _ in 0..200 {
            let d = random_date_between(&mut rng, lo, hi).unwrap();
            assert!(d >= lo && d <= hi);
        }
        assert_eq!(random_date_between(&mut rng, lo, lo).unwrap(), lo);
        assert!(random_date_between(&mut rng, hi, lo).is_err());
    }

    #[test]
    fn faker_fields_are_non_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        let provider = FakerProvider::new(Language::English);
        assert!(!provider.first_name(&mut rng, Sex::Male).is_empty());
        assert!(!provider.last_name(&mut rng, Sex::Female).is_empty());
        assert!(!provider.street_address(&mut rng).is_empty());
        assert!(!provider.city(&mut rng).is_empty());
        assert!(!provider.state(&mut rng).is_empty());
        assert!(!provider.phone_number(&mut rng).is_empty());
    }

    #[test]
    fn email_uses_names() {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let provider = FakerProvider::default();
        let email = provider.email(&mut rng, "Anna-Lena", "O'Brien");
        assert!(email.starts_with("annalena.obrien@"), "{email}");
    }

    #[test]
    fn email_without_ascii_names() {
        let mut rng = ChaCha8Rng::seed_from_u64(24);
        let provider = FakerProvider::new(Language::Japanese);
        let email = provider.email(&mut rng, "太郎", "山田");
        assert!(email.starts_with("user"), "{email}");
        assert!(email.contains('@'));
    }

    #[test]
    fn every_language_produces_names() {
        let mut rng = ChaCha8Rng::seed_from_u64(25);
        for language in [
            Language::English,
            Language::French,
            Language::German,
            Language::BrazilianPortuguese,
            Language::Japanese,
            Language::SimplifiedChinese,
            Language::TraditionalChinese,
            Language::Arabic,
        ] {
            let provider = FakerProvider::new(language);
            assert!(!provider.last_name(&mut rng, Sex::Female).is_empty(), "{language:?}");
        }
    }
}
