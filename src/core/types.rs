use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::GenerationError;
use crate::civic::CivicNumber;

/// Countries with a civic number generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    Sweden,
    Norway,
    Spain,
}

impl Country {
    /// All supported countries.
    pub const ALL: [Self; 3] = [Self::Sweden, Self::Norway, Self::Spain];

    /// ISO 3166-1 alpha-2 code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Sweden => "SE",
            Self::Norway => "NO",
            Self::Spain => "ES",
        }
    }

    /// English country name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sweden => "Sweden",
            Self::Norway => "Norway",
            Self::Spain => "Spain",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the English name or the ISO alpha-2 code, case-insensitively.
impl FromStr for Country {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(needle) || c.code().eq_ignore_ascii_case(needle))
            .ok_or_else(|| GenerationError::UnsupportedCountry(needle.to_string()))
    }
}

/// Binary sex as encoded by the Swedish and Norwegian number formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Pick either sex with equal probability.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Self::Female
        } else {
            Self::Male
        }
    }

    /// Parity digit convention: odd for male, even for female.
    pub fn from_digit(digit: u8) -> Self {
        if digit % 2 == 1 {
            Self::Male
        } else {
            Self::Female
        }
    }

    pub(crate) fn parity(self) -> u32 {
        match self {
            Self::Male => 1,
            Self::Female => 0,
        }
    }
}

/// How [`AgeConstraints`] bounds are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeMode {
    /// Bounds are ages in whole years relative to the reference date.
    Age,
    /// Bounds are calendar years of birth.
    Year,
}

/// Bounds for a random birth date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeConstraints {
    min: u32,
    max: u32,
    mode: AgeMode,
}

impl AgeConstraints {
    /// Ages 18–80, used when no constraints are given.
    pub const DEFAULT: Self = Self {
        min: 18,
        max: 80,
        mode: AgeMode::Age,
    };

    /// Persons aged between `min` and `max` years (inclusive).
    pub fn age(min: u32, max: u32) -> Result<Self, GenerationError> {
        Self::checked(min, max, AgeMode::Age)
    }

    /// Persons born between the years `min` and `max` (inclusive).
    pub fn year(min: u32, max: u32) -> Result<Self, GenerationError> {
        if max > 9999 {
            return Err(GenerationError::InvalidAgeConstraints(format!(
                "birth year {max} is beyond 9999"
            )));
        }
        Self::checked(min, max, AgeMode::Year)
    }

    fn checked(min: u32, max: u32, mode: AgeMode) -> Result<Self, GenerationError> {
        if min > max {
            return Err(GenerationError::InvalidAgeConstraints(format!(
                "min {min} is greater than max {max}"
            )));
        }
        Ok(Self { min, max, mode })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn mode(&self) -> AgeMode {
        self.mode
    }
}

impl Default for AgeConstraints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Faker locale used for names, addresses and phone numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    French,
    German,
    BrazilianPortuguese,
    Japanese,
    SimplifiedChinese,
    TraditionalChinese,
    Arabic,
}

impl Language {
    /// Resolve a locale code such as `"en"`, `"de"` or `"pt_BR"`.
    ///
    /// Region suffixes are optional where only one region is supported
    /// (`"de_DE"` and `"de"` are equivalent).
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().replace('-', "_").to_ascii_lowercase();
        let lang = match code.as_str() {
            "en" | "en_us" | "en_gb" => Self::English,
            "fr" | "fr_fr" => Self::French,
            "de" | "de_de" => Self::German,
            "pt_br" => Self::BrazilianPortuguese,
            "ja" | "ja_jp" => Self::Japanese,
            "zh_cn" => Self::SimplifiedChinese,
            "zh_tw" => Self::TraditionalChinese,
            "ar" | "ar_sa" => Self::Arabic,
            _ => return None,
        };
        Some(lang)
    }
}

/// Postal address of a generated person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: Country,
}

/// A generated fake person.
///
/// `birthday` always agrees with the date encoded in `civic_no` where the
/// number format carries one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub sex: Sex,
    pub birthday: NaiveDate,
    pub civic_no: CivicNumber,
    pub phone: String,
    pub email: String,
    pub address: Address,
}
