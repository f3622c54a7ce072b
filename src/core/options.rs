use chrono::NaiveDate;
use tracing::warn;

use super::types::{AgeConstraints, Country, Language, Sex};

/// Options for [`generate_person`](super::generate_person).
///
/// ```
/// use civicgen::core::*;
///
/// let options = PersonOptions::new(Country::Norway)
///     .language("de")
///     .sex(Sex::Female)
///     .age(AgeConstraints::age(25, 40).unwrap());
///
/// assert_eq!(options.country(), Country::Norway);
/// assert_eq!(options.language_choice(), Language::German);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonOptions {
    country: Country,
    language: Language,
    sex: Option<Sex>,
    age: Option<AgeConstraints>,
    reference_date: Option<NaiveDate>,
}

impl PersonOptions {
    /// English names, random sex, ages 18–80 relative to today.
    pub fn new(country: Country) -> Self {
        Self {
            country,
            language: Language::English,
            sex: None,
            age: None,
            reference_date: None,
        }
    }

    /// Set the faker locale by code (e.g. `"en"`, `"fr"`, `"pt_BR"`).
    ///
    /// Unknown codes keep English and log a warning.
    pub fn language(mut self, code: &str) -> Self {
        match Language::from_code(code) {
            Some(language) => self.language = language,
            None => {
                warn!(code, "unsupported language, falling back to English");
                self.language = Language::English;
            }
        }
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn sex(mut self, sex: Sex) -> Self {
        self.sex = Some(sex);
        self
    }

    pub fn age(mut self, constraints: AgeConstraints) -> Self {
        self.age = Some(constraints);
        self
    }

    /// Date that ages are measured from (default: today, UTC).
    pub fn reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn country(&self) -> Country {
        self.country
    }

    pub fn language_choice(&self) -> Language {
        self.language
    }

    pub fn requested_sex(&self) -> Option<Sex> {
        self.sex
    }

    pub fn age_constraints(&self) -> AgeConstraints {
        self.age.unwrap_or_default()
    }

    pub fn resolved_reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}
