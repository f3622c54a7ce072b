//! Registry-backed Swedish generation with offline fallback.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, warn};

use super::skatteverket::{RegistryConfig, SkatteverketClient};
use crate::civic::{self, CivicFormat, CivicNumber, CivicOutcome, SwedishFormat, sweden};
use crate::core::assembler::base_fields;
use crate::core::{
    Country, FakerProvider, GenerationError, Person, PersonDataProvider, PersonOptions, Sex,
    generate_person_with,
};

/// Time allowed for a single registry query.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Failure talking to a sample-number registry.
///
/// Never returned from person generation: any lookup failure switches to
/// synthetic generation instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LookupError {
    /// Network or HTTP error.
    #[error("registry network error: {0}")]
    Network(String),
    /// The registry answered with an error status.
    #[error("registry API error: {0}")]
    Api(String),
    /// The response body could not be understood.
    #[error("registry parse error: {0}")]
    Parse(String),
    /// The query did not finish in time.
    #[error("registry lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// Date prefix used to query the registry, from most to least specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePattern {
    /// `YYYYMMDD`
    Full(NaiveDate),
    /// `YYYYMM`
    YearMonth { year: i32, month: u32 },
    /// `YYYY`
    Year(i32),
}

impl DatePattern {
    /// Patterns tried for `birthday`, in order.
    pub fn cascade(birthday: NaiveDate) -> [Self; 3] {
        [
            Self::Full(birthday),
            Self::YearMonth {
                year: birthday.year(),
                month: birthday.month(),
            },
            Self::Year(birthday.year()),
        ]
    }

    /// The number prefix this pattern matches.
    pub fn prefix(&self) -> String {
        match self {
            Self::Full(date) => date.format("%Y%m%d").to_string(),
            Self::YearMonth { year, month } => format!("{year:04}{month:02}"),
            Self::Year(year) => format!("{year:04}"),
        }
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix())
    }
}

/// A source of real sample (test) civic numbers.
pub trait SampleNumberLookup {
    /// Find a number whose date starts with `pattern` and whose gender digit
    /// matches `sex`. `Ok(None)` means the registry has no such number.
    fn lookup_sample_number(
        &self,
        pattern: &DatePattern,
        sex: Sex,
    ) -> impl Future<Output = Result<Option<String>, LookupError>> + Send;
}

/// Swedish number generation that prefers registry sample numbers.
///
/// The registry is queried for the full birth date, then the year and month,
/// then the year alone. The first hit wins, and the person's birthday is
/// moved to the date that number encodes. When every pattern comes back
/// empty, or any query fails or times out, a synthetic TF-number is used.
///
/// Queries use `tokio::time::timeout` and must run inside a Tokio runtime.
#[derive(Debug, Clone)]
pub struct RegistryBackedGenerator<L> {
    lookup: L,
    timeout: Duration,
}

impl<L: SampleNumberLookup> RegistryBackedGenerator<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    /// Time allowed per query (default: 10 s).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Generate a Swedish civic number for `birthday` and `sex`.
    ///
    /// # Errors
    ///
    /// Only [`GenerationError::UnencodableBirthDate`], from the synthetic
    /// fallback. Registry failures are logged and recovered.
    pub async fn swedish_number(
        &self,
        birthday: NaiveDate,
        sex: Sex,
    ) -> Result<CivicOutcome, GenerationError> {
        match self.query_cascade(birthday, sex).await {
            Ok(Some(outcome)) => return Ok(outcome),
            Ok(None) => debug!(%birthday, "no registry sample number, using TF-number"),
            Err(error) => warn!(%error, "registry lookup failed, using TF-number"),
        }
        sweden::generate_tf_number(birthday, sex)
    }

    async fn query_cascade(
        &self,
        birthday: NaiveDate,
        sex: Sex,
    ) -> Result<Option<CivicOutcome>, LookupError> {
        for pattern in DatePattern::cascade(birthday) {
            debug!(%pattern, ?sex, "querying sample number registry");
            let found = tokio::time::timeout(self.timeout, self.lookup.lookup_sample_number(&pattern, sex))
                .await
                .map_err(|_| LookupError::Timeout(self.timeout))??;
            if let Some(raw) = found {
                return accept_sample(&raw, &pattern, sex).map(Some);
            }
        }
        Ok(None)
    }

    /// Generate a person, taking Swedish civic numbers from the registry.
    ///
    /// Other countries use the offline generators unchanged.
    pub async fn person<P, R>(
        &self,
        options: &PersonOptions,
        provider: &P,
        rng: &mut R,
    ) -> Result<Person, GenerationError>
    where
        P: PersonDataProvider,
        R: Rng + ?Sized,
    {
        let base = base_fields(options, provider, rng)?;
        let outcome = match options.country() {
            Country::Sweden => self.swedish_number(base.birthday, base.sex).await?,
            country => civic::generate_civic_number(rng, country, base.birthday, base.sex)?,
        };
        Ok(base.into_person(outcome))
    }
}

/// Check a registry answer before trusting it.
fn accept_sample(raw: &str, pattern: &DatePattern, sex: Sex) -> Result<CivicOutcome, LookupError> {
    let raw = raw.trim();
    let invalid = |reason: String| LookupError::Parse(format!("sample number '{raw}': {reason}"));

    let format = sweden::validate(raw).map_err(|e| invalid(e.reason))?;
    if format == SwedishFormat::TfNummer {
        return Err(invalid("registry returned a TF-number".into()));
    }
    if !raw.starts_with(&pattern.prefix()) {
        return Err(invalid(format!("does not match pattern {pattern}")));
    }
    if sweden::sex_of(raw) != Some(sex) {
        return Err(invalid(format!("gender digit does not match {sex:?}")));
    }
    let birthday = sweden::decode_birth_date(raw).ok_or_else(|| invalid("no birth date".into()))?;

    Ok(CivicOutcome {
        number: CivicNumber::new(raw),
        format: CivicFormat::Swedish(format),
        birthday,
    })
}

/// Generate a person, using the Skatteverket test-number registry for
/// Swedish civic numbers.
///
/// Falls back to fully offline generation if the HTTP client cannot be built.
pub async fn generate_person_with_registry(options: &PersonOptions) -> Result<Person, GenerationError> {
    let provider = FakerProvider::new(options.language_choice());
    let mut rng = ChaCha8Rng::from_rng(&mut rand::rng());

    match SkatteverketClient::new(RegistryConfig::default()) {
        Ok(client) => {
            let timeout = client.config().timeout;
            RegistryBackedGenerator::new(client)
                .with_timeout(timeout)
                .person(options, &provider, &mut rng)
                .await
        }
        Err(error) => {
            warn!(%error, "registry client unavailable, generating offline");
            generate_person_with(options, &provider, &mut rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn cascade_order_and_prefixes() {
        let prefixes: Vec<String> = DatePattern::cascade(date(1990, 5, 4))
            .iter()
            .map(DatePattern::prefix)
            .collect();
        assert_eq!(prefixes, ["19900504", "199005", "1990"]);
    }

    #[test]
    fn accepts_matching_sample() {
        let pattern = DatePattern::Full(date(1990, 5, 14));
        let outcome = accept_sample("199005142394", &pattern, Sex::Male).unwrap();
        assert_eq!(outcome.birthday, date(1990, 5, 14));
        assert_eq!(
            outcome.format,
            CivicFormat::Swedish(SwedishFormat::Personnummer)
        );
    }

    #[test]
    fn coordination_sample_decodes_real_day() {
        let pattern = DatePattern::YearMonth {
            year: 1990,
            month: 5,
        };
        let outcome = accept_sample("199005741245", &pattern, Sex::Female).unwrap();
        assert_eq!(outcome.birthday, date(1990, 5, 14));
        assert_eq!(
            outcome.format,
            CivicFormat::Swedish(SwedishFormat::Samordningsnummer)
        );
    }

    #[test]
    fn rejects_mismatched_samples() {
        let pattern = DatePattern::Full(date(1990, 5, 14));
        // wrong sex
        assert!(accept_sample("199005142386", &pattern, Sex::Male).is_err());
        // bad check digit
        assert!(accept_sample("199005142395", &pattern, Sex::Male).is_err());
        // different day
        assert!(accept_sample("199005031233", &pattern, Sex::Male).is_err());
        // TF-number
        assert!(accept_sample("19900514TF10", &pattern, Sex::Male).is_err());
    }
}
