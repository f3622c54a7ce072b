use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::error::GenerationError;
use super::options::PersonOptions;
use super::provider::{FakerProvider, PersonDataProvider};
use super::types::{Address, Person, Sex};
use crate::civic::{self, CivicOutcome};

/// Generate a fake person using the thread-local RNG.
///
/// ```
/// use civicgen::core::*;
///
/// let person = generate_person(&PersonOptions::new(Country::Sweden).sex(Sex::Female)).unwrap();
/// assert_eq!(person.sex, Sex::Female);
/// assert_eq!(person.address.country, Country::Sweden);
/// ```
///
/// # Errors
///
/// See [`generate_person_with`].
pub fn generate_person(options: &PersonOptions) -> Result<Person, GenerationError> {
    let provider = FakerProvider::new(options.language_choice());
    generate_person_with(options, &provider, &mut rand::rng())
}

/// Generate a fake person from a fixed seed.
///
/// The same seed, options and reference date always produce the same person.
pub fn generate_person_seeded(options: &PersonOptions, seed: u64) -> Result<Person, GenerationError> {
    let provider = FakerProvider::new(options.language_choice());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_person_with(options, &provider, &mut rng)
}

/// Generate a fake person with an explicit data provider and RNG.
///
/// # Errors
///
/// - [`GenerationError::InvalidAgeConstraints`] if no birth date satisfies
///   the age constraints.
/// - [`GenerationError::GenerationExhausted`] if the country generator ran
///   out of attempts.
/// - [`GenerationError::UnencodableBirthDate`] if the birth date cannot be
///   written in the chosen number format.
pub fn generate_person_with<P, R>(
    options: &PersonOptions,
    provider: &P,
    rng: &mut R,
) -> Result<Person, GenerationError>
where
    P: PersonDataProvider,
    R: Rng + ?Sized,
{
    let base = base_fields(options, provider, rng)?;
    let outcome = civic::generate_civic_number(rng, options.country(), base.birthday, base.sex)?;
    debug!(country = %options.country(), format = ?outcome.format, "generated person");

    Ok(base.into_person(outcome))
}

/// Provider-sourced fields, drawn before the civic number.
pub(crate) struct BaseFields {
    pub(crate) sex: Sex,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) address: Address,
    pub(crate) birthday: chrono::NaiveDate,
    pub(crate) phone: String,
    pub(crate) email: String,
}

impl BaseFields {
    /// Merge with a civic number, taking the birthday the number encodes.
    pub(crate) fn into_person(self, outcome: CivicOutcome) -> Person {
        Person {
            first_name: self.first_name,
            last_name: self.last_name,
            sex: self.sex,
            birthday: outcome.birthday,
            civic_no: outcome.number,
            phone: self.phone,
            email: self.email,
            address: self.address,
        }
    }
}

pub(crate) fn base_fields<P, R>(
    options: &PersonOptions,
    provider: &P,
    rng: &mut R,
) -> Result<BaseFields, GenerationError>
where
    P: PersonDataProvider,
    R: Rng + ?Sized,
{
    let sex = options.requested_sex().unwrap_or_else(|| Sex::random(rng));
    let first_name = provider.first_name(rng, sex);
    let last_name = provider.last_name(rng, sex);
    let address = Address {
        street: provider.street_address(rng),
        city: provider.city(rng),
        state: provider.state(rng),
        country: options.country(),
    };
    let birthday = provider.birthdate(
        rng,
        &options.age_constraints(),
        options.resolved_reference_date(),
    )?;
    let phone = provider.phone_number(rng);
    let email = provider.email(rng, &first_name, &last_name);

    Ok(BaseFields {
        sex,
        first_name,
        last_name,
        address,
        birthday,
        phone,
        email,
    })
}
