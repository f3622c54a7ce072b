//! # civicgen
//!
//! Fake persons with nationally valid, synthetic civic identification
//! numbers for Sweden, Norway and Spain.
//!
//! Every generated number passes the check digit algorithm used by its
//! country's identity system and agrees with the person's birth date and sex
//! where the format encodes them. Numbers are statistically random, not
//! cryptographically unpredictable.
//!
//! ## Quick Start
//!
//! ```rust
//! use civicgen::core::*;
//! use chrono::NaiveDate;
//!
//! let options = PersonOptions::new(Country::Norway)
//!     .sex(Sex::Male)
//!     .age(AgeConstraints::year(1990, 1990).unwrap())
//!     .reference_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
//!
//! let person = generate_person_seeded(&options, 42).unwrap();
//! assert_eq!(person.civic_no.as_str().len(), 11);
//! assert!(civicgen::civic::validate_civic_number(Country::Norway, person.civic_no.as_str()).is_ok());
//!
//! // Same seed, same person
//! assert_eq!(person, generate_person_seeded(&options, 42).unwrap());
//! ```
//!
//! ## Formats
//!
//! | Country | Formats |
//! |---------|---------|
//! | Sweden | personnummer, samordningsnummer (day + 60), TF-number |
//! | Norway | fødselsnummer, D-number (day + 40) |
//! | Spain | DNI, NIE |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Generators, validators, person assembly |
//! | `registry` | Swedish numbers from the Skatteverket test-number registry, with offline fallback |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod civic;

#[cfg(feature = "registry")]
pub mod registry;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
