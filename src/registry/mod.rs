//! Swedish civic numbers from a sample-number registry.
//!
//! Skatteverket publishes real test personnummer that are reserved for
//! testing. This module queries that dataset and falls back to synthetic
//! TF-numbers whenever the registry is empty, slow or unreachable, so
//! person generation never fails because of the network.
//!
//! # Example
//!
//! ```ignore
//! use civicgen::core::*;
//! use civicgen::registry::*;
//!
//! let client = SkatteverketClient::new(RegistryConfig::default())?;
//! let generator = RegistryBackedGenerator::new(client);
//! let birthday = chrono::NaiveDate::from_ymd_opt(1990, 5, 14).unwrap();
//! let outcome = generator.swedish_number(birthday, Sex::Female).await?;
//! ```

mod lookup;
mod skatteverket;

pub use lookup::{
    DEFAULT_LOOKUP_TIMEOUT, DatePattern, LookupError, RegistryBackedGenerator, SampleNumberLookup,
    generate_person_with_registry,
};
pub use skatteverket::{RegistryConfig, SKATTEVERKET_TEST_NUMBERS_URL, SkatteverketClient};
