//! Core types, check digit routines, options and person assembly.
//!
//! A [`Person`] is assembled from provider-sourced fields (names, address,
//! phone, email, birth date) and a civic number from [`crate::civic`].

pub(crate) mod assembler;
pub mod checksum;
mod error;
mod options;
pub mod provider;
mod types;

pub use assembler::*;
pub use error::*;
pub use options::*;
pub use provider::{FakerProvider, PersonDataProvider};
pub use types::*;
