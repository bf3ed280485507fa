#![doc = include_str!("../README.md")]
//! ## Feature flags
#![doc = document_features::document_features!()]
#![deny(unsafe_code)]
#![deny(clippy::all)]

use thiserror::Error;

#[cfg(feature = "fmi2")]
pub mod fmi2;
#[cfg(feature = "fmi3")]
pub mod fmi3;
pub mod traits;

/// The major version of the FMI standard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajorVersion {
    FMI1,
    FMI2,
    FMI3,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Error parsing XML: {0}")]
    XmlParse(String),
}

/// A helper function to provide a default value for types that implement `Default`.
/// This is used in the schema definitions to provide default values for fields.
#[inline]
fn default_wrapper<T: Default>() -> T {
    T::default()
}
