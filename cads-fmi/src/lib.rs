#![doc = include_str!("../README.md")]
//! ## Feature flags
#![doc = document_features::document_features!()]
#![deny(clippy::all)]

#[cfg(feature = "fmi2")]
pub mod fmi2;
#[cfg(feature = "fmi3")]
pub mod fmi3;
pub mod import;
mod macros;
mod preload;
pub mod sim;
pub mod traits;
pub mod value;

pub use import::Import;
pub use sim::{run, FmuConfig};
pub use value::ScalarValue;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Error instantiating FMU")]
    Instantiation,

    #[error("Unknown variable: {name}")]
    UnknownVariable { name: String },

    #[error("Output variable not found: {name}")]
    UnknownOutput { name: String },

    #[error("Variable {name} has a base type outside real/integer/boolean")]
    UnsupportedVariableType { name: String },

    #[error("Unable to parse numeric value from '{value}'")]
    InvalidNumber { value: String },

    #[error("Interface type {0} not supported by this FMU")]
    UnsupportedFmuKind(String),

    #[error("Unsupported FMI version: {0}")]
    UnsupportedFmiVersion(String),

    #[error("Unsupported platform {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    #[error("Invalid timing: start time {start} is after stop time {stop}")]
    InvalidTiming { start: f64, stop: f64 },

    #[error("Co-simulation step failed at t = {time}: {status}")]
    StepFailure { time: f64, status: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Schema(#[from] cads_fmi_schema::Error),

    #[error(transparent)]
    LibLoading {
        #[from]
        source: libloading::Error,
    },

    #[cfg(feature = "fmi2")]
    #[error(transparent)]
    Fmi2Error(#[from] fmi2::Fmi2Error),

    #[cfg(feature = "fmi3")]
    #[error(transparent)]
    Fmi3Error(#[from] fmi3::Fmi3Error),
}
