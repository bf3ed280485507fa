//! FMI 3.0 API

pub mod binding;
pub mod import;
pub mod instance;
mod logger;

// Re-export
pub use cads_fmi_schema::fmi3 as schema;

#[derive(Debug, thiserror::Error)]
pub enum Fmi3Error {
    /// The call completed but the FMU flagged a problem. The prepared
    /// message has already been routed through the log callback.
    #[error("Warning")]
    Warning,
    /// The call was rejected; the master may be able to continue with a
    /// smaller communication step size.
    #[error("Discard")]
    Discard,
    /// The FMU encountered an error; the simulation cannot be continued with
    /// this instance.
    #[error("Error")]
    Error,
    /// The model computations are irreparably corrupted for all instances.
    #[error("Fatal")]
    Fatal,
}

/// A raw `fmi3Status` as returned by the native API.
///
/// The conversion is strict: anything other than an exact `fmi3OK` fails the
/// call, `fmi3Warning` included.
#[derive(Debug)]
pub struct Fmi3Status(pub(crate) binding::fmi3Status);

impl Fmi3Status {
    /// Convert to [`Result`], failing on anything but `fmi3OK`.
    #[inline]
    pub fn ok(self) -> Result<(), Fmi3Error> {
        self.into()
    }
}

impl From<binding::fmi3Status> for Fmi3Status {
    fn from(status: binding::fmi3Status) -> Self {
        Self(status)
    }
}

impl From<Fmi3Status> for Result<(), Fmi3Error> {
    fn from(Fmi3Status(status): Fmi3Status) -> Self {
        match status {
            binding::fmi3Status_fmi3OK => Ok(()),
            binding::fmi3Status_fmi3Warning => Err(Fmi3Error::Warning),
            binding::fmi3Status_fmi3Discard => Err(Fmi3Error::Discard),
            binding::fmi3Status_fmi3Error => Err(Fmi3Error::Error),
            binding::fmi3Status_fmi3Fatal => Err(Fmi3Error::Fatal),
            _ => unreachable!("Invalid status"),
        }
    }
}
