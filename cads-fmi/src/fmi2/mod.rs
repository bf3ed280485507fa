//! FMI 2.0 API

pub mod binding;
pub mod import;
pub mod instance;
mod logger;

// Re-export
pub use cads_fmi_schema::fmi2 as schema;

/// The callback struct handed to `fmi2Instantiate`. Layout per
/// fmi2FunctionTypes.h.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct CallbackFunctions {
    pub logger: binding::fmi2CallbackLogger,
    pub allocate_memory: binding::fmi2CallbackAllocateMemory,
    pub free_memory: binding::fmi2CallbackFreeMemory,
    pub step_finished: binding::fmi2StepFinished,
    pub component_environment: binding::fmi2ComponentEnvironment,
}

impl Default for CallbackFunctions {
    fn default() -> Self {
        CallbackFunctions {
            logger: Some(logger::callback_logger_handler as _),
            allocate_memory: Some(libc::calloc),
            free_memory: Some(libc::free),
            step_finished: None,
            component_environment: std::ptr::null_mut::<std::os::raw::c_void>(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Fmi2Error {
    /// The call completed but the FMU flagged a problem. The prepared
    /// message has already been routed through the logger callback.
    #[error("Warning")]
    Warning,
    /// The slave started an asynchronous computation instead of completing
    /// the call.
    #[error("Pending")]
    Pending,
    /// The slave rejected the call; the master may be able to continue with
    /// a smaller communication step size.
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

/// A raw `fmi2Status` as returned by the native API.
///
/// The conversion is strict: anything other than an exact `fmi2OK` fails the
/// call, `fmi2Warning` included.
#[derive(Debug)]
pub struct Fmi2Status(pub(crate) binding::fmi2Status);

impl Fmi2Status {
    /// Convert to [`Result`], failing on anything but `fmi2OK`.
    #[inline]
    pub fn ok(self) -> Result<(), Fmi2Error> {
        self.into()
    }
}

impl From<binding::fmi2Status> for Fmi2Status {
    fn from(status: binding::fmi2Status) -> Self {
        Self(status)
    }
}

impl From<Fmi2Status> for Result<(), Fmi2Error> {
    fn from(Fmi2Status(status): Fmi2Status) -> Self {
        match status {
            binding::fmi2Status_fmi2OK => Ok(()),
            binding::fmi2Status_fmi2Warning => Err(Fmi2Error::Warning),
            binding::fmi2Status_fmi2Pending => Err(Fmi2Error::Pending),
            binding::fmi2Status_fmi2Discard => Err(Fmi2Error::Discard),
            binding::fmi2Status_fmi2Error => Err(Fmi2Error::Error),
            binding::fmi2Status_fmi2Fatal => Err(Fmi2Error::Fatal),
            _ => unreachable!("Invalid status"),
        }
    }
}
