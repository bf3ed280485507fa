//! FMI 3.0 Co-Simulation instance interface

use std::ffi::CString;

use super::{binding, import::Fmi3Import, logger, Fmi3Error, Fmi3Status};
use crate::{traits::FmiImport, Error};

/// Flags reported by `fmi3DoStep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepResult {
    /// The importer must handle events before the next step
    pub event_handling_needed: bool,
    /// The FMU requests the co-simulation be terminated
    pub terminate_simulation: bool,
    /// The FMU returned before reaching the requested communication point
    pub early_return: bool,
    /// The communication point reached by the slave
    pub last_successful_time: f64,
}

/// A live FMI 3.0 Co-Simulation instance. The native instance is freed on
/// drop, so every exit path releases it.
pub struct Instance {
    /// Copy of the instance name
    name: String,
    /// Raw FMI 3.0 bindings
    binding: binding::Fmi3Binding,
    /// Pointer to the raw FMI 3.0 instance
    ptr: binding::fmi3Instance,
}

impl Drop for Instance {
    fn drop(&mut self) {
        log::trace!("Freeing instance {:?}", self.ptr);
        unsafe { (self.binding.fmi3FreeInstance)(self.ptr) };
    }
}

impl Instance {
    /// Instantiate the FMU for Co-Simulation.
    ///
    /// Fails with [`Error::UnsupportedFmuKind`] if the model description does
    /// not declare a `CoSimulation` interface.
    pub fn new(
        import: &Fmi3Import,
        instance_name: &str,
        visible: bool,
        logging_on: bool,
    ) -> Result<Self, Error> {
        let schema = import.model_description();

        let co_simulation = schema
            .co_simulation
            .as_ref()
            .ok_or(Error::UnsupportedFmuKind("CoSimulation".to_owned()))?;

        let binding = import.binding(&co_simulation.common.model_identifier)?;

        let name = instance_name.to_owned();

        let instance_name = CString::new(instance_name).expect("Error building CString");
        let token =
            CString::new(schema.instantiation_token.as_bytes()).expect("Error building CString");
        let resource_path = CString::new(import.canonical_resource_path_string())
            .expect("Error building CString");

        let ptr = unsafe {
            (binding.fmi3InstantiateCoSimulation)(
                instance_name.as_ptr(),
                token.as_ptr(),
                resource_path.as_ptr(),
                visible,
                logging_on,
                false,             // event_mode_used
                false,             // early_return_allowed
                std::ptr::null(),  // required_intermediate_variables
                0,
                std::ptr::null_mut(),
                Some(logger::callback_log),
                None,
            )
        };
        if ptr.is_null() {
            return Err(Error::Instantiation);
        }
        log::trace!("Created FMI 3.0 CS instance {ptr:?}");

        Ok(Self { name, binding, ptr })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The FMI-standard version string reported by the loaded binary
    pub fn get_version(&self) -> &str {
        unsafe { std::ffi::CStr::from_ptr((self.binding.fmi3GetVersion)()) }
            .to_str()
            .expect("Invalid version string")
    }

    /// Changes state to Initialization Mode. Unlike FMI 2.0 there is no
    /// separate experiment-setup call; the tolerance and time horizon travel
    /// with this one.
    pub fn enter_initialization_mode(
        &mut self,
        tolerance: Option<f64>,
        start_time: f64,
        stop_time: Option<f64>,
    ) -> Result<(), Fmi3Error> {
        Fmi3Status::from(unsafe {
            (self.binding.fmi3EnterInitializationMode)(
                self.ptr,
                tolerance.is_some(),
                tolerance.unwrap_or_default(),
                start_time,
                stop_time.is_some(),
                stop_time.unwrap_or_default(),
            )
        })
        .ok()
    }

    pub fn exit_initialization_mode(&mut self) -> Result<(), Fmi3Error> {
        Fmi3Status::from(unsafe { (self.binding.fmi3ExitInitializationMode)(self.ptr) }).ok()
    }

    pub fn terminate(&mut self) -> Result<(), Fmi3Error> {
        Fmi3Status::from(unsafe { (self.binding.fmi3Terminate)(self.ptr) }).ok()
    }

    pub fn get_float64(
        &mut self,
        vrs: &[binding::fmi3ValueReference],
        values: &mut [binding::fmi3Float64],
    ) -> Result<(), Fmi3Error> {
        Fmi3Status::from(unsafe {
            (self.binding.fmi3GetFloat64)(
                self.ptr,
                vrs.as_ptr(),
                vrs.len(),
                values.as_mut_ptr(),
                values.len(),
            )
        })
        .ok()
    }

    pub fn get_int32(
        &mut self,
        vrs: &[binding::fmi3ValueReference],
        values: &mut [binding::fmi3Int32],
    ) -> Result<(), Fmi3Error> {
        Fmi3Status::from(unsafe {
            (self.binding.fmi3GetInt32)(
                self.ptr,
                vrs.as_ptr(),
                vrs.len(),
                values.as_mut_ptr(),
                values.len(),
            )
        })
        .ok()
    }

    pub fn get_boolean(
        &mut self,
        vrs: &[binding::fmi3ValueReference],
        values: &mut [binding::fmi3Boolean],
    ) -> Result<(), Fmi3Error> {
        Fmi3Status::from(unsafe {
            (self.binding.fmi3GetBoolean)(
                self.ptr,
                vrs.as_ptr(),
                vrs.len(),
                values.as_mut_ptr(),
                values.len(),
            )
        })
        .ok()
    }

    pub fn set_float64(
        &mut self,
        vrs: &[binding::fmi3ValueReference],
        values: &[binding::fmi3Float64],
    ) -> Result<(), Fmi3Error> {
        Fmi3Status::from(unsafe {
            (self.binding.fmi3SetFloat64)(
                self.ptr,
                vrs.as_ptr(),
                vrs.len(),
                values.as_ptr(),
                values.len(),
            )
        })
        .ok()
    }

    pub fn set_int32(
        &mut self,
        vrs: &[binding::fmi3ValueReference],
        values: &[binding::fmi3Int32],
    ) -> Result<(), Fmi3Error> {
        Fmi3Status::from(unsafe {
            (self.binding.fmi3SetInt32)(
                self.ptr,
                vrs.as_ptr(),
                vrs.len(),
                values.as_ptr(),
                values.len(),
            )
        })
        .ok()
    }

    pub fn set_boolean(
        &mut self,
        vrs: &[binding::fmi3ValueReference],
        values: &[binding::fmi3Boolean],
    ) -> Result<(), Fmi3Error> {
        Fmi3Status::from(unsafe {
            (self.binding.fmi3SetBoolean)(
                self.ptr,
                vrs.as_ptr(),
                vrs.len(),
                values.as_ptr(),
                values.len(),
            )
        })
        .ok()
    }

    /// Advance the slave from `current_communication_point` by
    /// `communication_step_size`, returning the FMI 3.0 step flags.
    pub fn do_step(
        &mut self,
        current_communication_point: f64,
        communication_step_size: f64,
        no_set_fmu_state_prior: bool,
    ) -> Result<StepResult, Fmi3Error> {
        let mut result = StepResult::default();
        Fmi3Status::from(unsafe {
            (self.binding.fmi3DoStep)(
                self.ptr,
                current_communication_point,
                communication_step_size,
                no_set_fmu_state_prior,
                &mut result.event_handling_needed,
                &mut result.terminate_simulation,
                &mut result.early_return,
                &mut result.last_successful_time,
            )
        })
        .ok()?;
        Ok(result)
    }
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Instance {} {{{:?}}}", self.name, self.ptr)
    }
}
