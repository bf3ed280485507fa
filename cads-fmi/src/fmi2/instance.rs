//! FMI 2.0 Co-Simulation instance interface

use std::ffi::CString;

use super::{binding, import::Fmi2Import, CallbackFunctions, Fmi2Error, Fmi2Status};
use crate::{traits::FmiImport, Error};

/// A live FMI 2.0 Co-Simulation instance. The native component is freed on
/// drop, so every exit path releases it.
pub struct Instance {
    /// Copy of the instance name
    name: String,
    /// Raw FMI 2.0 bindings
    binding: binding::Fmi2Binding,
    /// Pointer to the raw FMI 2.0 component
    component: binding::fmi2Component,
    /// Callbacks struct; must outlive the component
    #[allow(dead_code)]
    callbacks: Box<CallbackFunctions>,
}

impl Drop for Instance {
    fn drop(&mut self) {
        log::trace!("Freeing component {:?}", self.component);
        unsafe { (self.binding.fmi2FreeInstance)(self.component) };
    }
}

impl Instance {
    /// Instantiate the FMU for Co-Simulation.
    ///
    /// Fails with [`Error::UnsupportedFmuKind`] if the model description does
    /// not declare a `CoSimulation` interface.
    pub fn new(
        import: &Fmi2Import,
        instance_name: &str,
        visible: bool,
        logging_on: bool,
    ) -> Result<Self, Error> {
        let schema = import.model_description();

        let co_simulation = schema
            .co_simulation
            .as_ref()
            .ok_or(Error::UnsupportedFmuKind("CoSimulation".to_owned()))?;

        let binding = import.binding(&co_simulation.model_identifier)?;

        let callbacks = Box::<CallbackFunctions>::default();

        let name = instance_name.to_owned();

        let instance_name = CString::new(instance_name).expect("Error building CString");
        let guid = CString::new(schema.guid.as_bytes()).expect("Error building CString");
        let resource_url =
            CString::new(import.resource_url().as_str()).expect("Error building CString");

        let component = unsafe {
            (binding.fmi2Instantiate)(
                instance_name.as_ptr(),
                binding::fmi2Type_fmi2CoSimulation,
                guid.as_ptr(),
                resource_url.as_ptr(),
                &*callbacks as *const CallbackFunctions,
                visible as binding::fmi2Boolean,
                logging_on as binding::fmi2Boolean,
            )
        };
        if component.is_null() {
            return Err(Error::Instantiation);
        }
        log::trace!("Created FMI 2.0 CS component {component:?}");

        Ok(Self {
            name,
            binding,
            component,
            callbacks,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The FMI-standard version string reported by the loaded binary
    pub fn get_version(&self) -> &str {
        unsafe { std::ffi::CStr::from_ptr((self.binding.fmi2GetVersion)()) }
            .to_str()
            .expect("Error converting string")
    }

    pub fn setup_experiment(
        &mut self,
        tolerance: Option<f64>,
        start_time: f64,
        stop_time: Option<f64>,
    ) -> Result<(), Fmi2Error> {
        Fmi2Status::from(unsafe {
            (self.binding.fmi2SetupExperiment)(
                self.component,
                tolerance.is_some() as binding::fmi2Boolean,
                tolerance.unwrap_or(0.0),
                start_time,
                stop_time.is_some() as binding::fmi2Boolean,
                stop_time.unwrap_or(0.0),
            )
        })
        .ok()
    }

    pub fn enter_initialization_mode(&mut self) -> Result<(), Fmi2Error> {
        Fmi2Status::from(unsafe { (self.binding.fmi2EnterInitializationMode)(self.component) }).ok()
    }

    pub fn exit_initialization_mode(&mut self) -> Result<(), Fmi2Error> {
        Fmi2Status::from(unsafe { (self.binding.fmi2ExitInitializationMode)(self.component) }).ok()
    }

    pub fn terminate(&mut self) -> Result<(), Fmi2Error> {
        Fmi2Status::from(unsafe { (self.binding.fmi2Terminate)(self.component) }).ok()
    }

    pub fn get_real(
        &mut self,
        vrs: &[binding::fmi2ValueReference],
        values: &mut [binding::fmi2Real],
    ) -> Result<(), Fmi2Error> {
        assert_eq!(vrs.len(), values.len());
        Fmi2Status::from(unsafe {
            (self.binding.fmi2GetReal)(self.component, vrs.as_ptr(), vrs.len(), values.as_mut_ptr())
        })
        .ok()
    }

    pub fn get_integer(
        &mut self,
        vrs: &[binding::fmi2ValueReference],
        values: &mut [binding::fmi2Integer],
    ) -> Result<(), Fmi2Error> {
        assert_eq!(vrs.len(), values.len());
        Fmi2Status::from(unsafe {
            (self.binding.fmi2GetInteger)(
                self.component,
                vrs.as_ptr(),
                vrs.len(),
                values.as_mut_ptr(),
            )
        })
        .ok()
    }

    pub fn get_boolean(
        &mut self,
        vrs: &[binding::fmi2ValueReference],
        values: &mut [binding::fmi2Boolean],
    ) -> Result<(), Fmi2Error> {
        assert_eq!(vrs.len(), values.len());
        Fmi2Status::from(unsafe {
            (self.binding.fmi2GetBoolean)(
                self.component,
                vrs.as_ptr(),
                vrs.len(),
                values.as_mut_ptr(),
            )
        })
        .ok()
    }

    pub fn set_real(
        &mut self,
        vrs: &[binding::fmi2ValueReference],
        values: &[binding::fmi2Real],
    ) -> Result<(), Fmi2Error> {
        assert_eq!(vrs.len(), values.len());
        Fmi2Status::from(unsafe {
            (self.binding.fmi2SetReal)(self.component, vrs.as_ptr(), values.len(), values.as_ptr())
        })
        .ok()
    }

    pub fn set_integer(
        &mut self,
        vrs: &[binding::fmi2ValueReference],
        values: &[binding::fmi2Integer],
    ) -> Result<(), Fmi2Error> {
        assert_eq!(vrs.len(), values.len());
        Fmi2Status::from(unsafe {
            (self.binding.fmi2SetInteger)(
                self.component,
                vrs.as_ptr(),
                values.len(),
                values.as_ptr(),
            )
        })
        .ok()
    }

    pub fn set_boolean(
        &mut self,
        vrs: &[binding::fmi2ValueReference],
        values: &[binding::fmi2Boolean],
    ) -> Result<(), Fmi2Error> {
        assert_eq!(vrs.len(), values.len());
        Fmi2Status::from(unsafe {
            (self.binding.fmi2SetBoolean)(
                self.component,
                vrs.as_ptr(),
                values.len(),
                values.as_ptr(),
            )
        })
        .ok()
    }

    /// Advance the slave from `current_communication_point` by
    /// `communication_step_size`.
    pub fn do_step(
        &mut self,
        current_communication_point: f64,
        communication_step_size: f64,
        no_set_fmu_state_prior: bool,
    ) -> Result<(), Fmi2Error> {
        Fmi2Status::from(unsafe {
            (self.binding.fmi2DoStep)(
                self.component,
                current_communication_point,
                communication_step_size,
                no_set_fmu_state_prior as binding::fmi2Boolean,
            )
        })
        .ok()
    }
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Instance {} {{{:?}}}", self.name, self.component)
    }
}
