//! Hand-loaded FMI 2.0 C API, restricted to the Co-Simulation subset the
//! driver exercises. Type and symbol names follow fmi2FunctionTypes.h.

#![allow(non_camel_case_types, non_upper_case_globals)]

use std::os::raw::{c_char, c_int, c_uint, c_void};

use crate::macros::binding_api;

pub type fmi2Component = *mut c_void;
pub type fmi2ComponentEnvironment = *mut c_void;
pub type fmi2String = *const c_char;
pub type fmi2Status = c_int;
pub type fmi2Type = c_int;
pub type fmi2Real = f64;
pub type fmi2Integer = c_int;
pub type fmi2Boolean = c_int;
pub type fmi2ValueReference = c_uint;

pub const fmi2Status_fmi2OK: fmi2Status = 0;
pub const fmi2Status_fmi2Warning: fmi2Status = 1;
pub const fmi2Status_fmi2Discard: fmi2Status = 2;
pub const fmi2Status_fmi2Error: fmi2Status = 3;
pub const fmi2Status_fmi2Fatal: fmi2Status = 4;
pub const fmi2Status_fmi2Pending: fmi2Status = 5;

pub const fmi2Type_fmi2ModelExchange: fmi2Type = 0;
pub const fmi2Type_fmi2CoSimulation: fmi2Type = 1;

pub const fmi2False: fmi2Boolean = 0;
pub const fmi2True: fmi2Boolean = 1;

pub type fmi2CallbackLogger = Option<
    unsafe extern "C" fn(
        fmi2ComponentEnvironment,
        fmi2String,
        fmi2Status,
        fmi2String,
        fmi2String,
        ...
    ),
>;
pub type fmi2CallbackAllocateMemory = Option<unsafe extern "C" fn(usize, usize) -> *mut c_void>;
pub type fmi2CallbackFreeMemory = Option<unsafe extern "C" fn(*mut c_void)>;
pub type fmi2StepFinished = Option<unsafe extern "C" fn(fmi2ComponentEnvironment, fmi2Status)>;

binding_api! {
    /// The FMI 2.0 Co-Simulation interface of one loaded FMU binary.
    pub struct Fmi2Binding {
        pub fmi2GetVersion: unsafe extern "C" fn() -> fmi2String,
        pub fmi2Instantiate: unsafe extern "C" fn(
            fmi2String,
            fmi2Type,
            fmi2String,
            fmi2String,
            *const super::CallbackFunctions,
            fmi2Boolean,
            fmi2Boolean,
        ) -> fmi2Component,
        pub fmi2FreeInstance: unsafe extern "C" fn(fmi2Component),
        pub fmi2SetupExperiment: unsafe extern "C" fn(
            fmi2Component,
            fmi2Boolean,
            fmi2Real,
            fmi2Real,
            fmi2Boolean,
            fmi2Real,
        ) -> fmi2Status,
        pub fmi2EnterInitializationMode: unsafe extern "C" fn(fmi2Component) -> fmi2Status,
        pub fmi2ExitInitializationMode: unsafe extern "C" fn(fmi2Component) -> fmi2Status,
        pub fmi2Terminate: unsafe extern "C" fn(fmi2Component) -> fmi2Status,
        pub fmi2GetReal: unsafe extern "C" fn(
            fmi2Component,
            *const fmi2ValueReference,
            usize,
            *mut fmi2Real,
        ) -> fmi2Status,
        pub fmi2GetInteger: unsafe extern "C" fn(
            fmi2Component,
            *const fmi2ValueReference,
            usize,
            *mut fmi2Integer,
        ) -> fmi2Status,
        pub fmi2GetBoolean: unsafe extern "C" fn(
            fmi2Component,
            *const fmi2ValueReference,
            usize,
            *mut fmi2Boolean,
        ) -> fmi2Status,
        pub fmi2SetReal: unsafe extern "C" fn(
            fmi2Component,
            *const fmi2ValueReference,
            usize,
            *const fmi2Real,
        ) -> fmi2Status,
        pub fmi2SetInteger: unsafe extern "C" fn(
            fmi2Component,
            *const fmi2ValueReference,
            usize,
            *const fmi2Integer,
        ) -> fmi2Status,
        pub fmi2SetBoolean: unsafe extern "C" fn(
            fmi2Component,
            *const fmi2ValueReference,
            usize,
            *const fmi2Boolean,
        ) -> fmi2Status,
        pub fmi2DoStep: unsafe extern "C" fn(
            fmi2Component,
            fmi2Real,
            fmi2Real,
            fmi2Boolean,
        ) -> fmi2Status,
    }
}
