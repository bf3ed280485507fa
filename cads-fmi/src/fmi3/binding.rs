//! Hand-loaded FMI 3.0 C API, restricted to the Co-Simulation subset the
//! driver exercises. Type and symbol names follow fmi3FunctionTypes.h.

#![allow(non_camel_case_types, non_upper_case_globals)]

use std::os::raw::{c_char, c_int, c_void};

use crate::macros::binding_api;

pub type fmi3Instance = *mut c_void;
pub type fmi3InstanceEnvironment = *mut c_void;
pub type fmi3String = *const c_char;
pub type fmi3Status = c_int;
pub type fmi3Float64 = f64;
pub type fmi3Int32 = i32;
pub type fmi3Boolean = bool;
pub type fmi3ValueReference = u32;

pub const fmi3Status_fmi3OK: fmi3Status = 0;
pub const fmi3Status_fmi3Warning: fmi3Status = 1;
pub const fmi3Status_fmi3Discard: fmi3Status = 2;
pub const fmi3Status_fmi3Error: fmi3Status = 3;
pub const fmi3Status_fmi3Fatal: fmi3Status = 4;

pub type fmi3LogMessageCallback = Option<
    unsafe extern "C" fn(fmi3InstanceEnvironment, fmi3Status, fmi3String, fmi3String),
>;

pub type fmi3IntermediateUpdateCallback = Option<
    unsafe extern "C" fn(
        fmi3InstanceEnvironment,
        fmi3Float64,
        fmi3Boolean,
        fmi3Boolean,
        fmi3Boolean,
        fmi3Boolean,
        *mut fmi3Boolean,
        *mut fmi3Float64,
    ),
>;

binding_api! {
    /// The FMI 3.0 Co-Simulation interface of one loaded FMU binary.
    pub struct Fmi3Binding {
        pub fmi3GetVersion: unsafe extern "C" fn() -> fmi3String,
        pub fmi3InstantiateCoSimulation: unsafe extern "C" fn(
            fmi3String,
            fmi3String,
            fmi3String,
            fmi3Boolean,
            fmi3Boolean,
            fmi3Boolean,
            fmi3Boolean,
            *const fmi3ValueReference,
            usize,
            fmi3InstanceEnvironment,
            fmi3LogMessageCallback,
            fmi3IntermediateUpdateCallback,
        ) -> fmi3Instance,
        pub fmi3FreeInstance: unsafe extern "C" fn(fmi3Instance),
        pub fmi3EnterInitializationMode: unsafe extern "C" fn(
            fmi3Instance,
            fmi3Boolean,
            fmi3Float64,
            fmi3Float64,
            fmi3Boolean,
            fmi3Float64,
        ) -> fmi3Status,
        pub fmi3ExitInitializationMode: unsafe extern "C" fn(fmi3Instance) -> fmi3Status,
        pub fmi3Terminate: unsafe extern "C" fn(fmi3Instance) -> fmi3Status,
        pub fmi3GetFloat64: unsafe extern "C" fn(
            fmi3Instance,
            *const fmi3ValueReference,
            usize,
            *mut fmi3Float64,
            usize,
        ) -> fmi3Status,
        pub fmi3GetInt32: unsafe extern "C" fn(
            fmi3Instance,
            *const fmi3ValueReference,
            usize,
            *mut fmi3Int32,
            usize,
        ) -> fmi3Status,
        pub fmi3GetBoolean: unsafe extern "C" fn(
            fmi3Instance,
            *const fmi3ValueReference,
            usize,
            *mut fmi3Boolean,
            usize,
        ) -> fmi3Status,
        pub fmi3SetFloat64: unsafe extern "C" fn(
            fmi3Instance,
            *const fmi3ValueReference,
            usize,
            *const fmi3Float64,
            usize,
        ) -> fmi3Status,
        pub fmi3SetInt32: unsafe extern "C" fn(
            fmi3Instance,
            *const fmi3ValueReference,
            usize,
            *const fmi3Int32,
            usize,
        ) -> fmi3Status,
        pub fmi3SetBoolean: unsafe extern "C" fn(
            fmi3Instance,
            *const fmi3ValueReference,
            usize,
            *const fmi3Boolean,
            usize,
        ) -> fmi3Status,
        pub fmi3DoStep: unsafe extern "C" fn(
            fmi3Instance,
            fmi3Float64,
            fmi3Float64,
            fmi3Boolean,
            *mut fmi3Boolean,
            *mut fmi3Boolean,
            *mut fmi3Boolean,
            *mut fmi3Float64,
        ) -> fmi3Status,
    }
}
