//! FMI 3.0 schema definitions
//!
//! See <https://fmi-standard.org/docs/3.0.1/>

mod model_description;
mod variable;

pub use model_description::{
    DefaultExperiment, Fmi3CoSimulation, Fmi3InterfaceType, Fmi3ModelDescription,
    Fmi3ModelExchange, ModelVariables,
};
pub use variable::{
    AbstractVariable, Causality, FmiBoolean, FmiFloat32, FmiFloat64, FmiInt8, FmiInt16, FmiInt32,
    FmiInt64, FmiString, FmiUInt8, FmiUInt16, FmiUInt32, FmiUInt64, VariableType,
};
