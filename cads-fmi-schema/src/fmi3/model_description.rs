use std::str::FromStr;

use yaserde_derive::{YaDeserialize, YaSerialize};

use super::variable::{
    AbstractVariable, FmiBoolean, FmiFloat32, FmiFloat64, FmiInt8, FmiInt16, FmiInt32, FmiInt64,
    FmiString, FmiUInt8, FmiUInt16, FmiUInt32, FmiUInt64,
};
use crate::traits;

#[derive(Default, Debug, PartialEq, YaSerialize, YaDeserialize)]
#[yaserde(rename = "fmiModelDescription")]
pub struct Fmi3ModelDescription {
    /// Version of FMI that was used to generate the XML file.
    #[yaserde(attribute = true, rename = "fmiVersion")]
    pub fmi_version: String,

    /// The name of the model as used in the modeling environment that generated the XML file.
    #[yaserde(attribute = true, rename = "modelName")]
    pub model_name: String,

    /// The instantiationToken is a string that can be used by the FMU to check that the XML file
    /// is compatible with the implementation of the FMU.
    #[yaserde(attribute = true, rename = "instantiationToken")]
    pub instantiation_token: String,

    #[yaserde(attribute = true)]
    pub description: Option<String>,

    #[yaserde(attribute = true, rename = "generationTool")]
    pub generation_tool: Option<String>,

    /// If present, the FMU is based on FMI for Model Exchange
    #[yaserde(rename = "ModelExchange")]
    pub model_exchange: Option<Fmi3ModelExchange>,

    /// If present, the FMU is based on FMI for Co-Simulation
    #[yaserde(rename = "CoSimulation")]
    pub co_simulation: Option<Fmi3CoSimulation>,

    /// Default settings for the simulation experiment
    #[yaserde(rename = "DefaultExperiment")]
    pub default_experiment: Option<DefaultExperiment>,

    /// The variables defined by the model, grouped by base type.
    #[yaserde(rename = "ModelVariables")]
    pub model_variables: ModelVariables,
}

impl FromStr for Fmi3ModelDescription {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        yaserde::de::from_str(s).map_err(crate::Error::XmlParse)
    }
}

impl traits::DefaultExperiment for Fmi3ModelDescription {
    fn start_time(&self) -> Option<f64> {
        self.default_experiment.as_ref().and_then(|de| de.start_time)
    }

    fn stop_time(&self) -> Option<f64> {
        self.default_experiment.as_ref().and_then(|de| de.stop_time)
    }

    fn tolerance(&self) -> Option<f64> {
        self.default_experiment.as_ref().and_then(|de| de.tolerance)
    }

    fn step_size(&self) -> Option<f64> {
        self.default_experiment.as_ref().and_then(|de| de.step_size)
    }
}

/// Attributes common to the ModelExchange, CoSimulation and ScheduledExecution elements.
#[derive(Default, PartialEq, Debug, YaSerialize, YaDeserialize)]
pub struct Fmi3InterfaceType {
    /// Short class name according to C syntax, for example, A_B_C.
    #[yaserde(attribute = true, rename = "modelIdentifier")]
    pub model_identifier: String,

    /// If true, a tool is needed to execute the FMU.
    #[yaserde(attribute = true, rename = "needsExecutionTool")]
    pub needs_execution_tool: Option<bool>,

    /// If true, the FMU must be instantiated only once per process.
    #[yaserde(attribute = true, rename = "canBeInstantiatedOnlyOncePerProcess")]
    pub can_be_instantiated_only_once_per_process: Option<bool>,
}

#[derive(Default, PartialEq, Debug, YaSerialize, YaDeserialize)]
#[yaserde(rename = "ModelExchange")]
pub struct Fmi3ModelExchange {
    #[yaserde(flatten = true)]
    pub common: Fmi3InterfaceType,

    #[yaserde(attribute = true, rename = "needsCompletedIntegratorStep")]
    pub needs_completed_integrator_step: Option<bool>,
}

#[derive(Default, PartialEq, Debug, YaSerialize, YaDeserialize)]
#[yaserde(rename = "CoSimulation")]
pub struct Fmi3CoSimulation {
    #[yaserde(flatten = true)]
    pub common: Fmi3InterfaceType,

    #[yaserde(attribute = true, rename = "canHandleVariableCommunicationStepSize")]
    pub can_handle_variable_communication_step_size: Option<bool>,

    #[yaserde(attribute = true, rename = "fixedInternalStepSize")]
    pub fixed_internal_step_size: Option<f64>,

    #[yaserde(attribute = true, rename = "hasEventMode")]
    pub has_event_mode: Option<bool>,
}

/// Default settings advertised by the FMU. An FMU may provide any subset of
/// these attributes.
#[derive(Default, PartialEq, Debug, YaSerialize, YaDeserialize)]
pub struct DefaultExperiment {
    #[yaserde(attribute = true, rename = "startTime")]
    pub start_time: Option<f64>,

    #[yaserde(attribute = true, rename = "stopTime")]
    pub stop_time: Option<f64>,

    #[yaserde(attribute = true)]
    pub tolerance: Option<f64>,

    #[yaserde(attribute = true, rename = "stepSize")]
    pub step_size: Option<f64>,
}

/// In FMI 3.0 the model variable list holds one element kind per base type.
#[derive(Default, Debug, PartialEq, YaSerialize, YaDeserialize)]
pub struct ModelVariables {
    #[yaserde(rename = "Float32")]
    pub float32: Vec<FmiFloat32>,
    #[yaserde(rename = "Float64")]
    pub float64: Vec<FmiFloat64>,
    #[yaserde(rename = "Int8")]
    pub int8: Vec<FmiInt8>,
    #[yaserde(rename = "UInt8")]
    pub uint8: Vec<FmiUInt8>,
    #[yaserde(rename = "Int16")]
    pub int16: Vec<FmiInt16>,
    #[yaserde(rename = "UInt16")]
    pub uint16: Vec<FmiUInt16>,
    #[yaserde(rename = "Int32")]
    pub int32: Vec<FmiInt32>,
    #[yaserde(rename = "UInt32")]
    pub uint32: Vec<FmiUInt32>,
    #[yaserde(rename = "Int64")]
    pub int64: Vec<FmiInt64>,
    #[yaserde(rename = "UInt64")]
    pub uint64: Vec<FmiUInt64>,
    #[yaserde(rename = "Boolean")]
    pub boolean: Vec<FmiBoolean>,
    #[yaserde(rename = "String")]
    pub string: Vec<FmiString>,
}

impl ModelVariables {
    /// Returns the total number of variables in the model description
    pub fn len(&self) -> usize {
        self.iter_abstract().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over all the variables in the model description
    pub fn iter_abstract(&self) -> impl Iterator<Item = &dyn AbstractVariable> {
        itertools::chain!(
            self.float32.iter().map(|v| v as &dyn AbstractVariable),
            self.float64.iter().map(|v| v as &dyn AbstractVariable),
            self.int8.iter().map(|v| v as &dyn AbstractVariable),
            self.uint8.iter().map(|v| v as &dyn AbstractVariable),
            self.int16.iter().map(|v| v as &dyn AbstractVariable),
            self.uint16.iter().map(|v| v as &dyn AbstractVariable),
            self.int32.iter().map(|v| v as &dyn AbstractVariable),
            self.uint32.iter().map(|v| v as &dyn AbstractVariable),
            self.int64.iter().map(|v| v as &dyn AbstractVariable),
            self.uint64.iter().map(|v| v as &dyn AbstractVariable),
            self.boolean.iter().map(|v| v as &dyn AbstractVariable),
            self.string.iter().map(|v| v as &dyn AbstractVariable),
        )
    }

    /// Finds a variable by its name.
    pub fn find_by_name(&self, name: &str) -> Option<&dyn AbstractVariable> {
        self.iter_abstract().find(|v| v.name() == name)
    }
}
