use std::str::FromStr;

use yaserde_derive::{YaDeserialize, YaSerialize};

use super::ScalarVariable;
use crate::traits;

#[derive(Clone, Default, PartialEq, Debug, YaSerialize, YaDeserialize)]
#[yaserde(rename = "fmiModelDescription")]
pub struct Fmi2ModelDescription {
    /// Version of FMI that was used to generate the XML file.
    #[yaserde(attribute = true, rename = "fmiVersion")]
    pub fmi_version: String,

    /// The name of the model as used in the modeling environment that generated the XML file.
    #[yaserde(attribute = true, rename = "modelName")]
    pub model_name: String,

    /// Fingerprint of the XML file content, used to verify that the XML file and the
    /// implementation belong together.
    #[yaserde(attribute = true)]
    pub guid: String,

    #[yaserde(attribute = true)]
    pub description: Option<String>,

    #[yaserde(attribute = true, rename = "generationTool")]
    pub generation_tool: Option<String>,

    /// If present, the FMU is based on FMI for Model Exchange
    #[yaserde(rename = "ModelExchange")]
    pub model_exchange: Option<ModelExchange>,

    /// If present, the FMU is based on FMI for Co-Simulation
    #[yaserde(rename = "CoSimulation")]
    pub co_simulation: Option<CoSimulation>,

    /// Default settings for the simulation experiment
    #[yaserde(rename = "DefaultExperiment")]
    pub default_experiment: Option<DefaultExperiment>,

    #[yaserde(rename = "ModelVariables")]
    pub model_variables: ModelVariables,
}

impl FromStr for Fmi2ModelDescription {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        yaserde::de::from_str(s).map_err(crate::Error::XmlParse)
    }
}

impl traits::DefaultExperiment for Fmi2ModelDescription {
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

#[derive(Clone, Default, PartialEq, Debug, YaSerialize, YaDeserialize)]
pub struct ModelExchange {
    /// Short class name according to C-syntax
    #[yaserde(attribute = true, rename = "modelIdentifier")]
    pub model_identifier: String,

    /// If true, a tool is needed to execute the model and the FMU just contains the communication
    /// to this tool.
    #[yaserde(attribute = true, rename = "needsExecutionTool")]
    pub needs_execution_tool: Option<bool>,
}

#[derive(Clone, Default, PartialEq, Debug, YaSerialize, YaDeserialize)]
pub struct CoSimulation {
    /// Short class name according to C-syntax
    #[yaserde(attribute = true, rename = "modelIdentifier")]
    pub model_identifier: String,

    #[yaserde(attribute = true, rename = "needsExecutionTool")]
    pub needs_execution_tool: Option<bool>,

    #[yaserde(attribute = true, rename = "canHandleVariableCommunicationStepSize")]
    pub can_handle_variable_communication_step_size: Option<bool>,

    #[yaserde(attribute = true, rename = "canBeInstantiatedOnlyOncePerProcess")]
    pub can_be_instantiated_only_once_per_process: Option<bool>,
}

/// Default settings advertised by the FMU. An FMU may provide any subset of
/// these attributes.
#[derive(Clone, Default, PartialEq, Debug, YaSerialize, YaDeserialize)]
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

#[derive(Clone, Default, PartialEq, Debug, YaSerialize, YaDeserialize)]
pub struct ModelVariables {
    #[yaserde(rename = "ScalarVariable")]
    pub variables: Vec<ScalarVariable>,
}

impl ModelVariables {
    /// Find a variable by its full name.
    pub fn find_by_name(&self, name: &str) -> Option<&ScalarVariable> {
        self.variables.iter().find(|sv| sv.name == name)
    }
}
