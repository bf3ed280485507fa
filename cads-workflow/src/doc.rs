//! The workflow document model.
//!
//! Documents are YAML (of which JSON is a subset). Unknown fields at any
//! level are ignored so older runners keep accepting newer documents.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Workflow {
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One FMU invocation within a workflow.
#[derive(Debug, Default, Deserialize)]
pub struct Step {
    /// Unique name of the step; doubles as the result-store key that later
    /// steps reference.
    #[serde(default)]
    pub name: String,

    /// Path of the FMU archive, absolute or relative to the runner root.
    #[serde(default)]
    pub fmu: String,

    /// Variables to capture. Empty means auto-select by causality.
    #[serde(default)]
    pub outputs: Vec<String>,

    /// Literal start values, keyed by variable name.
    #[serde(default)]
    pub start_values: BTreeMap<String, StartValue>,

    /// Start values derived from prior steps, as `step.variable` references.
    #[serde(default)]
    pub start_from: BTreeMap<String, String>,

    pub start_time: Option<f64>,
    pub stop_time: Option<f64>,
    pub step_size: Option<f64>,

    /// Optional path to persist this step's result snapshot as JSON.
    pub result: Option<PathBuf>,
}

/// A literal start value: number, boolean, or string-encoded number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StartValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl StartValue {
    /// Encode to the textual form the FMU binding layer parses. Booleans map
    /// to `1`/`0`; floats use the shortest round-trip representation.
    pub fn encode(&self) -> String {
        match self {
            StartValue::Bool(true) => "1".to_owned(),
            StartValue::Bool(false) => "0".to_owned(),
            StartValue::Int(v) => v.to_string(),
            StartValue::Float(v) => v.to_string(),
            StartValue::Text(v) => v.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_step() {
        let yaml = r#"
steps:
  - name: consumer
    fmu: fmu/consumer.fmu
    outputs: [health]
    start_values:
      gain: 2.5
      enabled: true
      mode: "3"
    start_from:
      m_in: producer.mean
    stop_time: 5.0
    result: results/consumer.json
"#;
        let doc: Workflow = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(doc.steps.len(), 1);
        let step = &doc.steps[0];
        assert_eq!(step.name, "consumer");
        assert_eq!(step.fmu, "fmu/consumer.fmu");
        assert_eq!(step.outputs, vec!["health"]);
        assert_eq!(step.start_values["gain"], StartValue::Float(2.5));
        assert_eq!(step.start_values["enabled"], StartValue::Bool(true));
        assert_eq!(step.start_values["mode"], StartValue::Text("3".into()));
        assert_eq!(step.start_from["m_in"], "producer.mean");
        assert_eq!(step.stop_time, Some(5.0));
        assert_eq!(step.start_time, None);
        assert_eq!(step.result, Some(PathBuf::from("results/consumer.json")));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let yaml = r#"
version: 12
steps:
  - name: a
    fmu: a.fmu
    retries: 3
"#;
        let doc: Workflow = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(doc.steps[0].name, "a");
    }

    #[test]
    fn test_encode() {
        assert_eq!(StartValue::Bool(true).encode(), "1");
        assert_eq!(StartValue::Bool(false).encode(), "0");
        assert_eq!(StartValue::Int(-7).encode(), "-7");
        assert_eq!(StartValue::Float(0.25).encode(), "0.25");
        assert_eq!(StartValue::Float(10.0).encode(), "10");
        assert_eq!(StartValue::Text("1e-3".into()).encode(), "1e-3");
    }
}
