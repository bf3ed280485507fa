//! Sequential workflow execution.
//!
//! Steps run strictly in document order: step *k* completes (its outputs
//! recorded and its optional snapshot written) before step *k*+1 begins, and
//! `start_from` references can only see steps that already ran. A failing
//! step aborts the whole run; callers get either a complete result store or
//! an error, never a partial result.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cads_fmi::{FmuConfig, ScalarValue};
use indexmap::IndexMap;

use crate::doc::{Step, Workflow};
use crate::{snapshot, Error};

/// The final values captured from one step, keyed by variable name.
pub type StepOutputs = BTreeMap<String, ScalarValue>;

/// The result store of one workflow run, in step document order.
pub type RunResults = IndexMap<String, StepOutputs>;

/// Runs workflow documents against FMUs via the native FMI driver.
#[derive(Debug)]
pub struct Executor {
    root: PathBuf,
}

impl Executor {
    /// Create a workflow executor rooted at `root`. Relative FMU, workflow
    /// and snapshot paths resolve against it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Execute the workflow at `workflow_path` (relative paths resolve
    /// against the executor root) and return the captured outputs of every
    /// step.
    pub fn run(&self, workflow_path: impl AsRef<Path>) -> Result<RunResults, Error> {
        let path = self.resolve_path(workflow_path.as_ref());
        let data = std::fs::read_to_string(&path).map_err(|source| Error::ReadWorkflow {
            path: path.clone(),
            source,
        })?;

        let doc: Workflow = serde_yaml::from_str(&data)
            .map_err(|err| Error::InvalidWorkflow(format!("parse {}: {err}", path.display())))?;
        validate(&doc, &path)?;

        let mut results = RunResults::with_capacity(doc.steps.len());
        for step in &doc.steps {
            let fmu_path = self.resolve_path(Path::new(&step.fmu));
            if let Err(source) = std::fs::metadata(&fmu_path) {
                return Err(Error::MissingFmu {
                    step: step.name.clone(),
                    path: fmu_path,
                    source,
                });
            }

            let start_values = build_start_values(step, &results)?;

            let config = FmuConfig {
                fmu_path,
                start_time: step.start_time,
                stop_time: step.stop_time,
                step_size: step.step_size,
                start_values,
                outputs: step.outputs.clone(),
            };

            let outputs = cads_fmi::run(&config).map_err(|source| Error::Step {
                step: step.name.clone(),
                source,
            })?;
            results.insert(step.name.clone(), outputs);
            let outputs = &results[&step.name];

            if let Some(result_path) = &step.result {
                let result_path = self.resolve_path(result_path);
                snapshot::write(&result_path, outputs)?;
            }

            log::info!("step {} completed; outputs: {:?}", step.name, outputs);
        }

        Ok(results)
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

/// Structural well-formedness of the parsed document: at least one step,
/// every step named and carrying an FMU path, names pairwise distinct.
fn validate(doc: &Workflow, path: &Path) -> Result<(), Error> {
    if doc.steps.is_empty() {
        return Err(Error::InvalidWorkflow(format!(
            "{} does not define any steps",
            path.display()
        )));
    }

    let mut seen = std::collections::BTreeSet::new();
    for step in &doc.steps {
        if step.name.is_empty() {
            return Err(Error::InvalidWorkflow(format!(
                "{} contains a step without a name",
                path.display()
            )));
        }
        if !seen.insert(step.name.as_str()) {
            return Err(Error::InvalidWorkflow(format!(
                "step {} defined multiple times",
                step.name
            )));
        }
        if step.fmu.is_empty() {
            return Err(Error::InvalidWorkflow(format!(
                "step {} is missing its fmu path",
                step.name
            )));
        }
    }
    Ok(())
}

/// Combine a step's literal start values with the values derived from prior
/// steps into the textual bindings the driver applies.
///
/// Literals are walked in lexicographic key order for determinism. Derived
/// references are applied second and overwrite a literal naming the same
/// target; the collision is surfaced as a warning.
fn build_start_values(step: &Step, results: &RunResults) -> Result<BTreeMap<String, String>, Error> {
    let mut values = BTreeMap::new();

    for (key, literal) in &step.start_values {
        values.insert(key.clone(), literal.encode());
    }

    for (target, reference) in &step.start_from {
        let (step_name, variable) = parse_reference(step, target, reference)?;
        let step_results = results.get(step_name).ok_or_else(|| {
            Error::DataFlow(format!(
                "step {}: start_from[{target}] references unknown step {step_name} ({reference})",
                step.name
            ))
        })?;
        let value = step_results.get(variable).ok_or_else(|| {
            Error::DataFlow(format!(
                "step {}: start_from[{target}] missing variable {variable} in step {step_name} ({reference})",
                step.name
            ))
        })?;
        if values.insert(target.clone(), value.encode()).is_some() {
            log::warn!(
                "step {}: start_from[{target}] overrides the literal start value for {target}",
                step.name
            );
        }
    }

    Ok(values)
}

/// Split a `step.variable` reference, rejecting empty sides and more than one
/// dot.
fn parse_reference<'a>(
    step: &Step,
    target: &str,
    reference: &'a str,
) -> Result<(&'a str, &'a str), Error> {
    let mut parts = reference.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(step_name), Some(variable), None) if !step_name.is_empty() && !variable.is_empty() => {
            Ok((step_name, variable))
        }
        _ => Err(Error::DataFlow(format!(
            "step {}: start_from[{target}] must use format step.variable, got '{reference}'",
            step.name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results_with(step: &str, var: &str, value: ScalarValue) -> RunResults {
        let mut outputs = StepOutputs::new();
        outputs.insert(var.to_owned(), value);
        let mut results = RunResults::new();
        results.insert(step.to_owned(), outputs);
        results
    }

    fn step_with_start_from(target: &str, reference: &str) -> Step {
        Step {
            name: "consumer".to_owned(),
            fmu: "consumer.fmu".to_owned(),
            start_from: [(target.to_owned(), reference.to_owned())].into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_derived_value_resolves() {
        let results = results_with("producer", "mean", ScalarValue::Real(0.25));
        let step = step_with_start_from("m_in", "producer.mean");
        let values = build_start_values(&step, &results).unwrap();
        assert_eq!(values["m_in"], "0.25");
    }

    #[test]
    fn test_derived_overrides_literal() {
        let results = results_with("producer", "mean", ScalarValue::Real(0.25));
        let mut step = step_with_start_from("m_in", "producer.mean");
        step.start_values.insert(
            "m_in".to_owned(),
            crate::doc::StartValue::Float(99.0),
        );
        let values = build_start_values(&step, &results).unwrap();
        assert_eq!(values["m_in"], "0.25");
    }

    #[test]
    fn test_unknown_step_reference() {
        let results = RunResults::new();
        let step = step_with_start_from("x", "Q.foo");
        let err = build_start_values(&step, &results).unwrap_err();
        assert!(matches!(err, Error::DataFlow(_)));
        assert!(err.to_string().contains("Q.foo"));
    }

    #[test]
    fn test_unknown_variable_reference() {
        let results = results_with("producer", "mean", ScalarValue::Real(0.25));
        let step = step_with_start_from("x", "producer.variance");
        let err = build_start_values(&step, &results).unwrap_err();
        assert!(matches!(err, Error::DataFlow(_)));
        assert!(err.to_string().contains("variance"));
    }

    #[test]
    fn test_malformed_references() {
        let results = results_with("producer", "mean", ScalarValue::Real(0.25));
        for reference in ["nodot", "a.b.c", ".mean", "producer.", "."] {
            let step = step_with_start_from("x", reference);
            assert!(
                matches!(build_start_values(&step, &results), Err(Error::DataFlow(_))),
                "reference '{reference}' should be rejected"
            );
        }
    }

    #[test]
    fn test_boolean_output_feeds_numeric_input() {
        let results = results_with("check", "ok", ScalarValue::Boolean(true));
        let step = step_with_start_from("enabled", "check.ok");
        let values = build_start_values(&step, &results).unwrap();
        assert_eq!(values["enabled"], "1");
    }
}
