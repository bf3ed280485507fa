//! FMI 2.0 Co-Simulation run loop

use crate::fmi2::{
    import::Fmi2Import,
    instance::Instance,
    schema::{self, Causality, ScalarVariableElement},
};
use crate::{traits::FmiImport, value, Error, ScalarValue};

use super::{FmuConfig, FmuOutputs, Timing, INSTANCE_NAME, TIME_OUTPUT};

pub(crate) fn co_simulation(import: &Fmi2Import, config: &FmuConfig) -> Result<FmuOutputs, Error> {
    let md = import.model_description();
    let mut inst = import.instantiate_cs(INSTANCE_NAME, false, true)?;

    let timing = Timing::resolve(config, md)?;
    log::debug!(
        "FMI 2.0 run of '{}': start={} stop={} step={}",
        md.model_name,
        timing.start,
        timing.stop,
        timing.step
    );

    inst.setup_experiment(Some(timing.tolerance), timing.start, Some(timing.stop))?;
    inst.enter_initialization_mode()?;
    for (name, text) in &config.start_values {
        set_start_value(&mut inst, md, name, text)?;
    }
    inst.exit_initialization_mode()?;

    let mut current = timing.start;
    while timing.keep_stepping(current) {
        let step = timing.clamped_step(current);
        inst.do_step(current, step, true)
            .map_err(|status| Error::StepFailure {
                time: current,
                status: status.to_string(),
            })?;
        current += step;
    }

    let mut outputs = FmuOutputs::new();
    if config.outputs.is_empty() {
        let auto = auto_outputs(md);
        if auto.is_empty() {
            outputs.insert(TIME_OUTPUT.to_owned(), ScalarValue::Real(current));
        } else {
            for name in &auto {
                outputs.insert(name.clone(), read_output(&mut inst, md, name)?);
            }
        }
    } else {
        for name in &config.outputs {
            outputs.insert(name.clone(), read_output(&mut inst, md, name)?);
        }
    }

    inst.terminate()?;
    Ok(outputs)
}

/// Variables captured when the caller does not enumerate outputs.
fn auto_outputs(md: &schema::Fmi2ModelDescription) -> Vec<String> {
    md.model_variables
        .variables
        .iter()
        .filter(|sv| {
            matches!(
                sv.causality,
                Causality::Output | Causality::CalculatedParameter
            )
        })
        .map(|sv| sv.name.clone())
        .collect()
}

fn set_start_value(
    inst: &mut Instance,
    md: &schema::Fmi2ModelDescription,
    name: &str,
    text: &str,
) -> Result<(), Error> {
    let var = md
        .model_variables
        .find_by_name(name)
        .ok_or_else(|| Error::UnknownVariable {
            name: name.to_owned(),
        })?;
    let parsed = value::parse_number(text)?;
    let vr = [var.value_reference];

    match var.element() {
        Some(ScalarVariableElement::Real) => {
            inst.set_real(&vr, &[parsed])?;
        }
        Some(ScalarVariableElement::Integer) => {
            inst.set_integer(&vr, &[value::round_to_i32(parsed)])?;
        }
        Some(ScalarVariableElement::Boolean) => {
            inst.set_boolean(&vr, &[value::to_boolean(parsed) as i32])?;
        }
        _ => {
            return Err(Error::UnsupportedVariableType {
                name: name.to_owned(),
            })
        }
    }
    Ok(())
}

fn read_output(
    inst: &mut Instance,
    md: &schema::Fmi2ModelDescription,
    name: &str,
) -> Result<ScalarValue, Error> {
    let var = md
        .model_variables
        .find_by_name(name)
        .ok_or_else(|| Error::UnknownOutput {
            name: name.to_owned(),
        })?;
    let vr = [var.value_reference];

    match var.element() {
        Some(ScalarVariableElement::Real) => {
            let mut values = [0.0];
            inst.get_real(&vr, &mut values)?;
            Ok(ScalarValue::Real(values[0]))
        }
        Some(ScalarVariableElement::Integer) => {
            let mut values = [0i32];
            inst.get_integer(&vr, &mut values)?;
            Ok(ScalarValue::Integer(values[0]))
        }
        Some(ScalarVariableElement::Boolean) => {
            let mut values = [0i32];
            inst.get_boolean(&vr, &mut values)?;
            Ok(ScalarValue::Boolean(values[0] != 0))
        }
        _ => Err(Error::UnsupportedVariableType {
            name: name.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn model_with_variables(vars: &str) -> schema::Fmi2ModelDescription {
        let xml = format!(
            r#"<fmiModelDescription fmiVersion="2.0" modelName="M" guid="{{0}}">
                <CoSimulation modelIdentifier="M"/>
                <ModelVariables>{vars}</ModelVariables>
            </fmiModelDescription>"#
        );
        schema::Fmi2ModelDescription::from_str(&xml).unwrap()
    }

    #[test]
    fn test_auto_outputs_selects_by_causality() {
        let md = model_with_variables(
            r#"<ScalarVariable name="u" valueReference="0" causality="input"><Real/></ScalarVariable>
               <ScalarVariable name="y" valueReference="1" causality="output"><Real/></ScalarVariable>
               <ScalarVariable name="k" valueReference="2" causality="calculatedParameter"><Real/></ScalarVariable>
               <ScalarVariable name="state" valueReference="3"><Real/></ScalarVariable>"#,
        );
        assert_eq!(auto_outputs(&md), vec!["y".to_owned(), "k".to_owned()]);
    }

    #[test]
    fn test_auto_outputs_empty_without_outputs() {
        let md = model_with_variables(
            r#"<ScalarVariable name="u" valueReference="0" causality="input"><Real/></ScalarVariable>"#,
        );
        assert!(auto_outputs(&md).is_empty());
    }
}
