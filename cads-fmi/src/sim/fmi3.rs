//! FMI 3.0 Co-Simulation run loop

use crate::fmi3::{
    import::Fmi3Import,
    instance::Instance,
    schema::{self, AbstractVariable, Causality, VariableType},
};
use crate::{traits::FmiImport, value, Error, ScalarValue};

use super::{FmuConfig, FmuOutputs, Timing, INSTANCE_NAME, TIME_OUTPUT};

pub(crate) fn co_simulation(import: &Fmi3Import, config: &FmuConfig) -> Result<FmuOutputs, Error> {
    let md = import.model_description();
    let mut inst = import.instantiate_cs(INSTANCE_NAME, false, true)?;

    let timing = Timing::resolve(config, md)?;
    log::debug!(
        "FMI 3.0 run of '{}': start={} stop={} step={}",
        md.model_name,
        timing.start,
        timing.stop,
        timing.step
    );

    // FMI 3.0 folds the experiment setup into the initialization entry.
    inst.enter_initialization_mode(Some(timing.tolerance), timing.start, Some(timing.stop))?;
    for (name, text) in &config.start_values {
        set_start_value(&mut inst, md, name, text)?;
    }
    inst.exit_initialization_mode()?;

    let mut current = timing.start;
    while timing.keep_stepping(current) {
        let step = timing.clamped_step(current);
        let flags = inst
            .do_step(current, step, false)
            .map_err(|status| Error::StepFailure {
                time: current,
                status: status.to_string(),
            })?;
        if flags.terminate_simulation {
            log::debug!("FMU requested termination at t = {current}");
            break;
        }
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
fn auto_outputs(md: &schema::Fmi3ModelDescription) -> Vec<String> {
    md.model_variables
        .iter_abstract()
        .filter(|v| {
            matches!(
                v.causality(),
                Causality::Output | Causality::CalculatedParameter
            )
        })
        .map(|v| v.name().to_owned())
        .collect()
}

fn set_start_value(
    inst: &mut Instance,
    md: &schema::Fmi3ModelDescription,
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
    let vr = [var.value_reference()];

    // Only the float64/int32/boolean slice of the FMI 3.0 type family is
    // addressable; the remaining widths are rejected rather than silently
    // narrowed.
    match var.data_type() {
        VariableType::Float64 => {
            inst.set_float64(&vr, &[parsed])?;
        }
        VariableType::Int32 => {
            inst.set_int32(&vr, &[value::round_to_i32(parsed)])?;
        }
        VariableType::Boolean => {
            inst.set_boolean(&vr, &[value::to_boolean(parsed)])?;
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
    md: &schema::Fmi3ModelDescription,
    name: &str,
) -> Result<ScalarValue, Error> {
    let var = md
        .model_variables
        .find_by_name(name)
        .ok_or_else(|| Error::UnknownOutput {
            name: name.to_owned(),
        })?;
    let vr = [var.value_reference()];

    match var.data_type() {
        VariableType::Float64 => {
            let mut values = [0.0];
            inst.get_float64(&vr, &mut values)?;
            Ok(ScalarValue::Real(values[0]))
        }
        VariableType::Int32 => {
            let mut values = [0i32];
            inst.get_int32(&vr, &mut values)?;
            Ok(ScalarValue::Integer(values[0]))
        }
        VariableType::Boolean => {
            let mut values = [false];
            inst.get_boolean(&vr, &mut values)?;
            Ok(ScalarValue::Boolean(values[0]))
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

    fn model_with_variables(vars: &str) -> schema::Fmi3ModelDescription {
        let xml = format!(
            r#"<fmiModelDescription fmiVersion="3.0" modelName="M" instantiationToken="{{0}}">
                <CoSimulation modelIdentifier="M"/>
                <ModelVariables>{vars}</ModelVariables>
            </fmiModelDescription>"#
        );
        schema::Fmi3ModelDescription::from_str(&xml).unwrap()
    }

    #[test]
    fn test_auto_outputs_selects_by_causality() {
        let md = model_with_variables(
            r#"<Float64 name="time" valueReference="0" causality="independent"/>
               <Float64 name="m_in" valueReference="1" causality="input"/>
               <Int32 name="health" valueReference="2" causality="output"/>
               <Float64 name="ratio" valueReference="3" causality="calculatedParameter"/>"#,
        );
        assert_eq!(
            auto_outputs(&md),
            vec!["ratio".to_owned(), "health".to_owned()]
        );
    }

    #[test]
    fn test_auto_outputs_empty_without_outputs() {
        let md = model_with_variables(
            r#"<Float64 name="time" valueReference="0" causality="independent"/>"#,
        );
        assert!(auto_outputs(&md).is_empty());
    }
}
