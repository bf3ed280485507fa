use yaserde_derive::{YaDeserialize, YaSerialize};

use crate::default_wrapper;

/// Enumeration that defines the causality of the variable.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, YaSerialize, YaDeserialize)]
pub enum Causality {
    #[yaserde(rename = "parameter")]
    Parameter,
    #[yaserde(rename = "calculatedParameter")]
    CalculatedParameter,
    #[yaserde(rename = "input")]
    Input,
    #[yaserde(rename = "output")]
    Output,
    #[default]
    #[yaserde(rename = "local")]
    Local,
    #[yaserde(rename = "independent")]
    Independent,
}

/// Enumeration that defines the time dependency of the variable.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, YaSerialize, YaDeserialize)]
pub enum Variability {
    #[yaserde(rename = "constant")]
    Constant,
    #[yaserde(rename = "fixed")]
    Fixed,
    #[yaserde(rename = "tunable")]
    Tunable,
    #[yaserde(rename = "discrete")]
    Discrete,
    #[default]
    #[yaserde(rename = "continuous")]
    Continuous,
}

#[derive(Clone, Default, PartialEq, Debug, YaSerialize, YaDeserialize)]
pub struct RealElement {
    /// If present, name of type defined with TypeDefinitions / SimpleType providing defaults.
    #[yaserde(attribute = true, rename = "declaredType")]
    pub declared_type: Option<String>,

    /// Value before initialization, if initial=exact or approx.
    #[yaserde(attribute = true)]
    pub start: Option<f64>,
}

#[derive(Clone, Default, PartialEq, Debug, YaSerialize, YaDeserialize)]
pub struct IntegerElement {
    #[yaserde(attribute = true, rename = "declaredType")]
    pub declared_type: Option<String>,

    #[yaserde(attribute = true)]
    pub start: Option<i32>,
}

#[derive(Clone, Default, PartialEq, Debug, YaSerialize, YaDeserialize)]
pub struct BooleanElement {
    #[yaserde(attribute = true, rename = "declaredType")]
    pub declared_type: Option<String>,

    #[yaserde(attribute = true)]
    pub start: Option<bool>,
}

#[derive(Clone, Default, PartialEq, Debug, YaSerialize, YaDeserialize)]
pub struct StringElement {
    #[yaserde(attribute = true)]
    pub start: Option<String>,
}

#[derive(Clone, Default, PartialEq, Debug, YaSerialize, YaDeserialize)]
pub struct EnumerationElement {
    #[yaserde(attribute = true, rename = "declaredType")]
    pub declared_type: Option<String>,

    #[yaserde(attribute = true)]
    pub start: Option<i32>,
}

/// The typed element of a `ScalarVariable`, determining its base type.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScalarVariableElement {
    Real,
    Integer,
    Boolean,
    String,
    Enumeration,
}

#[derive(Clone, Default, PartialEq, Debug, YaSerialize, YaDeserialize)]
pub struct ScalarVariable {
    /// The full, unique name of the variable.
    #[yaserde(attribute = true)]
    pub name: String,

    /// A handle of the variable to efficiently identify the variable value in the model interface.
    #[yaserde(attribute = true, rename = "valueReference")]
    pub value_reference: u32,

    /// An optional description string describing the meaning of the variable.
    #[yaserde(attribute = true)]
    pub description: Option<String>,

    /// Enumeration that defines the causality of the variable.
    #[yaserde(attribute = true, default = "default_wrapper")]
    pub causality: Causality,

    /// Enumeration that defines the time dependency of the variable.
    #[yaserde(attribute = true, default = "default_wrapper")]
    pub variability: Variability,

    #[yaserde(rename = "Real")]
    pub real: Option<RealElement>,

    #[yaserde(rename = "Integer")]
    pub integer: Option<IntegerElement>,

    #[yaserde(rename = "Boolean")]
    pub boolean: Option<BooleanElement>,

    #[yaserde(rename = "String")]
    pub string: Option<StringElement>,

    #[yaserde(rename = "Enumeration")]
    pub enumeration: Option<EnumerationElement>,
}

impl ScalarVariable {
    /// The base type of the variable, derived from which typed child element is present.
    pub fn element(&self) -> Option<ScalarVariableElement> {
        if self.real.is_some() {
            Some(ScalarVariableElement::Real)
        } else if self.integer.is_some() {
            Some(ScalarVariableElement::Integer)
        } else if self.boolean.is_some() {
            Some(ScalarVariableElement::Boolean)
        } else if self.string.is_some() {
            Some(ScalarVariableElement::String)
        } else if self.enumeration.is_some() {
            Some(ScalarVariableElement::Enumeration)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_variable() {
        let s = r#"
        <ScalarVariable
            name="inertia1.J"
            valueReference="1073741824"
            description="Moment of load inertia"
            causality="parameter"
            variability="fixed">
            <Real declaredType="Modelica.SIunits.Inertia" start="1"/>
        </ScalarVariable>
        "#;
        let sv: ScalarVariable = yaserde::de::from_str(s).unwrap();
        assert_eq!(sv.name, "inertia1.J");
        assert_eq!(sv.value_reference, 1073741824);
        assert_eq!(sv.description, Some("Moment of load inertia".into()));
        assert_eq!(sv.causality, Causality::Parameter);
        assert_eq!(sv.variability, Variability::Fixed);
        assert_eq!(sv.element(), Some(ScalarVariableElement::Real));
        assert_eq!(sv.real.as_ref().unwrap().start, Some(1.0));
    }

    #[test]
    fn test_causality_defaults_to_local() {
        let s = r#"<ScalarVariable name="x" valueReference="0"><Boolean/></ScalarVariable>"#;
        let sv: ScalarVariable = yaserde::de::from_str(s).unwrap();
        assert_eq!(sv.causality, Causality::Local);
        assert_eq!(sv.element(), Some(ScalarVariableElement::Boolean));
    }
}
