use yaserde_derive::{YaDeserialize, YaSerialize};

use crate::default_wrapper;

/// Enumeration that defines the causality of the variable.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, YaSerialize, YaDeserialize)]
pub enum Causality {
    #[yaserde(rename = "structuralParameter")]
    StructuralParameter,
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

/// An enumeration that defines the base type of a variable.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VariableType {
    Float32,
    Float64,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Boolean,
    String,
}

/// Attributes shared by every concrete variable element.
pub trait AbstractVariable {
    /// The full, unique name of the variable.
    fn name(&self) -> &str;
    /// A handle of the variable to efficiently identify the variable value in the model interface.
    fn value_reference(&self) -> u32;
    /// Enumeration that defines the causality of the variable.
    fn causality(&self) -> Causality;
    /// The base type of the variable.
    fn data_type(&self) -> VariableType;
}

macro_rules! impl_variable {
    ($name:ident, $tag:literal, $data_type:expr) => {
        #[derive(Clone, Default, PartialEq, Debug, YaSerialize, YaDeserialize)]
        #[yaserde(rename = $tag)]
        pub struct $name {
            #[yaserde(attribute = true)]
            pub name: String,

            #[yaserde(attribute = true, rename = "valueReference")]
            pub value_reference: u32,

            #[yaserde(attribute = true)]
            pub description: Option<String>,

            #[yaserde(attribute = true, default = "default_wrapper")]
            pub causality: Causality,

            #[yaserde(attribute = true)]
            pub variability: Option<String>,
        }

        impl AbstractVariable for $name {
            fn name(&self) -> &str {
                &self.name
            }

            fn value_reference(&self) -> u32 {
                self.value_reference
            }

            fn causality(&self) -> Causality {
                self.causality
            }

            fn data_type(&self) -> VariableType {
                $data_type
            }
        }
    };
}

impl_variable!(FmiFloat32, "Float32", VariableType::Float32);
impl_variable!(FmiFloat64, "Float64", VariableType::Float64);
impl_variable!(FmiInt8, "Int8", VariableType::Int8);
impl_variable!(FmiUInt8, "UInt8", VariableType::UInt8);
impl_variable!(FmiInt16, "Int16", VariableType::Int16);
impl_variable!(FmiUInt16, "UInt16", VariableType::UInt16);
impl_variable!(FmiInt32, "Int32", VariableType::Int32);
impl_variable!(FmiUInt32, "UInt32", VariableType::UInt32);
impl_variable!(FmiInt64, "Int64", VariableType::Int64);
impl_variable!(FmiUInt64, "UInt64", VariableType::UInt64);
impl_variable!(FmiBoolean, "Boolean", VariableType::Boolean);
impl_variable!(FmiString, "String", VariableType::String);
