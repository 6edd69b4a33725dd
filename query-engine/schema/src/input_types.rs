use crate::enum_type::EnumType;
use crate::output_types::ScalarType;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum InputType {
    Scalar(ScalarType),
    Enum(EnumType),
}

impl InputType {
    pub fn string() -> Self {
        InputType::Scalar(ScalarType::String)
    }

    pub fn int() -> Self {
        InputType::Scalar(ScalarType::Int)
    }

    pub fn float() -> Self {
        InputType::Scalar(ScalarType::Float)
    }

    pub fn boolean() -> Self {
        InputType::Scalar(ScalarType::Boolean)
    }

    pub fn uuid() -> Self {
        InputType::Scalar(ScalarType::Uuid)
    }

    pub fn enum_type(containing: EnumType) -> Self {
        InputType::Enum(containing)
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputType::Scalar(s) => write!(f, "{s}"),
            InputType::Enum(e) => f.write_str(e.name()),
        }
    }
}

/// Arguments are input fields positioned in context of an output field.
#[derive(Debug, Clone, PartialEq)]
pub struct InputField {
    pub name: String,
    pub field_type: InputType,
    pub is_required: bool,
}

impl InputField {
    pub fn new(name: impl Into<String>, field_type: InputType, is_required: bool) -> Self {
        Self {
            name: name.into(),
            field_type,
            is_required,
        }
    }
}
