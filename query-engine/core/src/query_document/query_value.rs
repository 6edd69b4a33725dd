use indexmap::IndexMap;
use social_models::{ConversionFailure, ScalarValue};
use uuid::Uuid;

pub type ArgumentValueObject = IndexMap<String, ArgumentValue>;

/// The pre-validation value representation of a query document argument, as
/// produced by the protocol adapter. Validation coerces these against the
/// schema's input types into plain scalar values.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    Scalar(ScalarValue),
    List(Vec<ArgumentValue>),
    Object(ArgumentValueObject),
}

impl ArgumentValue {
    pub fn null() -> Self {
        Self::Scalar(ScalarValue::Null)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::Scalar(ScalarValue::String(s.into()))
    }

    pub fn enum_value(s: impl Into<String>) -> Self {
        Self::Scalar(ScalarValue::Enum(s.into()))
    }

    pub fn int(i: i64) -> Self {
        Self::Scalar(ScalarValue::Int(i))
    }

    pub fn float(f: f64) -> Self {
        Self::Scalar(ScalarValue::Float(f))
    }

    pub fn boolean(b: bool) -> Self {
        Self::Scalar(ScalarValue::Boolean(b))
    }

    pub fn uuid(uuid: Uuid) -> Self {
        Self::Scalar(ScalarValue::Uuid(uuid))
    }

    pub fn list(values: Vec<ArgumentValue>) -> Self {
        Self::List(values)
    }

    pub fn object(pairs: impl IntoIterator<Item = (String, ArgumentValue)>) -> Self {
        Self::Object(pairs.into_iter().collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(ScalarValue::Null))
    }

    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Short description used in type-mismatch validation errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Scalar(value) => value.type_name(),
            Self::List(_) => "List",
            Self::Object(_) => "Object",
        }
    }
}

impl From<ScalarValue> for ArgumentValue {
    fn from(value: ScalarValue) -> Self {
        Self::Scalar(value)
    }
}

/// Variable values arrive as JSON; nested shapes convert structurally.
impl TryFrom<serde_json::Value> for ArgumentValue {
    type Error = ConversionFailure;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Array(values) => {
                let converted = values
                    .into_iter()
                    .map(ArgumentValue::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ArgumentValue::List(converted))
            }
            serde_json::Value::Object(map) => {
                let converted = map
                    .into_iter()
                    .map(|(key, value)| ArgumentValue::try_from(value).map(|v| (key, v)))
                    .collect::<Result<ArgumentValueObject, _>>()?;
                Ok(ArgumentValue::Object(converted))
            }
            leaf => ScalarValue::try_from(leaf).map(ArgumentValue::Scalar),
        }
    }
}
