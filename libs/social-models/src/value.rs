use crate::error::ConversionFailure;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Scalar currency between store records and serialized responses.
///
/// `Enum` carries the rendered form of an enumerated id (member type ids);
/// everything else maps one-to-one onto a JSON scalar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    String(String),
    Boolean(bool),
    Enum(String),
    Int(i64),
    Float(f64),
    Uuid(Uuid),
    Null,
}

impl ScalarValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarValue::String(_) => "String",
            ScalarValue::Boolean(_) => "Boolean",
            ScalarValue::Enum(_) => "Enum",
            ScalarValue::Int(_) => "Int",
            ScalarValue::Float(_) => "Float",
            ScalarValue::Uuid(_) => "Uuid",
            ScalarValue::Null => "Null",
        }
    }

    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            ScalarValue::Uuid(uuid) => Some(*uuid),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::String(s) | ScalarValue::Enum(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::String(s) => write!(f, "\"{s}\""),
            ScalarValue::Boolean(b) => write!(f, "{b}"),
            ScalarValue::Enum(e) => write!(f, "{e}"),
            ScalarValue::Int(i) => write!(f, "{i}"),
            ScalarValue::Float(fl) => write!(f, "{fl}"),
            ScalarValue::Uuid(uuid) => write!(f, "{uuid}"),
            ScalarValue::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::String(s.to_owned())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::String(s)
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        ScalarValue::Boolean(b)
    }
}

impl From<i64> for ScalarValue {
    fn from(i: i64) -> Self {
        ScalarValue::Int(i)
    }
}

impl From<f64> for ScalarValue {
    fn from(f: f64) -> Self {
        ScalarValue::Float(f)
    }
}

impl From<Uuid> for ScalarValue {
    fn from(uuid: Uuid) -> Self {
        ScalarValue::Uuid(uuid)
    }
}

/// Leaf JSON values convert directly; arrays and objects are handled a level
/// up, by the argument value representation of the query document.
impl TryFrom<serde_json::Value> for ScalarValue {
    type Error = ConversionFailure;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Null => Ok(ScalarValue::Null),
            serde_json::Value::Bool(b) => Ok(ScalarValue::Boolean(b)),
            serde_json::Value::String(s) => Ok(ScalarValue::String(s)),
            serde_json::Value::Number(num) => {
                if let Some(int) = num.as_i64() {
                    Ok(ScalarValue::Int(int))
                } else {
                    num.as_f64()
                        .map(ScalarValue::Float)
                        .ok_or_else(|| ConversionFailure::new("JSON number", "ScalarValue"))
                }
            }
            serde_json::Value::Array(_) => Err(ConversionFailure::new("JSON array", "ScalarValue")),
            serde_json::Value::Object(_) => Err(ConversionFailure::new("JSON object", "ScalarValue")),
        }
    }
}
