use crate::error::CoreError;
use schema::OutputField;
use social_models::{MemberTypeId, ScalarValue};
use uuid::Uuid;

/// A validated selection set: every field exists on its schema object, every
/// argument is present and coerced. Ready for execution.
#[derive(Debug, Clone)]
pub struct ParsedObject {
    pub fields: Vec<FieldPair>,
}

/// Parsed-side and schema-side of one selected field.
#[derive(Debug, Clone)]
pub struct FieldPair {
    pub parsed_field: ParsedField,
    pub schema_field: OutputField,
}

#[derive(Debug, Clone)]
pub struct ParsedField {
    pub name: String,
    pub alias: Option<String>,
    pub arguments: Vec<ParsedArgument>,
    pub nested_fields: Option<ParsedObject>,
}

#[derive(Debug, Clone)]
pub struct ParsedArgument {
    pub name: String,
    pub value: ScalarValue,
}

impl ParsedField {
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn argument(&self, name: &str) -> Option<&ScalarValue> {
        self.arguments
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
    }

    // The typed accessors below encode the validation contract: after the
    // document parser accepted the field, a required argument is present and
    // carries the coerced variant. Anything else is an engine defect.

    fn required(&self, name: &str) -> crate::Result<&ScalarValue> {
        self.argument(name).ok_or_else(|| {
            CoreError::internal(format!(
                "validated field `{}` is missing required argument `{name}`",
                self.name
            ))
        })
    }

    fn mistyped(&self, name: &str, expected: &str) -> CoreError {
        CoreError::internal(format!(
            "validated argument `{name}` of field `{}` does not carry a {expected}",
            self.name
        ))
    }

    pub fn required_uuid(&self, name: &str) -> crate::Result<Uuid> {
        match self.required(name)? {
            ScalarValue::Uuid(uuid) => Ok(*uuid),
            _ => Err(self.mistyped(name, "UUID")),
        }
    }

    pub fn required_string(&self, name: &str) -> crate::Result<String> {
        match self.required(name)? {
            ScalarValue::String(s) => Ok(s.clone()),
            _ => Err(self.mistyped(name, "String")),
        }
    }

    pub fn required_float(&self, name: &str) -> crate::Result<f64> {
        match self.required(name)? {
            ScalarValue::Float(f) => Ok(*f),
            _ => Err(self.mistyped(name, "Float")),
        }
    }

    pub fn required_int(&self, name: &str) -> crate::Result<i64> {
        match self.required(name)? {
            ScalarValue::Int(i) => Ok(*i),
            _ => Err(self.mistyped(name, "Int")),
        }
    }

    pub fn required_bool(&self, name: &str) -> crate::Result<bool> {
        match self.required(name)? {
            ScalarValue::Boolean(b) => Ok(*b),
            _ => Err(self.mistyped(name, "Boolean")),
        }
    }

    pub fn required_member_type_id(&self, name: &str) -> crate::Result<MemberTypeId> {
        match self.required(name)? {
            ScalarValue::Enum(value) => value
                .parse()
                .map_err(|_| self.mistyped(name, "MemberTypeId")),
            _ => Err(self.mistyped(name, "MemberTypeId")),
        }
    }

    pub fn optional_uuid(&self, name: &str) -> crate::Result<Option<Uuid>> {
        self.argument(name)
            .map(|value| match value {
                ScalarValue::Uuid(uuid) => Ok(*uuid),
                _ => Err(self.mistyped(name, "UUID")),
            })
            .transpose()
    }

    pub fn optional_string(&self, name: &str) -> crate::Result<Option<String>> {
        self.argument(name)
            .map(|value| match value {
                ScalarValue::String(s) => Ok(s.clone()),
                _ => Err(self.mistyped(name, "String")),
            })
            .transpose()
    }

    pub fn optional_float(&self, name: &str) -> crate::Result<Option<f64>> {
        self.argument(name)
            .map(|value| match value {
                ScalarValue::Float(f) => Ok(*f),
                _ => Err(self.mistyped(name, "Float")),
            })
            .transpose()
    }

    pub fn optional_int(&self, name: &str) -> crate::Result<Option<i64>> {
        self.argument(name)
            .map(|value| match value {
                ScalarValue::Int(i) => Ok(*i),
                _ => Err(self.mistyped(name, "Int")),
            })
            .transpose()
    }

    pub fn optional_bool(&self, name: &str) -> crate::Result<Option<bool>> {
        self.argument(name)
            .map(|value| match value {
                ScalarValue::Boolean(b) => Ok(*b),
                _ => Err(self.mistyped(name, "Boolean")),
            })
            .transpose()
    }

    pub fn optional_member_type_id(&self, name: &str) -> crate::Result<Option<MemberTypeId>> {
        self.argument(name)
            .map(|value| match value {
                ScalarValue::Enum(v) => v.parse().map_err(|_| self.mistyped(name, "MemberTypeId")),
                _ => Err(self.mistyped(name, "MemberTypeId")),
            })
            .transpose()
    }
}
