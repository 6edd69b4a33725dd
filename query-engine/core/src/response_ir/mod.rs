//! Response intermediate representation: a tree mirroring the selection tree,
//! with resolver outputs substituted in. Serializes directly into the wire
//! response.

use crate::error::CoreError;
use indexmap::IndexMap;
use serde::Serialize;
use social_models::ScalarValue;

/// A `key -> value` map to an IR item. Field order follows selection order.
pub type Map = IndexMap<String, Item>;

/// A list of IR items.
pub type List = Vec<Item>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Item {
    Map(Map),
    List(List),
    Value(ScalarValue),
}

impl Item {
    pub fn null() -> Self {
        Item::Value(ScalarValue::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Item::Value(ScalarValue::Null))
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Item::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Item::List(list) => Some(list),
            _ => None,
        }
    }
}

/// The outcome of executing one operation: the assembled data tree plus every
/// field-level error recorded along the way. Field errors never abort
/// siblings; the failed position holds a null.
#[derive(Debug)]
pub struct ResponseData {
    pub data: Map,
    pub errors: Vec<FieldError>,
}

impl ResponseData {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// An error attached to a response position. List positions appear as their
/// element index.
#[derive(Debug)]
pub struct FieldError {
    pub path: Vec<String>,
    pub error: CoreError,
}

impl FieldError {
    pub fn new(path: Vec<String>, error: CoreError) -> Self {
        Self { path, error }
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }
}
