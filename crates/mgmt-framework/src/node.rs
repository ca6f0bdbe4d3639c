//! Model nodes are plain `serde_json::Value`s; this module adds the named-child view.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named child resource: `name` plus its opaque attribute payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: Value,
}

impl Property {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Reads an object node as an ordered list of properties.
///
/// Anything that is not an object (including `null` for "no children") yields an
/// empty list.
pub fn as_property_list(node: &Value) -> Vec<Property> {
    match node {
        Value::Object(map) => map
            .iter()
            .map(|(name, value)| Property::new(name.clone(), value.clone()))
            .collect(),
        _ => Vec::new(),
    }
}
