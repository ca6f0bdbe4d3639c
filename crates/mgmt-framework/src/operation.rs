//! # Operations
//!
//! Every interaction with the management model is an [`Operation`]: an address plus
//! one of a small, closed set of [`OperationKind`]s. Independent operations can be
//! batched into a [`Composite`], which the server executes all-or-nothing and
//! answers with a [`CompositeResult`] holding one result per step, in step order.

use crate::address::ResourceAddress;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Display};

/// What an operation does at its address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "kebab-case")]
pub enum OperationKind {
    Add {
        #[serde(default)]
        payload: Value,
    },
    Remove,
    ReadResource {
        recursive_depth: u32,
    },
    ReadChildrenResources {
        child_type: String,
    },
    WriteAttribute {
        name: String,
        value: Value,
    },
    UndefineAttribute {
        name: String,
    },
}

impl OperationKind {
    /// Wire name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            OperationKind::Add { .. } => "add",
            OperationKind::Remove => "remove",
            OperationKind::ReadResource { .. } => "read-resource",
            OperationKind::ReadChildrenResources { .. } => "read-children-resources",
            OperationKind::WriteAttribute { .. } => "write-attribute",
            OperationKind::UndefineAttribute { .. } => "undefine-attribute",
        }
    }

    pub fn is_read(&self) -> bool {
        matches!(
            self,
            OperationKind::ReadResource { .. } | OperationKind::ReadChildrenResources { .. }
        )
    }
}

/// A single operation against one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub address: ResourceAddress,
    #[serde(flatten)]
    pub kind: OperationKind,
}

impl Operation {
    pub fn new(address: ResourceAddress, kind: OperationKind) -> Self {
        Self { address, kind }
    }

    pub fn add(address: ResourceAddress, payload: Value) -> Self {
        Self::new(address, OperationKind::Add { payload })
    }

    pub fn remove(address: ResourceAddress) -> Self {
        Self::new(address, OperationKind::Remove)
    }

    pub fn read_resource(address: ResourceAddress, recursive_depth: u32) -> Self {
        Self::new(address, OperationKind::ReadResource { recursive_depth })
    }

    pub fn read_children(address: ResourceAddress, child_type: impl Into<String>) -> Self {
        Self::new(
            address,
            OperationKind::ReadChildrenResources {
                child_type: child_type.into(),
            },
        )
    }

    pub fn write_attribute(address: ResourceAddress, name: impl Into<String>, value: Value) -> Self {
        Self::new(
            address,
            OperationKind::WriteAttribute {
                name: name.into(),
                value,
            },
        )
    }

    pub fn undefine_attribute(address: ResourceAddress, name: impl Into<String>) -> Self {
        Self::new(address, OperationKind::UndefineAttribute { name: name.into() })
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.name())
    }
}

/// Ordered batch of operations executed as one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Composite {
    steps: Vec<Operation>,
}

impl Composite {
    pub fn new(steps: Vec<Operation>) -> Self {
        Self { steps }
    }

    pub fn push(&mut self, operation: Operation) {
        self.steps.push(operation);
    }

    pub fn steps(&self) -> &[Operation] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_steps(self) -> Vec<Operation> {
        self.steps
    }
}

impl FromIterator<Operation> for Composite {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Per-step results of a [`Composite`], positionally aligned with its steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeResult {
    steps: Vec<Value>,
}

impl CompositeResult {
    pub fn new(steps: Vec<Value>) -> Self {
        Self { steps }
    }

    /// Result of step `index`, if the result has that many steps.
    pub fn step(&self, index: usize) -> Option<&Value> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn operation_serializes_with_wire_names() {
        let address = ResourceAddress::root().child("subsystem", "jca");
        let op = Operation::read_children(address, "workmanager");
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["operation"], "read-children-resources");
        assert_eq!(json["child_type"], "workmanager");
        assert_eq!(op.to_string(), "/subsystem=jca:read-children-resources");
    }

    #[test]
    fn composite_result_steps_are_positional() {
        let result = CompositeResult::new(vec![json!({"a": {}}), json!({})]);
        assert_eq!(result.len(), 2);
        assert_eq!(result.step(0), Some(&json!({"a": {}})));
        assert!(result.step(2).is_none());
    }
}
