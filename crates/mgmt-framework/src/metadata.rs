//! # Resource Metadata
//!
//! Attribute descriptions for a resource type: which attributes exist, their
//! defaults, and whether they may be undefined. Forms are built from this, and
//! resetting a resource means driving each attribute back to what its description
//! implies.

use crate::address::AddressTemplate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Description of one attribute.
///
/// Missing fields take the values of [`AttributeDescription::default`]: optional
/// and nillable, without a default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeDescription {
    pub description: String,
    pub default: Option<Value>,
    pub required: bool,
    pub nillable: bool,
}

impl Default for AttributeDescription {
    fn default() -> Self {
        Self {
            description: String::new(),
            default: None,
            required: false,
            nillable: true,
        }
    }
}

/// What resetting an attribute means for a given description.
#[derive(Debug, Clone, PartialEq)]
pub enum ResetTarget {
    /// Write the declared default back.
    Default(Value),
    /// Undefine the attribute.
    Undefine,
    /// Required and without default; there is nothing to reset to.
    Keep,
}

impl AttributeDescription {
    pub fn reset_target(&self) -> ResetTarget {
        match &self.default {
            Some(value) => ResetTarget::Default(value.clone()),
            None if !self.required && self.nillable => ResetTarget::Undefine,
            None => ResetTarget::Keep,
        }
    }
}

/// Attribute descriptions of one resource type, keyed by attribute name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeDescription>,
}

impl Metadata {
    pub fn attribute(&self, name: &str) -> Option<&AttributeDescription> {
        self.attributes.get(name)
    }

    pub fn with_attribute(mut self, name: impl Into<String>, description: AttributeDescription) -> Self {
        self.attributes.insert(name.into(), description);
        self
    }
}

/// Looks up metadata by template.
pub trait MetadataRegistry: Send + Sync {
    fn lookup(&self, template: &AddressTemplate) -> Option<Metadata>;
}

/// Registry holding a fixed set of descriptions, keyed by template string.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadataRegistry {
    entries: HashMap<String, Metadata>,
}

impl StaticMetadataRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, template: &AddressTemplate, metadata: Metadata) -> Self {
        self.entries.insert(template.as_str().to_string(), metadata);
        self
    }
}

impl MetadataRegistry for StaticMetadataRegistry {
    fn lookup(&self, template: &AddressTemplate) -> Option<Metadata> {
        self.entries.get(template.as_str()).cloned()
    }
}
