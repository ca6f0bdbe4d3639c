//! Minimal form model.
//!
//! Rendering belongs to the UI layer; the core only decides *which* items a form
//! offers, whether they are editable, and what they are preset to.

use mgmt_framework::Metadata;
use serde_json::Value;

/// Name of the unbound item holding the new resource's name.
pub const NAME: &str = "name";
/// Name of the unbound item holding the thread pool type.
pub const TYPE: &str = "type";

/// How an item takes input.
#[derive(Debug, Clone, PartialEq)]
pub enum FormItemKind {
    Text,
    SingleSelect { choices: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormItem {
    pub name: String,
    pub label: String,
    pub kind: FormItemKind,
    pub required: bool,
    pub enabled: bool,
    pub value: Option<Value>,
}

impl FormItem {
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: FormItemKind::Text,
            required: false,
            enabled: true,
            value: None,
        }
    }

    pub fn single_select(
        name: impl Into<String>,
        label: impl Into<String>,
        choices: Vec<String>,
    ) -> Self {
        Self {
            kind: FormItemKind::SingleSelect { choices },
            ..Self::text(name, label)
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }
}

/// Ordered list of items. Unbound items (name, type) come first; attribute items
/// follow in the order they were included.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub id: String,
    items: Vec<FormItem>,
    unbound: usize,
}

impl Form {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            items: Vec::new(),
            unbound: 0,
        }
    }

    /// A form over `attributes` of `metadata`, skipping names it does not describe.
    pub fn from_metadata(id: impl Into<String>, metadata: &Metadata, attributes: &[&str]) -> Self {
        let mut form = Self::new(id);
        for name in attributes {
            if let Some(description) = metadata.attribute(name) {
                form.items.push(FormItem::text(*name, *name).required(description.required));
            }
        }
        form
    }

    /// Inserts an item that is not backed by an attribute at `index` among the unbound items.
    pub fn unbound_item(mut self, item: FormItem, index: usize) -> Self {
        let index = index.min(self.unbound);
        self.items.insert(index, item);
        self.unbound += 1;
        self
    }

    pub fn items(&self) -> &[FormItem] {
        &self.items
    }

    pub fn item(&self, name: &str) -> Option<&FormItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Names of the attribute-backed items.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.items[self.unbound..].iter().map(|item| item.name.as_str())
    }
}
