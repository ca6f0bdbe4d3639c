use serde::{Deserialize, Serialize};

/// A deployable content item, as listed in the content repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub name: String,
    #[serde(default)]
    pub runtime_name: Option<String>,
}

impl Content {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            runtime_name: None,
        }
    }
}
