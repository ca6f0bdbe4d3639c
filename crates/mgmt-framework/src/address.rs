//! # Addresses & Templates
//!
//! A [`ResourceAddress`] identifies one node of the management model as an ordered
//! list of `type=name` segments. Console code rarely builds addresses by hand; it
//! keeps symbolic [`AddressTemplate`]s and resolves them per operation against a
//! [`StatementContext`] and, for collection resources, the names the user picked.
//!
//! ```rust
//! use mgmt_framework::{AddressTemplate, MapStatementContext};
//!
//! let template = AddressTemplate::of("subsystem=jca/workmanager=*");
//! let address = template
//!     .resolve(&MapStatementContext::default(), &["default"])
//!     .unwrap();
//! assert_eq!(address.to_string(), "/subsystem=jca/workmanager=default");
//! ```

use crate::error::AddressError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display};

/// One `type=name` pair of a resolved address.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub key: String,
    pub value: String,
}

impl Segment {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Fully resolved address of a resource. The empty address is the model root.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceAddress {
    segments: Vec<Segment>,
}

impl ResourceAddress {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns a new address with one more segment.
    pub fn child(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::new(key, value));
        Self { segments }
    }

    /// The parent address, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self {
            segments: rest.to_vec(),
        })
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// True if `self` equals `other` or lies below it.
    pub fn starts_with(&self, other: &ResourceAddress) -> bool {
        self.segments.starts_with(&other.segments)
    }
}

impl Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Supplies values for `{tuple}` placeholders, e.g. the selected profile or host.
pub trait StatementContext: Send + Sync {
    fn resolve(&self, tuple: &str) -> Option<String>;
}

/// A [`StatementContext`] backed by a plain map, usually seeded from configuration.
#[derive(Debug, Clone, Default)]
pub struct MapStatementContext {
    values: BTreeMap<String, String>,
}

impl MapStatementContext {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    pub fn with(mut self, tuple: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(tuple.into(), value.into());
        self
    }
}

impl StatementContext for MapStatementContext {
    fn resolve(&self, tuple: &str) -> Option<String> {
        self.values.get(tuple).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum TemplateValue {
    Literal(String),
    Wildcard,
    Tuple(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TemplateSegment {
    key: String,
    value: TemplateValue,
}

/// Symbolic path pattern such as `subsystem=jca/workmanager=*`.
///
/// Values are literals, `*` (filled positionally from the names handed to
/// [`resolve`](Self::resolve)) or `{tuple}` (filled from the statement context).
/// Parsing is lazy: a malformed segment surfaces as an error on resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressTemplate {
    template: String,
}

impl AddressTemplate {
    pub fn of(template: impl Into<String>) -> Self {
        let template = template.into();
        Self {
            template: template.trim_matches('/').to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Returns a new template with `segment` (e.g. `short-running-threads=*`) appended.
    pub fn append(&self, segment: &str) -> Self {
        let segment = segment.trim_matches('/');
        if self.template.is_empty() {
            Self::of(segment)
        } else {
            Self::of(format!("{}/{}", self.template, segment))
        }
    }

    /// Type of the last segment (`workmanager` for `subsystem=jca/workmanager=*`).
    pub fn last_name(&self) -> &str {
        self.last_segment()
            .and_then(|s| s.split_once('=').map(|(k, _)| k))
            .unwrap_or("")
    }

    /// Value of the last segment (`jca` for `subsystem=jca`).
    pub fn last_value(&self) -> &str {
        self.last_segment()
            .and_then(|s| s.split_once('=').map(|(_, v)| v))
            .unwrap_or("")
    }

    fn last_segment(&self) -> Option<&str> {
        self.template.rsplit('/').next().filter(|s| !s.is_empty())
    }

    fn parse(&self) -> Result<Vec<TemplateSegment>, AddressError> {
        if self.template.is_empty() {
            return Ok(Vec::new());
        }
        self.template
            .split('/')
            .map(|raw| {
                let (key, value) = raw
                    .split_once('=')
                    .filter(|(k, v)| !k.is_empty() && !v.is_empty())
                    .ok_or_else(|| AddressError::MalformedSegment(raw.to_string()))?;
                let value = if value == "*" {
                    TemplateValue::Wildcard
                } else if let Some(tuple) = value.strip_prefix('{').and_then(|v| v.strip_suffix('}')) {
                    TemplateValue::Tuple(tuple.to_string())
                } else {
                    TemplateValue::Literal(value.to_string())
                };
                Ok(TemplateSegment {
                    key: key.to_string(),
                    value,
                })
            })
            .collect()
    }

    /// Resolves the template. Wildcards consume `names` in order; surplus names are ignored.
    pub fn resolve(
        &self,
        context: &dyn StatementContext,
        names: &[&str],
    ) -> Result<ResourceAddress, AddressError> {
        let mut names = names.iter();
        let mut segments = Vec::new();
        for (index, segment) in self.parse()?.into_iter().enumerate() {
            let value = match segment.value {
                TemplateValue::Literal(value) => value,
                TemplateValue::Wildcard => names
                    .next()
                    .map(|name| name.to_string())
                    .ok_or_else(|| AddressError::MissingName {
                        template: self.template.clone(),
                        index,
                    })?,
                TemplateValue::Tuple(tuple) => context
                    .resolve(&tuple)
                    .ok_or(AddressError::UnresolvedTuple(tuple))?,
            };
            segments.push(Segment::new(segment.key, value));
        }
        Ok(ResourceAddress::from_segments(segments))
    }
}

impl Display for AddressTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.template)
    }
}
