//! # Composite Query
//!
//! Reads several child collections of one parent in a single round trip.
//!
//! Composite results are positional: step *i* of the reply belongs to step *i* of
//! the request. Rather than spreading literal indices through the console, a
//! [`CompositeQuery`] remembers which key it placed at which step, and
//! [`ChildCollections`] hands the collections back by key.

use crate::error::ConsoleError;
use mgmt_framework::{as_property_list, Composite, CompositeResult, Operation, Property, ResourceAddress};
use std::fmt::Debug;

/// A batch of `read-children-resources` steps against one parent.
#[derive(Debug, Clone)]
pub struct CompositeQuery<K> {
    keys: Vec<K>,
    composite: Composite,
}

impl<K> CompositeQuery<K>
where
    K: Copy + PartialEq + Debug,
{
    /// One step per key, in key order. `child_type` names the collection for a key.
    pub fn read_children(
        parent: &ResourceAddress,
        keys: &[K],
        child_type: impl Fn(K) -> String,
    ) -> Self {
        let composite = keys
            .iter()
            .map(|key| Operation::read_children(parent.clone(), child_type(*key)))
            .collect();
        Self {
            keys: keys.to_vec(),
            composite,
        }
    }

    pub fn composite(&self) -> &Composite {
        &self.composite
    }

    pub fn into_composite(self) -> Composite {
        self.composite
    }

    /// Maps a reply back onto the keys it was built from.
    ///
    /// Fails with [`ConsoleError::ShapeMismatch`] unless the reply has exactly
    /// one step per key.
    pub fn interpret(&self, result: &CompositeResult) -> Result<ChildCollections<K>, ConsoleError> {
        interpret(&self.keys, result)
    }
}

/// Same as [`CompositeQuery::interpret`], for callers that kept only the keys.
pub fn interpret<K>(keys: &[K], result: &CompositeResult) -> Result<ChildCollections<K>, ConsoleError>
where
    K: Copy + PartialEq + Debug,
{
    if result.len() != keys.len() {
        return Err(ConsoleError::ShapeMismatch {
            expected: keys.len(),
            actual: result.len(),
        });
    }
    let collections = keys
        .iter()
        .zip(result.iter())
        .map(|(key, step)| (*key, as_property_list(step)))
        .collect();
    Ok(ChildCollections { collections })
}

/// Child collections keyed the way they were requested.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildCollections<K> {
    collections: Vec<(K, Vec<Property>)>,
}

impl<K> ChildCollections<K>
where
    K: Copy + PartialEq + Debug,
{
    /// Collection for `key`; empty if the key was not part of the query.
    pub fn get(&self, key: K) -> &[Property] {
        self.collections
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, properties)| properties.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_present(&self, key: K) -> bool {
        !self.get(key).is_empty()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Removes and returns the collection for `key`.
    pub fn take(&mut self, key: K) -> Vec<Property> {
        self.collections
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, properties)| std::mem::take(properties))
            .unwrap_or_default()
    }
}
