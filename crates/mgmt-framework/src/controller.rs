//! # Model Controller
//!
//! An in-memory management model that serves [`DispatchRequest`]s. It owns the
//! resource tree and processes requests *sequentially* in its own task, so the
//! tree needs no locks. Consoles talk to it through a [`Dispatcher`] exactly as
//! they would talk to a remote server; it backs the demo binary and the
//! end-to-end tests.

use crate::address::ResourceAddress;
use crate::dispatcher::Dispatcher;
use crate::error::DispatchError;
use crate::message::DispatchRequest;
use crate::operation::{Composite, CompositeResult, Operation, OperationKind};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

type Tree = BTreeMap<ResourceAddress, Map<String, Value>>;

/// The serving side of the management channel.
///
/// # Usage Pattern
///
/// ```rust
/// use mgmt_framework::{ModelController, Operation, ResourceAddress};
/// use serde_json::json;
///
/// #[tokio::main]
/// async fn main() {
///     let (controller, dispatcher) = ModelController::new(10);
///     tokio::spawn(controller.run());
///
///     let jca = ResourceAddress::root().child("subsystem", "jca");
///     dispatcher.execute(Operation::add(jca.clone(), json!({}))).await.unwrap();
///     let node = dispatcher.execute(Operation::read_resource(jca, 0)).await.unwrap();
///     assert!(node.is_object());
/// }
/// ```
///
/// ## Operations
///
/// * **add**: the parent must exist and the address must be free.
/// * **remove**: removes the resource and its whole subtree.
/// * **read-resource**: attributes plus children grouped by type, down to
///   `recursive_depth` levels.
/// * **read-children-resources**: `{name: attributes}` for one child type.
/// * **write-attribute** / **undefine-attribute**: edit one attribute.
///
/// Composites run against a scratch copy of the tree that is committed only if
/// every step succeeds.
pub struct ModelController {
    receiver: mpsc::Receiver<DispatchRequest>,
    tree: Tree,
}

impl ModelController {
    /// Creates a controller holding only the root resource, plus its dispatcher.
    pub fn new(buffer_size: usize) -> (Self, Dispatcher) {
        Self::with_tree(buffer_size, Vec::new())
    }

    /// Creates a controller pre-populated with `resources` (parents first).
    ///
    /// # Panics
    ///
    /// Panics if `buffer_size` is 0.
    pub fn with_tree(
        buffer_size: usize,
        resources: Vec<(ResourceAddress, Map<String, Value>)>,
    ) -> (Self, Dispatcher) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let mut tree = Tree::new();
        tree.insert(ResourceAddress::root(), Map::new());
        tree.extend(resources);
        let controller = Self { receiver, tree };
        (controller, Dispatcher::new(sender))
    }

    /// Runs the request loop until every dispatcher has been dropped.
    pub async fn run(mut self) {
        info!(size = self.tree.len(), "Model controller started");

        while let Some(request) = self.receiver.recv().await {
            match request {
                DispatchRequest::Execute {
                    operation,
                    respond_to,
                } => {
                    debug!(?operation, "Execute");
                    let result = apply(&mut self.tree, &operation);
                    match &result {
                        Ok(_) => info!(%operation, "Executed"),
                        Err(e) => warn!(%operation, error = %e, "Execute failed"),
                    }
                    let _ = respond_to.send(result);
                }
                DispatchRequest::ExecuteComposite {
                    composite,
                    respond_to,
                } => {
                    debug!(steps = composite.len(), "Composite");
                    let result = self.apply_composite(&composite);
                    match &result {
                        Ok(_) => info!(steps = composite.len(), "Composite executed"),
                        Err(e) => warn!(error = %e, "Composite rolled back"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(size = self.tree.len(), "Shutdown");
    }

    fn apply_composite(&mut self, composite: &Composite) -> Result<CompositeResult, DispatchError> {
        let mut scratch = self.tree.clone();
        let mut results = Vec::with_capacity(composite.len());
        for (index, step) in composite.steps().iter().enumerate() {
            match apply(&mut scratch, step) {
                Ok(value) => results.push(value),
                Err(e) => {
                    return Err(DispatchError::Failed(format!(
                        "Composite operation failed and was rolled back. Step {} ({}) failed: {}",
                        index + 1,
                        step,
                        e
                    )))
                }
            }
        }
        self.tree = scratch;
        Ok(CompositeResult::new(results))
    }
}

fn not_found(address: &ResourceAddress) -> DispatchError {
    DispatchError::Failed(format!("Management resource '{address}' not found"))
}

fn apply(tree: &mut Tree, operation: &Operation) -> Result<Value, DispatchError> {
    let address = &operation.address;
    match &operation.kind {
        OperationKind::Add { payload } => {
            if tree.contains_key(address) {
                return Err(DispatchError::Failed(format!(
                    "Duplicate resource '{address}'"
                )));
            }
            let parent = address
                .parent()
                .ok_or_else(|| DispatchError::Failed("Cannot add the root resource".into()))?;
            if !tree.contains_key(&parent) {
                return Err(not_found(&parent));
            }
            let attributes = match payload {
                Value::Object(map) => map.clone(),
                Value::Null => Map::new(),
                other => {
                    return Err(DispatchError::Failed(format!(
                        "Invalid payload for add: {other}"
                    )))
                }
            };
            tree.insert(address.clone(), attributes);
            Ok(Value::Null)
        }
        OperationKind::Remove => {
            if address.is_root() || !tree.contains_key(address) {
                return Err(not_found(address));
            }
            tree.retain(|candidate, _| !candidate.starts_with(address));
            Ok(Value::Null)
        }
        OperationKind::ReadResource { recursive_depth } => {
            read_resource(tree, address, *recursive_depth).ok_or_else(|| not_found(address))
        }
        OperationKind::ReadChildrenResources { child_type } => {
            if !tree.contains_key(address) {
                return Err(not_found(address));
            }
            let children: Map<String, Value> = direct_children(tree, address)
                .filter(|(child, _)| child.last().is_some_and(|s| &s.key == child_type))
                .filter_map(|(child, attributes)| {
                    child
                        .last()
                        .map(|s| (s.value.clone(), Value::Object(attributes.clone())))
                })
                .collect();
            Ok(Value::Object(children))
        }
        OperationKind::WriteAttribute { name, value } => {
            let attributes = tree.get_mut(address).ok_or_else(|| not_found(address))?;
            attributes.insert(name.clone(), value.clone());
            Ok(Value::Null)
        }
        OperationKind::UndefineAttribute { name } => {
            let attributes = tree.get_mut(address).ok_or_else(|| not_found(address))?;
            attributes.remove(name);
            Ok(Value::Null)
        }
    }
}

fn direct_children<'a>(
    tree: &'a Tree,
    address: &'a ResourceAddress,
) -> impl Iterator<Item = (&'a ResourceAddress, &'a Map<String, Value>)> {
    let depth = address.segments().len() + 1;
    tree.range(address.clone()..)
        .take_while(move |(candidate, _)| candidate.starts_with(address))
        .filter(move |(candidate, _)| candidate.segments().len() == depth)
}

fn read_resource(tree: &Tree, address: &ResourceAddress, depth: u32) -> Option<Value> {
    let mut node = tree.get(address)?.clone();
    if depth > 0 {
        for (child, _) in direct_children(tree, address) {
            let Some(segment) = child.last() else { continue };
            let Some(value) = read_resource(tree, child, depth - 1) else { continue };
            let group = node
                .entry(segment.key.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(group) = group {
                group.insert(segment.value.clone(), value);
            }
        }
    }
    Some(Value::Object(node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn jca() -> ResourceAddress {
        ResourceAddress::root().child("subsystem", "jca")
    }

    fn wm1() -> ResourceAddress {
        jca().child("workmanager", "wm1")
    }

    fn seeded() -> Tree {
        let mut tree = Tree::new();
        tree.insert(ResourceAddress::root(), Map::new());
        for op in [
            Operation::add(jca(), json!({})),
            Operation::add(wm1(), json!({"name": "wm1"})),
            Operation::add(
                wm1().child("long-running-threads", "lrt-a"),
                json!({"max-threads": 10}),
            ),
        ] {
            apply(&mut tree, &op).unwrap();
        }
        tree
    }

    #[test]
    fn add_requires_parent_and_free_address() {
        let mut tree = seeded();
        let orphan = jca().child("workmanager", "nope").child("short-running-threads", "x");
        assert!(apply(&mut tree, &Operation::add(orphan, json!({}))).is_err());
        assert!(apply(&mut tree, &Operation::add(wm1(), json!({}))).is_err());
    }

    #[test]
    fn read_children_filters_by_type() {
        let mut tree = seeded();
        let lrt = apply(&mut tree, &Operation::read_children(wm1(), "long-running-threads")).unwrap();
        let srt = apply(&mut tree, &Operation::read_children(wm1(), "short-running-threads")).unwrap();
        assert_eq!(lrt, json!({"lrt-a": {"max-threads": 10}}));
        assert_eq!(srt, json!({}));
    }

    #[test]
    fn read_resource_includes_children_up_to_depth() {
        let mut tree = seeded();
        let shallow = apply(&mut tree, &Operation::read_resource(jca(), 1)).unwrap();
        assert_eq!(shallow, json!({"workmanager": {"wm1": {"name": "wm1"}}}));
        let deep = apply(&mut tree, &Operation::read_resource(jca(), 2)).unwrap();
        assert_eq!(
            deep["workmanager"]["wm1"]["long-running-threads"]["lrt-a"]["max-threads"],
            10
        );
    }

    #[test]
    fn remove_drops_subtree() {
        let mut tree = seeded();
        apply(&mut tree, &Operation::remove(wm1())).unwrap();
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn write_and_undefine_attribute() {
        let mut tree = seeded();
        apply(&mut tree, &Operation::write_attribute(wm1(), "elytron-enabled", json!(true))).unwrap();
        assert_eq!(tree[&wm1()]["elytron-enabled"], json!(true));
        apply(&mut tree, &Operation::undefine_attribute(wm1(), "elytron-enabled")).unwrap();
        assert!(!tree[&wm1()].contains_key("elytron-enabled"));
    }

    #[tokio::test]
    async fn composite_is_all_or_nothing() {
        let (controller, dispatcher) = ModelController::with_tree(
            10,
            vec![(jca(), Map::new()), (wm1(), Map::new())],
        );
        tokio::spawn(controller.run());

        let composite = Composite::new(vec![
            Operation::write_attribute(wm1(), "name", json!("renamed")),
            Operation::remove(jca().child("workmanager", "missing")),
        ]);
        let err = dispatcher.execute_composite(composite).await.unwrap_err();
        assert!(matches!(&err, DispatchError::Failed(msg) if msg.contains("Step 2")));

        let node = dispatcher.execute(Operation::read_resource(wm1(), 0)).await.unwrap();
        assert_eq!(node, json!({}));
    }
}
