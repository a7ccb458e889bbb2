//! Entity: a node instance bound to its pads.

use super::pad::{Pad, PadDirection};
use super::traits::{Node, NodeKind};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Count of entities currently alive in the process.
///
/// Lets tests verify that a failed build leaks nothing (allocations ==
/// frees). Incremented on construction, decremented on drop.
static LIVE_ENTITIES: AtomicUsize = AtomicUsize::new(0);

/// Get the number of entities currently alive in this process.
pub fn live_entities() -> usize {
    LIVE_ENTITIES.load(Ordering::SeqCst)
}

/// A node in the topology: display name, kind, its ordered pads and the
/// boxed per-kind node behind the uniform [`Node`] interface.
///
/// Entities are owned exclusively by the graph. They are created during
/// graph construction and destroyed (teardown hook included) during graph
/// teardown, in reverse creation order.
pub struct Entity {
    name: String,
    kind: NodeKind,
    pads: Vec<Pad>,
    node: Box<dyn Node>,
}

impl Entity {
    /// Create an entity from a node and its pad layout.
    pub fn new(
        name: impl Into<String>,
        kind: NodeKind,
        pads: Vec<Pad>,
        node: Box<dyn Node>,
    ) -> Self {
        LIVE_ENTITIES.fetch_add(1, Ordering::SeqCst);
        Self {
            name: name.into(),
            kind,
            pads,
            node,
        }
    }

    /// Get the entity's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the entity's node kind.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Get the entity's pads.
    pub fn pads(&self) -> &[Pad] {
        &self.pads
    }

    /// Get a pad by index.
    pub fn pad(&self, index: u16) -> Option<&Pad> {
        self.pads.get(index as usize)
    }

    /// Index of the first pad with the given direction, if any.
    pub fn first_pad(&self, direction: PadDirection) -> Option<u16> {
        self.pads
            .iter()
            .find(|p| p.direction() == direction)
            .map(|p| p.index())
    }

    /// Get a reference to the node.
    pub fn node(&self) -> &dyn Node {
        self.node.as_ref()
    }

    /// Get a mutable reference to the node.
    pub fn node_mut(&mut self) -> &mut Box<dyn Node> {
        &mut self.node
    }

    /// Downcast the node to its concrete type.
    pub fn node_as<T: Node + 'static>(&self) -> Option<&T> {
        self.node.as_any().downcast_ref::<T>()
    }

    /// Downcast the node to its concrete type, mutably.
    pub fn node_as_mut<T: Node + 'static>(&mut self) -> Option<&mut T> {
        self.node.as_any_mut().downcast_mut::<T>()
    }
}

impl Drop for Entity {
    fn drop(&mut self) {
        LIVE_ENTITIES.fetch_sub(1, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("pads", &self.pads.len())
            .finish()
    }
}
