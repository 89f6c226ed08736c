//! Node tree for Tessera.
//!
//! Provides the arena-backed visual tree that UI state helpers hang off:
//! - Stable, generational node identifiers
//! - Parent-child relationships with cascade destruction
//! - Node naming for debugging
//! - Per-node authoring markers (context-menu suppression, root boundary)
//!
//! # Key Types
//!
//! - [`NodeId`] - Unique stable identifier for each node
//! - [`NodeTree`] - Arena owning all nodes and their relationships
//! - [`Hierarchy`] - The read-only view of a tree that resolvers consume
//!
//! A [`NodeId`] is generational: once a node is destroyed its id never
//! matches a later node, even if the arena slot is reused. Side tables keyed
//! by `NodeId` (for example a `slotmap::SecondaryMap`) therefore never resolve
//! a destroyed node to a newer one.

use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a node in a [`NodeTree`].
    ///
    /// `NodeId`s remain valid as the tree is restructured and become invalid
    /// once the node is destroyed.
    pub struct NodeId;
}

impl NodeId {
    /// Convert the NodeId to a raw u64 value.
    ///
    /// The raw value can be converted back using [`NodeId::from_raw`].
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Create a NodeId from a raw u64 value.
    ///
    /// This does not check whether the node exists in any tree.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// Errors that can occur during node tree operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeError {
    /// The node ID is invalid or the node has been destroyed.
    #[error("Invalid or destroyed node ID")]
    InvalidNode,
    /// Attempted to set a node as its own parent or ancestor.
    #[error("Cannot set a node as its own parent or ancestor")]
    CircularParentage,
}

/// Result type for node tree operations.
pub type NodeResult<T> = std::result::Result<T, NodeError>;

/// The structural queries an ancestor walk needs from a visual tree.
///
/// Implementations must answer for unknown or destroyed ids without
/// panicking: `false` from [`is_alive`](Self::is_alive), `None` for the
/// parent and `false` for both markers.
pub trait Hierarchy {
    /// Whether `id` names a node that currently exists.
    ///
    /// Side tables keyed by [`NodeId`] use this to ignore entries left
    /// behind by destroyed nodes.
    fn is_alive(&self, id: NodeId) -> bool;

    /// The immediate structural parent of `id`, if any.
    fn parent_of(&self, id: NodeId) -> Option<NodeId>;

    /// Whether `id` is the root boundary of the tree (the document-level
    /// container). Ancestor walks stop here.
    fn is_root(&self, id: NodeId) -> bool;

    /// Whether `id` carries the "no context menu from here down" marker.
    fn has_suppression_marker(&self, id: NodeId) -> bool;
}

/// Internal data stored in the arena for each node.
struct NodeData {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Authoring marker: no context menu for this node or its descendants.
    suppress_context_menu: bool,
    /// Marks the document-level container that ends ancestor walks.
    root_boundary: bool,
}

impl NodeData {
    fn new(name: String) -> Self {
        Self {
            name,
            parent: None,
            children: Vec::new(),
            suppress_context_menu: false,
            root_boundary: false,
        }
    }
}

/// Arena-based storage for a tree of UI nodes.
///
/// The tree is owned by a single UI session; it is not shared globally.
#[derive(Default)]
pub struct NodeTree {
    nodes: SlotMap<NodeId, NodeData>,
}

impl NodeTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Create a parentless node and return its ID.
    pub fn create(&mut self, name: impl Into<String>) -> NodeId {
        let name = name.into();
        let id = self.nodes.insert(NodeData::new(name));
        tracing::trace!(target: targets::NODE, ?id, "created node");
        id
    }

    /// Create a node as the last child of `parent`.
    pub fn create_child(&mut self, parent: NodeId, name: impl Into<String>) -> NodeResult<NodeId> {
        if !self.nodes.contains_key(parent) {
            return Err(NodeError::InvalidNode);
        }
        let id = self.create(name);
        if let Some(data) = self.nodes.get_mut(id) {
            data.parent = Some(parent);
        }
        if let Some(parent_data) = self.nodes.get_mut(parent) {
            parent_data.children.push(id);
        }
        Ok(id)
    }

    /// Remove a node and all its descendants.
    ///
    /// Returns every removed ID, descendants before the node itself, so
    /// callers can drop side-table entries deterministically.
    #[tracing::instrument(skip(self), target = "tessera_core::node", level = "trace")]
    pub fn destroy(&mut self, id: NodeId) -> NodeResult<Vec<NodeId>> {
        let mut removed = Vec::new();
        self.collect_descendants(id, &mut removed)?;

        if let Some(parent_id) = self.nodes.get(id).and_then(|d| d.parent) {
            if let Some(parent_data) = self.nodes.get_mut(parent_id) {
                parent_data.children.retain(|&child| child != id);
            }
        }

        for &child_id in &removed {
            self.nodes.remove(child_id);
        }
        self.nodes.remove(id);
        removed.push(id);

        tracing::trace!(target: targets::NODE, ?id, removed = removed.len(), "destroyed subtree");
        Ok(removed)
    }

    /// Collect descendants depth-first, children before parents.
    fn collect_descendants(&self, id: NodeId, result: &mut Vec<NodeId>) -> NodeResult<()> {
        let data = self.nodes.get(id).ok_or(NodeError::InvalidNode)?;
        for &child_id in &data.children {
            self.collect_descendants(child_id, result)?;
            result.push(child_id);
        }
        Ok(())
    }

    /// Check if a node exists in the tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Move a node under a new parent, or make it parentless with `None`.
    pub fn set_parent(&mut self, id: NodeId, new_parent: Option<NodeId>) -> NodeResult<()> {
        if !self.nodes.contains_key(id) {
            return Err(NodeError::InvalidNode);
        }

        if let Some(parent_id) = new_parent {
            if !self.nodes.contains_key(parent_id) {
                return Err(NodeError::InvalidNode);
            }
            if self.is_ancestor_of(id, parent_id) {
                return Err(NodeError::CircularParentage);
            }
        }

        if let Some(old_parent_id) = self.nodes.get(id).and_then(|d| d.parent) {
            if let Some(parent_data) = self.nodes.get_mut(old_parent_id) {
                parent_data.children.retain(|&child| child != id);
            }
        }

        if let Some(data) = self.nodes.get_mut(id) {
            data.parent = new_parent;
        }

        if let Some(parent_id) = new_parent {
            if let Some(parent_data) = self.nodes.get_mut(parent_id) {
                parent_data.children.push(id);
            }
        }

        Ok(())
    }

    /// Check if `potential_ancestor` is `id` or one of its ancestors.
    fn is_ancestor_of(&self, potential_ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == potential_ancestor {
                return true;
            }
            current = self.nodes.get(current_id).and_then(|d| d.parent);
        }
        false
    }

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> NodeResult<Option<NodeId>> {
        self.nodes
            .get(id)
            .map(|d| d.parent)
            .ok_or(NodeError::InvalidNode)
    }

    /// Get the children of a node, in insertion order.
    pub fn children(&self, id: NodeId) -> NodeResult<&[NodeId]> {
        self.nodes
            .get(id)
            .map(|d| d.children.as_slice())
            .ok_or(NodeError::InvalidNode)
    }

    /// Get the node's name.
    pub fn name(&self, id: NodeId) -> NodeResult<&str> {
        self.nodes
            .get(id)
            .map(|d| d.name.as_str())
            .ok_or(NodeError::InvalidNode)
    }

    /// Set the node's name.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) -> NodeResult<()> {
        self.nodes
            .get_mut(id)
            .map(|d| d.name = name.into())
            .ok_or(NodeError::InvalidNode)
    }

    /// Mark (or unmark) a node so that neither it nor its descendants show a
    /// context menu.
    pub fn set_suppression_marker(&mut self, id: NodeId, suppressed: bool) -> NodeResult<()> {
        self.nodes
            .get_mut(id)
            .map(|d| d.suppress_context_menu = suppressed)
            .ok_or(NodeError::InvalidNode)
    }

    /// Mark (or unmark) a node as the root boundary of the tree.
    pub fn set_root_boundary(&mut self, id: NodeId, boundary: bool) -> NodeResult<()> {
        self.nodes
            .get_mut(id)
            .map(|d| d.root_boundary = boundary)
            .ok_or(NodeError::InvalidNode)
    }

    /// Get all ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> NodeResult<Vec<NodeId>> {
        let mut result = Vec::new();
        let mut current = self.parent(id)?;
        while let Some(ancestor) = current {
            result.push(ancestor);
            current = self.nodes.get(ancestor).and_then(|d| d.parent);
        }
        Ok(result)
    }

    /// Number of ancestors above a node (0 for a parentless node).
    pub fn depth(&self, id: NodeId) -> NodeResult<usize> {
        self.ancestors(id).map(|a| a.len())
    }

    /// Iterate over nodes without a parent.
    pub fn root_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, data)| data.parent.is_none())
            .map(|(id, _)| id)
    }

    /// Total number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Hierarchy for NodeTree {
    fn is_alive(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|d| d.parent)
    }

    fn is_root(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|d| d.root_boundary)
    }

    fn has_suppression_marker(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|d| d.suppress_context_menu)
    }
}

static_assertions::assert_impl_all!(NodeTree: Send, Sync);
static_assertions::assert_impl_all!(NodeId: Send, Sync, Copy);
