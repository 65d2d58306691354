//! View-tree model for Trellis.
//!
//! Provides the structural backbone shared by every widget:
//! - Stable node handles via arena-based storage
//! - Parent-child relationships with automatic drop cascade
//! - Assignable integer view ids with a process-wide generator
//! - Checked-state storage for toggleable controls
//! - Hierarchy-change observation over whole subtrees
//!
//! # Key Types
//!
//! - [`NodeId`] - Unique stable handle for each node
//! - [`ViewRegistry`] - Central registry managing all nodes
//! - [`SharedViewRegistry`] - Thread-safe wrapper around [`ViewRegistry`]
//! - [`HierarchyObserver`] - Callback surface for structural changes
//!
//! # View Ids
//!
//! Separately from its [`NodeId`] handle, every node carries an integer
//! *view id* that widgets use to refer to each other across the tree.
//! [`NO_ID`] (`-1`) marks a node that has not been assigned one;
//! [`generate_view_id`] produces fresh process-unique positive ids.
//!
//! # Hierarchy Events
//!
//! Structural mutations performed through [`SharedViewRegistry::add_child`]
//! and [`SharedViewRegistry::remove_child`] are reported to every
//! [`HierarchyObserver`] registered on the mutation point's ancestor chain,
//! nearest first. A container observing the subtree it roots therefore sees
//! additions and removals anywhere below it, not just among its direct
//! children.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};

use crate::error::{ViewError, ViewResult};

new_key_type! {
    /// A unique handle for a node in the view registry.
    ///
    /// `NodeId`s are stable: they remain valid as the tree is rearranged and
    /// become invalid only when the node is destroyed.
    pub struct NodeId;
}

/// Reserved view id meaning "no view".
///
/// Distinct from every id [`generate_view_id`] can produce.
pub const NO_ID: i32 = -1;

static NEXT_VIEW_ID: AtomicI32 = AtomicI32::new(1);

/// Produce a fresh process-unique positive view id.
pub fn generate_view_id() -> i32 {
    NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed)
}

/// Callback invoked when a toggleable node's checked flag changes.
///
/// Receives the node whose flag changed and the new flag value. A node holds
/// at most one listener at a time; registering a new one replaces the
/// previous registration.
pub type CheckedChangeListener = Arc<dyn Fn(NodeId, bool) + Send + Sync>;

/// Observer for structural changes within a subtree.
///
/// Register an observer on a node via
/// [`SharedViewRegistry::set_hierarchy_observer`] to be notified of every
/// child added to or removed from any node in the subtree that node roots.
pub trait HierarchyObserver: Send + Sync {
    /// A child was attached to `parent`.
    fn child_added(&self, parent: NodeId, child: NodeId);

    /// A child was detached from `parent`.
    fn child_removed(&self, parent: NodeId, child: NodeId);
}

/// Checked-state storage for toggleable controls.
///
/// Stored in the registry rather than on the widget instance so that any
/// collaborator holding a [`NodeId`] can read or flip the flag of a control
/// it found by view id.
#[derive(Default)]
struct ToggleState {
    checked: bool,
    listener: Option<CheckedChangeListener>,
}

/// Internal data stored in the registry for each node.
struct NodeData {
    /// Human-readable name for debugging and tree dumps.
    name: String,
    /// The type name of the widget that registered this node.
    type_name: &'static str,
    /// Parent node (if any).
    parent: Option<NodeId>,
    /// Child nodes, in stacking order.
    children: Vec<NodeId>,
    /// Assignable integer identity; `NO_ID` until assigned.
    view_id: i32,
    /// Toggle state (present only for toggleable controls).
    toggle: Option<ToggleState>,
    /// Observer for structural changes in the subtree this node roots.
    hierarchy_observer: Option<Arc<dyn HierarchyObserver>>,
}

impl NodeData {
    fn new(type_name: &'static str) -> Self {
        Self {
            name: String::new(),
            type_name,
            parent: None,
            children: Vec::new(),
            view_id: NO_ID,
            toggle: None,
            hierarchy_observer: None,
        }
    }
}

/// The central registry that manages all view nodes and their relationships.
///
/// Uses arena-based storage via `SlotMap` for stable node handles. Most
/// callers interact with the process-global [`SharedViewRegistry`] instead
/// of holding a `ViewRegistry` directly.
pub struct ViewRegistry {
    nodes: SlotMap<NodeId, NodeData>,
}

impl ViewRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Register a new node and return its handle.
    pub fn register<T: 'static>(&mut self) -> NodeId {
        let data = NodeData::new(std::any::type_name::<T>());
        let id = self.nodes.insert(data);
        tracing::trace!(target: "trellis_core::view", ?id, type_name = std::any::type_name::<T>(), "registered node");
        id
    }

    /// Remove a node and all its descendants from the registry.
    pub fn destroy(&mut self, id: NodeId) -> ViewResult<()> {
        let descendants = self.collect_descendants(id)?;
        tracing::trace!(target: "trellis_core::view", ?id, descendant_count = descendants.len(), "destroying subtree");

        if let Some(data) = self.nodes.get(id)
            && let Some(parent_id) = data.parent
            && let Some(parent_data) = self.nodes.get_mut(parent_id)
        {
            parent_data.children.retain(|&child| child != id);
        }

        for child_id in descendants {
            self.nodes.remove(child_id);
        }
        self.nodes.remove(id);

        Ok(())
    }

    /// Collect all descendant handles, children before parents.
    fn collect_descendants(&self, id: NodeId) -> ViewResult<Vec<NodeId>> {
        let mut result = Vec::new();
        self.collect_descendants_recursive(id, &mut result)?;
        Ok(result)
    }

    fn collect_descendants_recursive(
        &self,
        id: NodeId,
        result: &mut Vec<NodeId>,
    ) -> ViewResult<()> {
        let data = self.nodes.get(id).ok_or(ViewError::InvalidNodeId)?;
        for &child_id in &data.children {
            self.collect_descendants_recursive(child_id, result)?;
            result.push(child_id);
        }
        Ok(())
    }

    /// Check if a node exists in the registry.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Set the parent of a node.
    ///
    /// Handles removing the node from its old parent and appending it to the
    /// new parent's children. Passing `None` makes the node a root.
    pub fn set_parent(&mut self, id: NodeId, new_parent: Option<NodeId>) -> ViewResult<()> {
        if !self.nodes.contains_key(id) {
            return Err(ViewError::InvalidNodeId);
        }

        if let Some(parent_id) = new_parent {
            if !self.nodes.contains_key(parent_id) {
                return Err(ViewError::InvalidNodeId);
            }
            if self.is_ancestor_of(id, parent_id)? {
                return Err(ViewError::CircularParentage);
            }
        }

        let old_parent = self.nodes.get(id).and_then(|d| d.parent);
        if let Some(old_parent_id) = old_parent
            && let Some(parent_data) = self.nodes.get_mut(old_parent_id)
        {
            parent_data.children.retain(|&child| child != id);
        }

        if let Some(data) = self.nodes.get_mut(id) {
            data.parent = new_parent;
        }

        if let Some(parent_id) = new_parent
            && let Some(parent_data) = self.nodes.get_mut(parent_id)
        {
            parent_data.children.push(id);
        }

        Ok(())
    }

    /// Check if `potential_ancestor` is `id` itself or one of its ancestors.
    fn is_ancestor_of(&self, potential_ancestor: NodeId, id: NodeId) -> ViewResult<bool> {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == potential_ancestor {
                return Ok(true);
            }
            current = self.nodes.get(current_id).and_then(|d| d.parent);
        }
        Ok(false)
    }

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> ViewResult<Option<NodeId>> {
        self.nodes
            .get(id)
            .map(|d| d.parent)
            .ok_or(ViewError::InvalidNodeId)
    }

    /// Get the children of a node, in stacking order.
    pub fn children(&self, id: NodeId) -> ViewResult<&[NodeId]> {
        self.nodes
            .get(id)
            .map(|d| d.children.as_slice())
            .ok_or(ViewError::InvalidNodeId)
    }

    /// Get the number of children of a node.
    pub fn child_count(&self, id: NodeId) -> ViewResult<usize> {
        self.children(id).map(|c| c.len())
    }

    /// Get the child of a node at the given index.
    pub fn child_at(&self, id: NodeId, index: usize) -> ViewResult<Option<NodeId>> {
        self.children(id).map(|c| c.get(index).copied())
    }

    /// Get the node's name.
    pub fn node_name(&self, id: NodeId) -> ViewResult<&str> {
        self.nodes
            .get(id)
            .map(|d| d.name.as_str())
            .ok_or(ViewError::InvalidNodeId)
    }

    /// Set the node's name.
    pub fn set_node_name(&mut self, id: NodeId, name: String) -> ViewResult<()> {
        self.nodes
            .get_mut(id)
            .map(|d| d.name = name)
            .ok_or(ViewError::InvalidNodeId)
    }

    /// Get the type name of the widget that registered this node.
    pub fn type_name(&self, id: NodeId) -> ViewResult<&'static str> {
        self.nodes
            .get(id)
            .map(|d| d.type_name)
            .ok_or(ViewError::InvalidNodeId)
    }

    // =========================================================================
    // View Ids
    // =========================================================================

    /// Get the node's view id (`NO_ID` if never assigned).
    pub fn view_id(&self, id: NodeId) -> ViewResult<i32> {
        self.nodes
            .get(id)
            .map(|d| d.view_id)
            .ok_or(ViewError::InvalidNodeId)
    }

    /// Set the node's view id.
    pub fn set_view_id(&mut self, id: NodeId, view_id: i32) -> ViewResult<()> {
        self.nodes
            .get_mut(id)
            .map(|d| d.view_id = view_id)
            .ok_or(ViewError::InvalidNodeId)
    }

    /// Find the node with the given view id within the subtree rooted at
    /// `root` (including `root` itself), depth-first.
    ///
    /// `NO_ID` never matches.
    pub fn find_by_view_id(&self, root: NodeId, view_id: i32) -> ViewResult<Option<NodeId>> {
        if view_id == NO_ID {
            return Ok(None);
        }
        let data = self.nodes.get(root).ok_or(ViewError::InvalidNodeId)?;
        if data.view_id == view_id {
            return Ok(Some(root));
        }
        for &child_id in &data.children {
            if let Some(found) = self.find_by_view_id(child_id, view_id)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    // =========================================================================
    // Toggle State
    // =========================================================================

    /// Mark a node as a toggleable control, starting unchecked.
    pub fn init_toggle_state(&mut self, id: NodeId) -> ViewResult<()> {
        let data = self.nodes.get_mut(id).ok_or(ViewError::InvalidNodeId)?;
        data.toggle = Some(ToggleState::default());
        Ok(())
    }

    /// Check whether a node is a toggleable control.
    ///
    /// Returns `false` for destroyed nodes.
    pub fn is_toggleable(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|d| d.toggle.is_some())
    }

    /// Get a toggleable node's checked flag.
    pub fn is_checked(&self, id: NodeId) -> ViewResult<bool> {
        let data = self.nodes.get(id).ok_or(ViewError::InvalidNodeId)?;
        data.toggle
            .as_ref()
            .map(|t| t.checked)
            .ok_or(ViewError::NotToggleable)
    }

    /// Set a toggleable node's checked flag.
    ///
    /// Returns whether the flag actually changed, together with the listener
    /// to invoke in that case. The caller is responsible for invoking the
    /// listener once no registry lock is held.
    fn set_checked(
        &mut self,
        id: NodeId,
        checked: bool,
    ) -> ViewResult<(bool, Option<CheckedChangeListener>)> {
        let data = self.nodes.get_mut(id).ok_or(ViewError::InvalidNodeId)?;
        let toggle = data.toggle.as_mut().ok_or(ViewError::NotToggleable)?;
        if toggle.checked == checked {
            return Ok((false, None));
        }
        toggle.checked = checked;
        Ok((true, toggle.listener.clone()))
    }

    /// Register or clear a toggleable node's checked-change listener.
    ///
    /// A node holds a single listener slot; registering replaces any
    /// previous listener.
    pub fn set_checked_change_listener(
        &mut self,
        id: NodeId,
        listener: Option<CheckedChangeListener>,
    ) -> ViewResult<()> {
        let data = self.nodes.get_mut(id).ok_or(ViewError::InvalidNodeId)?;
        let toggle = data.toggle.as_mut().ok_or(ViewError::NotToggleable)?;
        toggle.listener = listener;
        Ok(())
    }

    // =========================================================================
    // Hierarchy Observation
    // =========================================================================

    /// Register or clear the hierarchy observer for the subtree `id` roots.
    pub fn set_hierarchy_observer(
        &mut self,
        id: NodeId,
        observer: Option<Arc<dyn HierarchyObserver>>,
    ) -> ViewResult<()> {
        self.nodes
            .get_mut(id)
            .map(|d| d.hierarchy_observer = observer)
            .ok_or(ViewError::InvalidNodeId)
    }

    /// Collect the observers registered on `from` and its ancestors,
    /// nearest first.
    fn observers_on_path(&self, from: NodeId) -> Vec<Arc<dyn HierarchyObserver>> {
        let mut observers = Vec::new();
        let mut current = Some(from);
        while let Some(current_id) = current {
            let Some(data) = self.nodes.get(current_id) else {
                break;
            };
            if let Some(observer) = &data.hierarchy_observer {
                observers.push(Arc::clone(observer));
            }
            current = data.parent;
        }
        observers
    }

    /// Get the number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over all root nodes (nodes with no parent).
    pub fn root_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, data)| data.parent.is_none())
            .map(|(id, _)| id)
    }
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A thread-safe wrapper around [`ViewRegistry`].
///
/// All structural mutation that should be observable (child attachment and
/// detachment, checked-flag changes) goes through this wrapper, which
/// dispatches the resulting callbacks *after* releasing its lock so that
/// listeners and observers may reenter the registry freely.
pub struct SharedViewRegistry {
    inner: RwLock<ViewRegistry>,
}

impl SharedViewRegistry {
    /// Create a new shared registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ViewRegistry::new()),
        }
    }

    /// Register a new node.
    pub fn register<T: 'static>(&self) -> NodeId {
        self.inner.write().register::<T>()
    }

    /// Destroy a node and its descendants.
    pub fn destroy(&self, id: NodeId) -> ViewResult<()> {
        self.inner.write().destroy(id)
    }

    /// Check if a node exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.inner.read().contains(id)
    }

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> ViewResult<Option<NodeId>> {
        self.inner.read().parent(id)
    }

    /// Get the children of a node (owned, in stacking order).
    pub fn children(&self, id: NodeId) -> ViewResult<Vec<NodeId>> {
        self.inner.read().children(id).map(|c| c.to_vec())
    }

    /// Get the number of children of a node.
    pub fn child_count(&self, id: NodeId) -> ViewResult<usize> {
        self.inner.read().child_count(id)
    }

    /// Get the child of a node at the given index.
    pub fn child_at(&self, id: NodeId, index: usize) -> ViewResult<Option<NodeId>> {
        self.inner.read().child_at(id, index)
    }

    /// Get the node's name.
    pub fn node_name(&self, id: NodeId) -> ViewResult<String> {
        self.inner.read().node_name(id).map(|s| s.to_string())
    }

    /// Set the node's name.
    pub fn set_node_name(&self, id: NodeId, name: String) -> ViewResult<()> {
        self.inner.write().set_node_name(id, name)
    }

    /// Get the type name of the widget that registered this node.
    pub fn type_name(&self, id: NodeId) -> ViewResult<&'static str> {
        self.inner.read().type_name(id)
    }

    /// Get the node's view id.
    pub fn view_id(&self, id: NodeId) -> ViewResult<i32> {
        self.inner.read().view_id(id)
    }

    /// Set the node's view id.
    pub fn set_view_id(&self, id: NodeId, view_id: i32) -> ViewResult<()> {
        self.inner.write().set_view_id(id, view_id)
    }

    /// Find a node by view id within a subtree.
    pub fn find_by_view_id(&self, root: NodeId, view_id: i32) -> ViewResult<Option<NodeId>> {
        self.inner.read().find_by_view_id(root, view_id)
    }

    /// Mark a node as a toggleable control.
    pub fn init_toggle_state(&self, id: NodeId) -> ViewResult<()> {
        self.inner.write().init_toggle_state(id)
    }

    /// Check whether a node is a toggleable control.
    pub fn is_toggleable(&self, id: NodeId) -> bool {
        self.inner.read().is_toggleable(id)
    }

    /// Get a toggleable node's checked flag.
    pub fn is_checked(&self, id: NodeId) -> ViewResult<bool> {
        self.inner.read().is_checked(id)
    }

    /// Set a toggleable node's checked flag.
    ///
    /// If the flag changes and the node carries a checked-change listener,
    /// the listener is invoked after the registry lock has been released.
    /// Returns whether the flag actually changed.
    pub fn set_checked(&self, id: NodeId, checked: bool) -> ViewResult<bool> {
        let (changed, listener) = self.inner.write().set_checked(id, checked)?;
        if let Some(listener) = listener {
            listener(id, checked);
        }
        Ok(changed)
    }

    /// Register or clear a toggleable node's checked-change listener.
    pub fn set_checked_change_listener(
        &self,
        id: NodeId,
        listener: Option<CheckedChangeListener>,
    ) -> ViewResult<()> {
        self.inner.write().set_checked_change_listener(id, listener)
    }

    /// Register or clear the hierarchy observer for the subtree `id` roots.
    pub fn set_hierarchy_observer(
        &self,
        id: NodeId,
        observer: Option<Arc<dyn HierarchyObserver>>,
    ) -> ViewResult<()> {
        self.inner.write().set_hierarchy_observer(id, observer)
    }

    /// Attach `child` to `parent`.
    ///
    /// Every hierarchy observer registered on `parent` or one of its
    /// ancestors is notified (nearest first) after the structural change has
    /// been applied and the registry lock released, so the attaching call
    /// returns only once the subtree is fully processed.
    pub fn add_child(&self, parent: NodeId, child: NodeId) -> ViewResult<()> {
        let observers = {
            let mut registry = self.inner.write();
            registry.set_parent(child, Some(parent))?;
            tracing::trace!(target: "trellis_core::view", ?parent, ?child, "child attached");
            registry.observers_on_path(parent)
        };
        for observer in observers {
            observer.child_added(parent, child);
        }
        Ok(())
    }

    /// Detach `child` from `parent`, leaving it a root node.
    ///
    /// Fails with [`ViewError::NotAChild`] if `child` is not currently
    /// attached to `parent`. Observer dispatch mirrors [`Self::add_child`].
    pub fn remove_child(&self, parent: NodeId, child: NodeId) -> ViewResult<()> {
        let observers = {
            let mut registry = self.inner.write();
            if registry.parent(child)? != Some(parent) {
                return Err(ViewError::NotAChild);
            }
            registry.set_parent(child, None)?;
            tracing::trace!(target: "trellis_core::view", ?parent, ?child, "child detached");
            registry.observers_on_path(parent)
        };
        for observer in observers {
            observer.child_removed(parent, child);
        }
        Ok(())
    }

    /// Get the number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.inner.read().node_count()
    }

    /// Get all root nodes.
    pub fn root_nodes(&self) -> Vec<NodeId> {
        self.inner.read().root_nodes().collect()
    }

    /// Access the registry with a read lock for complex operations.
    ///
    /// The provided closure must not call back into this wrapper.
    pub fn with_read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ViewRegistry) -> R,
    {
        f(&self.inner.read())
    }

    /// Access the registry with a write lock for complex operations.
    ///
    /// The provided closure must not call back into this wrapper.
    pub fn with_write<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ViewRegistry) -> R,
    {
        f(&mut self.inner.write())
    }
}

impl Default for SharedViewRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(SharedViewRegistry: Send, Sync);

/// Global view registry (lazily initialized).
static GLOBAL_REGISTRY: OnceLock<SharedViewRegistry> = OnceLock::new();

/// Initialize the global view registry.
///
/// Safe to call more than once; subsequent calls are no-ops.
pub fn init_global_registry() {
    GLOBAL_REGISTRY.get_or_init(SharedViewRegistry::new);
}

/// Get a reference to the global view registry.
///
/// Returns an error if [`init_global_registry`] has not been called.
pub fn global_registry() -> ViewResult<&'static SharedViewRegistry> {
    GLOBAL_REGISTRY
        .get()
        .ok_or(ViewError::RegistryNotInitialized)
}
