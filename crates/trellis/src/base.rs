//! Widget base implementation.
//!
//! This module provides [`ViewBase`], the common registry handle every
//! widget embeds. It handles node registration on construction, removal on
//! drop, and delegates naming, tree access, and view-id management to the
//! global registry.

use trellis_core::{NO_ID, NodeId, ViewResult, global_registry};

use crate::traits::View;

/// The base implementation for all widgets.
///
/// Widget implementations include this as a field and delegate common
/// operations to it:
///
/// ```ignore
/// struct MyWidget {
///     base: ViewBase,
/// }
///
/// impl View for MyWidget {
///     fn node_id(&self) -> NodeId {
///         self.base.id()
///     }
/// }
/// ```
///
/// Accessors degrade to neutral values (`None`, empty, `NO_ID`) when the
/// node has been destroyed; only construction requires the registry to be
/// initialized.
pub struct ViewBase {
    id: NodeId,
}

impl ViewBase {
    /// Create a new view base, registering a node in the global registry.
    ///
    /// # Panics
    ///
    /// Panics if the global registry is not initialized
    /// (call [`trellis_core::init_global_registry`] first).
    pub fn new<T: View + 'static>() -> Self {
        let registry = global_registry().expect("View registry not initialized");
        let id = registry.register::<T>();
        Self { id }
    }

    /// Get the widget's node handle.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Get the widget's name from the registry.
    pub fn name(&self) -> String {
        global_registry()
            .and_then(|r| r.node_name(self.id))
            .unwrap_or_default()
    }

    /// Set the widget's name in the registry.
    pub fn set_name(&self, name: impl Into<String>) {
        if let Ok(registry) = global_registry() {
            let _ = registry.set_node_name(self.id, name.into());
        }
    }

    /// Get the parent node handle.
    pub fn parent(&self) -> Option<NodeId> {
        global_registry()
            .and_then(|r| r.parent(self.id))
            .ok()
            .flatten()
    }

    /// Get the child node handles, in stacking order.
    pub fn children(&self) -> Vec<NodeId> {
        global_registry()
            .and_then(|r| r.children(self.id))
            .unwrap_or_default()
    }

    /// Get the number of children.
    pub fn child_count(&self) -> usize {
        global_registry()
            .and_then(|r| r.child_count(self.id))
            .unwrap_or_default()
    }

    /// Get the child at the given index.
    pub fn child_at(&self, index: usize) -> Option<NodeId> {
        global_registry()
            .and_then(|r| r.child_at(self.id, index))
            .ok()
            .flatten()
    }

    /// Get the widget's view id (`NO_ID` if never assigned).
    pub fn view_id(&self) -> i32 {
        global_registry()
            .and_then(|r| r.view_id(self.id))
            .unwrap_or(NO_ID)
    }

    /// Set the widget's view id.
    pub fn set_view_id(&self, view_id: i32) -> ViewResult<()> {
        global_registry()?.set_view_id(self.id, view_id)
    }
}

impl Drop for ViewBase {
    fn drop(&mut self) {
        // Removes the node and its subtree entries from the registry.
        if let Ok(registry) = global_registry() {
            let _ = registry.destroy(self.id);
        }
    }
}
