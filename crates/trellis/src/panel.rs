//! Generic container widget implementation.
//!
//! This module provides [`Panel`], a composite widget that stacks child
//! widgets in a chosen direction. Panels are the building block for wrapper
//! "cards" (for example a panel holding a label next to a radio button) and
//! can be nested to any depth.
//!
//! # Example
//!
//! ```ignore
//! use trellis::{Orientation, Panel, RadioButton, View};
//!
//! let card = Panel::new().with_orientation(Orientation::Horizontal);
//! let option = RadioButton::new("Enable telemetry");
//! card.add_child(option.node_id())?;
//! ```

use trellis_core::{NodeId, Signal, ViewResult, global_registry};

use crate::base::ViewBase;
use crate::traits::{Orientation, View};

/// A composite container widget that stacks its children.
///
/// `Panel` owns no child widgets; it tracks them by [`NodeId`] through the
/// view registry, so children can be created and owned wherever is
/// convenient. Structural changes go through the registry and are therefore
/// visible to any hierarchy observer registered further up the tree.
///
/// # Signals
///
/// - `children_changed(())`: Emitted after a child is added or removed.
pub struct Panel {
    /// Widget base.
    base: ViewBase,

    /// Stacking direction for children.
    orientation: Orientation,

    /// Signal emitted when children are added or removed.
    pub children_changed: Signal<()>,
}

impl Panel {
    /// Create a new vertical panel.
    pub fn new() -> Self {
        Self {
            base: ViewBase::new::<Self>(),
            orientation: Orientation::default(),
            children_changed: Signal::new(),
        }
    }

    /// Get the stacking direction.
    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Set the stacking direction.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Set the stacking direction using builder pattern.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the panel's debug name using builder pattern.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.base.set_name(name);
        self
    }

    // =========================================================================
    // Child Management
    // =========================================================================

    /// Attach a child widget to this panel.
    ///
    /// The child is appended to the stacking order.
    pub fn add_child(&self, child: NodeId) -> ViewResult<()> {
        global_registry()?.add_child(self.base.id(), child)?;
        self.children_changed.emit(());
        Ok(())
    }

    /// Detach a child widget from this panel.
    pub fn remove_child(&self, child: NodeId) -> ViewResult<()> {
        global_registry()?.remove_child(self.base.id(), child)?;
        self.children_changed.emit(());
        Ok(())
    }

    /// Get the number of children.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.base.child_count()
    }

    /// Get the child at the given index.
    #[inline]
    pub fn child_at(&self, index: usize) -> Option<NodeId> {
        self.base.child_at(index)
    }

    /// Check if the panel has no children.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.child_count() == 0
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl View for Panel {
    fn node_id(&self) -> NodeId {
        self.base.id()
    }
}

static_assertions::assert_impl_all!(Panel: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use trellis_core::init_global_registry;

    fn setup() {
        init_global_registry();
    }

    #[test]
    fn test_panel_creation() {
        setup();
        let panel = Panel::new();
        assert!(panel.is_empty());
        assert_eq!(panel.orientation(), Orientation::Vertical);
    }

    #[test]
    fn test_panel_builder_pattern() {
        setup();
        let panel = Panel::new()
            .with_orientation(Orientation::Horizontal)
            .with_name("card");
        assert_eq!(panel.orientation(), Orientation::Horizontal);
        assert_eq!(panel.base.name(), "card");
    }

    #[test]
    fn test_add_and_remove_children() {
        setup();
        let panel = Panel::new();
        let a = Panel::new();
        let b = Panel::new();

        panel.add_child(a.node_id()).unwrap();
        panel.add_child(b.node_id()).unwrap();

        assert_eq!(panel.child_count(), 2);
        assert_eq!(panel.child_at(0), Some(a.node_id()));
        assert_eq!(panel.child_at(1), Some(b.node_id()));

        panel.remove_child(a.node_id()).unwrap();
        assert_eq!(panel.child_count(), 1);
        assert_eq!(panel.child_at(0), Some(b.node_id()));
    }

    #[test]
    fn test_children_changed_signal() {
        setup();
        let panel = Panel::new();
        let child = Panel::new();

        let notified = Arc::new(AtomicUsize::new(0));
        let notified_clone = notified.clone();
        panel.children_changed.connect(move |_| {
            notified_clone.fetch_add(1, Ordering::SeqCst);
        });

        panel.add_child(child.node_id()).unwrap();
        assert_eq!(notified.load(Ordering::SeqCst), 1);

        panel.remove_child(child.node_id()).unwrap();
        assert_eq!(notified.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_nesting() {
        setup();
        let outer = Panel::new();
        let inner = Panel::new();
        let leaf = Panel::new();

        outer.add_child(inner.node_id()).unwrap();
        inner.add_child(leaf.node_id()).unwrap();

        let registry = global_registry().unwrap();
        assert_eq!(registry.parent(leaf.node_id()), Ok(Some(inner.node_id())));
        assert_eq!(registry.parent(inner.node_id()), Ok(Some(outer.node_id())));
    }
}
