//! RadioGroup container widget implementation.
//!
//! This module provides [`RadioGroup`], a stacking container that manages
//! exclusive selection among [`RadioButton`] controls **anywhere in its
//! subtree**. Unlike a conventional radio group, selectable controls do not
//! have to be direct children: they are discovered inside intermediate
//! wrapper panels at any depth, so a card layout holding a label and a
//! radio button together participates in selection like a bare button
//! would.
//!
//! # Example
//!
//! ```ignore
//! use trellis::{Panel, RadioButton, RadioGroup, View};
//!
//! let group = RadioGroup::new();
//!
//! // Wrapper card: the radio button sits at depth 2.
//! let card = Panel::new();
//! let option = RadioButton::new("Option 1");
//! card.add_child(option.node_id())?;
//! group.add_child(card.node_id())?;
//!
//! group.set_on_checked_change(|_group, checked_id| {
//!     println!("Selected id: {}", checked_id);
//! });
//!
//! group.check_id(option.view_id());
//! ```
//!
//! # How Tracking Works
//!
//! The group registers a hierarchy observer on its own node. Whenever a
//! subtree is attached anywhere below the group, the observer walks it
//! depth-first, assigns a fresh view id to every radio button that lacks
//! one, and attaches the group's shared checked-change monitor to each.
//! User taps then flow through the monitor into the selection state
//! machine, which unchecks the previous selection and notifies the
//! group-level listener exactly once per logical change.
//!
//! # Known Gap
//!
//! Removing a radio button *directly* from the group detaches the monitor.
//! Removing a wrapper subtree does **not** detach monitors from radio
//! buttons nested inside it; those controls keep a dangling registration
//! until they are destroyed. This mirrors the behavior of the system this
//! widget is modeled on and is deliberately left as is.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use parking_lot::Mutex;
use trellis_core::{
    CheckedChangeListener, HierarchyObserver, NO_ID, NodeId, ViewResult, generate_view_id,
    global_registry,
};

use crate::base::ViewBase;
use crate::traits::{Orientation, View};

/// Group-level selection-change callback: receives the group's node handle
/// and the new checked view id (`NO_ID` when the selection was cleared).
type OnCheckedChange = Arc<dyn Fn(NodeId, i32) + Send + Sync>;

/// A stacking container with exclusive selection across its whole subtree.
///
/// # Selection Model
///
/// - At most one radio button below the group is checked at any time.
/// - The current selection is exposed as a view id
///   ([`checked_id`](Self::checked_id), `NO_ID` when nothing is selected),
///   not as a widget reference; the control is found in the live tree when
///   it needs to be unchecked. A control that has left the tree is silently
///   skipped.
/// - Every committed selection change invokes the group-level listener
///   exactly once, including explicit clears.
///
/// # Listener
///
/// Selection changes are reported through a single-slot listener
/// ([`set_on_checked_change`](Self::set_on_checked_change), last write
/// wins): one invocation per committed transition, carrying the resulting
/// checked id.
pub struct RadioGroup {
    /// Widget base.
    base: ViewBase,

    /// Stacking direction for children.
    orientation: Orientation,

    /// Shared selection state, also captured by the subtree walker and the
    /// checked-change monitor.
    state: Arc<GroupState>,
}

/// Selection state shared between the group, its subtree walker, and the
/// checked-change monitor attached to tracked controls.
struct GroupState {
    /// The group's own node handle.
    node: NodeId,

    /// View id of the currently checked control, or `NO_ID`.
    checked_id: AtomicI32,

    /// Reentrancy guard: while set, the checked-change monitor ignores
    /// events caused by the group's own flag updates. All execution is
    /// synchronous and single-threaded; the atomic is a plain cell here,
    /// not a lock.
    suppress_feedback: AtomicBool,

    /// Group-level selection-change listener (single slot).
    on_checked_change: Mutex<Option<OnCheckedChange>>,

    /// Externally registered hierarchy observer (single slot), invoked
    /// after the internal walker has processed each event.
    outer_observer: Mutex<Option<Arc<dyn HierarchyObserver>>>,
}

impl GroupState {
    fn checked_id(&self) -> i32 {
        self.checked_id.load(Ordering::SeqCst)
    }

    fn set_suppressed(&self, suppressed: bool) {
        self.suppress_feedback.store(suppressed, Ordering::SeqCst);
    }

    fn is_suppressed(&self) -> bool {
        self.suppress_feedback.load(Ordering::SeqCst)
    }

    /// Request that the control with view id `id` become the selection.
    ///
    /// No-op when `id` already is the checked id (this also makes an
    /// explicit clear on an empty selection silent). The flag updates run
    /// under suppression so that the monitor does not observe them; the
    /// single commit at the end is what notifies.
    fn check_id(&self, id: i32) {
        if id == self.checked_id() {
            return;
        }

        self.set_suppressed(true);
        let current = self.checked_id();
        if current != NO_ID {
            self.set_view_checked(current, false);
        }
        if id != NO_ID {
            self.set_view_checked(id, true);
        }
        self.set_suppressed(false);

        self.commit(id);
    }

    /// Feedback path: a tracked control's checked flag changed outside the
    /// group's own flag updates (i.e. a user tap).
    fn on_child_checked_changed(&self, node: NodeId) {
        if self.is_suppressed() {
            return;
        }

        self.set_suppressed(true);
        let current = self.checked_id();
        if current != NO_ID {
            self.set_view_checked(current, false);
        }
        self.set_suppressed(false);

        let id = global_registry()
            .and_then(|r| r.view_id(node))
            .unwrap_or(NO_ID);
        self.commit(id);
    }

    /// Flip the checked flag of the control with view id `view_id`.
    ///
    /// A lookup miss, or a hit on a node that is not a toggleable control,
    /// degrades to a silent no-op: the control may have been removed from
    /// the tree without the group being told.
    fn set_view_checked(&self, view_id: i32, checked: bool) {
        let Ok(registry) = global_registry() else {
            return;
        };
        let Ok(Some(node)) = registry.find_by_view_id(self.node, view_id) else {
            return;
        };
        let _ = registry.set_checked(node, checked);
    }

    /// Commit `id` as the authoritative selection and notify the
    /// group-level listener.
    fn commit(&self, id: i32) {
        self.checked_id.store(id, Ordering::SeqCst);
        tracing::trace!(target: "trellis::radio_group", group = ?self.node, checked_id = id, "selection committed");

        let callback = self.on_checked_change.lock().clone();
        if let Some(callback) = callback {
            callback(self.node, id);
        }
    }
}

/// Hierarchy observer wiring freshly attached subtrees into the group.
struct SubtreeWalker {
    state: Arc<GroupState>,

    /// The single monitor instance shared by every tracked control.
    monitor: CheckedChangeListener,
}

impl SubtreeWalker {
    /// Ensure a discovered control has a valid view id and carries the
    /// shared monitor. Re-applying to an already-wired control has no
    /// effect beyond replacing the listener slot with the same monitor.
    fn wire_control(&self, node: NodeId) {
        let Ok(registry) = global_registry() else {
            return;
        };
        if registry.view_id(node).unwrap_or(NO_ID) == NO_ID {
            let _ = registry.set_view_id(node, generate_view_id());
        }
        let _ = registry.set_checked_change_listener(node, Some(Arc::clone(&self.monitor)));
        tracing::trace!(target: "trellis::radio_group", group = ?self.state.node, control = ?node, "control wired");
    }

    /// Depth-first walk of an attached subtree. Every toggleable control
    /// found gets wired; composite nodes are descended into regardless of
    /// whether they are controls themselves.
    fn wire_subtree(&self, node: NodeId) {
        let Ok(registry) = global_registry() else {
            return;
        };
        if registry.is_toggleable(node) {
            self.wire_control(node);
        }
        for child in registry.children(node).unwrap_or_default() {
            self.wire_subtree(child);
        }
    }
}

impl HierarchyObserver for SubtreeWalker {
    fn child_added(&self, parent: NodeId, child: NodeId) {
        self.wire_subtree(child);

        // Direct additions to the group get the wiring applied once more
        // on the child itself; the double application is harmless.
        if parent == self.state.node
            && let Ok(registry) = global_registry()
            && registry.is_toggleable(child)
        {
            self.wire_control(child);
        }

        if let Some(outer) = self.state.outer_observer.lock().clone() {
            outer.child_added(parent, child);
        }
    }

    fn child_removed(&self, parent: NodeId, child: NodeId) {
        // Only direct removals detach the monitor. Controls nested in a
        // removed subtree keep their registration; see the module docs.
        if parent == self.state.node
            && let Ok(registry) = global_registry()
            && registry.is_toggleable(child)
        {
            let _ = registry.set_checked_change_listener(child, None);
        }

        if let Some(outer) = self.state.outer_observer.lock().clone() {
            outer.child_removed(parent, child);
        }
    }
}

impl RadioGroup {
    /// Create a new radio group with vertical stacking.
    pub fn new() -> Self {
        let base = ViewBase::new::<Self>();
        let state = Arc::new(GroupState {
            node: base.id(),
            checked_id: AtomicI32::new(NO_ID),
            suppress_feedback: AtomicBool::new(false),
            on_checked_change: Mutex::new(None),
            outer_observer: Mutex::new(None),
        });

        let monitor: CheckedChangeListener = {
            let state = Arc::clone(&state);
            Arc::new(move |node, _checked| state.on_child_checked_changed(node))
        };

        let walker = Arc::new(SubtreeWalker {
            state: Arc::clone(&state),
            monitor,
        });
        if let Ok(registry) = global_registry() {
            let _ = registry.set_hierarchy_observer(base.id(), Some(walker));
        }

        Self {
            base,
            orientation: Orientation::default(),
            state,
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

    /// Set the group's debug name using builder pattern.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.base.set_name(name);
        self
    }

    // =========================================================================
    // Child Management
    // =========================================================================

    /// Attach a child widget to the group.
    ///
    /// A radio button that arrives already checked becomes the
    /// authoritative selection at the point of insertion: the previous
    /// selection is unchecked under suppression and the new control's
    /// identity is committed (with notification) before the subtree wiring
    /// runs.
    pub fn add_child(&self, child: NodeId) -> ViewResult<()> {
        let registry = global_registry()?;

        if registry.is_toggleable(child) && registry.is_checked(child).unwrap_or(false) {
            self.state.set_suppressed(true);
            let current = self.state.checked_id();
            if current != NO_ID {
                self.state.set_view_checked(current, false);
            }
            self.state.set_suppressed(false);

            let id = registry.view_id(child).unwrap_or(NO_ID);
            self.state.commit(id);
        }

        registry.add_child(self.base.id(), child)
    }

    /// Detach a child widget from the group.
    ///
    /// If the child is a radio button, its monitor registration is removed.
    /// The checked id is left untouched even when the removed control was
    /// the selection; later lookups for it simply miss.
    pub fn remove_child(&self, child: NodeId) -> ViewResult<()> {
        global_registry()?.remove_child(self.base.id(), child)
    }

    /// Get the number of direct children.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.base.child_count()
    }

    /// Get the direct child at the given index.
    #[inline]
    pub fn child_at(&self, index: usize) -> Option<NodeId> {
        self.base.child_at(index)
    }

    /// Check if the group has no children.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.child_count() == 0
    }

    /// Signal that the initial child tree has been fully assembled.
    ///
    /// If a checked id was established while the tree was still being
    /// built, it is re-applied: the control's flag is set under suppression
    /// and the id is committed again, so the group-level listener always
    /// observes the final authoritative state once the tree is ready, even
    /// if the flag was already correct.
    pub fn finish_build(&self) {
        let id = self.state.checked_id();
        if id != NO_ID {
            self.state.set_suppressed(true);
            self.state.set_view_checked(id, true);
            self.state.set_suppressed(false);
            self.state.commit(id);
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select the control with the given view id.
    ///
    /// Passing `NO_ID` clears the selection. Requesting the current checked
    /// id is a no-op: no flags change and no notification fires.
    pub fn check_id(&self, id: i32) {
        self.state.check_id(id);
    }

    /// Clear the selection.
    ///
    /// Equivalent to `check_id(NO_ID)`; notifies with `NO_ID` if a
    /// selection was cleared.
    pub fn clear_check(&self) {
        self.state.check_id(NO_ID);
    }

    /// Get the view id of the currently checked control.
    ///
    /// Returns `NO_ID` when no control is selected.
    pub fn checked_id(&self) -> i32 {
        self.state.checked_id()
    }

    /// Register the selection-change listener.
    ///
    /// Single slot, last write wins. The listener receives the group's node
    /// handle and the new checked id (`NO_ID` for an explicit clear).
    pub fn set_on_checked_change<F>(&self, listener: F)
    where
        F: Fn(NodeId, i32) + Send + Sync + 'static,
    {
        *self.state.on_checked_change.lock() = Some(Arc::new(listener));
    }

    /// Remove the selection-change listener.
    pub fn clear_on_checked_change(&self) {
        *self.state.on_checked_change.lock() = None;
    }

    /// Register an additional hierarchy observer.
    ///
    /// The group needs its internal observer to track controls, so external
    /// observers are composed rather than replacing it: each event is first
    /// processed by the internal walker, then forwarded here. Single slot,
    /// last write wins.
    pub fn set_on_hierarchy_change(&self, observer: Arc<dyn HierarchyObserver>) {
        *self.state.outer_observer.lock() = Some(observer);
    }

    /// Remove the external hierarchy observer.
    pub fn clear_on_hierarchy_change(&self) {
        *self.state.outer_observer.lock() = None;
    }
}

impl Default for RadioGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl View for RadioGroup {
    fn node_id(&self) -> NodeId {
        self.base.id()
    }
}

static_assertions::assert_impl_all!(RadioGroup: Send, Sync);
