//! Radio button widget implementation.
//!
//! This module provides [`RadioButton`], a toggleable control for exclusive
//! selection among a group of options. Exclusivity itself is coordinated by
//! [`RadioGroup`]; a lone radio button is just a checkable flag with an
//! identity.
//!
//! Rendering is out of scope for this crate: the widget carries a label for
//! debugging and host toolkits, a checked flag, a view id, and a single
//! checked-change listener slot. That is the exact surface a selection
//! container needs from it.
//!
//! [`RadioGroup`]: crate::RadioGroup

use trellis_core::{CheckedChangeListener, NodeId, ViewResult, global_registry};

use crate::base::ViewBase;
use crate::traits::View;

/// A toggleable control for exclusive selection among options.
///
/// The checked flag lives in the view registry rather than on this struct,
/// so a collaborator that found the control by view id (typically a
/// [`RadioGroup`](crate::RadioGroup) unchecking the previous selection) can
/// flip it without access to the widget instance.
///
/// # Tap Behavior
///
/// [`click`](Self::click) models the user tapping the control: an unchecked
/// button becomes checked; tapping an already-checked button does nothing
/// (deselection happens by checking a sibling or clearing the group).
/// [`set_checked`](Self::set_checked) is the unconstrained programmatic
/// setter.
pub struct RadioButton {
    /// Widget base.
    base: ViewBase,

    /// Label text.
    text: String,
}

impl RadioButton {
    /// Create a new radio button with the specified label text.
    pub fn new(text: impl Into<String>) -> Self {
        let base = ViewBase::new::<Self>();
        if let Ok(registry) = global_registry() {
            let _ = registry.init_toggle_state(base.id());
        }
        Self {
            base,
            text: text.into(),
        }
    }

    /// Get the radio button's label text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the radio button's label text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    // =========================================================================
    // Checked State
    // =========================================================================

    /// Check if the radio button is currently checked.
    pub fn is_checked(&self) -> bool {
        global_registry()
            .and_then(|r| r.is_checked(self.base.id()))
            .unwrap_or(false)
    }

    /// Set the checked state.
    ///
    /// Fires the registered checked-change listener if the flag actually
    /// changes. This does not consult any group: unchecking the previous
    /// selection is the group's job.
    pub fn set_checked(&self, checked: bool) {
        if let Ok(registry) = global_registry() {
            let _ = registry.set_checked(self.base.id(), checked);
        }
    }

    /// Set the checked state using builder pattern.
    pub fn with_checked(self, checked: bool) -> Self {
        self.set_checked(checked);
        self
    }

    /// Simulate a user tap on the control.
    ///
    /// Checks the button if it is unchecked; tapping a checked button is a
    /// no-op.
    pub fn click(&self) {
        if !self.is_checked() {
            self.set_checked(true);
        }
    }

    /// Register or clear the checked-change listener.
    ///
    /// The control holds a single listener slot; registering replaces any
    /// previous listener.
    pub fn set_checked_change_listener(
        &self,
        listener: Option<CheckedChangeListener>,
    ) -> ViewResult<()> {
        global_registry()?.set_checked_change_listener(self.base.id(), listener)
    }

    // =========================================================================
    // View Id
    // =========================================================================

    /// Get the control's view id (`NO_ID` if never assigned).
    pub fn view_id(&self) -> i32 {
        self.base.view_id()
    }

    /// Set the control's view id.
    pub fn set_view_id(&self, view_id: i32) -> ViewResult<()> {
        self.base.set_view_id(view_id)
    }

    /// Set the control's view id using builder pattern.
    pub fn with_view_id(self, view_id: i32) -> Self {
        let _ = self.base.set_view_id(view_id);
        self
    }
}

impl View for RadioButton {
    fn node_id(&self) -> NodeId {
        self.base.id()
    }
}

static_assertions::assert_impl_all!(RadioButton: Send, Sync);
