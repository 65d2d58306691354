//! Trellis widgets.
//!
//! This crate provides the widget layer of Trellis, built on the view tree
//! and signal systems of [`trellis_core`]:
//!
//! - [`Panel`]: Generic stacking container, nestable to any depth
//! - [`RadioButton`]: Toggleable control with a view identity
//! - [`RadioGroup`]: Stacking container enforcing exclusive selection
//!   across its **whole subtree**, not just direct children
//!
//! # Example
//!
//! ```
//! use trellis::{Panel, RadioButton, RadioGroup, View};
//!
//! trellis_core::init_global_registry();
//!
//! let group = RadioGroup::new();
//!
//! // A wrapper card: label-bearing panel plus the actual control.
//! let card = Panel::new();
//! let option = RadioButton::new("Option 1");
//! card.add_child(option.node_id()).unwrap();
//! group.add_child(card.node_id()).unwrap();
//!
//! // The nested control was discovered and assigned an identity.
//! assert!(option.view_id() > 0);
//!
//! group.check_id(option.view_id());
//! assert!(option.is_checked());
//! ```

mod base;
mod panel;
mod radio_button;
mod radio_group;
mod traits;

pub use base::ViewBase;
pub use panel::Panel;
pub use radio_button::RadioButton;
pub use radio_group::RadioGroup;
pub use traits::{Orientation, View};

// Re-export the core surface widgets are built from.
pub use trellis_core::{
    CheckedChangeListener, HierarchyObserver, NO_ID, NodeId, Signal, ViewError, ViewResult,
    generate_view_id, global_registry, init_global_registry,
};
