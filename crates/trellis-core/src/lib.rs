//! Core systems for Trellis.
//!
//! This crate provides the foundational components of the Trellis widget
//! library:
//!
//! - **View Tree**: Arena-backed node storage with parent-child ownership,
//!   assignable integer view ids, checked-state storage for toggleable
//!   controls, and subtree-wide hierarchy observation
//! - **Signal/Slot System**: Type-safe inter-widget communication
//! - **Logging**: `tracing` integration and view-tree visualization
//!
//! # Signal/Slot Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//!
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # View Tree Example
//!
//! ```
//! use trellis_core::{init_global_registry, global_registry};
//!
//! struct Card;
//!
//! init_global_registry();
//! let registry = global_registry().unwrap();
//!
//! let parent = registry.register::<Card>();
//! let child = registry.register::<Card>();
//! registry.add_child(parent, child).unwrap();
//!
//! assert_eq!(registry.children(parent).unwrap(), vec![child]);
//! ```

mod error;
pub mod logging;
pub mod signal;
pub mod view;

pub use error::{ViewError, ViewResult};
pub use logging::{TreeFormatOptions, ViewTreeDebug};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use view::{
    CheckedChangeListener, HierarchyObserver, NO_ID, NodeId, SharedViewRegistry, ViewRegistry,
    generate_view_id, global_registry, init_global_registry,
};
