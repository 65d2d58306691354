//! Common widget traits and vocabulary types.

use trellis_core::NodeId;

/// The base trait implemented by every Trellis widget.
///
/// A widget participates in the view tree through a single registered node;
/// `node_id` returns its handle. Widgets hand out `NodeId`s rather than
/// references so that containers can hold children without owning them.
pub trait View: Send + Sync {
    /// Get the widget's node handle in the view registry.
    fn node_id(&self) -> NodeId;
}

/// Stacking direction for container widgets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Children stack left to right.
    Horizontal,
    /// Children stack top to bottom.
    #[default]
    Vertical,
}
