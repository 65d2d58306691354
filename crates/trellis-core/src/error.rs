//! Error types for Trellis.

use std::fmt;

/// Errors that can occur during view-tree operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// The node ID is invalid or the node has been destroyed.
    InvalidNodeId,
    /// Attempted to make a node its own parent or ancestor.
    CircularParentage,
    /// The child is not attached to the given parent.
    NotAChild,
    /// The node does not carry toggle state.
    NotToggleable,
    /// The view registry is not initialized.
    RegistryNotInitialized,
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNodeId => write!(f, "Invalid or destroyed node ID"),
            Self::CircularParentage => {
                write!(f, "Cannot make a node its own parent or ancestor")
            }
            Self::NotAChild => write!(f, "Node is not a child of the given parent"),
            Self::NotToggleable => write!(f, "Node does not carry toggle state"),
            Self::RegistryNotInitialized => write!(f, "View registry not initialized"),
        }
    }
}

impl std::error::Error for ViewError {}

/// Result type for view-tree operations.
pub type ViewResult<T> = std::result::Result<T, ViewError>;
