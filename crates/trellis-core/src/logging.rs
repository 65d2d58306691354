//! Logging and debugging facilities for Trellis.
//!
//! Trellis instruments its internals with the `tracing` crate. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! [`ViewTreeDebug`] renders the live view hierarchy in a human-readable
//! form, including view ids and checked state for toggleable controls.

use std::fmt::{self, Write as FmtWrite};

use crate::error::ViewResult;
use crate::view::{NO_ID, NodeId, global_registry};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "trellis_core";
    /// View-tree registry target.
    pub const VIEW: &str = "trellis_core::view";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "trellis_core::signal";
}

/// Configuration for view-tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// Whether to show node handles.
    pub show_handles: bool,
    /// Whether to show widget type names.
    pub show_types: bool,
    /// Whether to show view ids and checked state.
    pub show_view_state: bool,
    /// Maximum depth to traverse (`None` for unlimited).
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            show_handles: false,
            show_types: true,
            show_view_state: true,
            max_depth: None,
        }
    }
}

/// Debug utility for visualizing the view tree.
#[derive(Debug, Clone, Default)]
pub struct ViewTreeDebug {
    options: TreeFormatOptions,
}

impl ViewTreeDebug {
    /// Create a new debug visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debug visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the entire view tree starting from all root nodes.
    pub fn format_all(&self) -> ViewResult<String> {
        let registry = global_registry()?;
        let roots = registry.root_nodes();

        let mut output = String::new();
        writeln!(output, "View Tree ({} nodes):", registry.node_count()).expect("write to String");

        if roots.is_empty() {
            writeln!(output, "  (empty)").expect("write to String");
        } else {
            for root_id in roots {
                self.format_subtree_into(root_id, 0, &mut output)?;
            }
        }

        Ok(output)
    }

    /// Format a subtree starting from a specific node.
    pub fn format_subtree(&self, root: NodeId) -> ViewResult<String> {
        let mut output = String::new();
        self.format_subtree_into(root, 0, &mut output)?;
        Ok(output)
    }

    fn format_subtree_into(
        &self,
        id: NodeId,
        depth: usize,
        output: &mut String,
    ) -> ViewResult<()> {
        if let Some(max) = self.options.max_depth
            && depth > max
        {
            return Ok(());
        }

        let registry = global_registry()?;
        let name = registry.node_name(id)?;
        let type_name = registry.type_name(id)?;
        let children = registry.children(id)?;

        for _ in 0..depth {
            output.push_str("  ");
        }

        let display_name = if name.is_empty() { "(unnamed)" } else { &name };
        output.push_str(display_name);

        if self.options.show_handles {
            write!(output, " [{:?}]", id).expect("write to String");
        }

        if self.options.show_types {
            let short_type = type_name.rsplit("::").next().unwrap_or(type_name);
            write!(output, " ({})", short_type).expect("write to String");
        }

        if self.options.show_view_state {
            let view_id = registry.view_id(id)?;
            if view_id != NO_ID {
                write!(output, " id={}", view_id).expect("write to String");
            }
            if registry.is_toggleable(id) {
                let marker = if registry.is_checked(id).unwrap_or(false) {
                    "(x)"
                } else {
                    "( )"
                };
                write!(output, " {}", marker).expect("write to String");
            }
        }

        output.push('\n');

        for child_id in children {
            self.format_subtree_into(child_id, depth + 1, output)?;
        }

        Ok(())
    }
}

impl fmt::Display for ViewTreeDebug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format_all() {
            Ok(output) => write!(f, "{}", output),
            Err(e) => write!(f, "Error formatting view tree: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::init_global_registry;

    struct TestWidget;
    struct TestControl;

    fn setup() {
        init_global_registry();
    }

    #[test]
    fn test_tree_format_single() {
        setup();
        let registry = global_registry().unwrap();
        let root = registry.register::<TestWidget>();
        registry
            .set_node_name(root, "root_panel".to_string())
            .unwrap();

        let debug = ViewTreeDebug::new();
        let output = debug.format_subtree(root).unwrap();

        assert!(output.contains("root_panel"));
        assert!(output.contains("TestWidget"));
    }

    #[test]
    fn test_tree_format_shows_view_state() {
        setup();
        let registry = global_registry().unwrap();
        let root = registry.register::<TestWidget>();
        let control = registry.register::<TestControl>();
        registry.add_child(root, control).unwrap();
        registry.init_toggle_state(control).unwrap();
        registry.set_view_id(control, 42).unwrap();
        registry.set_checked(control, true).unwrap();

        let debug = ViewTreeDebug::new();
        let output = debug.format_subtree(root).unwrap();

        assert!(output.contains("id=42"));
        assert!(output.contains("(x)"));
    }

    #[test]
    fn test_tree_format_max_depth() {
        setup();
        let registry = global_registry().unwrap();
        let root = registry.register::<TestWidget>();
        let child = registry.register::<TestWidget>();
        registry.add_child(root, child).unwrap();
        registry
            .set_node_name(child, "hidden_child".to_string())
            .unwrap();

        let debug = ViewTreeDebug::with_options(TreeFormatOptions {
            max_depth: Some(0),
            ..Default::default()
        });
        let output = debug.format_subtree(root).unwrap();

        assert!(!output.contains("hidden_child"));
    }
}
