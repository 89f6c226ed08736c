//! Logging and debugging facilities for Tessera.
//!
//! Tessera uses the `tracing` crate for instrumentation. Install a subscriber
//! in the application to see logs:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("tessera=trace,tessera_core=debug")
//!     .init();
//! ```
//!
//! Every event is emitted with an explicit target from [`targets`], so the
//! menu resolver and the selection controller can be filtered independently.
//!
//! [`NodeTreeDebug`] renders a node tree, including the authoring markers the
//! context-menu resolver reacts to.

use std::fmt::Write as _;

use crate::node::{Hierarchy, NodeId, NodeResult, NodeTree};

/// Target names for log filtering.
pub mod targets {
    /// Node tree target.
    pub const NODE: &str = "tessera_core::node";
    /// Signal/slot target.
    pub const SIGNAL: &str = "tessera_core::signal";
    /// Context-menu resolution target.
    pub const MENU: &str = "tessera::menu";
    /// List selection target.
    pub const SELECTION: &str = "tessera::selection";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact dash-prefixed representation.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show node IDs.
    pub show_ids: bool,
    /// Whether to show the suppression and root-boundary markers.
    pub show_markers: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_markers: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for minimal output (names only).
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_markers: false,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing a [`NodeTree`].
#[derive(Debug, Clone, Default)]
pub struct NodeTreeDebug {
    options: TreeFormatOptions,
}

impl NodeTreeDebug {
    /// Create a new debug visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debug visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format every parentless node and its subtree.
    pub fn format_all(&self, tree: &NodeTree) -> NodeResult<String> {
        let mut output = format!("Node Tree ({} total nodes):\n", tree.node_count());
        let roots: Vec<NodeId> = tree.root_nodes().collect();
        if roots.is_empty() {
            output.push_str("  (empty)\n");
        }
        for root in roots {
            self.format_subtree_into(tree, root, 0, true, &mut output)?;
        }
        Ok(output)
    }

    /// Format a subtree starting from a specific node.
    pub fn format_subtree(&self, tree: &NodeTree, root: NodeId) -> NodeResult<String> {
        let mut output = String::new();
        self.format_subtree_into(tree, root, 0, true, &mut output)?;
        Ok(output)
    }

    fn format_subtree_into(
        &self,
        tree: &NodeTree,
        id: NodeId,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) -> NodeResult<()> {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }

        let name = tree.name(id)?;
        output.push_str(&self.build_prefix(depth, is_last));
        output.push_str(if name.is_empty() { "(unnamed)" } else { name });

        if self.options.show_ids {
            let _ = write!(output, " [{id:?}]");
        }
        if self.options.show_markers {
            if tree.is_root(id) {
                output.push_str(" <root>");
            }
            if tree.has_suppression_marker(id) {
                output.push_str(" <no-context-menu>");
            }
        }
        output.push('\n');

        let children = tree.children(id)?;
        let child_count = children.len();
        for (i, &child_id) in children.iter().enumerate() {
            self.format_subtree_into(tree, child_id, depth + 1, i + 1 == child_count, output)?;
        }

        Ok(())
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => (
                "\u{2502}",
                "\u{251c}\u{2500}\u{2500}",
                "\u{2514}\u{2500}\u{2500}",
            ),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            prefix.extend(std::iter::repeat_n(' ', self.options.indent_size));
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix.push(' ');
        prefix
    }
}
