//! Core systems for Tessera.
//!
//! This crate provides the foundations the UI state helpers in `tessera`
//! are built on:
//!
//! - **Node Tree**: Arena-backed visual tree with generational ids
//! - **Hierarchy**: The parent/root/suppression queries an ancestor walk needs
//! - **Signals**: Synchronous change notification for rendering layers
//! - **Logging**: `tracing` targets and tree debug output
//!
//! # Example
//!
//! ```
//! use tessera_core::{Hierarchy, NodeTree};
//!
//! let mut tree = NodeTree::new();
//! let body = tree.create("body");
//! let list = tree.create_child(body, "file-list").unwrap();
//! tree.set_root_boundary(body, true).unwrap();
//!
//! assert_eq!(tree.parent_of(list), Some(body));
//! assert!(tree.is_root(body));
//! ```

pub mod logging;
pub mod node;
pub mod signal;

pub use logging::{NodeTreeDebug, TreeFormatOptions, TreeStyle};
pub use node::{Hierarchy, NodeError, NodeId, NodeResult, NodeTree};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
