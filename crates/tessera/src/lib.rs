//! Tessera: UI state helpers for desktop-style applications.
//!
//! Two independent components:
//!
//! - [`menu`]: per-node context menus resolved by walking the visual tree
//!   from the clicked node towards the root, with per-node overrides,
//!   inheritance, and subtree suppression
//! - [`selection`]: click, Ctrl+click and Shift+click selection over an
//!   ordered list
//!
//! Neither component renders anything. Both expose plain state plus
//! explicit mutation operations and emit a [`Signal`](tessera_core::Signal)
//! after each change for the rendering layer to react to.
//!
//! The visual tree itself lives in [`tessera_core::NodeTree`]; the menu
//! resolver only needs the [`Hierarchy`](tessera_core::Hierarchy) view of it.

pub mod error;
pub mod menu;
pub mod prelude;
pub mod selection;

pub use error::{Error, Result};
pub use tessera_core;
