//! Convenient re-exports for common Tessera types.
//!
//! ```
//! use tessera::prelude::*;
//! ```

pub use crate::menu::{
    ContextMenuConfig, ContextMenuRegistry, MenuAction, MenuItem, MenuOwner, MenuProducer,
    MenuTarget, MenuToggle, ResolvedMenu, Submenu,
};
pub use crate::selection::{ItemList, SelectModifiers, SelectionController};
pub use tessera_core::{Hierarchy, NodeId, NodeTree, Signal};
