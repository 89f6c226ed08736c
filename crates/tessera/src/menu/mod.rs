//! Contextual menus.
//!
//! This module provides:
//!
//! - [`MenuItem`] - the entries of a menu (actions, toggles, dividers,
//!   labels and submenus)
//! - [`ContextMenuRegistry`] - per-node menu bindings, resolved by walking a
//!   node's ancestors
//! - [`ContextMenuConfig`] / [`MenuDefinition`] - menus and resolver settings
//!   loaded from TOML
//!
//! # Example
//!
//! ```
//! use tessera::menu::{ContextMenuRegistry, MenuItem, MenuOwner};
//! use tessera::tessera_core::NodeTree;
//!
//! let mut tree = NodeTree::new();
//! let body = tree.create("body");
//! tree.set_root_boundary(body, true).unwrap();
//! let list = tree.create_child(body, "file-list").unwrap();
//! let row = tree.create_child(list, "row-3").unwrap();
//!
//! let mut menus = ContextMenuRegistry::new();
//! menus.set(
//!     &tree,
//!     list,
//!     vec![MenuItem::action("Rename"), MenuItem::action("Delete")],
//! );
//!
//! // The row has no binding of its own, so it inherits the list's menu.
//! let menu = menus.resolve(&tree, row);
//! assert_eq!(menu.owner(), Some(MenuOwner::Node(list)));
//! assert_eq!(menu.items().len(), 2);
//! ```

mod config;
mod defaults;
mod item;
mod registry;

pub use config::{build_menu, ContextMenuConfig, MenuDefinition, DEFAULT_MAX_ANCESTOR_DEPTH};
pub use defaults::default_menu;
pub use item::{find, Callback, MenuAction, MenuItem, MenuToggle, Submenu};
pub use registry::{
    ContextMenuRegistry, MenuBinding, MenuOwner, MenuProducer, MenuTarget, ResolvedMenu,
};
