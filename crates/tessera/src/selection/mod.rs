//! List selection.
//!
//! [`SelectionController`] implements the selection behavior of desktop file
//! managers over an [`ItemList`]: a click selects one item, Ctrl+click toggles
//! an item in or out, Shift+click selects the range from the anchor.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tessera::selection::{ItemList, SelectModifiers, SelectionController};
//!
//! let files = Arc::new(ItemList::new(vec!["a.txt", "b.txt", "c.txt", "d.txt"]));
//! let mut selection = SelectionController::new(files);
//!
//! selection.select("b.txt", SelectModifiers::NONE);
//! selection.select("d.txt", SelectModifiers::SHIFT);
//! assert_eq!(selection.selected(), &["b.txt", "c.txt", "d.txt"]);
//!
//! selection.select("c.txt", SelectModifiers::CTRL);
//! assert_eq!(selection.selected(), &["b.txt", "d.txt"]);
//! ```

mod controller;
mod list;

pub use controller::{SelectModifiers, SelectionController};
pub use list::ItemList;
