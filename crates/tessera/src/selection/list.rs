//! Shared, ordered item list that selection controllers read from.

use parking_lot::{RwLock, RwLockReadGuard};
use tessera_core::Signal;

/// An ordered, index-addressable list shared between the application and
/// the views that present it.
///
/// The application owns and mutates the list; a
/// [`SelectionController`](super::SelectionController) only reads it.
///
/// # Signals
///
/// - `items_changed`: emitted after every mutation, with the new length
pub struct ItemList<T> {
    items: RwLock<Vec<T>>,

    /// Emitted after the list is mutated. Args: new length
    pub items_changed: Signal<usize>,
}

impl<T> Default for ItemList<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> ItemList<T> {
    /// Create a list holding `items`.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
            items_changed: Signal::new(),
        }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns true if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Read access to the items.
    ///
    /// Do not mutate the list while holding the returned guard.
    pub fn items(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.items.read()
    }

    /// Index of the first item matching `predicate`.
    pub fn position(&self, predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.items.read().iter().position(predicate)
    }

    /// Append an item.
    pub fn push(&self, item: T) {
        let len = {
            let mut items = self.items.write();
            items.push(item);
            items.len()
        };
        self.items_changed.emit(len);
    }

    /// Insert an item at `index`, clamped to the end of the list.
    pub fn insert(&self, index: usize, item: T) {
        let len = {
            let mut items = self.items.write();
            let index = index.min(items.len());
            items.insert(index, item);
            items.len()
        };
        self.items_changed.emit(len);
    }

    /// Remove and return the item at `index`, if any.
    pub fn remove(&self, index: usize) -> Option<T> {
        let (removed, len) = {
            let mut items = self.items.write();
            if index >= items.len() {
                return None;
            }
            let removed = items.remove(index);
            (removed, items.len())
        };
        self.items_changed.emit(len);
        Some(removed)
    }

    /// Remove all items.
    pub fn clear(&self) {
        self.items.write().clear();
        self.items_changed.emit(0);
    }

    /// Replace all items.
    pub fn set_items(&self, items: Vec<T>) {
        let len = items.len();
        *self.items.write() = items;
        self.items_changed.emit(len);
    }
}

impl<T: Clone> ItemList<T> {
    /// Clone of the item at `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.read().get(index).cloned()
    }

    /// Clone of all items.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.read().clone()
    }
}
