//! Click / Ctrl+click / Shift+click selection over an [`ItemList`].

use std::sync::Arc;

use tessera_core::logging::targets;
use tessera_core::Signal;
use winit::event::Modifiers;
use winit::keyboard::ModifiersState;

use super::list::ItemList;

/// Keyboard modifiers that change how a click selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectModifiers {
    /// Extend to a range from the anchor.
    pub shift: bool,
    /// Toggle the item in or out of a multi-selection.
    pub ctrl: bool,
}

impl SelectModifiers {
    /// A plain click.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
    };

    /// Shift+click.
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
    };

    /// Ctrl+click.
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
    };
}

impl From<ModifiersState> for SelectModifiers {
    /// Control and Super (Cmd on macOS) both count as ctrl.
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key() || state.super_key(),
        }
    }
}

impl From<&Modifiers> for SelectModifiers {
    fn from(modifiers: &Modifiers) -> Self {
        modifiers.state().into()
    }
}

type Matcher<T> = Box<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// Tracks which items of an [`ItemList`] are selected.
///
/// Items are matched by `PartialEq` by default, or by a derived key when the
/// controller is built with [`with_key`](Self::with_key); use a key whenever
/// the list holds recreated copies rather than the same values.
///
/// The selection is not reconciled when the list changes. After removing
/// items from the list, call [`set_selected`](Self::set_selected) or
/// [`clear`](Self::clear) if stale entries matter.
///
/// # Signals
///
/// - `selection_changed`: emitted after every operation, with the new selection
pub struct SelectionController<T> {
    list: Arc<ItemList<T>>,
    selected: Vec<T>,
    /// Index into `list` of the last clicked item.
    anchor: Option<usize>,
    matcher: Matcher<T>,

    /// Emitted after the selection is modified. Args: the new selection
    pub selection_changed: Signal<Vec<T>>,
}

impl<T> SelectionController<T>
where
    T: Clone + Send + 'static,
{
    /// Create a controller that matches items with `PartialEq`.
    pub fn new(list: Arc<ItemList<T>>) -> Self
    where
        T: PartialEq,
    {
        Self::with_matcher(list, Box::new(|a: &T, b: &T| a == b))
    }

    /// Create a controller that matches items by a derived key.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use tessera::selection::{ItemList, SelectModifiers, SelectionController};
    ///
    /// #[derive(Clone)]
    /// struct Row { id: u64, name: String }
    ///
    /// let list = Arc::new(ItemList::new(vec![
    ///     Row { id: 1, name: "a.txt".into() },
    ///     Row { id: 2, name: "b.txt".into() },
    /// ]));
    /// let mut selection = SelectionController::with_key(list, |row: &Row| row.id);
    ///
    /// selection.select(Row { id: 2, name: "renamed.txt".into() }, SelectModifiers::NONE);
    /// assert_eq!(selection.anchor_index(), Some(1));
    /// ```
    pub fn with_key<K, F>(list: Arc<ItemList<T>>, key: F) -> Self
    where
        K: PartialEq,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self::with_matcher(list, Box::new(move |a: &T, b: &T| key(a) == key(b)))
    }

    fn with_matcher(list: Arc<ItemList<T>>, matcher: Matcher<T>) -> Self {
        Self {
            list,
            selected: Vec::new(),
            anchor: None,
            matcher,
            selection_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The list this controller selects from.
    pub fn items(&self) -> &Arc<ItemList<T>> {
        &self.list
    }

    /// The selected items, in selection order.
    pub fn selected(&self) -> &[T] {
        &self.selected
    }

    /// Returns the number of selected items.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Returns true if any items are selected.
    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    /// The anchor for range selection, `None` if unset.
    pub fn anchor_index(&self) -> Option<usize> {
        self.anchor
    }

    /// Checks if an item is selected.
    pub fn is_selected(&self, item: &T) -> bool {
        self.selected.iter().any(|selected| (self.matcher)(selected, item))
    }

    fn index_of(&self, item: &T) -> Option<usize> {
        self.list.position(|candidate| (self.matcher)(candidate, item))
    }

    // =========================================================================
    // Selection Operations
    // =========================================================================

    /// Apply a click on `item`.
    ///
    /// - Shift: select the list range between the anchor (or the first item
    ///   if there is no anchor) and `item`, replacing the selection. Falls
    ///   back to a plain click if `item` is not in the list.
    /// - Ctrl: add `item` to the selection, or remove it if already selected.
    /// - Neither: select exactly `item`.
    ///
    /// Afterwards the anchor is `item`'s index in the list, or unset if the
    /// item is not in the list.
    pub fn select(&mut self, item: T, modifiers: SelectModifiers) {
        let index = self.index_of(&item);

        if modifiers.shift {
            match index {
                Some(target) => self.select_range(target),
                None => self.toggle(item, false),
            }
        } else if modifiers.ctrl {
            self.toggle(item, true);
        } else {
            self.toggle(item, false);
        }

        if index.is_none() {
            tracing::warn!(target: targets::SELECTION, "selected item not found in the list");
        }
        self.anchor = index;

        tracing::trace!(
            target: targets::SELECTION,
            shift = modifiers.shift,
            ctrl = modifiers.ctrl,
            anchor = ?self.anchor,
            selected = self.selected.len(),
            "selection updated"
        );
        self.notify();
    }

    fn toggle(&mut self, item: T, multiselect: bool) {
        if !multiselect {
            self.selected = vec![item];
            return;
        }

        match self
            .selected
            .iter()
            .position(|selected| (self.matcher)(selected, &item))
        {
            Some(position) => {
                self.selected.remove(position);
            }
            None => self.selected.push(item),
        }
    }

    fn select_range(&mut self, target: usize) {
        let items = self.list.items();
        // The list may have shrunk since the anchor was recorded.
        let anchor = self
            .anchor
            .unwrap_or(0)
            .min(items.len().saturating_sub(1));
        let (first, last) = if anchor <= target {
            (anchor, target)
        } else {
            (target, anchor)
        };
        let range = items[first..=last].to_vec();
        drop(items);
        self.selected = range;
    }

    /// Replace the selection without touching the anchor.
    ///
    /// Intended for restoring a saved selection. Duplicate entries are
    /// dropped, keeping the first occurrence.
    pub fn set_selected(&mut self, items: Vec<T>) {
        let mut selected: Vec<T> = Vec::with_capacity(items.len());
        for item in items {
            if !selected.iter().any(|kept| (self.matcher)(kept, &item)) {
                selected.push(item);
            }
        }
        self.selected = selected;
        self.notify();
    }

    /// Select every item in the list and unset the anchor.
    pub fn select_all(&mut self) {
        self.selected = self.list.to_vec();
        self.anchor = None;
        self.notify();
    }

    /// Clear the selection and unset the anchor.
    pub fn clear(&mut self) {
        tracing::trace!(target: targets::SELECTION, "clearing selection");
        self.selected.clear();
        self.anchor = None;
        self.notify();
    }

    fn notify(&self) {
        if self.selection_changed.connection_count() > 0 {
            self.selection_changed.emit(self.selected.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn letters() -> Arc<ItemList<char>> {
        Arc::new(ItemList::new(vec!['a', 'b', 'c', 'd', 'e']))
    }

    #[test]
    fn test_initial_state() {
        let selection = SelectionController::new(letters());
        assert!(!selection.has_selection());
        assert_eq!(selection.anchor_index(), None);
    }

    #[test]
    fn test_single_select_replaces() {
        let mut selection = SelectionController::new(letters());
        selection.select('a', SelectModifiers::CTRL);
        selection.select('b', SelectModifiers::CTRL);
        selection.select('d', SelectModifiers::NONE);
        assert_eq!(selection.selected(), &['d']);
        assert_eq!(selection.anchor_index(), Some(3));
    }

    #[test]
    fn test_ctrl_toggles() {
        let mut selection = SelectionController::new(letters());
        selection.select('a', SelectModifiers::NONE);
        selection.select('c', SelectModifiers::CTRL);
        assert_eq!(selection.selected(), &['a', 'c']);

        selection.select('a', SelectModifiers::CTRL);
        assert_eq!(selection.selected(), &['c']);
        assert_eq!(selection.anchor_index(), Some(0));

        selection.select('c', SelectModifiers::CTRL);
        assert!(selection.selected().is_empty());
    }

    #[test]
    fn test_shift_selects_inclusive_range() {
        let mut selection = SelectionController::new(letters());
        selection.select('b', SelectModifiers::NONE);
        selection.select('d', SelectModifiers::SHIFT);
        assert_eq!(selection.selected(), &['b', 'c', 'd']);
        assert_eq!(selection.anchor_index(), Some(3));
    }

    #[test]
    fn test_shift_range_backwards_is_in_list_order() {
        let mut selection = SelectionController::new(letters());
        selection.select('e', SelectModifiers::NONE);
        selection.select('c', SelectModifiers::SHIFT);
        assert_eq!(selection.selected(), &['c', 'd', 'e']);
    }

    #[test]
    fn test_shift_without_anchor_starts_at_first_item() {
        let mut selection = SelectionController::new(letters());
        selection.select('c', SelectModifiers::SHIFT);
        assert_eq!(selection.selected(), &['a', 'b', 'c']);
    }

    #[test]
    fn test_shift_replaces_previous_selection() {
        let mut selection = SelectionController::new(letters());
        selection.select('e', SelectModifiers::CTRL);
        selection.select('a', SelectModifiers::CTRL);
        selection.select('b', SelectModifiers::SHIFT);
        assert_eq!(selection.selected(), &['a', 'b']);
    }

    #[test]
    fn test_shift_on_missing_item_acts_like_plain_click() {
        let mut shifted = SelectionController::new(letters());
        shifted.select('b', SelectModifiers::NONE);
        shifted.select('z', SelectModifiers::SHIFT);

        let mut plain = SelectionController::new(letters());
        plain.select('b', SelectModifiers::NONE);
        plain.select('z', SelectModifiers::NONE);

        assert_eq!(shifted.selected(), plain.selected());
        assert_eq!(shifted.selected(), &['z']);
        assert_eq!(shifted.anchor_index(), None);
        assert_eq!(plain.anchor_index(), None);
    }

    #[test]
    fn test_anchor_clamped_after_list_shrinks() {
        let list = letters();
        let mut selection = SelectionController::new(list.clone());
        selection.select('e', SelectModifiers::NONE);
        list.set_items(vec!['a', 'b', 'c']);
        selection.select('b', SelectModifiers::SHIFT);
        assert_eq!(selection.selected(), &['b', 'c']);
    }

    #[test]
    fn test_select_all_and_clear_reset_anchor() {
        let mut selection = SelectionController::new(letters());
        selection.select('b', SelectModifiers::NONE);
        selection.select_all();
        assert_eq!(selection.selected(), &['a', 'b', 'c', 'd', 'e']);
        assert_eq!(selection.anchor_index(), None);

        selection.select('b', SelectModifiers::NONE);
        selection.clear();
        assert!(selection.selected().is_empty());
        assert_eq!(selection.anchor_index(), None);
    }

    #[test]
    fn test_set_selected_keeps_anchor_and_dedups() {
        let mut selection = SelectionController::new(letters());
        selection.select('c', SelectModifiers::NONE);
        selection.set_selected(vec!['a', 'e', 'a']);
        assert_eq!(selection.selected(), &['a', 'e']);
        assert_eq!(selection.anchor_index(), Some(2));

        let current = selection.selected().to_vec();
        selection.set_selected(current);
        assert!(selection.is_selected(&'a'));
        assert!(selection.is_selected(&'e'));
        assert!(!selection.is_selected(&'c'));
    }

    #[test]
    fn test_stale_entries_are_not_reconciled() {
        let list = letters();
        let mut selection = SelectionController::new(list.clone());
        selection.select('a', SelectModifiers::NONE);
        selection.select('b', SelectModifiers::CTRL);
        list.remove(0);
        assert!(selection.is_selected(&'a'));
        assert_eq!(selection.selected_count(), 2);
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Record {
        id: u32,
        revision: u32,
    }

    #[test]
    fn test_key_identity_matches_copies() {
        let list = Arc::new(ItemList::new(
            (0..4).map(|id| Record { id, revision: 0 }).collect(),
        ));
        let mut selection = SelectionController::with_key(list, |record: &Record| record.id);

        selection.select(Record { id: 1, revision: 7 }, SelectModifiers::NONE);
        assert_eq!(selection.anchor_index(), Some(1));
        assert!(selection.is_selected(&Record { id: 1, revision: 0 }));

        selection.select(Record { id: 3, revision: 2 }, SelectModifiers::SHIFT);
        let ids: Vec<u32> = selection.selected().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        selection.select(Record { id: 2, revision: 9 }, SelectModifiers::CTRL);
        let ids: Vec<u32> = selection.selected().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_default_identity_distinguishes_copies() {
        let list = Arc::new(ItemList::new(vec![Record { id: 1, revision: 0 }]));
        let mut selection = SelectionController::new(list);
        selection.select(Record { id: 1, revision: 1 }, SelectModifiers::NONE);
        assert_eq!(selection.anchor_index(), None);
    }

    #[test]
    fn test_selection_changed_signal() {
        let mut selection = SelectionController::new(letters());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        selection
            .selection_changed
            .connect(move |selected: &Vec<char>| seen_clone.lock().push(selected.len()));

        selection.select('a', SelectModifiers::NONE);
        selection.select('c', SelectModifiers::SHIFT);
        selection.clear();

        assert_eq!(*seen.lock(), vec![1, 3, 0]);
    }

    #[test]
    fn test_modifiers_from_winit() {
        assert_eq!(
            SelectModifiers::from(ModifiersState::SHIFT),
            SelectModifiers::SHIFT
        );
        assert_eq!(
            SelectModifiers::from(ModifiersState::CONTROL),
            SelectModifiers::CTRL
        );
        assert_eq!(
            SelectModifiers::from(ModifiersState::SUPER | ModifiersState::SHIFT),
            SelectModifiers {
                shift: true,
                ctrl: true
            }
        );
        assert_eq!(
            SelectModifiers::from(ModifiersState::ALT),
            SelectModifiers::NONE
        );
    }
}
