//! Core traits for the model layer.

use parking_lot::RwLock;
use roster_core::Signal;

use super::change::ListChange;

/// Read access to an ordered list of items.
///
/// Selection models observe a list through this trait and never mutate it.
/// Lists that announce their own structural changes return their
/// notification signal from [`list_changed`](Self::list_changed); models
/// attach to it on construction. Lists that return `None` must be tracked
/// manually, by calling
/// [`SelectionModel::on_list_changed`](super::SelectionModel::on_list_changed)
/// after every structural change.
pub trait ItemList: Send + Sync {
    /// The item type.
    type Item;

    /// Returns the number of items.
    fn len(&self) -> usize;

    /// Returns `true` if the list holds no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of the item at `index`, or `None` if out of bounds.
    fn item(&self, index: usize) -> Option<Self::Item>;

    /// Returns the index of the first item equal to `item`.
    fn position_of(&self, item: &Self::Item) -> Option<usize>;

    /// Signal emitted after every structural change, if the list has one.
    fn list_changed(&self) -> Option<&Signal<ListChange>> {
        None
    }
}

/// A plain shared vector. Its owner is responsible for notifying selection
/// models of structural changes.
impl<T> ItemList for RwLock<Vec<T>>
where
    T: Clone + PartialEq + Send + Sync,
{
    type Item = T;

    fn len(&self) -> usize {
        self.read().len()
    }

    fn item(&self, index: usize) -> Option<T> {
        self.read().get(index).cloned()
    }

    fn position_of(&self, item: &T) -> Option<usize> {
        self.read().iter().position(|candidate| candidate == item)
    }
}

/// The operation set of a selection model over an [`ItemList`].
///
/// All operations are best effort: indices out of range and items that are
/// not in the list are ignored rather than reported. Operations take `&self`
/// so a model can be shared with the closures that keep it in sync.
pub trait ItemSelectionModel {
    /// The item type of the underlying list.
    type Item;

    /// Returns the number of items in the underlying list.
    fn item_count(&self) -> usize;

    /// Selects `index` and makes it the anchor.
    fn select(&self, index: usize);

    /// Selects the first item equal to `item`.
    fn select_item(&self, item: &Self::Item);

    /// Selects `index` and every index in `indices`, skipping invalid ones.
    /// `index` becomes the anchor.
    fn select_indices(&self, index: usize, indices: &[usize]);

    /// Selects the half-open range from `start` towards `end`: `start` is
    /// included and `end` is excluded.
    ///
    /// The range runs downwards when `start > end`, so `select_range(1, 4)`
    /// selects 1, 2 and 3 while `select_range(4, 1)` selects 4, 3 and 2. The
    /// last index visited becomes the anchor. Unlike an inclusive range,
    /// `select_range(i, i)` selects nothing. Indices past the end of the list
    /// are skipped.
    fn select_range(&self, start: usize, end: usize);

    /// Clears the selection, then selects `index`.
    fn clear_and_select(&self, index: usize);

    /// Selects every item.
    fn select_all(&self);

    /// Clears the selection and the anchor.
    fn clear_selection(&self);

    /// Deselects `index`.
    fn clear_selection_at(&self, index: usize);

    /// Returns `true` if `index` is selected.
    fn is_selected(&self, index: usize) -> bool;

    /// Returns the number of selected indices.
    fn selected_count(&self) -> usize;

    /// Returns the selected indices in ascending order.
    fn selected_indices(&self) -> Vec<usize>;

    /// Returns the selected items ordered by index.
    fn selected_items(&self) -> Vec<Self::Item>;

    /// Returns the anchor index.
    fn selected_index(&self) -> Option<usize>;

    /// Returns the item at the anchor index.
    fn selected_item(&self) -> Option<Self::Item>;

    /// Returns `true` if nothing is selected.
    fn is_empty(&self) -> bool {
        self.selected_count() == 0
    }

    /// Selects the first item. Does nothing on an empty list.
    fn select_first(&self) {
        if self.item_count() > 0 {
            self.select(0);
        }
    }

    /// Selects the last item. Does nothing on an empty list.
    fn select_last(&self) {
        if let Some(last) = self.item_count().checked_sub(1) {
            self.select(last);
        }
    }

    /// Selects the item after the anchor.
    fn select_next(&self) {
        if let Some(anchor) = self.selected_index() {
            if anchor + 1 < self.item_count() {
                self.select(anchor + 1);
            }
        }
    }

    /// Selects the item before the anchor.
    fn select_previous(&self) {
        if let Some(previous) = self.selected_index().and_then(|a| a.checked_sub(1)) {
            self.select(previous);
        }
    }
}
