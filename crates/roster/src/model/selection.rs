//! Selection model for ordered lists.
//!
//! This module provides [`SelectionModel`], which tracks which indices of an
//! externally owned [`ItemList`] are selected and keeps that selection valid
//! while the list changes underneath it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use roster::model::{ItemSelectionModel, ListModel, SelectionMode, SelectionModel};
//!
//! let list = Arc::new(ListModel::new(vec!["a", "b", "c", "d"]));
//! let selection = SelectionModel::builder(list.clone())
//!     .mode(SelectionMode::Multiple)
//!     .build();
//!
//! selection.selection_changed().connect(|change| {
//!     println!("Selection changed: +{:?} -{:?}", change.added, change.removed);
//! });
//!
//! selection.select(2);
//! selection.select(3);
//!
//! // Removing an earlier item shifts the selection down.
//! list.remove(0).unwrap();
//! assert_eq!(selection.selected_indices(), vec![1, 2]);
//! assert_eq!(selection.selected_items(), vec!["c", "d"]);
//! ```

use std::collections::BTreeSet;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use roster_core::logging::targets;
use roster_core::{ConnectionId, Signal};

use super::change::{ListChange, SelectionChange};
use super::traits::{ItemList, ItemSelectionModel};

/// How selecting an index interacts with the existing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionMode {
    /// At most one index is selected; selecting replaces the selection.
    /// `select_all` does nothing.
    Single,
    /// Selecting adds to the selection (default).
    #[default]
    Multiple,
}

/// Selection bookkeeping, guarded by the model's mutex.
#[derive(Debug, Default)]
struct SelectionState {
    mode: SelectionMode,

    /// Selected indices, ascending.
    members: BTreeSet<usize>,

    /// The same indices in selection order, most recent last.
    order: Vec<usize>,

    /// The most recently selected index.
    anchor: Option<usize>,
}

impl SelectionState {
    fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Selects an index already known to be valid.
    fn add(&mut self, index: usize) {
        if self.mode == SelectionMode::Single {
            self.clear();
        }
        if self.members.insert(index) {
            self.order.push(index);
        } else if self.order.last() != Some(&index) {
            self.order.retain(|&i| i != index);
            self.order.push(index);
        }
        self.anchor = Some(index);
    }

    fn remove(&mut self, index: usize) {
        if !self.members.remove(&index) {
            return;
        }
        self.order.retain(|&i| i != index);
        if self.anchor == Some(index) {
            self.anchor = self.order.last().copied();
        }
    }

    fn clear(&mut self) {
        self.members.clear();
        self.order.clear();
        self.anchor = None;
    }

    /// Keeps only the anchor, or the most recent index without one.
    fn trim_to_single(&mut self) {
        let keep = self.anchor.or_else(|| self.order.last().copied());
        self.clear();
        if let Some(index) = keep {
            self.members.insert(index);
            self.order.push(index);
            self.anchor = Some(index);
        }
    }

    /// Carries the selection across a structural change. Indices that land
    /// at or past `bound`, or on an index already taken, are dropped. Returns
    /// the dropped indices in pre-change coordinates.
    fn remap(&mut self, change: &ListChange, bound: usize) -> Vec<usize> {
        let mut dropped = Vec::new();
        let mut members = BTreeSet::new();
        let mut order = Vec::with_capacity(self.order.len());
        for &old in &self.order {
            match change.remap(old).filter(|&new| new < bound) {
                Some(new) if members.insert(new) => order.push(new),
                _ => dropped.push(old),
            }
        }

        self.members = members;
        self.order = order;
        self.anchor = self
            .anchor
            .and_then(|anchor| change.remap(anchor))
            .filter(|anchor| self.members.contains(anchor))
            .or_else(|| self.order.last().copied());

        dropped.sort_unstable();
        dropped
    }
}

/// Returns `true` if `permutation` maps `0..len` onto itself.
fn is_permutation(permutation: &[usize], len: usize) -> bool {
    if permutation.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    permutation
        .iter()
        .all(|&target| target < len && !std::mem::replace(&mut seen[target], true))
}

/// Everything the list-side notification closure needs to reach.
struct SelectionInner {
    state: Mutex<SelectionState>,
    selection_changed: Signal<SelectionChange>,
    selected_index_changed: Signal<(Option<usize>, Option<usize>)>,
}

impl SelectionInner {
    fn new(mode: SelectionMode) -> Self {
        Self {
            state: Mutex::new(SelectionState::new(mode)),
            selection_changed: Signal::new(),
            selected_index_changed: Signal::new(),
        }
    }

    /// Runs `op` on the state and emits the resulting notifications once the
    /// lock has been released.
    fn mutate<F>(&self, op: F)
    where
        F: FnOnce(&mut SelectionState),
    {
        let (change, new_anchor, old_anchor) = {
            let mut state = self.state.lock();
            let before = state.members.clone();
            let old_anchor = state.anchor;

            op(&mut *state);

            let change = SelectionChange {
                added: state.members.difference(&before).copied().collect(),
                removed: before.difference(&state.members).copied().collect(),
            };
            (change, state.anchor, old_anchor)
        };

        self.notify(change, new_anchor, old_anchor);
    }

    fn apply_list_change(&self, change: &ListChange, bound: usize) {
        if change.is_noop() {
            return;
        }

        let (dropped, new_anchor, old_anchor) = {
            let mut state = self.state.lock();
            if state.members.is_empty() {
                return;
            }
            let old_anchor = state.anchor;
            let dropped = state.remap(change, bound);
            (dropped, state.anchor, old_anchor)
        };

        tracing::debug!(
            target: targets::SELECTION,
            ?change,
            dropped = dropped.len(),
            "selection remapped"
        );

        self.notify(
            SelectionChange {
                added: Vec::new(),
                removed: dropped,
            },
            new_anchor,
            old_anchor,
        );
    }

    fn notify(&self, change: SelectionChange, new_anchor: Option<usize>, old_anchor: Option<usize>) {
        if !change.is_empty() {
            tracing::trace!(
                target: targets::SELECTION,
                added = change.added.len(),
                removed = change.removed.len(),
                "selection changed"
            );
            self.selection_changed.emit(change);
        }
        if new_anchor != old_anchor {
            self.selected_index_changed.emit((new_anchor, old_anchor));
        }
    }
}

/// Tracks the selected indices of an ordered list.
///
/// The model reads the list through [`ItemList`] and never mutates it. When
/// the list exposes a change signal (as [`ListModel`](super::ListModel) does),
/// the model connects to it on construction and remaps its indices after
/// every insertion, removal, replacement or reordering. Otherwise the list's
/// owner must call [`on_list_changed`](Self::on_list_changed) or
/// [`on_list_permuted`](Self::on_list_permuted) after each structural change.
///
/// Dropping the model disconnects it from the list.
///
/// # Signals
///
/// - `selection_changed`: emitted after an operation adds or removes indices
/// - `selected_index_changed`: emitted when the anchor moves, with (new, old)
pub struct SelectionModel<L: ItemList> {
    list: Arc<L>,
    inner: Arc<SelectionInner>,
    list_connection: Option<ConnectionId>,
}

impl<L: ItemList> SelectionModel<L> {
    /// Creates a selection model in [`SelectionMode::Multiple`].
    pub fn new(list: Arc<L>) -> Self {
        Self::builder(list).build()
    }

    /// Returns a builder for configuring the model before it attaches.
    pub fn builder(list: Arc<L>) -> SelectionModelBuilder<L> {
        SelectionModelBuilder::new(list)
    }

    fn attach(list: Arc<L>, mode: SelectionMode) -> Self {
        let inner = Arc::new(SelectionInner::new(mode));
        let list_connection = list.list_changed().map(|signal| {
            let weak: Weak<SelectionInner> = Arc::downgrade(&inner);
            // The list may already hold later changes that are still queued,
            // so its current length is no bound here.
            signal.connect(move |change| {
                if let Some(inner) = weak.upgrade() {
                    inner.apply_list_change(change, usize::MAX);
                }
            })
        });

        Self {
            list,
            inner,
            list_connection,
        }
    }

    /// Signal emitted after the selected set changes.
    pub fn selection_changed(&self) -> &Signal<SelectionChange> {
        &self.inner.selection_changed
    }

    /// Signal emitted when the anchor index changes. Args: (new, old)
    pub fn selected_index_changed(&self) -> &Signal<(Option<usize>, Option<usize>)> {
        &self.inner.selected_index_changed
    }

    /// Gets the current selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.inner.state.lock().mode
    }

    /// Sets the selection mode.
    ///
    /// Switching to [`SelectionMode::Single`] keeps only the anchor.
    pub fn set_selection_mode(&self, mode: SelectionMode) {
        tracing::debug!(target: targets::SELECTION, ?mode, "selection mode set");
        self.inner.mutate(|state| {
            state.mode = mode;
            if mode == SelectionMode::Single && state.members.len() > 1 {
                state.trim_to_single();
            }
        });
    }

    /// Reacts to a splice of the list: `removed` items at `position` were
    /// replaced by `inserted` items.
    ///
    /// Call it after the list has changed. Indices that end up past the
    /// list's length are dropped.
    pub fn on_list_changed(&self, position: usize, removed: usize, inserted: usize) {
        let change = ListChange::Splice {
            position,
            removed,
            inserted,
        };
        self.inner.apply_list_change(&change, self.list.len());
    }

    /// Reacts to a reordering of the list. The item that was at `i` is now at
    /// `permutation[i]`.
    ///
    /// `permutation` must map `0..len` onto itself. Anything else says
    /// nothing reliable about where the items went, so the selection is
    /// cleared instead.
    pub fn on_list_permuted(&self, permutation: &[usize]) {
        let len = self.list.len();
        if !is_permutation(permutation, len) {
            tracing::warn!(
                target: targets::SELECTION,
                ?permutation,
                len,
                "invalid permutation, clearing selection"
            );
            self.inner.mutate(SelectionState::clear);
            return;
        }
        let change = ListChange::Permuted {
            permutation: permutation.to_vec(),
        };
        self.inner.apply_list_change(&change, len);
    }

    /// Selects the indices visited by `indices` that are in range. The last
    /// valid one becomes the anchor; in single mode only it is selected.
    fn select_valid<I>(&self, indices: I)
    where
        I: IntoIterator<Item = usize>,
    {
        let len = self.list.len();
        let valid: Vec<usize> = indices.into_iter().filter(|&i| i < len).collect();
        if valid.is_empty() {
            return;
        }

        self.inner.mutate(|state| match state.mode {
            SelectionMode::Single => {
                if let Some(&last) = valid.last() {
                    state.add(last);
                }
            }
            SelectionMode::Multiple => {
                for index in valid {
                    state.add(index);
                }
            }
        });
    }
}

impl<L: ItemList> ItemSelectionModel for SelectionModel<L> {
    type Item = L::Item;

    fn item_count(&self) -> usize {
        self.list.len()
    }

    fn select(&self, index: usize) {
        self.select_valid([index]);
    }

    fn select_item(&self, item: &L::Item) {
        if let Some(index) = self.list.position_of(item) {
            self.select(index);
        }
    }

    fn select_indices(&self, index: usize, indices: &[usize]) {
        // The primary index goes last so it ends up as the anchor.
        self.select_valid(indices.iter().copied().chain(std::iter::once(index)));
    }

    fn select_range(&self, start: usize, end: usize) {
        if start <= end {
            self.select_valid(start..end);
        } else {
            self.select_valid(((end + 1)..=start).rev());
        }
    }

    fn clear_and_select(&self, index: usize) {
        let valid = index < self.list.len();
        self.inner.mutate(|state| {
            state.clear();
            if valid {
                state.add(index);
            }
        });
    }

    fn select_all(&self) {
        let len = self.list.len();
        self.inner.mutate(|state| {
            if state.mode == SelectionMode::Single {
                return;
            }
            for index in 0..len {
                state.add(index);
            }
        });
    }

    fn clear_selection(&self) {
        self.inner.mutate(SelectionState::clear);
    }

    fn clear_selection_at(&self, index: usize) {
        self.inner.mutate(|state| state.remove(index));
    }

    fn is_selected(&self, index: usize) -> bool {
        self.inner.state.lock().members.contains(&index)
    }

    fn selected_count(&self) -> usize {
        self.inner.state.lock().members.len()
    }

    fn selected_indices(&self) -> Vec<usize> {
        self.inner.state.lock().members.iter().copied().collect()
    }

    fn selected_items(&self) -> Vec<L::Item> {
        self.selected_indices()
            .into_iter()
            .filter_map(|index| self.list.item(index))
            .collect()
    }

    fn selected_index(&self) -> Option<usize> {
        self.inner.state.lock().anchor
    }

    fn selected_item(&self) -> Option<L::Item> {
        self.selected_index().and_then(|index| self.list.item(index))
    }
}

impl<L: ItemList> Drop for SelectionModel<L> {
    fn drop(&mut self) {
        if let (Some(id), Some(signal)) = (self.list_connection.take(), self.list.list_changed()) {
            signal.disconnect(id);
        }
    }
}

impl<L: ItemList> std::fmt::Debug for SelectionModel<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("SelectionModel")
            .field("mode", &state.mode)
            .field("selected", &state.members)
            .field("anchor", &state.anchor)
            .field("attached", &self.list_connection.is_some())
            .finish()
    }
}

static_assertions::assert_impl_all!(SelectionModel<super::ListModel<String>>: Send, Sync);

/// Builder for [`SelectionModel`].
pub struct SelectionModelBuilder<L: ItemList> {
    list: Arc<L>,
    mode: SelectionMode,
}

impl<L: ItemList> SelectionModelBuilder<L> {
    /// Creates a new builder observing `list`.
    pub fn new(list: Arc<L>) -> Self {
        Self {
            list,
            mode: SelectionMode::default(),
        }
    }

    /// Sets the selection mode.
    pub fn mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builds the model and attaches it to the list's change signal.
    pub fn build(self) -> SelectionModel<L> {
        SelectionModel::attach(self.list, self.mode)
    }
}
