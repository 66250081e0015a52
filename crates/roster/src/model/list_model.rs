//! Observable list model implementation.
//!
//! `ListModel<T>` is an ordered list that announces every change through
//! [`ListSignals`]. Share it behind an `Arc` with the selection models and
//! views that observe it.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::ops::Range;

use parking_lot::{Mutex, RwLock, RwLockReadGuard};
use roster_core::logging::targets;
use roster_core::{Result, RosterError, Signal};

use super::change::ListChange;
use super::traits::ItemList;

/// Signals emitted by a [`ListModel`].
///
/// For each structural change `list_changed` fires first, so index trackers
/// are up to date before views react to `rows_removed` or `rows_inserted`.
/// All signals fire after the list's lock has been released.
///
/// A slot may mutate the list. Its change is announced once the current one
/// has reached every slot of every signal, so observers always see changes
/// in the order they were applied. Changes made on another thread while an
/// announcement is running are announced by the thread already running it.
pub struct ListSignals {
    /// Emitted after every structural change (insert, remove, replace,
    /// reorder).
    pub list_changed: Signal<ListChange>,

    /// Emitted after rows have been inserted.
    /// Args: (first row, last row)
    pub rows_inserted: Signal<(usize, usize)>,

    /// Emitted after rows have been removed.
    /// Args: (first row, last row), in pre-removal coordinates
    pub rows_removed: Signal<(usize, usize)>,

    /// Emitted when an item is modified in place.
    pub data_changed: Signal<usize>,

    /// Emitted after the items were reordered.
    pub layout_changed: Signal<()>,
}

impl Default for ListSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ListSignals {
    /// Creates a new set of list signals.
    pub fn new() -> Self {
        Self {
            list_changed: Signal::new(),
            rows_inserted: Signal::new(),
            rows_removed: Signal::new(),
            data_changed: Signal::new(),
            layout_changed: Signal::new(),
        }
    }

    fn dispatch(&self, notification: Notification) {
        match notification {
            Notification::Structure(ListChange::Splice {
                position,
                removed,
                inserted,
            }) => {
                tracing::trace!(
                    target: targets::LIST_MODEL,
                    position,
                    removed,
                    inserted,
                    "list spliced"
                );

                self.list_changed.emit(ListChange::Splice {
                    position,
                    removed,
                    inserted,
                });
                if removed > 0 {
                    self.rows_removed.emit((position, position + removed - 1));
                }
                if inserted > 0 {
                    self.rows_inserted.emit((position, position + inserted - 1));
                }
            }
            Notification::Structure(permuted @ ListChange::Permuted { .. }) => {
                tracing::trace!(target: targets::LIST_MODEL, "list reordered");

                self.list_changed.emit(permuted);
                self.layout_changed.emit(());
            }
            Notification::DataChanged(index) => self.data_changed.emit(index),
        }
    }
}

/// A change waiting to be announced.
enum Notification {
    Structure(ListChange),
    DataChanged(usize),
}

/// Changes applied to the list but not yet announced.
///
/// A slot may mutate the list while a change is being announced. The nested
/// change is queued behind the current one instead of being announced
/// immediately, so every observer sees changes in the order they were
/// applied.
#[derive(Default)]
struct Outbox {
    queue: VecDeque<Notification>,
    flushing: bool,
}

/// Held by the thread announcing queued changes.
struct Flusher<'a>(&'a Mutex<Outbox>);

impl Flusher<'_> {
    /// Pops the next queued change, handing the outbox back once it is empty.
    fn pop(&self) -> Option<Notification> {
        let mut outbox = self.0.lock();
        let next = outbox.queue.pop_front();
        if next.is_none() {
            outbox.flushing = false;
        }
        next
    }
}

impl Drop for Flusher<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.lock().flushing = false;
        }
    }
}

/// An observable ordered list.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use roster::model::ListModel;
///
/// let model = Arc::new(ListModel::new(vec!["Apple", "Banana"]));
///
/// model.signals().rows_inserted.connect(|(first, last)| {
///     println!("rows {first}..={last} inserted");
/// });
///
/// model.push("Cherry");
/// assert_eq!(model.len(), 3);
/// ```
pub struct ListModel<T> {
    items: RwLock<Vec<T>>,
    signals: ListSignals,
    outbox: Mutex<Outbox>,
}

impl<T> Default for ListModel<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> ListModel<T> {
    /// Creates a list model holding `items`.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
            signals: ListSignals::new(),
            outbox: Mutex::new(Outbox::default()),
        }
    }

    /// Creates an empty list model.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns the model's signals.
    pub fn signals(&self) -> &ListSignals {
        &self.signals
    }

    /// Queues a structural change for announcement.
    ///
    /// Called with the items write lock held, so the queue order is the
    /// order in which changes were applied.
    fn enqueue(&self, change: ListChange) {
        if change.is_noop() {
            return;
        }
        self.outbox
            .lock()
            .queue
            .push_back(Notification::Structure(change));
    }

    /// Announces queued changes in order.
    ///
    /// A call made from inside a slot returns at once: its change is already
    /// queued and the outer call announces it after the current one has
    /// reached every observer.
    fn flush(&self) {
        {
            let mut outbox = self.outbox.lock();
            if outbox.flushing {
                return;
            }
            outbox.flushing = true;
        }
        let flusher = Flusher(&self.outbox);
        while let Some(notification) = flusher.pop() {
            self.signals.dispatch(notification);
        }
    }

    /// Returns the number of items in the model.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the model is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns a read guard over the items.
    ///
    /// Do not hold the guard while mutating the model from the same thread.
    pub fn items(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.items.read()
    }

    /// Appends an item to the end of the list.
    pub fn push(&self, item: T) {
        {
            let mut items = self.items.write();
            items.push(item);
            self.enqueue(ListChange::inserted(items.len() - 1, 1));
        }
        self.flush();
    }

    /// Inserts an item at `index`, shifting later items up.
    pub fn insert(&self, index: usize, item: T) -> Result<()> {
        {
            let mut items = self.items.write();
            if index > items.len() {
                return Err(RosterError::out_of_bounds(index, items.len()));
            }
            items.insert(index, item);
            self.enqueue(ListChange::inserted(index, 1));
        }
        self.flush();
        Ok(())
    }

    /// Removes and returns the item at `index`.
    pub fn remove(&self, index: usize) -> Result<T> {
        let removed = {
            let mut items = self.items.write();
            if index >= items.len() {
                return Err(RosterError::out_of_bounds(index, items.len()));
            }
            let removed = items.remove(index);
            self.enqueue(ListChange::removed(index, 1));
            removed
        };
        self.flush();
        Ok(removed)
    }

    /// Removes and returns the items in `range`.
    pub fn remove_range(&self, range: Range<usize>) -> Result<Vec<T>> {
        let removed: Vec<T> = {
            let mut items = self.items.write();
            if range.start > range.end || range.end > items.len() {
                return Err(RosterError::invalid_range(
                    range.start,
                    range.end,
                    items.len(),
                ));
            }
            let removed: Vec<T> = items.drain(range.clone()).collect();
            self.enqueue(ListChange::removed(range.start, removed.len()));
            removed
        };
        self.flush();
        Ok(removed)
    }

    /// Replaces the item at `index`, returning the previous one.
    ///
    /// Replacement is a structural change: observers treat the new item as a
    /// different item, so a selection on `index` is dropped.
    pub fn replace(&self, index: usize, item: T) -> Result<T> {
        let previous = {
            let mut items = self.items.write();
            let len = items.len();
            let slot = items
                .get_mut(index)
                .ok_or(RosterError::out_of_bounds(index, len))?;
            let previous = std::mem::replace(slot, item);
            self.enqueue(ListChange::replaced(index, 1));
            previous
        };
        self.flush();
        Ok(previous)
    }

    /// Replaces all items in the model.
    pub fn set_items(&self, items: Vec<T>) {
        {
            let mut current = self.items.write();
            let new_len = items.len();
            let old_len = std::mem::replace(&mut *current, items).len();
            self.enqueue(ListChange::reset(old_len, new_len));
        }
        self.flush();
    }

    /// Removes all items from the model.
    pub fn clear(&self) {
        self.set_items(Vec::new());
    }

    /// Swaps two items in the list.
    pub fn swap(&self, a: usize, b: usize) -> Result<()> {
        {
            let mut items = self.items.write();
            let len = items.len();
            if let Some(bad) = [a, b].into_iter().find(|&i| i >= len) {
                return Err(RosterError::out_of_bounds(bad, len));
            }
            items.swap(a, b);

            let mut permutation: Vec<usize> = (0..len).collect();
            permutation.swap(a, b);
            self.enqueue(ListChange::Permuted { permutation });
        }
        self.flush();
        Ok(())
    }

    /// Stable-sorts the list using the provided comparator.
    ///
    /// Observers receive the resulting permutation, so a selection follows
    /// its items to their new positions.
    pub fn sort_by<F>(&self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        {
            let mut items = self.items.write();
            let mut indexed: Vec<(usize, T)> = items.drain(..).enumerate().collect();
            indexed.sort_by(|a, b| compare(&a.1, &b.1));

            let mut permutation = vec![0; indexed.len()];
            for (new_index, (old_index, item)) in indexed.into_iter().enumerate() {
                permutation[old_index] = new_index;
                items.push(item);
            }
            self.enqueue(ListChange::Permuted { permutation });
        }
        self.flush();
    }

    /// Provides mutable access to an item via a closure.
    ///
    /// Emits `data_changed` after modification. Returns `None` if `index` is
    /// out of bounds.
    pub fn modify<F, R>(&self, index: usize, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let result = {
            let mut items = self.items.write();
            let result = f(items.get_mut(index)?);
            self.outbox
                .lock()
                .queue
                .push_back(Notification::DataChanged(index));
            result
        };
        self.flush();
        Some(result)
    }
}

impl<T: Clone> ListModel<T> {
    /// Returns a copy of the item at `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.read().get(index).cloned()
    }

    /// Returns a copy of all items.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.read().clone()
    }
}

impl<T> ItemList for ListModel<T>
where
    T: Clone + PartialEq + Send + Sync,
{
    type Item = T;

    fn len(&self) -> usize {
        ListModel::len(self)
    }

    fn item(&self, index: usize) -> Option<T> {
        self.get(index)
    }

    fn position_of(&self, item: &T) -> Option<usize> {
        self.items.read().iter().position(|candidate| candidate == item)
    }

    fn list_changed(&self) -> Option<&Signal<ListChange>> {
        Some(&self.signals.list_changed)
    }
}

static_assertions::assert_impl_all!(ListModel<String>: Send, Sync);
