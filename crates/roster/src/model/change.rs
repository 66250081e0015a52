//! Change descriptions exchanged between lists, selection models and views.

/// A structural change to an ordered list.
///
/// Lists emit a `ListChange` after the change has been applied. Index
/// trackers such as [`SelectionModel`](super::SelectionModel) use
/// [`remap`](Self::remap) to carry their indices across it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListChange {
    /// `removed` items starting at `position` were replaced by `inserted` new
    /// items at the same position. Plain insertion has `removed == 0`, plain
    /// removal has `inserted == 0`.
    Splice {
        position: usize,
        removed: usize,
        inserted: usize,
    },
    /// Items were reordered without being added or removed. The item that was
    /// at index `i` is now at `permutation[i]`.
    Permuted { permutation: Vec<usize> },
}

impl ListChange {
    /// `count` items were inserted at `position`.
    pub fn inserted(position: usize, count: usize) -> Self {
        Self::Splice {
            position,
            removed: 0,
            inserted: count,
        }
    }

    /// `count` items were removed starting at `position`.
    pub fn removed(position: usize, count: usize) -> Self {
        Self::Splice {
            position,
            removed: count,
            inserted: 0,
        }
    }

    /// `count` items starting at `position` were replaced in place.
    pub fn replaced(position: usize, count: usize) -> Self {
        Self::Splice {
            position,
            removed: count,
            inserted: count,
        }
    }

    /// The whole list was swapped for a new one.
    pub fn reset(old_len: usize, new_len: usize) -> Self {
        Self::Splice {
            position: 0,
            removed: old_len,
            inserted: new_len,
        }
    }

    /// Returns `true` if the change leaves every index where it was.
    pub fn is_noop(&self) -> bool {
        match self {
            Self::Splice {
                removed, inserted, ..
            } => *removed == 0 && *inserted == 0,
            Self::Permuted { permutation } => {
                permutation.iter().enumerate().all(|(old, &new)| old == new)
            }
        }
    }

    /// Maps an index from before the change to its index after the change.
    ///
    /// Returns `None` when the item at `index` no longer exists, either
    /// because it was removed or replaced.
    pub fn remap(&self, index: usize) -> Option<usize> {
        match self {
            Self::Splice {
                position,
                removed,
                inserted,
            } => {
                if index < *position {
                    Some(index)
                } else if index < position + removed {
                    None
                } else {
                    Some(index - removed + inserted)
                }
            }
            Self::Permuted { permutation } => permutation.get(index).copied(),
        }
    }
}

/// Indices that entered or left a selection in one operation.
///
/// Both lists are ascending. Indices dropped by a structural list change are
/// reported in the coordinates the list had before that change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionChange {
    /// Newly selected indices.
    pub added: Vec<usize>,
    /// Newly deselected indices.
    pub removed: Vec<usize>,
}

impl SelectionChange {
    /// Returns `true` if nothing was added or removed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remap_insertion() {
        let change = ListChange::inserted(2, 3);
        assert_eq!(change.remap(0), Some(0));
        assert_eq!(change.remap(1), Some(1));
        assert_eq!(change.remap(2), Some(5));
        assert_eq!(change.remap(7), Some(10));
    }

    #[test]
    fn test_remap_removal() {
        let change = ListChange::removed(1, 2);
        assert_eq!(change.remap(0), Some(0));
        assert_eq!(change.remap(1), None);
        assert_eq!(change.remap(2), None);
        assert_eq!(change.remap(3), Some(1));
    }

    #[test]
    fn test_remap_replacement_drops_replaced() {
        let change = ListChange::replaced(4, 1);
        assert_eq!(change.remap(3), Some(3));
        assert_eq!(change.remap(4), None);
        assert_eq!(change.remap(5), Some(5));
    }

    #[test]
    fn test_remap_uneven_splice() {
        // Two items at 1..3 replaced by five.
        let change = ListChange::Splice {
            position: 1,
            removed: 2,
            inserted: 5,
        };
        assert_eq!(change.remap(0), Some(0));
        assert_eq!(change.remap(2), None);
        assert_eq!(change.remap(3), Some(6));
    }

    #[test]
    fn test_remap_permutation() {
        let change = ListChange::Permuted {
            permutation: vec![2, 0, 1],
        };
        assert_eq!(change.remap(0), Some(2));
        assert_eq!(change.remap(1), Some(0));
        assert_eq!(change.remap(2), Some(1));
        assert_eq!(change.remap(3), None);
    }

    #[test]
    fn test_is_noop() {
        assert!(ListChange::inserted(3, 0).is_noop());
        assert!(!ListChange::removed(0, 1).is_noop());
        assert!(ListChange::Permuted {
            permutation: vec![0, 1, 2]
        }
        .is_noop());
        assert!(!ListChange::Permuted {
            permutation: vec![1, 0]
        }
        .is_noop());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_list_change() {
        let change = ListChange::removed(2, 1);
        let json = serde_json::to_string(&change).unwrap();
        let back: ListChange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, change);
    }
}
