//! Roster - selection tracking for observable ordered lists.
//!
//! This is the main crate; it re-exports the core systems from `roster-core`
//! and adds the model layer.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use roster::prelude::*;
//!
//! let list = Arc::new(ListModel::new(vec!["a", "b", "c"]));
//! let selection = SelectionModel::new(list.clone());
//!
//! selection.select(1);
//! selection.select_next();
//! assert_eq!(selection.selected_indices(), vec![1, 2]);
//! ```

pub use roster_core::*;

pub mod model;
pub mod prelude;
