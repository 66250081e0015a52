//! Model layer for Roster.
//!
//! This module separates the data (an ordered list of items) from the state
//! that views keep about it (which items are selected). Both sides talk
//! through signals, so a selection stays valid while the list changes.
//!
//! # Core Types
//!
//! - `ListModel`: Observable ordered list that announces structural changes
//! - `ItemList`: Read access to any ordered list
//! - `ListChange`: Description of an insertion, removal, replacement or reordering
//! - `SelectionModel`: Tracks selected indices and remaps them on `ListChange`
//! - `ItemSelectionModel`: The selection operation set
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐  list_changed  ┌────────────────┐  selection_changed  ┌──────┐
//! │  ListModel  │───────────────>│ SelectionModel │────────────────────>│ View │
//! │ (ItemList)  │<───────────────│                │                     │      │
//! └─────────────┘   item reads   └────────────────┘                     └──────┘
//! ```

mod change;
mod list_model;
pub mod selection;
mod traits;

pub use change::{ListChange, SelectionChange};
pub use list_model::{ListModel, ListSignals};
pub use selection::{SelectionMode, SelectionModel, SelectionModelBuilder};
pub use traits::{ItemList, ItemSelectionModel};
