//! Commonly used types, for glob import.
//!
//! ```
//! use roster::prelude::*;
//! ```

pub use roster_core::{ConnectionGuard, ConnectionId, Result, RosterError, Signal};

pub use crate::model::{
    ItemList, ItemSelectionModel, ListChange, ListModel, SelectionChange, SelectionMode,
    SelectionModel,
};
