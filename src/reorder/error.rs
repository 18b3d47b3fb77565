//! Reorder gesture error types

use thiserror::Error;

/// Errors raised while driving a reorder gesture
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReorderError {
    /// A previous gesture has not returned to idle yet
    #[error("A reorder is already in progress")]
    Busy,

    /// Drop requested without a drag in progress
    #[error("No drag in progress")]
    NotDragging,

    /// Index does not map into the collection
    #[error("Position {index} is out of range (collection has {len} recipes)")]
    OutOfRange { index: usize, len: usize },

    /// Page and slot do not map to any collection position
    #[error("Slot {local} on page {page} is beyond any collection position")]
    Unaddressable { page: usize, local: usize },
}
