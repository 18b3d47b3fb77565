//! Recipebox - a recipe list engine with optimistic reordering
//!
//! This library keeps a session-local copy of a REST recipe collection and
//! derives the visible page from it: filter, stable sort, paginate. Query
//! state round-trips through a shareable address, search input is debounced,
//! and drag reorders are applied optimistically and persisted for the
//! affected range only, with rollback when persisting fails.

use thiserror::Error;

pub mod api;
pub mod cli;
pub mod commands;
pub mod completions;
pub mod config;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod query;
pub mod recipe;
pub mod reorder;
pub mod session;
pub mod share;
pub mod store;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum RecipeBoxError {
    /// Backend request failed
    #[error("Request failed: {0}")]
    Api(#[from] api::ApiError),
    /// Recipe input was rejected
    #[error("Invalid recipe: {0}")]
    Recipe(#[from] recipe::RecipeError),
    /// Reorder gesture was rejected
    #[error("Reorder failed: {0}")]
    Reorder(#[from] reorder::ReorderError),
    /// Share link could not be built or delivered
    #[error("Share failed: {0}")]
    Share(#[from] share::ShareError),
    /// Initial load failed; carries the user-facing message
    #[error("{0}")]
    Fetch(String),
    /// No recipe with this id
    #[error("Recipe '{0}' not found")]
    NotFound(String),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl RecipeBoxError {
    /// Text suitable for a user-facing notice
    ///
    /// Backend failures collapse to the generic fetch message; the detail
    /// is only logged.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.user_message().to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecipeBoxError>;
