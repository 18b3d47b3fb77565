//! Recipe validation error types
//!
//! Errors raised while turning user input (CLI flags, address parameters,
//! form drafts) into well-formed recipe values.

use thiserror::Error;

/// Recipe-specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecipeError {
    /// A required field is blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Tag is not part of the recipe tag vocabulary
    #[error("Unknown tag '{0}'")]
    UnknownTag(String),

    /// Difficulty is not one of easy, medium or hard
    #[error("Unknown difficulty '{0}' (expected easy, medium or hard)")]
    UnknownDifficulty(String),

    /// Sort key is not recognised
    #[error("Unknown sort key '{0}' (expected newest, oldest, title, difficulty or manual)")]
    UnknownSortKey(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
