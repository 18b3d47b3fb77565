//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and drives a mounted [`RecipeSession`](crate::session::RecipeSession).
//! Notices raised by the session are printed before returning.

pub mod config;
pub mod list;
pub mod recipe;
pub mod reorder;
pub mod share;

// Re-export execute functions for convenience
pub use self::config::execute as config;
pub use list::{execute as list, featured};
pub use recipe::{create, delete, edit, show};
pub use reorder::execute as reorder;
pub use share::execute as share;

use crate::api::RecipeBackend;
use crate::output;
use crate::recipe::RecipeId;
use crate::session::RecipeSession;
use crate::{RecipeBoxError, Result};

/// Print and drain the session's notices
pub fn flush_notices<B: RecipeBackend + 'static>(session: &mut RecipeSession<B>, quiet: bool) {
    for notice in session.take_notices() {
        output::print_notice(&notice, quiet);
    }
}

/// Resolve a typed id against the loaded collection
///
/// # Errors
///
/// Returns `RecipeBoxError::NotFound` if no loaded recipe has this id.
pub fn resolve_id<B: RecipeBackend + 'static>(
    session: &RecipeSession<B>,
    key: &str,
) -> Result<RecipeId> {
    session
        .collection()
        .find(key.trim())
        .map(|recipe| recipe.id.clone())
        .ok_or_else(|| RecipeBoxError::NotFound(key.to_string()))
}
