//! Move command - drag one recipe to another slot on the visible page

use super::flush_notices;
use super::list::print_page;
use crate::api::RecipeBackend;
use crate::cli::{OutputFormat, QueryArgs};
use crate::query::{DifficultyFilter, QueryState, SortKey, TagFilter};
use crate::reorder::ReorderOutcome;
use crate::session::RecipeSession;
use crate::{RecipeBoxError, Result};
use colored::Colorize;

/// True if the visible page lists recipes in collection order
///
/// Slots map into the full collection as `(page - 1) * 9 + slot`, so they
/// only name the recipes `list` prints under manual sort with no filters.
#[must_use]
pub fn shows_collection_order(query: &QueryState) -> bool {
    query.sort() == SortKey::Manual
        && query.search().is_empty()
        && query.difficulty() == DifficultyFilter::All
        && query.tag() == &TagFilter::All
}

/// Move the recipe at slot `from` to slot `to` and persist the new order
///
/// Slots are collection positions on the page selected by `query`. Without
/// `--sort` or `--address` the sort defaults to manual, which makes them
/// the slots `list --sort manual` prints. Any other sort or a filter gets a
/// warning, since the slots then differ from what `list` shows. The page is
/// printed again once the move has settled.
///
/// # Errors
///
/// Returns `RecipeBoxError::Reorder` if a slot is off the page and
/// `RecipeBoxError::Api` if the move was rolled back.
pub async fn execute<B: RecipeBackend + 'static>(
    session: &mut RecipeSession<B>,
    from: usize,
    to: usize,
    query: &QueryArgs,
    quiet: bool,
) -> Result<()> {
    session.apply_query(|state| {
        if query.sort.is_none() && query.address.is_none() {
            state.set_sort(SortKey::Manual);
        }
        query.apply(state);
    });
    if !quiet && !shows_collection_order(session.query()) {
        eprintln!(
            "{} Slots refer to collection order; use `list --sort manual` without filters to see them",
            "⚠".yellow()
        );
    }

    let on_page = session.view().items.len();
    if from >= on_page || to >= on_page {
        return Err(RecipeBoxError::InvalidInput(format!(
            "Slots must be between 0 and {} on this page",
            on_page.saturating_sub(1)
        )));
    }

    let outcome = session.reorder(from, Some(to)).await;
    flush_notices(session, quiet);

    match outcome? {
        ReorderOutcome::Committed { changes } => {
            if !quiet {
                println!("{} recipe(s) renumbered\n", changes.len());
                print_page(session, OutputFormat::Text, quiet)?;
            }
            Ok(())
        }
        ReorderOutcome::RolledBack { mut failures, .. } => {
            if failures.is_empty() {
                return Ok(());
            }
            let (_, error) = failures.swap_remove(0);
            Err(RecipeBoxError::Api(error))
        }
        ReorderOutcome::Unchanged => {
            if !quiet {
                println!("Nothing to move.");
            }
            Ok(())
        }
    }
}
