//! List and featured commands

use super::flush_notices;
use crate::api::RecipeBackend;
use crate::cli::{OutputFormat, QueryArgs};
use crate::output;
use crate::recipe::Recipe;
use crate::session::RecipeSession;
use crate::{RecipeBoxError, Result};
use std::io;

/// Print the page selected by `query`
///
/// # Errors
///
/// Returns `RecipeBoxError` if writing the output fails.
pub fn execute<B: RecipeBackend + 'static>(
    session: &mut RecipeSession<B>,
    query: &QueryArgs,
    format: OutputFormat,
    print_address: bool,
    quiet: bool,
) -> Result<()> {
    session.apply_query(|state| query.apply(state));
    print_page(session, format, quiet)?;

    if print_address {
        let address = session.address();
        if quiet {
            println!("{address}");
        } else {
            println!("Address: ?{address}");
        }
    }
    flush_notices(session, quiet);
    Ok(())
}

/// Print the current page in the requested format
///
/// # Errors
///
/// Returns `RecipeBoxError` if writing the output fails.
pub fn print_page<B: RecipeBackend + 'static>(
    session: &RecipeSession<B>,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let view = session.view();
    match format {
        OutputFormat::Text => {
            for (slot, recipe) in view.items.iter().enumerate() {
                let selected = session.selection().contains(&recipe.id);
                println!("{}", output::recipe_line(recipe, slot, selected, quiet));
            }
            if !quiet {
                println!("{}", output::page_footer(&view));
            }
        }
        OutputFormat::Json => output::write_json(io::stdout().lock(), &view.items)?,
        OutputFormat::Csv => write_csv(&view.items)?,
    }
    Ok(())
}

/// Print the most recently updated recipes
///
/// # Errors
///
/// Returns `RecipeBoxError::Fetch` if the featured list cannot be loaded.
pub async fn featured<B: RecipeBackend + 'static>(
    session: &mut RecipeSession<B>,
    limit: usize,
    quiet: bool,
) -> Result<()> {
    let recipes = match session.featured(limit).await {
        Ok(recipes) => recipes,
        Err(e) => {
            flush_notices(session, quiet);
            return Err(e);
        }
    };

    if !quiet {
        println!("Featured recipes\n");
    }
    for (slot, recipe) in recipes.iter().enumerate() {
        println!("{}", output::recipe_line(recipe, slot, false, quiet));
    }
    Ok(())
}

fn write_csv(recipes: &[&Recipe]) -> Result<()> {
    output::write_csv(io::stdout().lock(), recipes)
        .map_err(|e| RecipeBoxError::IoError(io::Error::other(e)))
}
