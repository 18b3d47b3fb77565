//! Show, create, edit and delete commands

use super::{flush_notices, resolve_id};
use crate::api::RecipeBackend;
use crate::cli::{CreateArgs, EditArgs};
use crate::output;
use crate::recipe::{RecipeDraft, RecipeEdit};
use crate::session::RecipeSession;
use crate::{RecipeBoxError, Result};
use dialoguer::{Confirm, Input};

/// Print one recipe in full
///
/// # Errors
///
/// Returns `RecipeBoxError::NotFound` if the id is not loaded.
pub fn show<B: RecipeBackend + 'static>(
    session: &RecipeSession<B>,
    key: &str,
    quiet: bool,
) -> Result<()> {
    let id = resolve_id(session, key)?;
    let Some(recipe) = session.collection().get(&id) else {
        return Err(RecipeBoxError::NotFound(key.to_string()));
    };

    if quiet {
        println!("{}", output::recipe_line(recipe, 0, false, true));
    } else {
        println!("{}", output::recipe_detail(recipe));
    }
    Ok(())
}

/// Create a recipe, prompting for a missing title or description
///
/// # Errors
///
/// Returns `RecipeBoxError` if input cannot be read, the draft is invalid or
/// the backend rejects it.
pub async fn create<B: RecipeBackend + 'static>(
    session: &mut RecipeSession<B>,
    fields: CreateArgs,
    quiet: bool,
) -> Result<()> {
    let title = match fields.title {
        Some(title) => title,
        None => prompt("Title")?,
    };
    let description = match fields.description {
        Some(description) => description,
        None => prompt("Description")?,
    };

    let draft = RecipeDraft {
        title,
        description,
        ingredients: fields.ingredients,
        instructions: fields.steps,
        difficulty: fields.difficulty,
        tags: fields.tags,
    };

    let result = session.create(draft).await;
    flush_notices(session, quiet);
    let created = result?;
    if quiet {
        println!("{}", created.id);
    }
    Ok(())
}

/// Apply the given field changes to a recipe
///
/// # Errors
///
/// Returns `RecipeBoxError::InvalidInput` if no field is given, and
/// `RecipeBoxError` if the edit is invalid or the backend rejects it.
pub async fn edit<B: RecipeBackend + 'static>(
    session: &mut RecipeSession<B>,
    key: &str,
    fields: EditArgs,
    quiet: bool,
) -> Result<()> {
    let edit = RecipeEdit {
        title: fields.title,
        description: fields.description,
        difficulty: fields.difficulty,
        tags: fields.tags,
    };
    if edit.is_empty() {
        return Err(RecipeBoxError::InvalidInput(
            "Nothing to change: give --title, --description, --difficulty or --tag".to_string(),
        ));
    }

    let id = resolve_id(session, key)?;
    let result = session.update(&id, edit).await;
    flush_notices(session, quiet);
    result.map(|_| ())
}

/// Delete a recipe after confirmation
///
/// # Errors
///
/// Returns `RecipeBoxError` if the id is unknown, confirmation cannot be
/// read or the backend rejects the request.
pub async fn delete<B: RecipeBackend + 'static>(
    session: &mut RecipeSession<B>,
    key: &str,
    yes: bool,
    quiet: bool,
) -> Result<()> {
    let id = resolve_id(session, key)?;

    if !yes {
        let title = session
            .collection()
            .get(&id)
            .map(|r| r.title.clone())
            .unwrap_or_default();
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete '{title}'?"))
            .default(false)
            .interact()
            .map_err(|e| RecipeBoxError::InvalidInput(format!("Failed to get confirmation: {e}")))?;
        if !confirmed {
            if !quiet {
                println!("Operation cancelled.");
            }
            return Ok(());
        }
    }

    let result = session.delete(&id).await;
    flush_notices(session, quiet);
    result.map(|_| ())
}

fn prompt(label: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(label)
        .interact_text()
        .map_err(|e| RecipeBoxError::InvalidInput(format!("Failed to read input: {e}")))
}
