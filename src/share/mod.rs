//! Recipe selection and share-by-email
//!
//! A [`SelectionSet`] holds the ids marked for sharing. It is never cleared
//! implicitly: ids stay selected while filtered out of view, and ids of
//! deleted recipes are skipped when the selection is resolved.
//!
//! Sharing is purely local. The selected records are serialized as
//! pretty-printed JSON into the body of a `mailto:` link, which is then
//! handed to the desktop mail client or copied to the clipboard.

use crate::recipe::{Recipe, RecipeId};
use crate::store::RecipeCollection;
use reqwest::Url;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

/// Errors delivering a share link
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Nothing selected to share")]
    EmptySelection,

    #[error("Failed to serialize recipes: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid share link: {0}")]
    Link(String),

    #[error("Failed to open mail client: {0}")]
    Open(#[from] std::io::Error),

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}

/// Ids of the recipes marked for sharing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<RecipeId>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the selection of `id`; returns true if it is now selected
    pub fn toggle(&mut self, id: RecipeId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: &RecipeId) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecipeId> {
        self.ids.iter()
    }

    /// Selected recipes still present in the collection, in display order
    #[must_use]
    pub fn selected_recipes<'a>(&self, collection: &'a RecipeCollection) -> Vec<&'a Recipe> {
        collection
            .recipes()
            .iter()
            .filter(|recipe| self.contains(&recipe.id))
            .collect()
    }
}

impl FromIterator<RecipeId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = RecipeId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Build a `mailto:` link whose body is the recipes as pretty JSON
///
/// # Errors
///
/// Returns `ShareError::EmptySelection` when `recipes` is empty.
///
/// # Examples
/// ```
/// use recipebox::share::mailto_link;
///
/// assert!(mailto_link(&[], "Recipes").is_err());
/// ```
pub fn mailto_link(recipes: &[&Recipe], subject: &str) -> Result<String, ShareError> {
    if recipes.is_empty() {
        return Err(ShareError::EmptySelection);
    }
    let body = serde_json::to_string_pretty(recipes)?;

    // Form encoding writes spaces as '+', which mail clients show verbatim
    let mut scratch = Url::parse("mailto:").map_err(|e| ShareError::Link(e.to_string()))?;
    scratch
        .query_pairs_mut()
        .append_pair("subject", subject)
        .append_pair("body", &body);
    let query = scratch.query().unwrap_or_default().replace('+', "%20");

    debug!("share link for {} recipes ({} bytes)", recipes.len(), query.len());
    Ok(format!("mailto:?{query}"))
}

/// Hand the link to the system's default mail client
///
/// # Errors
///
/// Returns `ShareError::Open` if no handler could be launched.
pub fn open_link(link: &str) -> Result<(), ShareError> {
    open::that(link)?;
    Ok(())
}

/// Copy the link to the system clipboard
///
/// # Errors
///
/// Returns `ShareError::Clipboard` if the clipboard is unavailable.
pub fn copy_link(link: &str) -> Result<(), ShareError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| ShareError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(link)
        .map_err(|e| ShareError::Clipboard(e.to_string()))
}
