//! Recipe data model
//!
//! Defines the records the rest of the crate operates on:
//! - `Recipe`: a user-authored record as stored by the backend
//! - `RecipeId`: backend identifier (numeric or textual)
//! - `Difficulty`: easy / medium / hard, with a rank used for sorting
//! - `RecipeDraft`: input for creating a recipe, validated before sending
//! - `RecipeEdit`: partial changes applied to an existing recipe
//!
//! Tags are drawn from a fixed vocabulary, [`AVAILABLE_TAGS`].

pub mod error;

pub use error::RecipeError;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tag vocabulary offered by the recipe forms
pub const AVAILABLE_TAGS: [&str; 12] = [
    "Breakfast",
    "Lunch",
    "Dinner",
    "Dessert",
    "Vegetarian",
    "Vegan",
    "Gluten-free",
    "Snack",
    "Appetizer",
    "Main course",
    "Soup",
    "Salad",
];

/// Resolve a tag to its vocabulary spelling, ignoring case
///
/// # Examples
/// ```
/// use recipebox::recipe::canonical_tag;
///
/// assert_eq!(canonical_tag("main COURSE"), Some("Main course"));
/// assert_eq!(canonical_tag("Brunch"), None);
/// ```
#[must_use]
pub fn canonical_tag(tag: &str) -> Option<&'static str> {
    let tag = tag.trim();
    AVAILABLE_TAGS
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(tag))
}

/// Backend identifier of a recipe
///
/// json-server style backends hand out numbers, others strings. The value is
/// kept in whichever form it arrived so it serializes back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RecipeId {
    fn from(value: &str) -> Self {
        value
            .parse::<u64>()
            .map_or_else(|_| Self::Text(value.to_string()), Self::Number)
    }
}

impl From<u64> for RecipeId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

/// How hard a recipe is to prepare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    #[serde(alias = "Easy")]
    Easy,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "Hard")]
    Hard,
}

impl Difficulty {
    /// All difficulties, easiest first
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Sort rank: easy(1) < medium(2) < hard(3)
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    /// Wire name (`easy`, `medium`, `hard`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RecipeError::UnknownDifficulty(s.to_string()))
    }
}

/// A recipe record as exchanged with the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Set by the create form; drives the featured view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    /// Relative display position; only meaningful against other records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl Recipe {
    /// Creation time used for newest/oldest sorting
    ///
    /// Records posted by older clients only carry `lastUpdated`.
    #[must_use]
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created_at.or(self.last_updated)
    }

    /// True if the tag is attached to this recipe
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Apply an edit, returning the updated copy
    #[must_use]
    pub fn edited(&self, edit: &RecipeEdit) -> Self {
        let mut next = self.clone();
        if let Some(title) = &edit.title {
            next.title.clone_from(title);
        }
        if let Some(description) = &edit.description {
            next.description.clone_from(description);
        }
        if let Some(difficulty) = edit.difficulty {
            next.difficulty = difficulty;
        }
        if let Some(tags) = &edit.tags {
            next.tags.clone_from(tags);
        }
        next
    }
}

/// Input for creating a new recipe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
}

impl RecipeDraft {
    /// Normalize and check the draft
    ///
    /// Blank ingredient, instruction and tag entries are dropped (the form
    /// always carries one empty trailing row), tags are resolved against the
    /// vocabulary and de-duplicated.
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::MissingField` for a blank title or description
    /// and `RecipeError::UnknownTag` for tags outside [`AVAILABLE_TAGS`].
    pub fn validate(self) -> Result<Self, RecipeError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(RecipeError::MissingField("title"));
        }
        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(RecipeError::MissingField("description"));
        }

        Ok(Self {
            title,
            description,
            ingredients: non_blank(self.ingredients),
            instructions: non_blank(self.instructions),
            difficulty: self.difficulty,
            tags: resolve_tags(&self.tags)?,
        })
    }
}

/// Partial changes to an existing recipe, as offered by the edit dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub tags: Option<Vec<String>>,
}

impl RecipeEdit {
    /// True if the edit changes nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.difficulty.is_none()
            && self.tags.is_none()
    }

    /// Normalize and check the edit
    ///
    /// # Errors
    ///
    /// Returns `RecipeError` if a provided title is blank or a tag is unknown.
    pub fn validate(self) -> Result<Self, RecipeError> {
        let title = match self.title {
            Some(t) if t.trim().is_empty() => return Err(RecipeError::MissingField("title")),
            Some(t) => Some(t.trim().to_string()),
            None => None,
        };
        let tags = self.tags.as_deref().map(resolve_tags).transpose()?;

        Ok(Self {
            title,
            description: self.description.map(|d| d.trim().to_string()),
            difficulty: self.difficulty,
            tags,
        })
    }
}

fn non_blank(entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

fn resolve_tags(tags: &[String]) -> Result<Vec<String>, RecipeError> {
    let mut resolved: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags.iter().filter(|t| !t.trim().is_empty()) {
        let known = canonical_tag(tag).ok_or_else(|| RecipeError::UnknownTag(tag.clone()))?;
        if !resolved.iter().any(|t| t == known) {
            resolved.push(known.to_string());
        }
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_id_from_str() {
        assert_eq!(RecipeId::from("42"), RecipeId::Number(42));
        assert_eq!(RecipeId::from("a1b2"), RecipeId::Text("a1b2".to_string()));
    }

    #[test]
    fn test_recipe_id_keeps_wire_form() {
        let numeric: RecipeId = serde_json::from_str("7").unwrap();
        let text: RecipeId = serde_json::from_str("\"7f3a\"").unwrap();
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "7");
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"7f3a\"");
    }

    #[test]
    fn test_difficulty_rank_order() {
        assert!(Difficulty::Easy.rank() < Difficulty::Medium.rank());
        assert!(Difficulty::Medium.rank() < Difficulty::Hard.rank());
    }

    #[test]
    fn test_difficulty_accepts_capitalised_input() {
        let d: Difficulty = serde_json::from_str("\"Medium\"").unwrap();
        assert_eq!(d, Difficulty::Medium);
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_recipe_deserialize_backend_record() {
        let json = r#"{
            "id": 3,
            "title": "Tomato Soup",
            "description": "Warm and simple",
            "ingredients": ["Tomato", "Basil"],
            "instructions": ["Chop", "Simmer"],
            "difficulty": "easy",
            "tags": ["Soup", "Vegan"],
            "createdAt": "2024-03-01T12:00:00.000Z"
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.id, RecipeId::Number(3));
        assert!(recipe.has_tag("Soup"));
        assert!(recipe.created_at.is_some());
        assert_eq!(recipe.order, None);
    }

    #[test]
    fn test_created_falls_back_to_last_updated() {
        let json = r#"{"id": "x", "title": "T", "difficulty": "hard",
            "lastUpdated": "2024-05-01T00:00:00Z"}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.created(), recipe.last_updated);
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let recipe = Recipe {
            id: RecipeId::Number(1),
            title: "T".into(),
            description: String::new(),
            ingredients: vec![],
            instructions: vec![],
            difficulty: Difficulty::Easy,
            tags: vec![],
            created_at: None,
            updated_at: Some(Utc::now()),
            last_updated: None,
            order: Some(4),
        };
        let value = serde_json::to_value(&recipe).unwrap();
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("createdAt").is_none());
        assert_eq!(value["order"], 4);
    }

    #[test]
    fn test_draft_validate_drops_blank_rows() {
        let draft = RecipeDraft {
            title: "  Pancakes ".into(),
            description: "Fluffy".into(),
            ingredients: vec!["Flour".into(), "  ".into(), String::new()],
            instructions: vec!["Mix".into(), String::new()],
            difficulty: Difficulty::Easy,
            tags: vec!["breakfast".into(), String::new(), "Breakfast".into()],
        };
        let draft = draft.validate().unwrap();
        assert_eq!(draft.title, "Pancakes");
        assert_eq!(draft.ingredients, vec!["Flour".to_string()]);
        assert_eq!(draft.instructions, vec!["Mix".to_string()]);
        assert_eq!(draft.tags, vec!["Breakfast".to_string()]);
    }

    #[test]
    fn test_draft_validate_requires_title() {
        let draft = RecipeDraft {
            description: "x".into(),
            ..RecipeDraft::default()
        };
        assert_eq!(draft.validate(), Err(RecipeError::MissingField("title")));
    }

    #[test]
    fn test_draft_validate_rejects_unknown_tag() {
        let draft = RecipeDraft {
            title: "t".into(),
            description: "d".into(),
            tags: vec!["Brunch".into()],
            ..RecipeDraft::default()
        };
        assert_eq!(
            draft.validate(),
            Err(RecipeError::UnknownTag("Brunch".to_string()))
        );
    }

    #[test]
    fn test_edit_applies_only_given_fields() {
        let recipe: Recipe = serde_json::from_str(
            r#"{"id": 1, "title": "Old", "description": "Keep", "difficulty": "easy", "order": 2}"#,
        )
        .unwrap();
        let edit = RecipeEdit {
            title: Some("New".into()),
            difficulty: Some(Difficulty::Hard),
            ..RecipeEdit::default()
        };
        let next = recipe.edited(&edit);
        assert_eq!(next.title, "New");
        assert_eq!(next.description, "Keep");
        assert_eq!(next.difficulty, Difficulty::Hard);
        assert_eq!(next.order, Some(2));
    }

    #[test]
    fn test_edit_validate_blank_title() {
        let edit = RecipeEdit {
            title: Some("   ".into()),
            ..RecipeEdit::default()
        };
        assert!(edit.validate().is_err());
        assert!(RecipeEdit::default().is_empty());
    }
}
