//! Testing utilities for recipebox
//!
//! Fixture builders for recipes and an in-memory [`MockBackend`] that
//! records every order patch and can be told to fail.
//!
//! Only available when compiled with `cfg(test)`.

use crate::api::{ApiError, JsonSource, RecipeBackend};
use crate::recipe::{Difficulty, Recipe, RecipeDraft, RecipeId};
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use reqwest::Url;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Builder for test recipes
///
/// # Examples
/// ```ignore
/// let soup = RecipeBuilder::new(1, "Tomato Soup")
///     .ingredients(&["Tomato", "Basil"])
///     .tags(&["Soup"])
///     .created_day(3)
///     .build();
/// ```
pub struct RecipeBuilder {
    recipe: Recipe,
}

impl RecipeBuilder {
    pub fn new(id: u64, title: &str) -> Self {
        Self {
            recipe: Recipe {
                id: RecipeId::Number(id),
                title: title.to_string(),
                description: String::new(),
                ingredients: Vec::new(),
                instructions: Vec::new(),
                difficulty: Difficulty::Easy,
                tags: Vec::new(),
                created_at: None,
                updated_at: None,
                last_updated: None,
                order: None,
            },
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.recipe.description = description.to_string();
        self
    }

    pub fn ingredients(mut self, ingredients: &[&str]) -> Self {
        self.recipe.ingredients = ingredients.iter().map(ToString::to_string).collect();
        self
    }

    pub const fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.recipe.difficulty = difficulty;
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.recipe.tags = tags.iter().map(ToString::to_string).collect();
        self
    }

    /// Created `day` days after 2024-01-01
    pub fn created_day(mut self, day: i64) -> Self {
        self.recipe.created_at = Some(day_offset(day));
        self
    }

    /// Last updated `day` days after 2024-01-01
    pub fn updated_day(mut self, day: i64) -> Self {
        self.recipe.last_updated = Some(day_offset(day));
        self
    }

    pub const fn order(mut self, order: i64) -> Self {
        self.recipe.order = Some(order);
        self
    }

    pub fn build(self) -> Recipe {
        self.recipe
    }
}

fn day_offset(day: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(day)
}

/// Minimal recipe with a numeric id
pub fn recipe(id: u64, title: &str) -> Recipe {
    RecipeBuilder::new(id, title).build()
}

/// `n` recipes titled `Recipe 00`, `Recipe 01`, ... with `order` = id = index
pub fn numbered(n: u64) -> Vec<Recipe> {
    (0..n)
        .map(|i| {
            RecipeBuilder::new(i, &format!("Recipe {i:02}"))
                .order(i as i64)
                .build()
        })
        .collect()
}

pub fn titles(recipes: &[Recipe]) -> Vec<&str> {
    recipes.iter().map(|r| r.title.as_str()).collect()
}

pub fn titles_of<'a>(recipes: &[&'a Recipe]) -> Vec<&'a str> {
    recipes.iter().map(|r| r.title.as_str()).collect()
}

/// In-memory recipe backend
///
/// Serves `GET /recipes` (honouring `_limit`) from its records, applies
/// writes to them, and records every order patch in arrival order.
pub struct MockBackend {
    base: Url,
    records: Mutex<Vec<Recipe>>,
    patches: Mutex<Vec<(RecipeId, i64)>>,
    failing_patches: Mutex<HashSet<RecipeId>>,
    fail_requests: AtomicBool,
    next_id: AtomicU64,
}

impl MockBackend {
    pub fn new(records: Vec<Recipe>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|r| match r.id {
                RecipeId::Number(n) => Some(n),
                RecipeId::Text(_) => None,
            })
            .max()
            .map_or(1, |max| max + 1);

        Self {
            base: Url::parse("http://mock.test/recipes").unwrap(),
            records: Mutex::new(records),
            patches: Mutex::new(Vec::new()),
            failing_patches: Mutex::new(HashSet::new()),
            fail_requests: AtomicBool::new(false),
            next_id: AtomicU64::new(next_id),
        }
    }

    /// Make `patch_order` fail with status 500 for this id
    pub fn fail_patch_for(&self, id: RecipeId) {
        self.failing_patches.lock().unwrap().insert(id);
    }

    /// Make every request fail with status 503
    pub fn fail_all(&self) {
        self.fail_requests.store(true, Ordering::SeqCst);
    }

    /// Order patches received so far
    pub fn patches(&self) -> Vec<(RecipeId, i64)> {
        self.patches.lock().unwrap().clone()
    }

    /// Current server-side records
    pub fn records(&self) -> Vec<Recipe> {
        self.records.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), ApiError> {
        if self.fail_requests.load(Ordering::SeqCst) {
            Err(ApiError::HttpStatus { status: 503 })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl JsonSource for MockBackend {
    async fn get_json(&self, url: &Url) -> Result<Value, ApiError> {
        self.check()?;
        if url.path() != self.base.path() {
            return Err(ApiError::HttpStatus { status: 404 });
        }
        let mut records = self.records();
        if let Some((_, limit)) = url.query_pairs().find(|(k, _)| k == "_limit") {
            records.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
            records.truncate(limit.parse().unwrap_or(records.len()));
        }
        Ok(serde_json::to_value(records)?)
    }
}

#[async_trait]
impl RecipeBackend for MockBackend {
    fn recipes_url(&self) -> Url {
        self.base.clone()
    }

    async fn create(&self, draft: &RecipeDraft) -> Result<Recipe, ApiError> {
        self.check()?;
        let now = Utc::now();
        let created = Recipe {
            id: RecipeId::Number(self.next_id.fetch_add(1, Ordering::SeqCst)),
            title: draft.title.clone(),
            description: draft.description.clone(),
            ingredients: draft.ingredients.clone(),
            instructions: draft.instructions.clone(),
            difficulty: draft.difficulty,
            tags: draft.tags.clone(),
            created_at: Some(now),
            updated_at: None,
            last_updated: Some(now),
            order: None,
        };
        self.records.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, recipe: &Recipe) -> Result<Recipe, ApiError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        let slot = records
            .iter_mut()
            .find(|r| r.id == recipe.id)
            .ok_or(ApiError::HttpStatus { status: 404 })?;
        let mut stored = recipe.clone();
        stored.updated_at = Some(Utc::now());
        *slot = stored.clone();
        Ok(stored)
    }

    async fn delete(&self, id: &RecipeId) -> Result<(), ApiError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        let index = records
            .iter()
            .position(|r| &r.id == id)
            .ok_or(ApiError::HttpStatus { status: 404 })?;
        records.remove(index);
        Ok(())
    }

    async fn patch_order(&self, id: &RecipeId, order: i64) -> Result<(), ApiError> {
        self.check()?;
        if self.failing_patches.lock().unwrap().contains(id) {
            return Err(ApiError::HttpStatus { status: 500 });
        }
        self.patches.lock().unwrap().push((id.clone(), order));
        if let Some(stored) = self.records.lock().unwrap().iter_mut().find(|r| &r.id == id) {
            stored.order = Some(order);
        }
        Ok(())
    }
}
