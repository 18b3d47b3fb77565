//! Integration tests for recipebox
//!
//! These tests drive the public API end to end against an in-memory backend:
//! mount a session from a shared address, page through the list, reorder and
//! share.

use async_trait::async_trait;
use recipebox::api::{ApiError, JsonSource, RecipeBackend};
use recipebox::pipeline::{self, PAGE_SIZE};
use recipebox::query::{QueryState, SortKey};
use recipebox::recipe::{Recipe, RecipeDraft, RecipeId};
use recipebox::reorder::{ReorderEngine, ReorderOutcome};
use recipebox::session::RecipeSession;
use recipebox::share::mailto_link;
use recipebox::store::RecipeCollection;
use reqwest::Url;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

/// Backend serving a fixed collection and recording order patches
struct MemoryBackend {
    records: Mutex<Vec<Recipe>>,
    patches: Mutex<Vec<(RecipeId, i64)>>,
    reject_patches: bool,
}

impl MemoryBackend {
    fn new(records: Vec<Recipe>) -> Self {
        Self {
            records: Mutex::new(records),
            patches: Mutex::new(Vec::new()),
            reject_patches: false,
        }
    }

    fn rejecting_patches(records: Vec<Recipe>) -> Self {
        Self {
            reject_patches: true,
            ..Self::new(records)
        }
    }

    fn patched_orders(&self) -> Vec<i64> {
        let mut orders: Vec<i64> = self.patches.lock().unwrap().iter().map(|(_, o)| *o).collect();
        orders.sort_unstable();
        orders
    }
}

#[async_trait]
impl JsonSource for MemoryBackend {
    async fn get_json(&self, _url: &Url) -> Result<Value, ApiError> {
        Ok(serde_json::to_value(&*self.records.lock().unwrap())?)
    }
}

#[async_trait]
impl RecipeBackend for MemoryBackend {
    fn recipes_url(&self) -> Url {
        Url::parse("http://memory.test/recipes").unwrap()
    }

    async fn create(&self, _draft: &RecipeDraft) -> Result<Recipe, ApiError> {
        Err(ApiError::HttpStatus { status: 405 })
    }

    async fn update(&self, recipe: &Recipe) -> Result<Recipe, ApiError> {
        Ok(recipe.clone())
    }

    async fn delete(&self, _id: &RecipeId) -> Result<(), ApiError> {
        Ok(())
    }

    async fn patch_order(&self, id: &RecipeId, order: i64) -> Result<(), ApiError> {
        if self.reject_patches {
            return Err(ApiError::HttpStatus { status: 500 });
        }
        self.patches.lock().unwrap().push((id.clone(), order));
        Ok(())
    }
}

const DIFFICULTIES: [&str; 3] = ["easy", "medium", "hard"];

/// Recipes as the backend sends them; ids 1..=n, one day apart
fn wire_recipes(n: u32) -> Vec<Recipe> {
    let records: Vec<Value> = (1..=n)
        .map(|i| {
            let description = if i % 2 == 0 { "with lentils" } else { "with rice" };
            let difficulty = DIFFICULTIES[(i % 3) as usize];
            let tag = if i % 4 == 0 { "Soup" } else { "Dinner" };
            json!({
                "id": i,
                "title": format!("Dish {i:02}"),
                "description": description,
                "ingredients": ["salt"],
                "instructions": ["cook"],
                "difficulty": difficulty,
                "tags": [tag],
                "createdAt": format!("2024-02-{i:02}T12:00:00Z"),
                "order": i - 1,
            })
        })
        .collect();
    serde_json::from_value(Value::Array(records)).unwrap()
}

fn titles(recipes: &[Recipe]) -> Vec<&str> {
    recipes.iter().map(|r| r.title.as_str()).collect()
}

#[test]
fn test_pipeline_over_wire_records() {
    let recipes = wire_recipes(20);
    let query = QueryState::from_query_str("search=LENTILS&sort=title&page=2");

    let view = pipeline::run(&recipes, &query);

    assert_eq!(view.total_matches, 10);
    assert_eq!(view.total_pages, 2);
    assert_eq!(view.items.len(), 10 - PAGE_SIZE);
    assert_eq!(view.items[0].title, "Dish 20");
}

#[test]
fn test_address_survives_round_trip() {
    let query = QueryState::from_query_str("search=miso%20soup&difficulty=hard&tag=Soup&sort=oldest&page=3");
    let again = QueryState::from_query_str(&query.to_query_string());
    assert_eq!(query, again);
    assert_eq!(again.sort(), SortKey::Oldest);
    assert!(QueryState::from_query_str("").is_default());
}

#[tokio::test]
async fn test_engine_persists_only_affected_range() {
    let backend = MemoryBackend::new(Vec::new());
    let mut collection = RecipeCollection::from_records(wire_recipes(12));
    let mut engine = ReorderEngine::new();

    engine.begin_drag(2, 1).unwrap();
    engine.drop_at(Some(0), collection.len()).unwrap();
    let outcome = engine.commit(&mut collection, &backend).await.unwrap();

    assert!(outcome.is_committed());
    assert_eq!(backend.patched_orders(), vec![9, 10]);
    assert_eq!(&titles(collection.recipes())[9..11], ["Dish 11", "Dish 10"]);
    assert!(engine.is_idle());
}

#[tokio::test]
async fn test_session_mount_reorder_and_share() {
    let backend = Arc::new(MemoryBackend::new(wire_recipes(5)));
    let mut session = RecipeSession::new(Arc::clone(&backend));

    let loaded = session
        .mount("http://recipes.test/?sort=manual")
        .await
        .unwrap();
    assert_eq!(loaded, 5);
    assert_eq!(session.address(), "sort=manual");

    let outcome = session.reorder(4, Some(0)).await.unwrap();
    assert!(matches!(outcome, ReorderOutcome::Committed { .. }));
    assert_eq!(backend.patched_orders(), vec![0, 1, 2, 3, 4]);
    assert_eq!(session.view().items[0].title, "Dish 05");

    session.toggle_selection(RecipeId::from(5));
    let link = session.share_link("Tonight").unwrap();
    assert!(link.starts_with("mailto:?subject=Tonight&body="));
    assert!(link.contains("Dish%2005"));
}

#[tokio::test]
async fn test_session_rolls_back_rejected_reorder() {
    let backend = Arc::new(MemoryBackend::rejecting_patches(wire_recipes(3)));
    let mut session = RecipeSession::new(backend);
    session.mount("sort=manual").await.unwrap();

    let outcome = session.reorder(0, Some(2)).await.unwrap();

    assert!(!outcome.is_committed());
    assert_eq!(
        titles(session.collection().recipes()),
        vec!["Dish 01", "Dish 02", "Dish 03"]
    );
    assert_eq!(session.take_notices().len(), 1);
}

#[test]
fn test_mailto_link_requires_selection() {
    assert!(mailto_link(&[], "Recipes").is_err());
    let recipes = wire_recipes(1);
    let link = mailto_link(&[&recipes[0]], "A B").unwrap();
    assert!(link.starts_with("mailto:?subject=A%20B&body="));
}
