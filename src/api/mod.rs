//! Recipe backend interface
//!
//! The backend is a REST-style collection resource:
//!
//! | call                 | request                                                  |
//! |----------------------|----------------------------------------------------------|
//! | `list`               | `GET /recipes`                                           |
//! | `featured(n)`        | `GET /recipes?_sort=lastUpdated&_order=desc&_limit=n`    |
//! | `create`             | `POST /recipes`                                          |
//! | `update`             | `PUT /recipes/{id}`                                      |
//! | `delete`             | `DELETE /recipes/{id}`                                   |
//! | `patch_order`        | `PATCH /recipes/{id}` with `{"order": n}`                |
//!
//! [`RecipeBackend`] is the seam between the engine and the transport;
//! [`RecipeClient`] is the HTTP implementation.

pub mod client;
pub mod error;

pub use client::RecipeClient;
pub use error::{ApiError, FETCH_FAILED_MESSAGE};

use crate::recipe::{Recipe, RecipeDraft, RecipeId};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

/// Sort parameters of the featured view
pub const FEATURED_SORT: [(&str, &str); 2] = [("_sort", "lastUpdated"), ("_order", "desc")];

/// Anything that can resolve an address to a JSON document
#[async_trait]
pub trait JsonSource: Send + Sync {
    /// GET the address and parse the body as JSON
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or invalid JSON.
    async fn get_json(&self, url: &Url) -> Result<Value, ApiError>;
}

/// Operations the recipe engine needs from its backend
#[async_trait]
pub trait RecipeBackend: JsonSource {
    /// Address of the recipe collection
    fn recipes_url(&self) -> Url;

    /// Address of the `limit` most recently updated recipes
    fn featured_url(&self, limit: usize) -> Url {
        let mut url = self.recipes_url();
        url.query_pairs_mut()
            .extend_pairs(FEATURED_SORT)
            .append_pair("_limit", &limit.to_string());
        url
    }

    /// Fetch every recipe
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the body is not a recipe list.
    async fn list(&self) -> Result<Vec<Recipe>, ApiError> {
        let value = self.get_json(&self.recipes_url()).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch the most recently updated recipes
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the body is not a recipe list.
    async fn featured(&self, limit: usize) -> Result<Vec<Recipe>, ApiError> {
        let value = self.get_json(&self.featured_url(limit)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Create a recipe; returns the stored record including its new id
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    async fn create(&self, draft: &RecipeDraft) -> Result<Recipe, ApiError>;

    /// Replace a recipe; returns the backend's canonical copy
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    async fn update(&self, recipe: &Recipe) -> Result<Recipe, ApiError>;

    /// Delete a recipe
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    async fn delete(&self, id: &RecipeId) -> Result<(), ApiError>;

    /// Persist a new display order for one recipe
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    async fn patch_order(&self, id: &RecipeId, order: i64) -> Result<(), ApiError>;
}
