//! HTTP client for the recipe backend
//!
//! Talks JSON to a json-server style REST API rooted at the configured
//! `api_url`. Non-2xx answers become `ApiError::HttpStatus`; nothing is
//! retried.

use super::{ApiError, JsonSource, RecipeBackend};
use crate::recipe::{Recipe, RecipeDraft, RecipeId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{CONTENT_TYPE, HeaderValue, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Serialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

/// Default HTTP request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT_VALUE: &str = concat!("recipebox/", env!("CARGO_PKG_VERSION"));

/// Body of `POST /recipes`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewRecipeBody<'a> {
    #[serde(flatten)]
    draft: &'a RecipeDraft,
    created_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
}

/// reqwest-backed [`RecipeBackend`]
#[derive(Debug, Clone)]
pub struct RecipeClient {
    client: Client,
    recipes_url: Url,
}

impl RecipeClient {
    /// Create a client for the API rooted at `api_url`
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if `api_url` is not an absolute
    /// http(s) address, or `ApiError::Network` if the HTTP client cannot be
    /// built.
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let recipes_url = collection_url(api_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            recipes_url,
        })
    }

    fn item_url(&self, id: &RecipeId) -> Result<Url, ApiError> {
        let mut url = self.recipes_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.recipes_url.to_string()))?
            .push(&id.to_string());
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url());
        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

/// `{api_url}/recipes`, tolerating a trailing slash on `api_url`
fn collection_url(api_url: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(api_url.trim()).map_err(|e| ApiError::InvalidUrl(format!("{api_url}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidUrl(format!(
            "{api_url}: unsupported scheme '{}'",
            url.scheme()
        )));
    }
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|()| ApiError::InvalidUrl(api_url.to_string()))?
        .pop_if_empty()
        .push("recipes");
    Ok(url)
}

#[async_trait]
impl JsonSource for RecipeClient {
    async fn get_json(&self, url: &Url) -> Result<Value, ApiError> {
        debug!("GET {url}");
        let response = self.send(self.client.get(url.clone())).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl RecipeBackend for RecipeClient {
    fn recipes_url(&self) -> Url {
        self.recipes_url.clone()
    }

    async fn create(&self, draft: &RecipeDraft) -> Result<Recipe, ApiError> {
        let now = Utc::now();
        let body = NewRecipeBody {
            draft,
            created_at: now,
            last_updated: now,
        };
        debug!("POST {}", self.recipes_url);
        let response = self
            .send(self.client.post(self.recipes_url.clone()).json(&body))
            .await?;
        Ok(response.json().await?)
    }

    async fn update(&self, recipe: &Recipe) -> Result<Recipe, ApiError> {
        let url = self.item_url(&recipe.id)?;
        let mut body = recipe.clone();
        body.updated_at = Some(Utc::now());
        debug!("PUT {url}");
        let response = self.send(self.client.put(url).json(&body)).await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, id: &RecipeId) -> Result<(), ApiError> {
        let url = self.item_url(id)?;
        debug!("DELETE {url}");
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn patch_order(&self, id: &RecipeId, order: i64) -> Result<(), ApiError> {
        let url = self.item_url(id)?;
        debug!("PATCH {url} order={order}");
        self.send(self.client.patch(url).json(&json!({ "order": order })))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_url_appends_recipes() {
        let url = collection_url("http://localhost:3001").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/recipes");

        let url = collection_url("http://localhost:3001/api/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/api/recipes");
    }

    #[test]
    fn test_collection_url_rejects_bad_input() {
        assert!(matches!(
            collection_url("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            collection_url("ftp://example.com"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_item_url_escapes_id() {
        let client = RecipeClient::new("http://localhost:3001", DEFAULT_TIMEOUT).unwrap();
        let url = client.item_url(&RecipeId::Number(12)).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/recipes/12");

        let url = client.item_url(&RecipeId::Text("a/b".into())).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/recipes/a%2Fb");
    }

    #[test]
    fn test_featured_url() {
        let client = RecipeClient::new("http://localhost:3001", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            client.featured_url(3).as_str(),
            "http://localhost:3001/recipes?_sort=lastUpdated&_order=desc&_limit=3"
        );
    }

    #[test]
    fn test_new_recipe_body_shape() {
        let draft = RecipeDraft {
            title: "Soup".into(),
            description: "Hot".into(),
            ..RecipeDraft::default()
        };
        let now = Utc::now();
        let body = NewRecipeBody {
            draft: &draft,
            created_at: now,
            last_updated: now,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["title"], "Soup");
        assert_eq!(value["difficulty"], "easy");
        assert!(value.get("lastUpdated").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("id").is_none());
    }
}
