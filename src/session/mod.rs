//! Recipe session controller
//!
//! Wires the engine together the way the recipe list view does:
//!
//! 1. `mount` seeds the query state from the address and loads the
//!    collection once through a [`FetchResource`].
//! 2. Every gesture (typing, filtering, paging, editing, dragging,
//!    selecting) goes through a method here.
//! 3. `view` re-runs the pipeline on demand; nothing is cached.
//!
//! Outcomes the web view reported as toasts are collected as [`Notice`]s
//! and logged.

use crate::api::{ApiError, JsonSource, RecipeBackend};
use crate::fetch::FetchResource;
use crate::pipeline::{self, PageView};
use crate::query::debounce::DEFAULT_QUIET_PERIOD;
use crate::query::{Debouncer, DifficultyFilter, QueryState, SortKey, TagFilter};
use crate::recipe::{Recipe, RecipeDraft, RecipeEdit, RecipeId};
use crate::reorder::{ReorderEngine, ReorderOutcome};
use crate::share::{SelectionSet, mailto_link};
use crate::store::RecipeCollection;
use crate::{RecipeBoxError, Result};
use reqwest::Url;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Severity of a [`Notice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A user-facing notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// One user's working session against a recipe backend
pub struct RecipeSession<B> {
    backend: Arc<B>,
    collection: RecipeCollection,
    query: QueryState,
    search: Debouncer<String>,
    search_quiet: Duration,
    selection: SelectionSet,
    engine: ReorderEngine,
    notices: Vec<Notice>,
}

impl<B> RecipeSession<B>
where
    B: RecipeBackend + 'static,
{
    /// Create an unmounted session with the default search quiet period
    #[must_use]
    pub fn new(backend: Arc<B>) -> Self {
        Self::with_quiet_period(backend, DEFAULT_QUIET_PERIOD)
    }

    /// Create an unmounted session with a custom search quiet period
    #[must_use]
    pub fn with_quiet_period(backend: Arc<B>, quiet: Duration) -> Self {
        Self {
            backend,
            collection: RecipeCollection::new(),
            query: QueryState::default(),
            search: Debouncer::new(String::new(), quiet),
            search_quiet: quiet,
            selection: SelectionSet::new(),
            engine: ReorderEngine::new(),
            notices: Vec::new(),
        }
    }

    /// Seed the query from `address` and load the collection
    ///
    /// `address` may be a full address or a bare query string.
    ///
    /// # Errors
    ///
    /// Returns `RecipeBoxError::Fetch` with the generic user message if the
    /// list could not be loaded.
    pub async fn mount(&mut self, address: &str) -> Result<usize> {
        self.query = Url::parse(address).map_or_else(
            |_| QueryState::from_query_str(address),
            |url| QueryState::from_address(&url),
        );
        self.search = Debouncer::new(self.query.search().to_string(), self.search_quiet);

        let records = self.fetch_list(self.backend.recipes_url()).await?;
        self.collection.load(records);
        debug!("mounted with {} recipes", self.collection.len());
        Ok(self.collection.len())
    }

    /// Load the `limit` most recently updated recipes
    ///
    /// The featured list is independent of the session's collection.
    ///
    /// # Errors
    ///
    /// Returns `RecipeBoxError::Fetch` with the generic user message if the
    /// list could not be loaded.
    pub async fn featured(&mut self, limit: usize) -> Result<Vec<Recipe>> {
        self.fetch_list(self.backend.featured_url(limit)).await
    }

    async fn fetch_list(&mut self, url: Url) -> Result<Vec<Recipe>> {
        let source: Arc<dyn JsonSource> = self.backend.clone();
        let mut resource = FetchResource::<Vec<Recipe>>::new(source);
        resource.load(url);
        let state = resource.settled().await;

        if let Some(message) = state.error {
            self.notify(Notice::error(message.clone()));
            return Err(RecipeBoxError::Fetch(message));
        }
        Ok(state.data.unwrap_or_default())
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub const fn collection(&self) -> &RecipeCollection {
        &self.collection
    }

    #[must_use]
    pub const fn query(&self) -> &QueryState {
        &self.query
    }

    /// Current page of the filtered, sorted collection
    #[must_use]
    pub fn view(&self) -> PageView<'_> {
        pipeline::run(self.collection.recipes(), &self.query)
    }

    /// Shareable query string of the current state
    #[must_use]
    pub fn address(&self) -> String {
        self.query.to_query_string()
    }

    /// Record a keystroke in the search box
    pub fn type_search(&mut self, raw: impl Into<String>, now: Instant) {
        self.search.input(raw.into(), now);
    }

    /// Advance the search timer; returns true if a new term was committed
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(term) => {
                self.query.set_search(term.clone());
                true
            }
            None => false,
        }
    }

    /// Commit the pending search term immediately
    pub fn flush_search(&mut self) -> bool {
        match self.search.flush() {
            Some(term) => {
                self.query.set_search(term.clone());
                true
            }
            None => false,
        }
    }

    /// Search text as typed, including uncommitted input
    #[must_use]
    pub fn raw_search(&self) -> &str {
        self.search.raw()
    }

    /// Apply query changes in one step, committing any search immediately
    pub fn apply_query(&mut self, change: impl FnOnce(&mut QueryState)) {
        change(&mut self.query);
        self.search = Debouncer::new(self.query.search().to_string(), self.search_quiet);
    }

    pub fn set_difficulty(&mut self, difficulty: DifficultyFilter) {
        self.query.set_difficulty(difficulty);
    }

    pub fn set_tag(&mut self, tag: TagFilter) {
        self.query.set_tag(tag);
    }

    pub const fn set_sort(&mut self, sort: SortKey) {
        self.query.set_sort(sort);
    }

    pub fn set_page(&mut self, page: usize) {
        self.query.set_page(page);
    }

    /// Validate and create a recipe, appending it to the collection
    ///
    /// # Errors
    ///
    /// Returns `RecipeBoxError::Recipe` for invalid input and
    /// `RecipeBoxError::Api` if the backend rejects the request.
    pub async fn create(&mut self, draft: RecipeDraft) -> Result<Recipe> {
        let draft = self.checked(draft.validate())?;
        let created = self.backend.create(&draft).await;
        let created = self.reported(created, "create recipe")?;

        self.collection.insert(created.clone());
        self.notify(Notice::success("Recipe created successfully!"));
        Ok(created)
    }

    /// Apply an edit and merge the backend's canonical copy
    ///
    /// # Errors
    ///
    /// Returns `RecipeBoxError::NotFound` for an unknown id,
    /// `RecipeBoxError::Recipe` for invalid input and
    /// `RecipeBoxError::Api` if the backend rejects the request.
    pub async fn update(&mut self, id: &RecipeId, edit: RecipeEdit) -> Result<Recipe> {
        let current = self
            .collection
            .get(id)
            .cloned()
            .ok_or_else(|| RecipeBoxError::NotFound(id.to_string()))?;
        let edit = self.checked(edit.validate())?;

        let updated = self.backend.update(&current.edited(&edit)).await;
        let updated = self.reported(updated, "update recipe")?;

        self.collection.merge_updated(updated.clone());
        self.notify(Notice::success("Recipe updated successfully!"));
        Ok(updated)
    }

    /// Delete a recipe on the backend, then locally
    ///
    /// # Errors
    ///
    /// Returns `RecipeBoxError::NotFound` for an unknown id and
    /// `RecipeBoxError::Api` if the backend rejects the request.
    pub async fn delete(&mut self, id: &RecipeId) -> Result<Recipe> {
        if self.collection.get(id).is_none() {
            return Err(RecipeBoxError::NotFound(id.to_string()));
        }
        let deleted = self.backend.delete(id).await;
        self.reported(deleted, "delete recipe")?;

        let removed = self
            .collection
            .remove(id)
            .ok_or_else(|| RecipeBoxError::NotFound(id.to_string()))?;
        self.notify(Notice::success("Recipe deleted successfully!"));
        Ok(removed)
    }

    /// Drag the item at `local_source` on the visible page to
    /// `local_destination` (`None` drops outside any slot)
    ///
    /// # Errors
    ///
    /// Returns `RecipeBoxError::Reorder` if the gesture is rejected. Failed
    /// persistence is not an error: it yields `ReorderOutcome::RolledBack`
    /// and an error notice.
    pub async fn reorder(
        &mut self,
        local_source: usize,
        local_destination: Option<usize>,
    ) -> Result<ReorderOutcome> {
        let page = self.view().page;
        self.engine.begin_drag(page, local_source)?;
        if self
            .engine
            .drop_at(local_destination, self.collection.len())?
            .is_none()
        {
            return Ok(ReorderOutcome::Unchanged);
        }

        let outcome = self
            .engine
            .commit(&mut self.collection, self.backend.as_ref())
            .await?;
        match &outcome {
            ReorderOutcome::Committed { .. } => {
                self.notify(Notice::success("Recipe order updated"));
            }
            ReorderOutcome::RolledBack { failures, .. } => {
                self.notify(Notice::error(format!(
                    "Failed to update recipe order ({} of {} requests failed); the previous order was restored",
                    failures.len(),
                    outcome.requests_sent()
                )));
            }
            ReorderOutcome::Unchanged => {}
        }
        Ok(outcome)
    }

    /// Flip the share selection of a recipe
    pub fn toggle_selection(&mut self, id: RecipeId) -> bool {
        self.selection.toggle(id)
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// `mailto:` link carrying the selected recipes
    ///
    /// # Errors
    ///
    /// Returns `RecipeBoxError::Share` if nothing selected is still present.
    pub fn share_link(&self, subject: &str) -> Result<String> {
        let recipes = self.selection.selected_recipes(&self.collection);
        Ok(mailto_link(&recipes, subject)?)
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain the notices collected so far
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!("{}", notice.message),
            NoticeLevel::Error => warn!("{}", notice.message),
        }
        self.notices.push(notice);
    }

    fn checked<T>(&mut self, result: std::result::Result<T, crate::recipe::RecipeError>) -> Result<T> {
        result.map_err(|e| {
            self.notify(Notice::error(e.to_string()));
            RecipeBoxError::from(e)
        })
    }

    fn reported<T>(&mut self, result: std::result::Result<T, ApiError>, action: &str) -> Result<T> {
        result.map_err(|e| {
            warn!("failed to {action}: {e}");
            self.notify(Notice::error(format!("Failed to {action}. Please try again.")));
            RecipeBoxError::from(e)
        })
    }
}
