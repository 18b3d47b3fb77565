//! Search, filter, sort and page selection
//!
//! [`QueryState`] is the user's current view selection. It is mirrored to a
//! shareable address (see [`address`]) and fed to the list pipeline.
//!
//! The setters enforce one rule: any change to what is *matched* (search
//! term, difficulty filter, tag filter) sends the user back to page 1, while
//! a change to how matches are *ordered* keeps the current page.

pub mod address;
pub mod debounce;

pub use debounce::Debouncer;

use crate::recipe::{Difficulty, Recipe, RecipeError, canonical_tag};
use std::fmt;
use std::str::FromStr;

/// Difficulty restriction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    /// True if the recipe passes this filter
    #[must_use]
    pub fn accepts(self, recipe: &Recipe) -> bool {
        match self {
            Self::All => true,
            Self::Only(d) => recipe.difficulty == d,
        }
    }
}

impl fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(d) => write!(f, "{d}"),
        }
    }
}

impl FromStr for DifficultyFilter {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

/// Tag restriction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagFilter {
    #[default]
    All,
    Only(String),
}

impl TagFilter {
    /// True if the recipe passes this filter
    #[must_use]
    pub fn accepts(&self, recipe: &Recipe) -> bool {
        match self {
            Self::All => true,
            Self::Only(tag) => recipe.has_tag(tag),
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(tag) => f.write_str(tag),
        }
    }
}

impl FromStr for TagFilter {
    type Err = RecipeError;

    /// Parse a tag filter
    ///
    /// Known tags are normalised to their vocabulary spelling. Unknown tags
    /// are kept verbatim so shared addresses survive vocabulary changes;
    /// they simply match nothing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RecipeError::UnknownTag(s.to_string()));
        }
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        Ok(Self::Only(
            canonical_tag(s).map_or_else(|| s.to_string(), str::to_string),
        ))
    }
}

/// Ordering applied to the filtered recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Creation time, most recent first
    #[default]
    Newest,
    /// Creation time, oldest first
    Oldest,
    /// Title, locale-aware ascending
    Title,
    /// Difficulty rank, easy first
    Difficulty,
    /// Stored display order (the result of drag-reordering)
    Manual,
}

impl SortKey {
    /// All sort keys in menu order
    pub const ALL: [Self; 5] = [
        Self::Newest,
        Self::Oldest,
        Self::Title,
        Self::Difficulty,
        Self::Manual,
    ];

    /// Wire name used in addresses and on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Title => "title",
            Self::Difficulty => "difficulty",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RecipeError::UnknownSortKey(s.to_string()))
    }
}

/// Current search/filter/sort/page selection
///
/// Fields are private so the page-reset rule cannot be bypassed.
///
/// # Examples
/// ```
/// use recipebox::query::{QueryState, SortKey};
///
/// let mut query = QueryState::default();
/// query.set_page(3);
/// query.set_sort(SortKey::Title);
/// assert_eq!(query.page(), 3);
///
/// query.set_search("soup");
/// assert_eq!(query.page(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    search: String,
    difficulty: DifficultyFilter,
    tag: TagFilter,
    sort: SortKey,
    page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search: String::new(),
            difficulty: DifficultyFilter::All,
            tag: TagFilter::All,
            sort: SortKey::Newest,
            page: 1,
        }
    }
}

impl QueryState {
    /// Create the default selection (everything, newest first, page 1)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style constructor used when every field is known up front
    ///
    /// No reset rule applies here: the page is taken as given.
    #[must_use]
    pub fn with(
        search: impl Into<String>,
        difficulty: DifficultyFilter,
        tag: TagFilter,
        sort: SortKey,
        page: usize,
    ) -> Self {
        Self {
            search: search.into(),
            difficulty,
            tag,
            sort,
            page: page.max(1),
        }
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub const fn difficulty(&self) -> DifficultyFilter {
        self.difficulty
    }

    #[must_use]
    pub const fn tag(&self) -> &TagFilter {
        &self.tag
    }

    #[must_use]
    pub const fn sort(&self) -> SortKey {
        self.sort
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Set the committed search term; resets the page if it changed
    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search != self.search {
            self.search = search;
            self.page = 1;
        }
    }

    /// Set the difficulty filter; resets the page if it changed
    pub fn set_difficulty(&mut self, difficulty: DifficultyFilter) {
        if difficulty != self.difficulty {
            self.difficulty = difficulty;
            self.page = 1;
        }
    }

    /// Set the tag filter; resets the page if it changed
    pub fn set_tag(&mut self, tag: TagFilter) {
        if tag != self.tag {
            self.tag = tag;
            self.page = 1;
        }
    }

    /// Set the sort key; the page is kept
    pub const fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Set the page (1-based, clamped to at least 1)
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// True if every field has its default value
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
