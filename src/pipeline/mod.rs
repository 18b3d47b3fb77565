//! Filter → sort → paginate
//!
//! Turns the full collection plus the current [`QueryState`] into the page
//! the user sees. The pipeline is a pure function: it borrows its inputs,
//! holds no cache, and returns a fresh [`PageView`] on every call, so a
//! repeated call with the same inputs yields the same page.
//!
//! ```text
//! collection ──filter──▶ matches ──stable sort──▶ ordered ──slice──▶ page
//! ```

pub mod filter;
pub mod sort;

pub use filter::{RecipeFilterExt, SearchTerm, matches};
pub use sort::{locale_cmp, sort_recipes};

use crate::query::QueryState;
use crate::recipe::Recipe;

/// Number of recipes per page
pub const PAGE_SIZE: usize = 9;

/// One page of the filtered, sorted recipe list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<'a> {
    /// Recipes on this page, in display order
    pub items: Vec<&'a Recipe>,
    /// Page actually shown (1-based, clamped into range)
    pub page: usize,
    /// `ceil(total_matches / PAGE_SIZE)`; zero when nothing matches
    pub total_pages: usize,
    /// Number of recipes passing the filters
    pub total_matches: usize,
}

impl PageView<'_> {
    /// True if a later page exists
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// True if an earlier page exists
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Index into the filtered list of the first item on this page
    #[must_use]
    pub const fn offset(&self) -> usize {
        (self.page - 1) * PAGE_SIZE
    }
}

/// Number of pages needed for `count` matches
#[must_use]
pub const fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// Slice one page out of an ordered list
///
/// A page beyond the last one is clamped to the last page; with no items
/// the result is an empty page 1.
#[must_use]
pub fn paginate<'a>(ordered: Vec<&'a Recipe>, page: usize) -> PageView<'a> {
    let total_matches = ordered.len();
    let total_pages = total_pages(total_matches);
    let page = page.clamp(1, total_pages.max(1));

    let start = (page - 1) * PAGE_SIZE;
    let items = ordered.into_iter().skip(start).take(PAGE_SIZE).collect();

    PageView {
        items,
        page,
        total_pages,
        total_matches,
    }
}

/// Run the full pipeline
///
/// # Examples
/// ```
/// use recipebox::pipeline::run;
/// use recipebox::query::QueryState;
///
/// let view = run(&[], &QueryState::default());
/// assert_eq!(view.total_pages, 0);
/// assert!(view.items.is_empty());
/// ```
#[must_use]
pub fn run<'a>(recipes: &'a [Recipe], query: &QueryState) -> PageView<'a> {
    let mut visible = recipes.iter().matching(query);
    sort_recipes(&mut visible, query.sort());
    paginate(visible, query.page())
}
