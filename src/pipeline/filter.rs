//! Recipe matching
//!
//! A recipe is visible when all three conditions hold:
//! - the search term occurs (case-insensitively) in the title, the
//!   description or any ingredient; an empty term matches everything
//! - the difficulty filter is `all` or equals the recipe's difficulty
//! - the tag filter is `all` or is one of the recipe's tags

use crate::query::QueryState;
use crate::recipe::Recipe;

/// Case-insensitive search needle, lower-cased once per pipeline run
#[derive(Debug, Clone)]
pub struct SearchTerm(String);

impl SearchTerm {
    #[must_use]
    pub fn new(term: &str) -> Self {
        Self(term.to_lowercase())
    }

    /// True if the term occurs in any searchable field of the recipe
    #[must_use]
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if self.0.is_empty() {
            return true;
        }
        self.contained_in(&recipe.title)
            || self.contained_in(&recipe.description)
            || recipe.ingredients.iter().any(|i| self.contained_in(i))
    }

    fn contained_in(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.0)
    }
}

/// True if the recipe passes every filter of the query
#[must_use]
pub fn matches(recipe: &Recipe, query: &QueryState) -> bool {
    SearchTerm::new(query.search()).matches(recipe)
        && query.difficulty().accepts(recipe)
        && query.tag().accepts(recipe)
}

/// Extension trait adding query filtering to recipe iterators
pub trait RecipeFilterExt<'a>: Iterator<Item = &'a Recipe> + Sized {
    /// Keep the recipes matching the query, preserving their order
    fn matching(self, query: &QueryState) -> Vec<&'a Recipe> {
        let term = SearchTerm::new(query.search());
        self.filter(|r| {
            term.matches(r) && query.difficulty().accepts(r) && query.tag().accepts(r)
        })
        .collect()
    }
}

impl<'a, I> RecipeFilterExt<'a> for I where I: Iterator<Item = &'a Recipe> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{DifficultyFilter, SortKey, TagFilter};
    use crate::recipe::Difficulty;
    use crate::testing::RecipeBuilder;

    fn tomato_soup() -> Recipe {
        RecipeBuilder::new(1, "Tomato Soup")
            .ingredients(&["Tomato", "Basil"])
            .difficulty(Difficulty::Easy)
            .tags(&["Soup", "Vegan"])
            .build()
    }

    fn search(term: &str) -> QueryState {
        QueryState::with(term, DifficultyFilter::All, TagFilter::All, SortKey::Newest, 1)
    }

    #[test]
    fn test_search_matches_ingredient_case_insensitively() {
        assert!(matches(&tomato_soup(), &search("basil")));
        assert!(matches(&tomato_soup(), &search("BASIL")));
        assert!(!matches(&tomato_soup(), &search("pepper")));
    }

    #[test]
    fn test_search_matches_title_and_description() {
        let recipe = RecipeBuilder::new(2, "Pancakes")
            .description("Fluffy breakfast stack")
            .build();
        assert!(matches(&recipe, &search("cake")));
        assert!(matches(&recipe, &search("fluffy")));
    }

    #[test]
    fn test_empty_search_matches_all() {
        assert!(matches(&tomato_soup(), &search("")));
    }

    #[test]
    fn test_difficulty_filter() {
        let mut query = search("");
        query.set_difficulty(DifficultyFilter::Only(Difficulty::Hard));
        assert!(!matches(&tomato_soup(), &query));
        query.set_difficulty(DifficultyFilter::Only(Difficulty::Easy));
        assert!(matches(&tomato_soup(), &query));
    }

    #[test]
    fn test_tag_filter_requires_membership() {
        let mut query = search("");
        query.set_tag(TagFilter::Only("Vegan".into()));
        assert!(matches(&tomato_soup(), &query));
        query.set_tag(TagFilter::Only("Dessert".into()));
        assert!(!matches(&tomato_soup(), &query));
    }

    #[test]
    fn test_all_conditions_combined() {
        let mut query = search("tomato");
        query.set_tag(TagFilter::Only("Soup".into()));
        query.set_difficulty(DifficultyFilter::Only(Difficulty::Medium));
        assert!(!matches(&tomato_soup(), &query));
    }

    #[test]
    fn test_filter_ext_preserves_order() {
        let recipes = vec![
            RecipeBuilder::new(1, "Basil Pesto").build(),
            RecipeBuilder::new(2, "Brownies").build(),
            tomato_soup(),
        ];
        let visible = recipes.iter().matching(&search("basil"));
        let titles: Vec<&str> = visible.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Basil Pesto", "Tomato Soup"]);
    }
}
