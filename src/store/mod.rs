//! In-memory recipe collection
//!
//! The collection is the session's source of truth. It keeps recipes in
//! display sequence and guarantees that every record carries a unique
//! `order` value once loaded.
//!
//! Mutations never edit the shared vector in place: each one builds the next
//! vector and swaps it in whole, bumping `version`. Readers holding a
//! [`CollectionSnapshot`] therefore never observe a half-applied change.

use crate::recipe::{Recipe, RecipeId};
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Immutable view of the collection at one version
#[derive(Debug, Clone)]
pub struct CollectionSnapshot {
    version: u64,
    recipes: Arc<[Recipe]>,
}

impl CollectionSnapshot {
    /// Version the snapshot was taken at
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Records in display sequence
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }
}

/// New `order` value for one record after a move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderChange {
    pub id: RecipeId,
    pub order: i64,
}

/// Ordered, versioned collection of recipes
#[derive(Debug, Clone, Default)]
pub struct RecipeCollection {
    version: u64,
    recipes: Arc<[Recipe]>,
}

impl RecipeCollection {
    /// Create an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from freshly fetched records
    #[must_use]
    pub fn from_records(records: Vec<Recipe>) -> Self {
        let mut collection = Self::new();
        collection.load(records);
        collection
    }

    /// Replace the contents with freshly fetched records
    ///
    /// Records are stably ordered by their stored `order` (a missing order
    /// counts as the record's array index) and then renumbered `0..n`, so
    /// duplicates or gaps coming from the backend cannot break the
    /// unique-order invariant.
    pub fn load(&mut self, records: Vec<Recipe>) {
        let mut indexed: Vec<(i64, Recipe)> = records
            .into_iter()
            .enumerate()
            .map(|(index, recipe)| (recipe.order.unwrap_or(index as i64), recipe))
            .collect();
        indexed.sort_by_key(|(order, _)| *order);

        let next = indexed.into_iter().map(|(_, recipe)| recipe).collect();
        self.replace(renumbered(next));
    }

    /// Current version; bumped by every mutation
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Records in display sequence
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// True if the collection holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Take a cheap shared snapshot
    #[must_use]
    pub fn snapshot(&self) -> CollectionSnapshot {
        CollectionSnapshot {
            version: self.version,
            recipes: Arc::clone(&self.recipes),
        }
    }

    /// Restore the records of an earlier snapshot
    ///
    /// The version still moves forward so observers notice the change.
    pub fn restore(&mut self, snapshot: &CollectionSnapshot) {
        self.recipes = Arc::clone(&snapshot.recipes);
        self.version += 1;
    }

    /// Look up a record by id
    #[must_use]
    pub fn get(&self, id: &RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| &r.id == id)
    }

    /// Look up a record by the textual form of its id
    ///
    /// Useful for ids typed by a user, where `7` may be numeric or textual
    /// depending on the backend.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id.to_string() == key)
    }

    /// Index of a record in display sequence
    #[must_use]
    pub fn position(&self, id: &RecipeId) -> Option<usize> {
        self.recipes.iter().position(|r| &r.id == id)
    }

    /// Append a newly created record after all existing ones
    pub fn insert(&mut self, mut recipe: Recipe) {
        let next_order = self
            .recipes
            .iter()
            .filter_map(|r| r.order)
            .max()
            .map_or(0, |max| max + 1);
        recipe.order = Some(next_order);

        let mut next = self.recipes.to_vec();
        next.push(recipe);
        self.replace(next);
    }

    /// Merge the server's canonical copy of an updated record
    ///
    /// Returns `false` if no record with that id exists. A server copy that
    /// omits `order` keeps the local one.
    pub fn merge_updated(&mut self, mut recipe: Recipe) -> bool {
        let Some(index) = self.position(&recipe.id) else {
            return false;
        };
        if recipe.order.is_none() {
            recipe.order = self.recipes[index].order;
        }

        let mut next = self.recipes.to_vec();
        next[index] = recipe;
        self.replace(next);
        true
    }

    /// Remove a record, returning it if it was present
    pub fn remove(&mut self, id: &RecipeId) -> Option<Recipe> {
        let index = self.position(id)?;
        let mut next = self.recipes.to_vec();
        let removed = next.remove(index);
        self.replace(next);
        Some(removed)
    }

    /// Move one record and renumber the whole collection
    ///
    /// The record at `source` is removed and reinserted at `destination`;
    /// every other record keeps its relative order. All records then get
    /// `order = index`. Returns the new orders of the records whose index
    /// lies in the inclusive affected range, or `None` if either index is
    /// out of bounds.
    pub fn apply_move(&mut self, source: usize, destination: usize) -> Option<Vec<OrderChange>> {
        if source >= self.len() || destination >= self.len() {
            return None;
        }

        let mut next = self.recipes.to_vec();
        let moved = next.remove(source);
        next.insert(destination, moved);
        let next = renumbered(next);

        let changes = affected_range(source, destination)
            .map(|index| OrderChange {
                id: next[index].id.clone(),
                order: index as i64,
            })
            .collect();

        self.replace(next);
        Some(changes)
    }

    fn replace(&mut self, next: Vec<Recipe>) {
        self.recipes = next.into();
        self.version += 1;
    }
}

/// Inclusive index range touched by moving `source` to `destination`
#[must_use]
pub fn affected_range(source: usize, destination: usize) -> RangeInclusive<usize> {
    source.min(destination)..=source.max(destination)
}

fn renumbered(mut recipes: Vec<Recipe>) -> Vec<Recipe> {
    for (index, recipe) in recipes.iter_mut().enumerate() {
        recipe.order = Some(index as i64);
    }
    recipes
}
