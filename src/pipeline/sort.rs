//! Recipe ordering
//!
//! All orderings use `slice::sort_by`, which is stable: recipes with equal
//! keys keep the relative order they had before sorting.

use crate::query::SortKey;
use crate::recipe::Recipe;
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Stably sort recipes by the given key
pub fn sort_recipes(recipes: &mut [&Recipe], key: SortKey) {
    match key {
        // Missing timestamps compare as the oldest possible value.
        SortKey::Newest => recipes.sort_by(|a, b| b.created().cmp(&a.created())),
        SortKey::Oldest => recipes.sort_by(|a, b| a.created().cmp(&b.created())),
        SortKey::Title => recipes.sort_by(|a, b| locale_cmp(&a.title, &b.title)),
        SortKey::Difficulty => recipes.sort_by_key(|r| r.difficulty.rank()),
        SortKey::Manual => recipes.sort_by_key(|r| r.order),
    }
}

/// Locale-aware text comparison
///
/// Comparison runs in levels:
///
/// 1. base letters, ignoring accents and case, so `Éclair` sorts between
///    `Dal` and `Fudge` and `apple` sorts before `Banana`
/// 2. accents, unaccented first (`eclair` < `éclair`)
/// 3. case, lowercase first (`apple` < `Apple`)
/// 4. code points, which keeps the ordering total
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented(a).cmp(accented(b)))
        .then_with(|| case_cmp(a, b))
        .then_with(|| a.cmp(b))
}

/// Lowercased canonical decomposition with combining marks removed
fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Lowercased canonical decomposition, marks kept
fn accented(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn case_cmp(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}
