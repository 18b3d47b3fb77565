//! Query state ⇄ shareable address
//!
//! Maps a [`QueryState`] onto the query component of an address and back.
//! Parameters equal to their default are omitted, so the default view has
//! no query component at all and shared links stay short.
//!
//! | field      | parameter    | default  |
//! |------------|--------------|----------|
//! | search     | `search`     | empty    |
//! | difficulty | `difficulty` | `all`    |
//! | tag        | `tag`        | `all`    |
//! | sort       | `sort`       | `newest` |
//! | page       | `page`       | `1`      |

use super::{DifficultyFilter, QueryState, SortKey, TagFilter};
use reqwest::Url;
use std::borrow::Cow;
use tracing::warn;

pub const SEARCH_PARAM: &str = "search";
pub const DIFFICULTY_PARAM: &str = "difficulty";
pub const TAG_PARAM: &str = "tag";
pub const SORT_PARAM: &str = "sort";
pub const PAGE_PARAM: &str = "page";

/// Base used to parse bare query strings
const ADDRESS_BASE: &str = "http://localhost/recipes";

impl QueryState {
    /// Read the query state from an address
    ///
    /// Absent parameters take their defaults. Unparseable values are logged
    /// and also fall back to the default. When a parameter repeats, the
    /// first occurrence wins.
    #[must_use]
    pub fn from_address(url: &Url) -> Self {
        Self::from_pairs(url.query_pairs())
    }

    /// Read the query state from a bare query string (`?search=soup&page=2`)
    #[must_use]
    pub fn from_query_str(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        match Url::parse(ADDRESS_BASE) {
            Ok(mut url) => {
                url.set_query(Some(query));
                Self::from_address(&url)
            }
            Err(e) => {
                warn!("cannot parse address base: {e}");
                Self::default()
            }
        }
    }

    fn from_pairs<'a>(pairs: impl Iterator<Item = (Cow<'a, str>, Cow<'a, str>)>) -> Self {
        let mut search = None;
        let mut difficulty = None;
        let mut tag = None;
        let mut sort = None;
        let mut page = None;

        for (key, value) in pairs {
            match &*key {
                SEARCH_PARAM if search.is_none() => search = Some(value.into_owned()),
                DIFFICULTY_PARAM if difficulty.is_none() => {
                    difficulty = Some(parse_or_default::<DifficultyFilter>(DIFFICULTY_PARAM, &value));
                }
                TAG_PARAM if tag.is_none() => {
                    tag = Some(parse_or_default::<TagFilter>(TAG_PARAM, &value));
                }
                SORT_PARAM if sort.is_none() => {
                    sort = Some(parse_or_default::<SortKey>(SORT_PARAM, &value));
                }
                PAGE_PARAM if page.is_none() => page = Some(parse_page(&value)),
                _ => {}
            }
        }

        Self::with(
            search.unwrap_or_default(),
            difficulty.unwrap_or_default(),
            tag.unwrap_or_default(),
            sort.unwrap_or_default(),
            page.unwrap_or(1),
        )
    }

    /// Non-default fields as address parameters, in a fixed order
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.search().is_empty() {
            pairs.push((SEARCH_PARAM, self.search().to_string()));
        }
        if self.difficulty() != DifficultyFilter::All {
            pairs.push((DIFFICULTY_PARAM, self.difficulty().to_string()));
        }
        if self.tag() != &TagFilter::All {
            pairs.push((TAG_PARAM, self.tag().to_string()));
        }
        if self.sort() != SortKey::Newest {
            pairs.push((SORT_PARAM, self.sort().to_string()));
        }
        if self.page() != 1 {
            pairs.push((PAGE_PARAM, self.page().to_string()));
        }
        pairs
    }

    /// Rewrite the query component of an address from this state
    ///
    /// Any previous query component is replaced. The path and fragment are
    /// left alone.
    pub fn apply_to_address(&self, url: &mut Url) {
        let pairs = self.to_query_pairs();
        url.set_query(None);
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
    }

    /// Encoded query string without the leading `?` (empty for defaults)
    #[must_use]
    pub fn to_query_string(&self) -> String {
        match Url::parse(ADDRESS_BASE) {
            Ok(mut url) => {
                self.apply_to_address(&mut url);
                url.query().unwrap_or_default().to_string()
            }
            Err(e) => {
                warn!("cannot parse address base: {e}");
                String::new()
            }
        }
    }
}

fn parse_or_default<T>(param: &str, value: &str) -> T
where
    T: std::str::FromStr + Default,
    T::Err: std::fmt::Display,
{
    value.parse().unwrap_or_else(|e| {
        warn!("ignoring address parameter {param}={value}: {e}");
        T::default()
    })
}

fn parse_page(value: &str) -> usize {
    match value.trim().parse::<usize>() {
        Ok(page) => page.max(1),
        Err(e) => {
            warn!("ignoring address parameter {PAGE_PARAM}={value}: {e}");
            1
        }
    }
}
