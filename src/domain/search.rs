//! Card search request model.
//!
//! A [`SearchQuery`] is the validated, store-agnostic description of one
//! catalog search. [`SearchQuery::fragments`] turns it into the list of
//! independent predicates that the repository lowers into SQL, and
//! [`Page`]/[`PageWindow`] carry the pagination math.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ColorCode, ParseEnumError, Rarity, SortOrder};

/// Fixed number of printings per result page.
pub const PAGE_SIZE: u64 = 40;

/// Maximum number of typeahead suggestions.
pub const FUZZY_LIMIT: u64 = 5;

/// Minimum typeahead input length, in characters, after trimming.
pub const FUZZY_MIN_CHARS: usize = 3;

/// Largest accepted page. The store binds offsets as `i64`, so
/// `(MAX_PAGE - 1) * PAGE_SIZE` must stay within `i64::MAX`.
pub const MAX_PAGE: u64 = i64::MAX.unsigned_abs() / PAGE_SIZE;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid page: {0}. Page must be between 1 and {MAX_PAGE}")]
pub struct InvalidPage(pub i64);

/// 1-based page number. Zero, negative and out-of-range pages are rejected,
/// never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Page(u64);

impl Page {
    pub const FIRST: Self = Self(1);

    pub fn new(page: i64) -> Result<Self, InvalidPage> {
        u64::try_from(page)
            .ok()
            .filter(|p| (1..=MAX_PAGE).contains(p))
            .map(Self)
            .ok_or(InvalidPage(page))
    }

    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Limit/offset pair for this page at the given page size. The offset
    /// saturates at `i64::MAX`, which no table can reach.
    #[must_use]
    pub const fn window(&self, page_size: u64) -> PageWindow {
        let max_offset = i64::MAX.unsigned_abs();
        let offset = match (self.0 - 1).checked_mul(page_size) {
            Some(offset) if offset <= max_offset => offset,
            _ => max_offset,
        };
        PageWindow {
            limit: page_size,
            offset,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: u64,
    pub offset: u64,
}

/// `ceil(total / page_size)`, zero when nothing matched.
#[must_use]
pub const fn total_pages(total_count: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

/// Closed set of sortable columns. Anything else is rejected while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Price,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
        }
    }
}

impl FromStr for SortKey {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            other => Err(ParseEnumError {
                kind: "sort key",
                value: other.to_string(),
                expected: "name, price",
            }),
        }
    }
}

/// One independent boolean predicate over designs ⋈ printings ⋈ sets.
///
/// Fragments are AND-ed together; their order never changes the result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterFragment {
    /// Case-insensitive substring match on the design name.
    NameContains(String),
    /// Exact match on the printing rarity.
    Rarity(Rarity),
    /// Exact match on the (lowercase) printing set code.
    SetCode(String),
    /// Design carries at least one of these colors.
    AnyColor(BTreeSet<ColorCode>),
}

/// A validated catalog search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: Option<String>,
    pub rarity: Option<Rarity>,
    pub set_code: Option<String>,
    pub colors: BTreeSet<ColorCode>,
    pub sort: SortKey,
    pub order: SortOrder,
    pub page: Page,
}

impl SearchQuery {
    /// Builds the filter fragments for this query. Absent or empty inputs
    /// contribute nothing, so an unfiltered query yields an empty list.
    #[must_use]
    pub fn fragments(&self) -> Vec<FilterFragment> {
        let mut fragments = Vec::with_capacity(4);

        if let Some(text) = self.text.as_deref().map(str::trim)
            && !text.is_empty()
        {
            fragments.push(FilterFragment::NameContains(text.to_string()));
        }

        if let Some(rarity) = self.rarity {
            fragments.push(FilterFragment::Rarity(rarity));
        }

        if let Some(code) = self.set_code.as_deref().map(str::trim)
            && !code.is_empty()
        {
            fragments.push(FilterFragment::SetCode(code.to_lowercase()));
        }

        if !self.colors.is_empty() {
            fragments.push(FilterFragment::AnyColor(self.colors.clone()));
        }

        fragments
    }

    #[must_use]
    pub const fn window(&self) -> PageWindow {
        self.page.window(PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Search query must be at least {FUZZY_MIN_CHARS} characters")]
pub struct QueryTooShort;

/// Typeahead input, guaranteed to hold at least [`FUZZY_MIN_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyQuery(String);

impl FuzzyQuery {
    pub fn new(raw: &str) -> Result<Self, QueryTooShort> {
        let trimmed = raw.trim();
        if trimmed.chars().count() < FUZZY_MIN_CHARS {
            return Err(QueryTooShort);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_has_no_fragments() {
        assert!(SearchQuery::default().fragments().is_empty());
    }

    #[test]
    fn whitespace_text_is_treated_as_absent() {
        let query = SearchQuery {
            text: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(query.fragments().is_empty());
    }

    #[test]
    fn text_is_trimmed() {
        let query = SearchQuery {
            text: Some("  Bolt ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            query.fragments(),
            vec![FilterFragment::NameContains("Bolt".to_string())]
        );
    }

    #[test]
    fn set_code_is_lowercased() {
        let query = SearchQuery {
            set_code: Some("LEA".to_string()),
            ..Default::default()
        };
        assert_eq!(
            query.fragments(),
            vec![FilterFragment::SetCode("lea".to_string())]
        );
    }

    #[test]
    fn every_filter_yields_one_fragment() {
        let query = SearchQuery {
            text: Some("dragon".to_string()),
            rarity: Some(Rarity::Mythic),
            set_code: Some("m21".to_string()),
            colors: [ColorCode::Red, ColorCode::Green].into_iter().collect(),
            ..Default::default()
        };
        let fragments = query.fragments();
        assert_eq!(fragments.len(), 4);
        assert!(fragments.contains(&FilterFragment::Rarity(Rarity::Mythic)));
        assert!(fragments.contains(&FilterFragment::AnyColor(
            [ColorCode::Green, ColorCode::Red].into_iter().collect()
        )));
    }

    #[test]
    fn page_rejects_zero_and_negative() {
        assert_eq!(Page::new(0), Err(InvalidPage(0)));
        assert_eq!(Page::new(-3), Err(InvalidPage(-3)));
        assert_eq!(Page::new(1).unwrap(), Page::FIRST);
    }

    #[test]
    fn page_rejects_offsets_beyond_i64() {
        assert_eq!(Page::new(i64::MAX), Err(InvalidPage(i64::MAX)));
        assert!(Page::new(300_000_000_000_000_000).is_err());

        let last = Page::new(i64::try_from(MAX_PAGE).unwrap()).unwrap();
        let window = last.window(PAGE_SIZE);
        assert!(i64::try_from(window.offset).is_ok());
        assert_eq!(window.offset, (MAX_PAGE - 1) * PAGE_SIZE);
    }

    #[test]
    fn window_saturates_for_larger_page_sizes() {
        let last = Page::new(i64::try_from(MAX_PAGE).unwrap()).unwrap();
        assert_eq!(last.window(u64::MAX).offset, i64::MAX.unsigned_abs());
    }

    #[test]
    fn page_window_offsets_by_page_size() {
        let window = Page::new(3).unwrap().window(PAGE_SIZE);
        assert_eq!(window.limit, 40);
        assert_eq!(window.offset, 80);
        assert_eq!(Page::FIRST.window(PAGE_SIZE).offset, 0);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, PAGE_SIZE), 0);
        assert_eq!(total_pages(1, PAGE_SIZE), 1);
        assert_eq!(total_pages(40, PAGE_SIZE), 1);
        assert_eq!(total_pages(41, PAGE_SIZE), 2);
        assert_eq!(total_pages(45, PAGE_SIZE), 2);
        assert_eq!(total_pages(80, PAGE_SIZE), 2);
    }

    #[test]
    fn sort_key_is_closed() {
        assert_eq!("name".parse::<SortKey>().unwrap(), SortKey::Name);
        assert_eq!("price".parse::<SortKey>().unwrap(), SortKey::Price);
        assert!("oracle_text".parse::<SortKey>().is_err());
        assert!("name; DROP TABLE card_designs".parse::<SortKey>().is_err());
    }

    #[test]
    fn fuzzy_query_needs_three_characters() {
        assert!(FuzzyQuery::new("bo").is_err());
        assert!(FuzzyQuery::new("  bo  ").is_err());
        assert_eq!(FuzzyQuery::new(" bol ").unwrap().as_str(), "bol");
    }
}
