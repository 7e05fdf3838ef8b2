//! Domain service for catalog reads: composed search, typeahead, card detail
//! and set listing.

use thiserror::Error;

use crate::db::{CardSuggestion, SearchPage};
use crate::domain::SearchQuery;
use crate::domain::search::FuzzyQuery;
use crate::models::card::{CardDetail, CatalogCounts, SetSummary};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Card not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for SearchError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for SearchError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait CardSearchService: Send + Sync {
    /// Runs one composed search and returns the requested page plus totals.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Database`] if either the count or the page
    /// query fails. No partial page is returned.
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, SearchError>;

    /// Name-only typeahead, at most five suggestions.
    async fn suggest(&self, query: &FuzzyQuery) -> Result<Vec<CardSuggestion>, SearchError>;

    /// # Errors
    ///
    /// Returns [`SearchError::NotFound`] for an unknown printing id.
    async fn get_card(&self, printing_id: &str) -> Result<CardDetail, SearchError>;

    async fn list_sets(&self) -> Result<Vec<SetSummary>, SearchError>;

    async fn catalog_counts(&self) -> Result<CatalogCounts, SearchError>;
}
