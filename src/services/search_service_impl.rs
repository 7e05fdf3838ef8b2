//! `SeaORM` implementation of the `CardSearchService` trait.

use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::db::{CardSuggestion, SearchPage, Store};
use crate::domain::SearchQuery;
use crate::domain::search::FuzzyQuery;
use crate::models::card::{CardDetail, CatalogCounts, SetSummary};
use crate::services::search_service::{CardSearchService, SearchError};

pub struct SeaOrmCardSearchService {
    store: Store,
}

impl SeaOrmCardSearchService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn record(kind: &'static str, started: Instant) {
    metrics::counter!("card_search_total", "kind" => kind).increment(1);
    metrics::histogram!("card_search_duration_seconds", "kind" => kind)
        .record(started.elapsed().as_secs_f64());
}

#[async_trait]
impl CardSearchService for SeaOrmCardSearchService {
    #[instrument(skip(self), fields(page = %query.page))]
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, SearchError> {
        let started = Instant::now();
        let result = self.store.search_cards(query).await;
        record("search", started);

        let page = result?;
        debug!(
            total_count = page.total_count,
            rows = page.cards.len(),
            "Card search finished"
        );
        Ok(page)
    }

    async fn suggest(&self, query: &FuzzyQuery) -> Result<Vec<CardSuggestion>, SearchError> {
        let started = Instant::now();
        let result = self.store.suggest_cards(query).await;
        record("fuzzy", started);

        Ok(result?)
    }

    async fn get_card(&self, printing_id: &str) -> Result<CardDetail, SearchError> {
        self.store
            .get_card_detail(printing_id)
            .await?
            .ok_or_else(|| SearchError::NotFound(printing_id.to_string()))
    }

    async fn list_sets(&self) -> Result<Vec<SetSummary>, SearchError> {
        Ok(self.store.list_sets().await?)
    }

    async fn catalog_counts(&self) -> Result<CatalogCounts, SearchError> {
        Ok(self.store.catalog_counts().await?)
    }
}
