//! Domain service for marketplace listings.

use thiserror::Error;

use crate::domain::{Page, UserId};
use crate::models::listing::{Listing, ListingPage, NewListing};

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Listing not found: {0}")]
    NotFound(i32),

    #[error("Printing not found: {0}")]
    PrintingNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for ListingError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ListingError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait ListingService: Send + Sync {
    /// Active listings, newest first, 40 per page.
    async fn list_active(
        &self,
        printing_id: Option<String>,
        page: Page,
    ) -> Result<ListingPage, ListingError>;

    /// Active listings for one printing, cheapest first.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::PrintingNotFound`] for an unknown printing.
    async fn for_printing(&self, printing_id: &str) -> Result<Vec<Listing>, ListingError>;

    async fn create(&self, seller: UserId, listing: NewListing) -> Result<Listing, ListingError>;

    /// Withdraws one of the seller's active listings. Listings owned by
    /// someone else are reported as not found.
    async fn withdraw(&self, seller: UserId, id: i32) -> Result<(), ListingError>;
}
