//! `SeaORM` implementation of the `ListingService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::domain::{Page, UserId};
use crate::models::listing::{Listing, ListingPage, NewListing};
use crate::services::listing_service::{ListingError, ListingService};

pub struct SeaOrmListingService {
    store: Store,
}

impl SeaOrmListingService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ListingService for SeaOrmListingService {
    async fn list_active(
        &self,
        printing_id: Option<String>,
        page: Page,
    ) -> Result<ListingPage, ListingError> {
        Ok(self
            .store
            .list_active_listings(printing_id.as_deref(), page)
            .await?)
    }

    async fn for_printing(&self, printing_id: &str) -> Result<Vec<Listing>, ListingError> {
        if !self.store.printing_exists(printing_id).await? {
            return Err(ListingError::PrintingNotFound(printing_id.to_string()));
        }

        Ok(self.store.cheapest_listings(printing_id).await?)
    }

    async fn create(&self, seller: UserId, listing: NewListing) -> Result<Listing, ListingError> {
        if listing.quantity < 1 {
            return Err(ListingError::Validation(
                "Quantity must be at least 1".to_string(),
            ));
        }

        if listing.price_cents <= 0 {
            return Err(ListingError::Validation(
                "Price must be greater than 0".to_string(),
            ));
        }

        if !self.store.printing_exists(&listing.printing_id).await? {
            return Err(ListingError::PrintingNotFound(listing.printing_id));
        }

        let id = self.store.create_listing(seller, &listing).await?;

        self.store
            .get_listing(id)
            .await?
            .ok_or(ListingError::NotFound(id))
    }

    async fn withdraw(&self, seller: UserId, id: i32) -> Result<(), ListingError> {
        if self.store.withdraw_listing(id, seller).await? {
            Ok(())
        } else {
            Err(ListingError::NotFound(id))
        }
    }
}
