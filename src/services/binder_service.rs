//! Domain service for binders: per-user collections of printings.
//!
//! Ownership rules live here. A binder is visible to its owner and, when
//! public, to anyone; it is mutable only by its owner. Every other case is
//! reported as [`BinderError::NotFound`] so private binders are not revealed.

use thiserror::Error;

use crate::domain::{BinderId, UserId};
use crate::models::binder::{BinderChanges, BinderDetail, BinderSummary, NewBinder, NewBinderCard};

#[derive(Debug, Error)]
pub enum BinderError {
    #[error("Binder not found: {0}")]
    NotFound(BinderId),

    #[error("Binder entry not found: {0}")]
    EntryNotFound(i32),

    #[error("Printing not found: {0}")]
    PrintingNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for BinderError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for BinderError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait BinderService: Send + Sync {
    async fn list(&self, owner: UserId) -> Result<Vec<BinderSummary>, BinderError>;

    /// Loads a binder with its entries. `viewer` is `None` for anonymous
    /// callers, who only see public binders.
    async fn get(&self, viewer: Option<UserId>, id: BinderId)
    -> Result<BinderDetail, BinderError>;

    async fn create(&self, owner: UserId, binder: NewBinder)
    -> Result<BinderSummary, BinderError>;

    async fn update(
        &self,
        owner: UserId,
        id: BinderId,
        changes: BinderChanges,
    ) -> Result<BinderDetail, BinderError>;

    async fn delete(&self, owner: UserId, id: BinderId) -> Result<(), BinderError>;

    /// # Errors
    ///
    /// Returns [`BinderError::PrintingNotFound`] for an unknown printing.
    async fn add_card(
        &self,
        owner: UserId,
        id: BinderId,
        card: NewBinderCard,
    ) -> Result<BinderDetail, BinderError>;

    /// Sets an entry's quantity. Zero removes the entry.
    async fn set_quantity(
        &self,
        owner: UserId,
        id: BinderId,
        entry_id: i32,
        quantity: i32,
    ) -> Result<BinderDetail, BinderError>;

    async fn remove_card(
        &self,
        owner: UserId,
        id: BinderId,
        entry_id: i32,
    ) -> Result<BinderDetail, BinderError>;
}
