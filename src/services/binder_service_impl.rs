//! `SeaORM` implementation of the `BinderService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::Store;
use crate::domain::{BinderId, UserId};
use crate::models::binder::{BinderChanges, BinderDetail, BinderSummary, NewBinder, NewBinderCard};
use crate::services::binder_service::{BinderError, BinderService};

pub struct SeaOrmBinderService {
    store: Store,
}

impl SeaOrmBinderService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Fails with `NotFound` unless the binder exists and belongs to `owner`.
    async fn ensure_owned(&self, owner: UserId, id: BinderId) -> Result<(), BinderError> {
        match self.store.get_binder(id).await? {
            Some(binder) if binder.owner_id == owner.value() => Ok(()),
            _ => Err(BinderError::NotFound(id)),
        }
    }

    async fn detail(&self, id: BinderId) -> Result<BinderDetail, BinderError> {
        self.store
            .get_binder_detail(id)
            .await?
            .ok_or(BinderError::NotFound(id))
    }
}

#[async_trait]
impl BinderService for SeaOrmBinderService {
    async fn list(&self, owner: UserId) -> Result<Vec<BinderSummary>, BinderError> {
        Ok(self.store.list_binders(owner).await?)
    }

    async fn get(
        &self,
        viewer: Option<UserId>,
        id: BinderId,
    ) -> Result<BinderDetail, BinderError> {
        let detail = self.detail(id).await?;

        let is_owner = viewer.is_some_and(|v| v.value() == detail.binder.owner_id);
        if detail.binder.is_public || is_owner {
            Ok(detail)
        } else {
            Err(BinderError::NotFound(id))
        }
    }

    async fn create(
        &self,
        owner: UserId,
        binder: NewBinder,
    ) -> Result<BinderSummary, BinderError> {
        Ok(self.store.create_binder(owner, &binder).await?)
    }

    async fn update(
        &self,
        owner: UserId,
        id: BinderId,
        changes: BinderChanges,
    ) -> Result<BinderDetail, BinderError> {
        self.ensure_owned(owner, id).await?;

        if !self.store.update_binder(id, &changes).await? {
            return Err(BinderError::NotFound(id));
        }

        self.detail(id).await
    }

    async fn delete(&self, owner: UserId, id: BinderId) -> Result<(), BinderError> {
        self.ensure_owned(owner, id).await?;

        if !self.store.delete_binder(id).await? {
            return Err(BinderError::NotFound(id));
        }

        Ok(())
    }

    async fn add_card(
        &self,
        owner: UserId,
        id: BinderId,
        card: NewBinderCard,
    ) -> Result<BinderDetail, BinderError> {
        self.ensure_owned(owner, id).await?;

        if card.quantity < 1 {
            return Err(BinderError::Validation(
                "Quantity must be at least 1".to_string(),
            ));
        }

        if !self.store.printing_exists(&card.printing_id).await? {
            return Err(BinderError::PrintingNotFound(card.printing_id));
        }

        let entry_id = self.store.add_binder_card(id, &card).await?;
        info!(
            "Binder {} entry {}: +{} {} ({})",
            id,
            entry_id,
            card.quantity,
            card.printing_id,
            card.condition.as_str()
        );

        self.detail(id).await
    }

    async fn set_quantity(
        &self,
        owner: UserId,
        id: BinderId,
        entry_id: i32,
        quantity: i32,
    ) -> Result<BinderDetail, BinderError> {
        self.ensure_owned(owner, id).await?;

        if quantity < 0 {
            return Err(BinderError::Validation(
                "Quantity cannot be negative".to_string(),
            ));
        }

        if !self
            .store
            .set_binder_card_quantity(id, entry_id, quantity)
            .await?
        {
            return Err(BinderError::EntryNotFound(entry_id));
        }

        self.detail(id).await
    }

    async fn remove_card(
        &self,
        owner: UserId,
        id: BinderId,
        entry_id: i32,
    ) -> Result<BinderDetail, BinderError> {
        self.ensure_owned(owner, id).await?;

        if !self.store.remove_binder_card(id, entry_id).await? {
            return Err(BinderError::EntryNotFound(entry_id));
        }

        self.detail(id).await
    }
}
