use std::collections::HashMap;

use crate::domain::{BinderId, UserId};
use crate::entities::{binder_cards, binders, card_designs, card_printings, card_sets, prelude::*};
use crate::models::binder::{
    BinderChanges, BinderDetail, BinderEntry, BinderSummary, NewBinder, NewBinderCard,
    total_value,
};
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use tracing::info;

#[derive(Debug, FromQueryResult)]
struct EntryRow {
    id: i32,
    binder_id: i32,
    printing_id: String,
    name: String,
    set_code: String,
    set_name: String,
    rarity: String,
    image_uri_small: Option<String>,
    quantity: i32,
    condition: String,
    foil: bool,
    price_usd: Option<f64>,
    price_usd_foil: Option<f64>,
    added_at: String,
}

impl EntryRow {
    fn into_entry(self) -> BinderEntry {
        BinderEntry {
            id: self.id,
            unit_price: unit_price(self.foil, self.price_usd, self.price_usd_foil),
            printing_id: self.printing_id,
            name: self.name,
            set_code: self.set_code,
            set_name: self.set_name,
            rarity: self.rarity,
            image_uri_small: self.image_uri_small,
            quantity: self.quantity,
            condition: self.condition.parse().unwrap_or_default(),
            foil: self.foil,
            added_at: self.added_at,
        }
    }
}

/// Foil copies are valued at the foil price, falling back to the regular one.
fn unit_price(foil: bool, price_usd: Option<f64>, price_usd_foil: Option<f64>) -> Option<f64> {
    if foil {
        price_usd_foil.or(price_usd)
    } else {
        price_usd
    }
}

fn summarize(model: binders::Model, entries: &[BinderEntry]) -> BinderSummary {
    BinderSummary {
        id: BinderId::new(model.id),
        owner_id: model.owner_id,
        name: model.name,
        description: model.description,
        is_public: model.is_public,
        card_count: entries.iter().map(|e| i64::from(e.quantity)).sum(),
        total_value: total_value(entries),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub struct BinderRepository {
    conn: DatabaseConnection,
}

impl BinderRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: BinderId) -> Result<Option<binders::Model>> {
        let binder = Binders::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query binder")?;
        Ok(binder)
    }

    pub async fn list_for_owner(&self, owner: UserId) -> Result<Vec<BinderSummary>> {
        let models = Binders::find()
            .filter(binders::Column::OwnerId.eq(owner.value()))
            .order_by_asc(binders::Column::Name)
            .order_by_asc(binders::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list binders")?;

        let ids: Vec<i32> = models.iter().map(|b| b.id).collect();
        let mut grouped: HashMap<i32, Vec<BinderEntry>> = HashMap::new();
        for row in self.entry_rows(&ids).await? {
            grouped
                .entry(row.binder_id)
                .or_default()
                .push(row.into_entry());
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let entries = grouped.remove(&model.id).unwrap_or_default();
                summarize(model, &entries)
            })
            .collect())
    }

    pub async fn get_detail(&self, id: BinderId) -> Result<Option<BinderDetail>> {
        let Some(model) = self.get(id).await? else {
            return Ok(None);
        };

        let entries: Vec<BinderEntry> = self
            .entry_rows(&[model.id])
            .await?
            .into_iter()
            .map(EntryRow::into_entry)
            .collect();

        Ok(Some(BinderDetail {
            binder: summarize(model, &entries),
            entries,
        }))
    }

    pub async fn create(&self, owner: UserId, binder: &NewBinder) -> Result<BinderSummary> {
        let now = chrono::Utc::now().to_rfc3339();
        let active_model = binders::ActiveModel {
            owner_id: Set(owner.value()),
            name: Set(binder.name.clone()),
            description: Set(binder.description.clone()),
            is_public: Set(binder.is_public),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.conn)
            .await
            .context("Failed to create binder")?;

        info!("Created binder {} for user {}", model.id, owner);
        Ok(summarize(model, &[]))
    }

    pub async fn update(&self, id: BinderId, changes: &BinderChanges) -> Result<bool> {
        let Some(model) = self.get(id).await? else {
            return Ok(false);
        };

        let mut active: binders::ActiveModel = model.into();
        if let Some(name) = &changes.name {
            active.name = Set(name.clone());
        }
        if let Some(description) = &changes.description {
            active.description = Set(Some(description.clone()).filter(|d| !d.is_empty()));
        }
        if let Some(is_public) = changes.is_public {
            active.is_public = Set(is_public);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        active.update(&self.conn).await?;

        Ok(true)
    }

    pub async fn delete(&self, id: BinderId) -> Result<bool> {
        let txn = self.conn.begin().await?;

        BinderCards::delete_many()
            .filter(binder_cards::Column::BinderId.eq(id.value()))
            .exec(&txn)
            .await?;

        let result = Binders::delete_by_id(id.value()).exec(&txn).await?;

        txn.commit().await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Deleted binder {}", id);
        }
        Ok(removed)
    }

    /// Adds copies of a printing. An existing entry with the same printing,
    /// condition and foil flag absorbs the quantity instead of a new row.
    pub async fn add_card(&self, id: BinderId, card: &NewBinderCard) -> Result<i32> {
        let txn = self.conn.begin().await?;
        let now = chrono::Utc::now().to_rfc3339();

        let existing = BinderCards::find()
            .filter(binder_cards::Column::BinderId.eq(id.value()))
            .filter(binder_cards::Column::PrintingId.eq(card.printing_id.as_str()))
            .filter(binder_cards::Column::Condition.eq(card.condition.as_str()))
            .filter(binder_cards::Column::Foil.eq(card.foil))
            .one(&txn)
            .await?;

        let entry_id = if let Some(entry) = existing {
            let entry_id = entry.id;
            let quantity = entry.quantity.saturating_add(card.quantity);
            let mut active: binder_cards::ActiveModel = entry.into();
            active.quantity = Set(quantity);
            active.update(&txn).await?;
            entry_id
        } else {
            let active = binder_cards::ActiveModel {
                binder_id: Set(id.value()),
                printing_id: Set(card.printing_id.clone()),
                quantity: Set(card.quantity),
                condition: Set(card.condition.as_str().to_string()),
                foil: Set(card.foil),
                added_at: Set(now.clone()),
                ..Default::default()
            };
            active.insert(&txn).await?.id
        };

        touch(&txn, id, now).await?;
        txn.commit().await?;

        Ok(entry_id)
    }

    /// Sets an entry's quantity; zero removes it. Returns false when the entry
    /// does not belong to the binder.
    pub async fn set_quantity(&self, id: BinderId, entry_id: i32, quantity: i32) -> Result<bool> {
        if quantity <= 0 {
            return self.remove_entry(id, entry_id).await;
        }

        let Some(entry) = self.find_entry(id, entry_id).await? else {
            return Ok(false);
        };

        let mut active: binder_cards::ActiveModel = entry.into();
        active.quantity = Set(quantity);
        active.update(&self.conn).await?;
        touch(&self.conn, id, chrono::Utc::now().to_rfc3339()).await?;

        Ok(true)
    }

    pub async fn remove_entry(&self, id: BinderId, entry_id: i32) -> Result<bool> {
        let result = BinderCards::delete_many()
            .filter(binder_cards::Column::Id.eq(entry_id))
            .filter(binder_cards::Column::BinderId.eq(id.value()))
            .exec(&self.conn)
            .await?;

        let removed = result.rows_affected > 0;
        if removed {
            touch(&self.conn, id, chrono::Utc::now().to_rfc3339()).await?;
        }
        Ok(removed)
    }

    async fn find_entry(&self, id: BinderId, entry_id: i32) -> Result<Option<binder_cards::Model>> {
        let entry = BinderCards::find_by_id(entry_id)
            .filter(binder_cards::Column::BinderId.eq(id.value()))
            .one(&self.conn)
            .await?;
        Ok(entry)
    }

    async fn entry_rows(&self, binder_ids: &[i32]) -> Result<Vec<EntryRow>> {
        if binder_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = BinderCards::find()
            .join(
                JoinType::InnerJoin,
                binder_cards::Relation::CardPrintings.def(),
            )
            .join(
                JoinType::InnerJoin,
                card_printings::Relation::CardDesigns.def(),
            )
            .join(JoinType::InnerJoin, card_printings::Relation::CardSets.def())
            .filter(binder_cards::Column::BinderId.is_in(binder_ids.iter().copied()))
            .select_only()
            .column_as(binder_cards::Column::Id, "id")
            .column_as(binder_cards::Column::BinderId, "binder_id")
            .column_as(binder_cards::Column::PrintingId, "printing_id")
            .column_as(card_designs::Column::Name, "name")
            .column_as(card_printings::Column::SetCode, "set_code")
            .column_as(card_sets::Column::Name, "set_name")
            .column_as(card_printings::Column::Rarity, "rarity")
            .column_as(card_printings::Column::ImageUriSmall, "image_uri_small")
            .column_as(binder_cards::Column::Quantity, "quantity")
            .column_as(binder_cards::Column::Condition, "condition")
            .column_as(binder_cards::Column::Foil, "foil")
            .column_as(card_printings::Column::PriceUsd, "price_usd")
            .column_as(card_printings::Column::PriceUsdFoil, "price_usd_foil")
            .column_as(binder_cards::Column::AddedAt, "added_at")
            .order_by_asc(card_designs::Column::Name)
            .order_by_asc(binder_cards::Column::Id)
            .into_model::<EntryRow>()
            .all(&self.conn)
            .await
            .context("Failed to load binder entries")?;

        Ok(rows)
    }
}

async fn touch<C: sea_orm::ConnectionTrait>(conn: &C, id: BinderId, now: String) -> Result<()> {
    Binders::update_many()
        .col_expr(
            binders::Column::UpdatedAt,
            sea_orm::sea_query::Expr::value(now),
        )
        .filter(binders::Column::Id.eq(id.value()))
        .exec(conn)
        .await?;
    Ok(())
}
