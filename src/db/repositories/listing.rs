use crate::domain::search::total_pages;
use crate::domain::{ListingStatus, PAGE_SIZE, Page, UserId};
use crate::entities::{card_designs, card_printings, card_sets, listings, prelude::*, users};
use crate::models::listing::{Listing, ListingPage, NewListing};
use anyhow::{Context, Result};
use chrono::SecondsFormat;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};
use tracing::info;

#[derive(Debug, FromQueryResult)]
struct ListingRow {
    id: i32,
    seller_id: i32,
    seller_name: String,
    printing_id: String,
    card_name: String,
    set_code: String,
    set_name: String,
    image_uri_small: Option<String>,
    condition: String,
    foil: bool,
    quantity: i32,
    price_cents: i64,
    status: String,
    created_at: String,
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
        Self {
            id: row.id,
            seller_id: row.seller_id,
            seller_name: row.seller_name,
            printing_id: row.printing_id,
            card_name: row.card_name,
            set_code: row.set_code,
            set_name: row.set_name,
            image_uri_small: row.image_uri_small,
            condition: row.condition.parse().unwrap_or_default(),
            foil: row.foil,
            quantity: row.quantity,
            price_cents: row.price_cents,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

pub struct ListingRepository {
    conn: DatabaseConnection,
}

impl ListingRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Active listings, newest first, optionally for a single printing.
    pub async fn list_active(&self, printing_id: Option<&str>, page: Page) -> Result<ListingPage> {
        let mut base = Listings::find()
            .filter(listings::Column::Status.eq(ListingStatus::Active.as_str()));
        if let Some(printing_id) = printing_id {
            base = base.filter(listings::Column::PrintingId.eq(printing_id));
        }

        let window = page.window(PAGE_SIZE);
        let count = base.clone().count(&self.conn);
        let rows = with_card_columns(base)
            .order_by_desc(listings::Column::CreatedAt)
            .order_by_desc(listings::Column::Id)
            .limit(window.limit)
            .offset(window.offset)
            .into_model::<ListingRow>()
            .all(&self.conn);

        let (total_count, rows) =
            futures::try_join!(count, rows).context("Failed to query listings")?;

        Ok(ListingPage {
            listings: rows.into_iter().map(Listing::from).collect(),
            total_count,
            total_pages: total_pages(total_count, PAGE_SIZE),
        })
    }

    /// Active listings for one printing, cheapest first.
    pub async fn cheapest_for_printing(&self, printing_id: &str) -> Result<Vec<Listing>> {
        let base = Listings::find()
            .filter(listings::Column::Status.eq(ListingStatus::Active.as_str()))
            .filter(listings::Column::PrintingId.eq(printing_id));

        let rows = with_card_columns(base)
            .order_by_asc(listings::Column::PriceCents)
            .order_by_asc(listings::Column::Id)
            .into_model::<ListingRow>()
            .all(&self.conn)
            .await
            .context("Failed to query listings for printing")?;

        Ok(rows.into_iter().map(Listing::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Listing>> {
        let row = with_card_columns(Listings::find_by_id(id))
            .into_model::<ListingRow>()
            .one(&self.conn)
            .await
            .context("Failed to query listing")?;

        Ok(row.map(Listing::from))
    }

    pub async fn create(&self, seller: UserId, listing: &NewListing) -> Result<i32> {
        let now = chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let active_model = listings::ActiveModel {
            seller_id: Set(seller.value()),
            printing_id: Set(listing.printing_id.clone()),
            condition: Set(listing.condition.as_str().to_string()),
            foil: Set(listing.foil),
            quantity: Set(listing.quantity),
            price_cents: Set(listing.price_cents),
            status: Set(ListingStatus::Active.as_str().to_string()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.conn)
            .await
            .context("Failed to create listing")?;

        info!(
            "User {} listed {} x {} at {} cents",
            seller, model.quantity, model.printing_id, model.price_cents
        );
        Ok(model.id)
    }

    /// Marks an active listing owned by `seller` as withdrawn. Returns false
    /// when no such listing exists.
    pub async fn withdraw(&self, id: i32, seller: UserId) -> Result<bool> {
        let result = Listings::update_many()
            .col_expr(
                listings::Column::Status,
                Expr::value(ListingStatus::Withdrawn.as_str()),
            )
            .col_expr(
                listings::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
            )
            .filter(listings::Column::Id.eq(id))
            .filter(listings::Column::SellerId.eq(seller.value()))
            .filter(listings::Column::Status.eq(ListingStatus::Active.as_str()))
            .exec(&self.conn)
            .await?;

        let withdrawn = result.rows_affected > 0;
        if withdrawn {
            info!("Listing {} withdrawn by user {}", id, seller);
        }
        Ok(withdrawn)
    }
}

fn with_card_columns(select: Select<Listings>) -> Select<Listings> {
    select
        .join(JoinType::InnerJoin, listings::Relation::Users.def())
        .join(JoinType::InnerJoin, listings::Relation::CardPrintings.def())
        .join(
            JoinType::InnerJoin,
            card_printings::Relation::CardDesigns.def(),
        )
        .join(JoinType::InnerJoin, card_printings::Relation::CardSets.def())
        .select_only()
        .column_as(listings::Column::Id, "id")
        .column_as(listings::Column::SellerId, "seller_id")
        .column_as(users::Column::Username, "seller_name")
        .column_as(listings::Column::PrintingId, "printing_id")
        .column_as(card_designs::Column::Name, "card_name")
        .column_as(card_printings::Column::SetCode, "set_code")
        .column_as(card_sets::Column::Name, "set_name")
        .column_as(card_printings::Column::ImageUriSmall, "image_uri_small")
        .column_as(listings::Column::Condition, "condition")
        .column_as(listings::Column::Foil, "foil")
        .column_as(listings::Column::Quantity, "quantity")
        .column_as(listings::Column::PriceCents, "price_cents")
        .column_as(listings::Column::Status, "status")
        .column_as(listings::Column::CreatedAt, "created_at")
}
