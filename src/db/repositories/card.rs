use crate::domain::ColorCode;
use crate::entities::{card_design_colors, card_designs, card_printings, card_sets, prelude::*};
use crate::models::card::{
    CardDesign, CardDetail, CardPrinting, CardSet, CatalogBatch, CatalogCounts, PrintingRef,
    SetSummary,
};
use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use tracing::info;

/// Catalog persistence: seeding upserts plus the read-side lookups that are
/// not part of search.
pub struct CardRepository {
    conn: DatabaseConnection,
}

impl CardRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Writes
    // ========================================================================

    pub async fn upsert_set(&self, set: &CardSet) -> Result<()> {
        upsert_set_on(&self.conn, set).await?;
        Ok(())
    }

    /// Inserts or updates a design and replaces its color rows.
    pub async fn upsert_design(&self, design: &CardDesign) -> Result<()> {
        let txn = self.conn.begin().await?;
        upsert_design_on(&txn, design).await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn upsert_printing(&self, printing: &CardPrinting) -> Result<()> {
        upsert_printing_on(&self.conn, printing).await?;
        Ok(())
    }

    /// Writes sets, then designs, then printings, all in one transaction.
    pub async fn upsert_catalog(&self, batch: &CatalogBatch) -> Result<()> {
        let txn = self.conn.begin().await?;

        for set in &batch.sets {
            upsert_set_on(&txn, set)
                .await
                .with_context(|| format!("Failed to upsert set {}", set.code))?;
        }

        for design in &batch.designs {
            upsert_design_on(&txn, design)
                .await
                .with_context(|| format!("Failed to upsert design {}", design.id))?;
        }

        for printing in &batch.printings {
            upsert_printing_on(&txn, printing)
                .await
                .with_context(|| format!("Failed to upsert printing {}", printing.id))?;
        }

        txn.commit().await?;

        info!(
            "Catalog batch written: {} sets, {} designs, {} printings",
            batch.sets.len(),
            batch.designs.len(),
            batch.printings.len()
        );
        Ok(())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub async fn printing_exists(&self, printing_id: &str) -> Result<bool> {
        let count = CardPrintings::find_by_id(printing_id.to_string())
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }

    pub async fn get_detail(&self, printing_id: &str) -> Result<Option<CardDetail>> {
        let Some((printing, design)) = CardPrintings::find_by_id(printing_id.to_string())
            .find_also_related(CardDesigns)
            .one(&self.conn)
            .await?
        else {
            return Ok(None);
        };

        let design = design.with_context(|| {
            format!("Printing {} references missing design", printing.id)
        })?;

        let set_name = CardSets::find_by_id(printing.set_code.clone())
            .one(&self.conn)
            .await?
            .map_or_else(|| printing.set_code.to_uppercase(), |s| s.name);

        let colors = CardDesignColors::find()
            .filter(card_design_colors::Column::DesignId.eq(design.id.as_str()))
            .all(&self.conn)
            .await?
            .into_iter()
            .filter_map(|row| row.color.parse::<ColorCode>().ok())
            .collect();

        let other_printings = self
            .printings_for_design(&design.id, Some(&printing.id))
            .await?;

        Ok(Some(CardDetail {
            id: printing.id,
            design_id: design.id,
            name: design.name,
            mana_cost: design.mana_cost,
            type_line: design.type_line,
            oracle_text: design.oracle_text,
            mana_value: design.mana_value,
            keywords: design
                .keywords
                .and_then(|k| serde_json::from_str(&k).ok())
                .unwrap_or_default(),
            colors,
            set_code: printing.set_code,
            set_name,
            collector_number: printing.collector_number,
            rarity: printing.rarity,
            price_usd: printing.price_usd,
            price_usd_foil: printing.price_usd_foil,
            image_uri_small: printing.image_uri_small,
            image_uri_normal: printing.image_uri_normal,
            released_at: printing.released_at,
            other_printings,
        }))
    }

    /// Printings of one design, newest set first.
    pub async fn printings_for_design(
        &self,
        design_id: &str,
        exclude: Option<&str>,
    ) -> Result<Vec<PrintingRef>> {
        let mut query = CardPrintings::find()
            .join(JoinType::InnerJoin, card_printings::Relation::CardSets.def())
            .filter(card_printings::Column::DesignId.eq(design_id));

        if let Some(id) = exclude {
            query = query.filter(card_printings::Column::Id.ne(id));
        }

        let rows = query
            .select_only()
            .column_as(card_printings::Column::Id, "id")
            .column_as(card_printings::Column::SetCode, "set_code")
            .column_as(card_sets::Column::Name, "set_name")
            .column_as(card_printings::Column::CollectorNumber, "collector_number")
            .column_as(card_printings::Column::Rarity, "rarity")
            .column_as(card_printings::Column::PriceUsd, "price_usd")
            .column_as(card_printings::Column::ImageUriSmall, "image_uri_small")
            .order_by_desc(card_sets::Column::ReleasedAt)
            .order_by_asc(card_printings::Column::Id)
            .into_model::<PrintingRef>()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn list_sets(&self) -> Result<Vec<SetSummary>> {
        let rows = CardSets::find()
            .join(JoinType::LeftJoin, card_sets::Relation::CardPrintings.def())
            .select_only()
            .column(card_sets::Column::Code)
            .column(card_sets::Column::Name)
            .column(card_sets::Column::SetType)
            .column(card_sets::Column::ReleasedAt)
            .column(card_sets::Column::IconSvgUri)
            .column_as(
                Expr::col((CardPrintings, card_printings::Column::Id)).count(),
                "printing_count",
            )
            .group_by(card_sets::Column::Code)
            .order_by_desc(card_sets::Column::ReleasedAt)
            .order_by_asc(card_sets::Column::Code)
            .into_model::<SetSummary>()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn counts(&self) -> Result<CatalogCounts> {
        let (sets, designs, printings) = futures::try_join!(
            CardSets::find().count(&self.conn),
            CardDesigns::find().count(&self.conn),
            CardPrintings::find().count(&self.conn),
        )?;

        Ok(CatalogCounts {
            sets,
            designs,
            printings,
        })
    }
}

async fn upsert_set_on<C: ConnectionTrait>(conn: &C, set: &CardSet) -> Result<(), DbErr> {
    let active_model = card_sets::ActiveModel {
        code: Set(set.code.to_lowercase()),
        name: Set(set.name.clone()),
        set_type: Set(set.set_type.clone()),
        released_at: Set(set.released_at.clone()),
        icon_svg_uri: Set(set.icon_svg_uri.clone()),
    };

    CardSets::insert(active_model)
        .on_conflict(
            OnConflict::column(card_sets::Column::Code)
                .update_columns([
                    card_sets::Column::Name,
                    card_sets::Column::SetType,
                    card_sets::Column::ReleasedAt,
                    card_sets::Column::IconSvgUri,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    Ok(())
}

async fn upsert_design_on<C: ConnectionTrait>(conn: &C, design: &CardDesign) -> Result<(), DbErr> {
    let active_model = card_designs::ActiveModel {
        id: Set(design.id.clone()),
        name: Set(design.name.clone()),
        name_folded: Set(design.name.to_lowercase()),
        mana_cost: Set(design.mana_cost.clone()),
        type_line: Set(design.type_line.clone()),
        oracle_text: Set(design.oracle_text.clone()),
        mana_value: Set(design.mana_value),
        keywords: Set(serde_json::to_string(&design.keywords).ok()),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
    };

    CardDesigns::insert(active_model)
        .on_conflict(
            OnConflict::column(card_designs::Column::Id)
                .update_columns([
                    card_designs::Column::Name,
                    card_designs::Column::NameFolded,
                    card_designs::Column::ManaCost,
                    card_designs::Column::TypeLine,
                    card_designs::Column::OracleText,
                    card_designs::Column::ManaValue,
                    card_designs::Column::Keywords,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    CardDesignColors::delete_many()
        .filter(card_design_colors::Column::DesignId.eq(design.id.as_str()))
        .exec(conn)
        .await?;

    let mut colors = design.colors.clone();
    colors.sort();
    colors.dedup();

    if !colors.is_empty() {
        let rows = colors.iter().map(|color| card_design_colors::ActiveModel {
            design_id: Set(design.id.clone()),
            color: Set(color.as_code().to_string()),
        });
        CardDesignColors::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
    }

    Ok(())
}

async fn upsert_printing_on<C: ConnectionTrait>(
    conn: &C,
    printing: &CardPrinting,
) -> Result<(), DbErr> {
    let active_model = card_printings::ActiveModel {
        id: Set(printing.id.clone()),
        design_id: Set(printing.design_id.clone()),
        set_code: Set(printing.set_code.to_lowercase()),
        collector_number: Set(printing.collector_number.clone()),
        rarity: Set(printing.rarity.as_str().to_string()),
        price_usd: Set(printing.price_usd),
        price_usd_foil: Set(printing.price_usd_foil),
        image_uri_small: Set(printing.image_uri_small.clone()),
        image_uri_normal: Set(printing.image_uri_normal.clone()),
        released_at: Set(printing.released_at.clone()),
    };

    CardPrintings::insert(active_model)
        .on_conflict(
            OnConflict::column(card_printings::Column::Id)
                .update_columns([
                    card_printings::Column::DesignId,
                    card_printings::Column::SetCode,
                    card_printings::Column::CollectorNumber,
                    card_printings::Column::Rarity,
                    card_printings::Column::PriceUsd,
                    card_printings::Column::PriceUsdFoil,
                    card_printings::Column::ImageUriSmall,
                    card_printings::Column::ImageUriNormal,
                    card_printings::Column::ReleasedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    Ok(())
}
