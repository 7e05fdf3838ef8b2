use crate::entities::prelude::*;
use crate::entities::{binder_cards, binders, listings};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Binders)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(BinderCards)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Listings)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_binders_owner_id")
                    .table(Binders)
                    .col(binders::Column::OwnerId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // One row per (printing, condition, finish) inside a binder; re-adding bumps quantity.
        manager
            .create_index(
                Index::create()
                    .name("idx_binder_cards_entry_unique")
                    .table(BinderCards)
                    .col(binder_cards::Column::BinderId)
                    .col(binder_cards::Column::PrintingId)
                    .col(binder_cards::Column::Condition)
                    .col(binder_cards::Column::Foil)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_listings_printing_status")
                    .table(Listings)
                    .col(listings::Column::PrintingId)
                    .col(listings::Column::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Listings).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BinderCards).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Binders).to_owned())
            .await?;

        Ok(())
    }
}
