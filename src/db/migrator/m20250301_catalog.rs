use crate::entities::prelude::*;
use crate::entities::{card_design_colors, card_designs, card_printings};
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
                    .create_table_from_entity(CardSets)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(CardDesigns)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(CardDesignColors)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(CardPrintings)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_card_designs_name")
                    .table(CardDesigns)
                    .col(card_designs::Column::Name)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_card_designs_name_folded")
                    .table(CardDesigns)
                    .col(card_designs::Column::NameFolded)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_card_printings_design_id")
                    .table(CardPrintings)
                    .col(card_printings::Column::DesignId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_card_printings_set_code")
                    .table(CardPrintings)
                    .col(card_printings::Column::SetCode)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_card_printings_rarity")
                    .table(CardPrintings)
                    .col(card_printings::Column::Rarity)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_card_design_colors_color")
                    .table(CardDesignColors)
                    .col(card_design_colors::Column::Color)
                    .col(card_design_colors::Column::DesignId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CardPrintings).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CardDesignColors).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CardDesigns).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CardSets).to_owned())
            .await?;

        Ok(())
    }
}
