use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "binder_cards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub binder_id: i32,
    pub printing_id: String,
    pub quantity: i32,
    pub condition: String,
    pub foil: bool,
    pub added_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::binders::Entity",
        from = "Column::BinderId",
        to = "super::binders::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Binders,
    #[sea_orm(
        belongs_to = "super::card_printings::Entity",
        from = "Column::PrintingId",
        to = "super::card_printings::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    CardPrintings,
}

impl Related<super::binders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Binders.def()
    }
}

impl Related<super::card_printings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CardPrintings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
