use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "listings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub seller_id: i32,
    pub printing_id: String,
    pub condition: String,
    pub foil: bool,
    pub quantity: i32,
    /// Asking price per copy, in US cents
    pub price_cents: i64,
    /// "active", "sold" or "withdrawn"
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::SellerId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::card_printings::Entity",
        from = "Column::PrintingId",
        to = "super::card_printings::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    CardPrintings,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::card_printings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CardPrintings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
