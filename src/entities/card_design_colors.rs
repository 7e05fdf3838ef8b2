use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "card_design_colors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub design_id: String,
    /// Single-letter color code: W, U, B, R, G or C
    #[sea_orm(primary_key, auto_increment = false)]
    pub color: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::card_designs::Entity",
        from = "Column::DesignId",
        to = "super::card_designs::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    CardDesigns,
}

impl Related<super::card_designs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CardDesigns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
