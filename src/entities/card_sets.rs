use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "card_sets")]
pub struct Model {
    /// Lowercase set code, e.g. "lea"
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub name: String,
    pub set_type: Option<String>,
    /// ISO-8601 date (YYYY-MM-DD)
    pub released_at: Option<String>,
    pub icon_svg_uri: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::card_printings::Entity")]
    CardPrintings,
}

impl Related<super::card_printings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CardPrintings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
