use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "card_designs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    /// `name` under Unicode lowercase folding, matched by name searches
    pub name_folded: String,
    pub mana_cost: Option<String>,
    pub type_line: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub oracle_text: Option<String>,
    /// Mana value (converted mana cost)
    pub mana_value: f64,
    /// JSON array of keyword abilities
    pub keywords: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::card_printings::Entity")]
    CardPrintings,
    #[sea_orm(has_many = "super::card_design_colors::Entity")]
    CardDesignColors,
}

impl Related<super::card_printings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CardPrintings.def()
    }
}

impl Related<super::card_design_colors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CardDesignColors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
