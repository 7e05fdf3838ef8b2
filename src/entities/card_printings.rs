use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "card_printings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub design_id: String,
    pub set_code: String,
    pub collector_number: String,
    pub rarity: String,
    pub price_usd: Option<f64>,
    pub price_usd_foil: Option<f64>,
    pub image_uri_small: Option<String>,
    pub image_uri_normal: Option<String>,
    pub released_at: Option<String>,
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
    #[sea_orm(
        belongs_to = "super::card_sets::Entity",
        from = "Column::SetCode",
        to = "super::card_sets::Column::Code",
        on_update = "Cascade",
        on_delete = "NoAction"
    )]
    CardSets,
    #[sea_orm(has_many = "super::binder_cards::Entity")]
    BinderCards,
    #[sea_orm(has_many = "super::listings::Entity")]
    Listings,
}

impl Related<super::card_designs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CardDesigns.def()
    }
}

impl Related<super::card_sets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CardSets.def()
    }
}

impl Related<super::binder_cards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BinderCards.def()
    }
}

impl Related<super::listings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Listings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
