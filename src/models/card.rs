use serde::{Deserialize, Serialize};

use crate::domain::{ColorCode, Rarity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSet {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub set_type: Option<String>,
    #[serde(default)]
    pub released_at: Option<String>,
    #[serde(default)]
    pub icon_svg_uri: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDesign {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mana_cost: Option<String>,
    pub type_line: String,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub mana_value: f64,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub colors: Vec<ColorCode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardPrinting {
    pub id: String,
    pub design_id: String,
    pub set_code: String,
    pub collector_number: String,
    pub rarity: Rarity,
    #[serde(default)]
    pub price_usd: Option<f64>,
    #[serde(default)]
    pub price_usd_foil: Option<f64>,
    #[serde(default)]
    pub image_uri_small: Option<String>,
    #[serde(default)]
    pub image_uri_normal: Option<String>,
    #[serde(default)]
    pub released_at: Option<String>,
}

/// A batch of catalog rows written in one transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogBatch {
    #[serde(default)]
    pub sets: Vec<CardSet>,
    #[serde(default)]
    pub designs: Vec<CardDesign>,
    #[serde(default)]
    pub printings: Vec<CardPrinting>,
}

/// Full view of one printing, with its design and sibling printings.
#[derive(Debug, Clone, Serialize)]
pub struct CardDetail {
    pub id: String,
    pub design_id: String,
    pub name: String,
    pub mana_cost: Option<String>,
    pub type_line: String,
    pub oracle_text: Option<String>,
    pub mana_value: f64,
    pub keywords: Vec<String>,
    pub colors: Vec<ColorCode>,
    pub set_code: String,
    pub set_name: String,
    pub collector_number: String,
    pub rarity: String,
    pub price_usd: Option<f64>,
    pub price_usd_foil: Option<f64>,
    pub image_uri_small: Option<String>,
    pub image_uri_normal: Option<String>,
    pub released_at: Option<String>,
    pub other_printings: Vec<PrintingRef>,
}

#[derive(Debug, Clone, Serialize, sea_orm::FromQueryResult)]
pub struct PrintingRef {
    pub id: String,
    pub set_code: String,
    pub set_name: String,
    pub collector_number: String,
    pub rarity: String,
    pub price_usd: Option<f64>,
    pub image_uri_small: Option<String>,
}

#[derive(Debug, Clone, Serialize, sea_orm::FromQueryResult)]
pub struct SetSummary {
    pub code: String,
    pub name: String,
    pub set_type: Option<String>,
    pub released_at: Option<String>,
    pub icon_svg_uri: Option<String>,
    pub printing_count: i64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CatalogCounts {
    pub sets: u64,
    pub designs: u64,
    pub printings: u64,
}
