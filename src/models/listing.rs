use serde::{Deserialize, Serialize};

use crate::domain::CardCondition;

/// An active (or historical) marketplace offer joined with its printing.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub id: i32,
    pub seller_id: i32,
    pub seller_name: String,
    pub printing_id: String,
    pub card_name: String,
    pub set_code: String,
    pub set_name: String,
    pub image_uri_small: Option<String>,
    pub condition: CardCondition,
    pub foil: bool,
    pub quantity: i32,
    pub price_cents: i64,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewListing {
    pub printing_id: String,
    #[serde(default)]
    pub condition: CardCondition,
    #[serde(default)]
    pub foil: bool,
    pub quantity: i32,
    pub price_cents: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingPage {
    pub listings: Vec<Listing>,
    pub total_count: u64,
    pub total_pages: u64,
}
