use serde::{Deserialize, Serialize};

use crate::db::{CardSummary, SearchPage};
use crate::models::listing::{Listing, ListingPage};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Raw query string of `GET /api/cards/search`. Everything arrives as text
/// and is parsed by [`super::validation::parse_search_params`].
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub rarity: Option<String>,
    pub set_code: Option<String>,
    /// Comma-separated color codes, e.g. `W,U`
    pub colors: Option<String>,
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
    #[serde(rename = "orderDir")]
    pub order_dir: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub cards: Vec<CardSummary>,
    pub total_count: u64,
    pub total_pages: u64,
}

impl From<SearchPage> for SearchResponse {
    fn from(page: SearchPage) -> Self {
        Self {
            cards: page.cards,
            total_count: page.total_count,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FuzzyParams {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub printing_id: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPageResponse {
    pub listings: Vec<Listing>,
    pub total_count: u64,
    pub total_pages: u64,
}

impl From<ListingPage> for ListingPageResponse {
    fn from(page: ListingPage) -> Self {
        Self {
            listings: page.listings,
            total_count: page.total_count,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
