//! Catalog endpoints: composed search, typeahead, printing detail and sets.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::validation::{parse_search_params, validate_fuzzy_query};
use super::{ApiError, ApiResponse, AppState, FuzzyParams, SearchParams, SearchResponse};
use crate::db::CardSuggestion;
use crate::models::card::{CardDetail, SetSummary};

/// `GET /api/cards/search`
///
/// Filters combine with AND; `colors` matches designs carrying any of the
/// listed colors. Pages hold 40 printings.
pub async fn search_cards(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let query = parse_search_params(&params)?;
    let page = state.search_service().search(&query).await?;
    Ok(Json(ApiResponse::success(SearchResponse::from(page))))
}

/// `GET /api/cards/fuzzy?query=`
pub async fn fuzzy_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FuzzyParams>,
) -> Result<Json<ApiResponse<Vec<CardSuggestion>>>, ApiError> {
    let query = validate_fuzzy_query(&params.query)?;
    let suggestions = state.search_service().suggest(&query).await?;
    Ok(Json(ApiResponse::success(suggestions)))
}

/// `GET /api/cards/{id}`
pub async fn get_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CardDetail>>, ApiError> {
    let detail = state.search_service().get_card(&id).await?;
    Ok(Json(ApiResponse::success(detail)))
}

/// `GET /api/sets`
pub async fn list_sets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<SetSummary>>>, ApiError> {
    let sets = state.search_service().list_sets().await?;
    Ok(Json(ApiResponse::success(sets)))
}
