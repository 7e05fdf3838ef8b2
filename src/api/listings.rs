use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::{parse_page, validate_id, validate_price_cents, validate_printing_id, validate_quantity};
use super::{ApiError, ApiResponse, AppState, ListingPageResponse, ListingParams, MessageResponse};
use crate::models::listing::{Listing, NewListing};

/// `GET /api/listings?printing_id=&page=`
pub async fn list_listings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ApiResponse<ListingPageResponse>>, ApiError> {
    let page = parse_page(params.page.as_deref())?;
    let printing_id = params
        .printing_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());

    let listings = state
        .listing_service()
        .list_active(printing_id, page)
        .await?;

    Ok(Json(ApiResponse::success(ListingPageResponse::from(
        listings,
    ))))
}

/// `GET /api/cards/{id}/listings`
pub async fn card_listings(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Listing>>>, ApiError> {
    let listings = state.listing_service().for_printing(&id).await?;
    Ok(Json(ApiResponse::success(listings)))
}

/// `POST /api/listings`
pub async fn create_listing(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(mut payload): Json<NewListing>,
) -> Result<(StatusCode, Json<ApiResponse<Listing>>), ApiError> {
    payload.printing_id = validate_printing_id(&payload.printing_id)?.to_string();
    validate_quantity(payload.quantity, 1)?;
    validate_price_cents(payload.price_cents)?;

    let listing = state.listing_service().create(user.id, payload).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(listing))))
}

/// `DELETE /api/listings/{id}`
///
/// Withdraws the listing. Only the seller may do this.
pub async fn withdraw_listing(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id(id, "listing")?;
    state.listing_service().withdraw(user.id, id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(format!(
        "Listing {id} withdrawn"
    )))))
}
