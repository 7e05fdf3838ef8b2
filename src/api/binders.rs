use axum::{
    Extension, Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::{CurrentUser, resolve_user};
use super::validation::{validate_binder_name, validate_id, validate_printing_id, validate_quantity};
use super::{ApiError, ApiResponse, AppState, MessageResponse, QuantityRequest};
use crate::domain::BinderId;
use crate::models::binder::{BinderChanges, BinderDetail, BinderSummary, NewBinder, NewBinderCard};

fn binder_id(id: i32) -> Result<BinderId, ApiError> {
    validate_id(id, "binder").map(BinderId::new)
}

/// `GET /api/binders`
pub async fn list_binders(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<Vec<BinderSummary>>>, ApiError> {
    let binders = state.binder_service().list(user.id).await?;
    Ok(Json(ApiResponse::success(binders)))
}

/// `POST /api/binders`
pub async fn create_binder(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(mut payload): Json<NewBinder>,
) -> Result<(StatusCode, Json<ApiResponse<BinderSummary>>), ApiError> {
    payload.name = validate_binder_name(&payload.name)?;

    let binder = state.binder_service().create(user.id, payload).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(binder))))
}

/// `GET /api/binders/{id}`
///
/// Public binders are readable by anyone; private ones only by their owner.
pub async fn get_binder(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BinderDetail>>, ApiError> {
    let id = binder_id(id)?;
    let viewer = resolve_user(&state, &headers, &session).await.map(|u| u.id);

    let binder = state.binder_service().get(viewer, id).await?;
    Ok(Json(ApiResponse::success(binder)))
}

/// `PUT /api/binders/{id}`
pub async fn update_binder(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(mut payload): Json<BinderChanges>,
) -> Result<Json<ApiResponse<BinderDetail>>, ApiError> {
    let id = binder_id(id)?;
    if let Some(name) = payload.name.as_deref() {
        payload.name = Some(validate_binder_name(name)?);
    }

    let binder = state.binder_service().update(user.id, id, payload).await?;
    Ok(Json(ApiResponse::success(binder)))
}

/// `DELETE /api/binders/{id}`
pub async fn delete_binder(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = binder_id(id)?;
    state.binder_service().delete(user.id, id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(format!(
        "Binder {id} deleted"
    )))))
}

/// `POST /api/binders/{id}/cards`
pub async fn add_card(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(mut payload): Json<NewBinderCard>,
) -> Result<Json<ApiResponse<BinderDetail>>, ApiError> {
    let id = binder_id(id)?;
    payload.printing_id = validate_printing_id(&payload.printing_id)?.to_string();
    validate_quantity(payload.quantity, 1)?;

    let binder = state.binder_service().add_card(user.id, id, payload).await?;
    Ok(Json(ApiResponse::success(binder)))
}

/// `PUT /api/binders/{id}/cards/{entry_id}`
///
/// A quantity of zero removes the entry.
pub async fn update_card(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path((id, entry_id)): Path<(i32, i32)>,
    Json(payload): Json<QuantityRequest>,
) -> Result<Json<ApiResponse<BinderDetail>>, ApiError> {
    let id = binder_id(id)?;
    let entry_id = validate_id(entry_id, "entry")?;
    let quantity = validate_quantity(payload.quantity, 0)?;

    let binder = state
        .binder_service()
        .set_quantity(user.id, id, entry_id, quantity)
        .await?;
    Ok(Json(ApiResponse::success(binder)))
}

/// `DELETE /api/binders/{id}/cards/{entry_id}`
pub async fn remove_card(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path((id, entry_id)): Path<(i32, i32)>,
) -> Result<Json<ApiResponse<BinderDetail>>, ApiError> {
    let id = binder_id(id)?;
    let entry_id = validate_id(entry_id, "entry")?;

    let binder = state
        .binder_service()
        .remove_card(user.id, id, entry_id)
        .await?;
    Ok(Json(ApiResponse::success(binder)))
}
