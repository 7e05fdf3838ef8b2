use axum::{
    Extension, Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_sessions::Session;

use super::validation::{validate_password, validate_username};
use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::domain::UserId;
use crate::services::{LoginResult, UserInfo};

const SESSION_USER_KEY: &str = "user_id";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct ApiKeyResponse {
    pub api_key: String,
}

/// Authenticated caller, placed in request extensions by [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Rejects the request with 401 unless one of these identifies a user:
/// 1. Session cookie (from login or registration)
/// 2. `X-Api-Key` header
/// 3. `Authorization: Bearer <api_key>` header
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    session: Session,
    mut request: Request,
    next: Next,
) -> Response {
    match resolve_user(&state, &headers, &session).await {
        Some(user) => {
            tracing::Span::current().record("user_id", user.id.value());
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => ApiError::Unauthorized("Authentication required".to_string()).into_response(),
    }
}

/// Identifies the caller without requiring authentication.
pub async fn resolve_user(
    state: &AppState,
    headers: &HeaderMap,
    session: &Session,
) -> Option<CurrentUser> {
    if let Ok(Some(id)) = session.get::<i32>(SESSION_USER_KEY).await
        && let Ok(user) = state.auth_service().get_user(UserId::new(id)).await
    {
        return Some(CurrentUser {
            id: user.user_id(),
            username: user.username,
        });
    }

    let key = extract_api_key(headers)?;
    match state.auth_service().verify_api_key(&key).await {
        Ok(Some(user)) => Some(CurrentUser {
            id: user.user_id(),
            username: user.username,
        }),
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("API key lookup failed: {e}");
            None
        }
    }
}

fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    if let Some(api_key) = headers.get("X-Api-Key")
        && let Ok(key_str) = api_key.to_str()
    {
        return Some(key_str.trim().to_string());
    }

    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        return Some(token.trim().to_string());
    }

    None
}

async fn start_session(session: &Session, result: &LoginResult) -> Result<(), ApiError> {
    session
        .cycle_id()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to rotate session: {e}")))?;
    session
        .insert(SESSION_USER_KEY, result.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LoginResult>>), ApiError> {
    let username = validate_username(payload.username.trim())?;
    validate_password(&payload.password)?;

    let result = state
        .auth_service()
        .register(username, &payload.password)
        .await?;

    start_session(&session, &result).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(result))))
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<ApiResponse<LoginResult>>, ApiError> {
    if payload.username.trim().is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let result = state
        .auth_service()
        .login(payload.username.trim(), &payload.password)
        .await?;

    start_session(&session, &result).await?;

    Ok(Json(ApiResponse::success(result)))
}

/// POST /auth/logout
pub async fn logout(session: Session) -> Json<ApiResponse<MessageResponse>> {
    if let Err(e) = session.flush().await {
        tracing::warn!("Failed to flush session: {e}");
    }
    Json(ApiResponse::success(MessageResponse::new("Logged out")))
}

/// GET /auth/me
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let user = state.auth_service().get_user(user.id).await?;
    Ok(Json(ApiResponse::success(UserInfo::from(user))))
}

/// GET /auth/api-key
pub async fn get_api_key(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<ApiKeyResponse>>, ApiError> {
    let user = state.auth_service().get_user(user.id).await?;
    Ok(Json(ApiResponse::success(ApiKeyResponse {
        api_key: user.api_key,
    })))
}

/// POST /auth/api-key/regenerate
pub async fn regenerate_api_key(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<ApiKeyResponse>>, ApiError> {
    let api_key = state.auth_service().regenerate_api_key(user.id).await?;
    Ok(Json(ApiResponse::success(ApiKeyResponse { api_key })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn api_key_header_takes_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Api-Key", HeaderValue::from_static("from-header"));
        headers.insert("Authorization", HeaderValue::from_static("Bearer from-bearer"));
        assert_eq!(extract_api_key(&headers).as_deref(), Some("from-header"));
    }

    #[test]
    fn bearer_token_is_accepted() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Bearer  abc123 "));
        assert_eq!(extract_api_key(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn other_schemes_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert!(extract_api_key(&headers).is_none());
    }
}
