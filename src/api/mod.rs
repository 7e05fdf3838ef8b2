use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::services::{AuthService, BinderService, CardSearchService, ListingService};
use crate::state::SharedState;

pub mod auth;
mod binders;
mod cards;
mod error;
mod listings;
mod observability;
mod system;
mod types;
pub mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn search_service(&self) -> &Arc<dyn CardSearchService> {
        &self.shared.search_service
    }

    #[must_use]
    pub fn binder_service(&self) -> &Arc<dyn BinderService> {
        &self.shared.binder_service
    }

    #[must_use]
    pub fn listing_service(&self) -> &Arc<dyn ListingService> {
        &self.shared.listing_service
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let server = state.config().read().await.server.clone();

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_idle_minutes,
        )));

    let api_router = Router::new()
        .merge(create_public_router())
        .merge(create_protected_router(state.clone()))
        .layer(session_layer)
        .with_state(state);

    let cors_layer = if server.cors_allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .cors_allowed_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(middleware::from_fn(observability::security_headers_middleware))
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
}

fn create_public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cards/search", get(cards::search_cards))
        .route("/cards/fuzzy", get(cards::fuzzy_search))
        .route("/cards/{id}", get(cards::get_card))
        .route("/cards/{id}/listings", get(listings::card_listings))
        .route("/sets", get(cards::list_sets))
        .route("/listings", get(listings::list_listings))
        .route("/binders/{id}", get(binders::get_binder))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/system/health/live", get(system::health_live))
        .route("/system/health/ready", get(system::health_ready))
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/me", get(auth::get_current_user))
        .route("/auth/api-key", get(auth::get_api_key))
        .route("/auth/api-key/regenerate", post(auth::regenerate_api_key))
        .route("/binders", get(binders::list_binders))
        .route("/binders", post(binders::create_binder))
        .route("/binders/{id}", put(binders::update_binder))
        .route("/binders/{id}", delete(binders::delete_binder))
        .route("/binders/{id}/cards", post(binders::add_card))
        .route("/binders/{id}/cards/{entry_id}", put(binders::update_card))
        .route("/binders/{id}/cards/{entry_id}", delete(binders::remove_card))
        .route("/listings", post(listings::create_listing))
        .route("/listings/{id}", delete(listings::withdraw_listing))
        .route("/system/status", get(system::get_status))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
