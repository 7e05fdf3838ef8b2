use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, BinderService, CardSearchService, ListingService, SeaOrmAuthService,
    SeaOrmBinderService, SeaOrmCardSearchService, SeaOrmListingService,
};

/// Long-lived services shared by the HTTP layer and the CLI.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub search_service: Arc<dyn CardSearchService>,

    pub binder_service: Arc<dyn BinderService>,

    pub listing_service: Arc<dyn ListingService>,

    pub auth_service: Arc<dyn AuthService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let config = Arc::new(RwLock::new(config));

        let search_service =
            Arc::new(SeaOrmCardSearchService::new(store.clone())) as Arc<dyn CardSearchService>;
        let binder_service =
            Arc::new(SeaOrmBinderService::new(store.clone())) as Arc<dyn BinderService>;
        let listing_service =
            Arc::new(SeaOrmListingService::new(store.clone())) as Arc<dyn ListingService>;
        let auth_service = Arc::new(SeaOrmAuthService::new(store.clone(), config.clone()))
            as Arc<dyn AuthService>;

        Self {
            config,
            store,
            search_service,
            binder_service,
            listing_service,
            auth_service,
        }
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
