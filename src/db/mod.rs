use crate::config::SecurityConfig;
use crate::domain::search::FuzzyQuery;
use crate::domain::{BinderId, Page, SearchQuery, UserId};
use crate::models::binder::{BinderChanges, BinderDetail, BinderSummary, NewBinder, NewBinderCard};
use crate::models::card::{
    CardDesign, CardDetail, CardPrinting, CardSet, CatalogBatch, CatalogCounts, SetSummary,
};
use crate::models::listing::{Listing, ListingPage, NewListing};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::search::{CardSearchRepository, CardSuggestion, CardSummary, SearchPage};
pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn search_repo(&self) -> CardSearchRepository {
        CardSearchRepository::new(self.conn.clone())
    }

    fn card_repo(&self) -> repositories::card::CardRepository {
        repositories::card::CardRepository::new(self.conn.clone())
    }

    fn binder_repo(&self) -> repositories::binder::BinderRepository {
        repositories::binder::BinderRepository::new(self.conn.clone())
    }

    fn listing_repo(&self) -> repositories::listing::ListingRepository {
        repositories::listing::ListingRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    // ========== Search ==========

    pub async fn search_cards(&self, query: &SearchQuery) -> Result<SearchPage> {
        self.search_repo().search(query).await
    }

    pub async fn suggest_cards(&self, query: &FuzzyQuery) -> Result<Vec<CardSuggestion>> {
        self.search_repo().suggest(query).await
    }

    // ========== Catalog ==========

    pub async fn upsert_set(&self, set: &CardSet) -> Result<()> {
        self.card_repo().upsert_set(set).await
    }

    pub async fn upsert_design(&self, design: &CardDesign) -> Result<()> {
        self.card_repo().upsert_design(design).await
    }

    pub async fn upsert_printing(&self, printing: &CardPrinting) -> Result<()> {
        self.card_repo().upsert_printing(printing).await
    }

    pub async fn upsert_catalog(&self, batch: &CatalogBatch) -> Result<()> {
        self.card_repo().upsert_catalog(batch).await
    }

    pub async fn get_card_detail(&self, printing_id: &str) -> Result<Option<CardDetail>> {
        self.card_repo().get_detail(printing_id).await
    }

    pub async fn printing_exists(&self, printing_id: &str) -> Result<bool> {
        self.card_repo().printing_exists(printing_id).await
    }

    pub async fn list_sets(&self) -> Result<Vec<SetSummary>> {
        self.card_repo().list_sets().await
    }

    pub async fn catalog_counts(&self) -> Result<CatalogCounts> {
        self.card_repo().counts().await
    }

    // ========== Binders ==========

    pub async fn get_binder(&self, id: BinderId) -> Result<Option<crate::entities::binders::Model>> {
        self.binder_repo().get(id).await
    }

    pub async fn list_binders(&self, owner: UserId) -> Result<Vec<BinderSummary>> {
        self.binder_repo().list_for_owner(owner).await
    }

    pub async fn get_binder_detail(&self, id: BinderId) -> Result<Option<BinderDetail>> {
        self.binder_repo().get_detail(id).await
    }

    pub async fn create_binder(&self, owner: UserId, binder: &NewBinder) -> Result<BinderSummary> {
        self.binder_repo().create(owner, binder).await
    }

    pub async fn update_binder(&self, id: BinderId, changes: &BinderChanges) -> Result<bool> {
        self.binder_repo().update(id, changes).await
    }

    pub async fn delete_binder(&self, id: BinderId) -> Result<bool> {
        self.binder_repo().delete(id).await
    }

    pub async fn add_binder_card(&self, id: BinderId, card: &NewBinderCard) -> Result<i32> {
        self.binder_repo().add_card(id, card).await
    }

    pub async fn set_binder_card_quantity(
        &self,
        id: BinderId,
        entry_id: i32,
        quantity: i32,
    ) -> Result<bool> {
        self.binder_repo().set_quantity(id, entry_id, quantity).await
    }

    pub async fn remove_binder_card(&self, id: BinderId, entry_id: i32) -> Result<bool> {
        self.binder_repo().remove_entry(id, entry_id).await
    }

    // ========== Listings ==========

    pub async fn list_active_listings(
        &self,
        printing_id: Option<&str>,
        page: Page,
    ) -> Result<ListingPage> {
        self.listing_repo().list_active(printing_id, page).await
    }

    pub async fn cheapest_listings(&self, printing_id: &str) -> Result<Vec<Listing>> {
        self.listing_repo().cheapest_for_printing(printing_id).await
    }

    pub async fn get_listing(&self, id: i32) -> Result<Option<Listing>> {
        self.listing_repo().get(id).await
    }

    pub async fn create_listing(&self, seller: UserId, listing: &NewListing) -> Result<i32> {
        self.listing_repo().create(seller, listing).await
    }

    pub async fn withdraw_listing(&self, id: i32, seller: UserId) -> Result<bool> {
        self.listing_repo().withdraw(id, seller).await
    }

    // ========== Users ==========

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        config: &SecurityConfig,
    ) -> Result<Option<User>> {
        self.user_repo().create(username, password, config).await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        self.user_repo().verify_api_key(api_key).await
    }

    pub async fn regenerate_user_api_key(&self, id: UserId) -> Result<String> {
        self.user_repo().regenerate_api_key(id).await
    }
}
