use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{saved_properties, users};
use crate::models::property::{PropertyRecord, SearchCriteria};

pub mod migrator;
pub mod repositories;
pub mod seed;

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

    fn property_repo(&self) -> repositories::property::PropertyRepository {
        repositories::property::PropertyRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn saved_repo(&self) -> repositories::saved::SavedPropertyRepository {
        repositories::saved::SavedPropertyRepository::new(self.conn.clone())
    }

    fn views_repo(&self) -> repositories::views::PropertyViewRepository {
        repositories::views::PropertyViewRepository::new(self.conn.clone())
    }

    // ========== Property listings ==========

    pub async fn search_properties(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<(Vec<PropertyRecord>, u64)> {
        self.property_repo().search(criteria).await
    }

    pub async fn get_property(&self, id: &str) -> Result<Option<PropertyRecord>> {
        self.property_repo().get(id).await
    }

    pub async fn featured_properties(&self, limit: u64) -> Result<Vec<PropertyRecord>> {
        self.property_repo().featured(limit).await
    }

    pub async fn get_properties_by_ids(&self, ids: &[String]) -> Result<Vec<PropertyRecord>> {
        self.property_repo().get_by_ids(ids).await
    }

    pub async fn property_exists(&self, id: &str) -> Result<bool> {
        self.property_repo().exists(id).await
    }

    // ========== Users ==========

    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
        phone: Option<String>,
        avatar: Option<String>,
        roles: &[String],
    ) -> Result<users::Model> {
        self.user_repo()
            .create(email, password, name, phone, avatar, roles)
            .await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<users::Model>> {
        self.user_repo().find_by_email(email).await
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<users::Model>> {
        self.user_repo().find_by_id(id).await
    }

    pub async fn authenticate_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<users::Model>> {
        self.user_repo().authenticate(email, password).await
    }

    pub async fn update_user_profile(
        &self,
        id: &str,
        name: Option<String>,
        phone: Option<String>,
        avatar: Option<String>,
    ) -> Result<Option<users::Model>> {
        self.user_repo().update_profile(id, name, phone, avatar).await
    }

    // ========== Saved properties ==========

    pub async fn saved_properties_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<saved_properties::Model>> {
        self.saved_repo().list_for_user(user_id).await
    }

    pub async fn save_property(&self, user_id: &str, property_id: &str) -> Result<bool> {
        self.saved_repo().save(user_id, property_id).await
    }

    pub async fn unsave_property(&self, user_id: &str, property_id: &str) -> Result<bool> {
        self.saved_repo().remove(user_id, property_id).await
    }

    // ========== View history ==========

    pub async fn record_property_view(
        &self,
        user_id: &str,
        property_id: &str,
        user_agent: Option<String>,
        ip_address: Option<String>,
    ) -> Result<()> {
        self.views_repo()
            .record(user_id, property_id, user_agent, ip_address)
            .await
    }

    pub async fn recently_viewed_property_ids(
        &self,
        user_id: &str,
        limit: u64,
    ) -> Result<Vec<String>> {
        self.views_repo().recent_property_ids(user_id, limit).await
    }
}
