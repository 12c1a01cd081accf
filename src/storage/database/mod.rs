//! SeaORM-backed persistence for health records and usage events

/// Entity definitions
pub mod entities;
/// Schema migrations
pub mod migration;

mod health_ops;
mod usage_ops;

use crate::config::StorageConfig;
use crate::utils::error::{HealthError, Result};
use migration::Migrator;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{debug, info};

/// Store on SQLite or PostgreSQL through SeaORM
#[derive(Debug, Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    /// Connect to `config.database_url` and run pending migrations
    pub async fn connect(config: &StorageConfig) -> Result<Self> {
        let url = config
            .database_url
            .as_deref()
            .ok_or_else(|| HealthError::config("database_url is required for database storage"))?;

        let mut opt = ConnectOptions::new(url.to_string());
        // Each SQLite memory connection is its own database
        let max_connections = if url.contains(":memory:") {
            1
        } else {
            config.max_connections
        };
        opt.max_connections(max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        debug!("Connecting to database");
        let db = Database::connect(opt).await?;
        let store = Self { db };
        store.migrate().await?;
        info!("Database connection established ({:?})", store.db.get_database_backend());
        Ok(store)
    }

    /// Wrap an existing connection without migrating
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Apply pending migrations
    pub async fn migrate(&self) -> Result<()> {
        Migrator::up(&self.db, None).await?;
        debug!("Database migrations applied");
        Ok(())
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}
