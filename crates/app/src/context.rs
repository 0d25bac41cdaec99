//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db, MIGRATOR},
    domain::carts::{CartsService, SqliteCartsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// The store is opened exactly once here and migrated to the current
    /// schema; all further access goes through the carts service.
    ///
    /// # Errors
    ///
    /// Returns an error when opening the database or applying migrations
    /// fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        MIGRATOR.run(&pool).await.map_err(AppInitError::Migrate)?;

        Ok(Self {
            carts: Arc::new(SqliteCartsService::new(Db::new(pool))),
        })
    }
}
