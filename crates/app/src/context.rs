//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    clock::Clock,
    database::{self, Db},
    domain::{
        brands::{BrandsService, PgBrandsService},
        categories::{CategoriesService, PgCategoriesService},
        discounts::{DiscountsService, PgDiscountsService},
        lots::{LotsService, PgLotsService},
        products::{PgProductsService, ProductsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrations(#[source] MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub brands: Arc<dyn BrandsService>,
    pub categories: Arc<dyn CategoriesService>,
    pub discounts: Arc<dyn DiscountsService>,
    pub lots: Arc<dyn LotsService>,
    pub clock: Arc<dyn Clock>,
}

impl AppContext {
    /// Build application context over an existing pool.
    #[must_use]
    pub fn new(db: Db, clock: Arc<dyn Clock>) -> Self {
        Self {
            products: Arc::new(PgProductsService::new(db.clone(), clock.clone())),
            brands: Arc::new(PgBrandsService::new(db.clone())),
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            discounts: Arc::new(PgDiscountsService::new(db.clone())),
            lots: Arc::new(PgLotsService::new(db)),
            clock,
        }
    }

    /// Build application context from a database URL, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(url: &str, clock: Arc<dyn Clock>) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        Ok(Self::new(Db::new(pool), clock))
    }
}
