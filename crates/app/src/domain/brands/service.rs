//! Brands service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::brands::{
        data::NewBrand, errors::BrandsServiceError, records::BrandRecord,
        repository::PgBrandsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgBrandsService {
    db: Db,
    repository: PgBrandsRepository,
}

impl PgBrandsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgBrandsRepository::new(),
        }
    }
}

#[async_trait]
impl BrandsService for PgBrandsService {
    async fn list_brands(&self) -> Result<Vec<BrandRecord>, BrandsServiceError> {
        let mut tx = self.db.begin().await?;

        let brands = self.repository.list_brands(&mut tx).await?;

        tx.commit().await?;

        Ok(brands)
    }

    async fn create_brand(&self, brand: NewBrand) -> Result<BrandRecord, BrandsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_brand(&mut tx, brand).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
/// Brand persistence operations.
pub trait BrandsService: Send + Sync {
    /// Retrieves all brands, ordered by name.
    async fn list_brands(&self) -> Result<Vec<BrandRecord>, BrandsServiceError>;

    /// Creates a new brand.
    async fn create_brand(&self, brand: NewBrand) -> Result<BrandRecord, BrandsServiceError>;
}
