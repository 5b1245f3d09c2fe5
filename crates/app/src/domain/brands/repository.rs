//! Brands Repository

use sqlx::{Postgres, Transaction, query_as};

use crate::{
    domain::brands::{data::NewBrand, records::BrandRecord},
    ids::BrandUuid,
};

const GET_BRAND_SQL: &str = include_str!("sql/get_brand.sql");
const LIST_BRANDS_SQL: &str = include_str!("sql/list_brands.sql");
const CREATE_BRAND_SQL: &str = include_str!("sql/create_brand.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBrandsRepository;

impl PgBrandsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        brand: BrandUuid,
    ) -> Result<Option<BrandRecord>, sqlx::Error> {
        query_as::<Postgres, BrandRecord>(GET_BRAND_SQL)
            .bind(brand.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_brands(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<BrandRecord>, sqlx::Error> {
        query_as::<Postgres, BrandRecord>(LIST_BRANDS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        brand: NewBrand,
    ) -> Result<BrandRecord, sqlx::Error> {
        query_as::<Postgres, BrandRecord>(CREATE_BRAND_SQL)
            .bind(brand.uuid.into_uuid())
            .bind(brand.name)
            .fetch_one(&mut **tx)
            .await
    }
}
