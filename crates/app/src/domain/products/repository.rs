//! Products Repository

use jiff_sqlx::Date as SqlxDate;
use larder::discounts::Discount;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use sqlx::{Postgres, Transaction, query, query_as};

use crate::{
    domain::{
        discounts::repository::PgDiscountsRepository,
        products::{
            data::{NewProduct, ProductFilter, ProductUpdate},
            records::ProductRecord,
        },
    },
    ids::ProductUuid,
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const LIST_PRODUCTS_EXPIRING_BEFORE_SQL: &str =
    include_str!("sql/list_products_expiring_before.sql");
const LIST_PRODUCTS_BY_BRAND_NAME_SQL: &str = include_str!("sql/list_products_by_brand_name.sql");
const LIST_PRODUCTS_BY_CATEGORY_NAME_SQL: &str =
    include_str!("sql/list_products_by_category_name.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LOCK_PRODUCT_SQL: &str = include_str!("sql/lock_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const UPDATE_LOT_QUANTITIES_SQL: &str = include_str!("sql/update_lot_quantities.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository {
    discounts: PgDiscountsRepository,
}

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            discounts: PgDiscountsRepository::new(),
        }
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let mut products = match filter {
            ProductFilter::All => {
                query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
                    .fetch_all(&mut **tx)
                    .await?
            }
            ProductFilter::ExpiringBefore(date) => {
                query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_EXPIRING_BEFORE_SQL)
                    .bind(SqlxDate::from(*date))
                    .fetch_all(&mut **tx)
                    .await?
            }
            ProductFilter::BrandName(name) => {
                query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_BY_BRAND_NAME_SQL)
                    .bind(name.as_str())
                    .fetch_all(&mut **tx)
                    .await?
            }
            ProductFilter::CategoryName(name) => {
                query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_BY_CATEGORY_NAME_SQL)
                    .bind(name.as_str())
                    .fetch_all(&mut **tx)
                    .await?
            }
        };

        self.attach_discounts(tx, &mut products).await?;

        Ok(products)
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        let Some(record) = query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(None);
        };

        let mut products = [record];

        self.attach_discounts(tx, &mut products).await?;

        let [record] = products;

        Ok(Some(record))
    }

    /// Load a product and hold its row lock until `tx` ends.
    ///
    /// Discounts are not attached.
    pub(crate) async fn lock_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LOCK_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.name)
            .bind(product.unit_of_measure)
            .bind(product.price)
            .bind(product.stock_quantity)
            .bind(product.expiration_date.map(SqlxDate::from))
            .bind(product.brand.into_uuid())
            .bind(product.category.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        let mut products = [query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.name)
            .bind(update.unit_of_measure)
            .bind(update.price)
            .bind(update.stock_quantity)
            .bind(update.expiration_date.map(SqlxDate::from))
            .bind(update.brand.into_uuid())
            .bind(update.category.into_uuid())
            .fetch_one(&mut **tx)
            .await?];

        self.attach_discounts(tx, &mut products).await?;

        let [record] = products;

        Ok(record)
    }

    /// Persist the stock and near-expiry quantities changed by the lot sweep.
    pub(crate) async fn update_lot_quantities(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &ProductRecord,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_LOT_QUANTITIES_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.details.stock_quantity)
            .bind(product.details.near_expiry_quantity)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn attach_discounts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &mut [ProductRecord],
    ) -> Result<(), sqlx::Error> {
        let uuids: Vec<ProductUuid> = products.iter().map(|product| product.uuid).collect();

        let mut by_product: FxHashMap<ProductUuid, SmallVec<[Discount; 2]>> =
            FxHashMap::default();

        for record in self.discounts.list_discounts(tx, &uuids).await? {
            by_product
                .entry(record.product)
                .or_default()
                .push(record.discount);
        }

        for product in products {
            if let Some(discounts) = by_product.remove(&product.uuid) {
                product.details.discounts = discounts;
            }
        }

        Ok(())
    }
}
