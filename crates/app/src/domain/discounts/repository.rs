//! Discounts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{Postgres, Transaction, query_as};
use uuid::Uuid;

use crate::{
    domain::discounts::{data::NewDiscount, records::DiscountRecord},
    ids::ProductUuid,
};

const LIST_DISCOUNTS_SQL: &str = include_str!("sql/list_discounts.sql");
const CREATE_DISCOUNT_SQL: &str = include_str!("sql/create_discount.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgDiscountsRepository;

impl PgDiscountsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Discounts for the given products, in each product's collection order.
    pub(crate) async fn list_discounts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<Vec<DiscountRecord>, sqlx::Error> {
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let uuids: Vec<Uuid> = products.iter().copied().map(Uuid::from).collect();

        query_as::<Postgres, DiscountRecord>(LIST_DISCOUNTS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_discount(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        discount: NewDiscount,
    ) -> Result<DiscountRecord, sqlx::Error> {
        query_as::<Postgres, DiscountRecord>(CREATE_DISCOUNT_SQL)
            .bind(discount.uuid.into_uuid())
            .bind(discount.product.into_uuid())
            .bind(discount.kind.as_str())
            .bind(discount.value)
            .bind(SqlxTimestamp::from(discount.starts_at))
            .bind(SqlxTimestamp::from(discount.ends_at))
            .fetch_one(&mut **tx)
            .await
    }
}
