//! Discounts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::discounts::{
        data::NewDiscount, errors::DiscountsServiceError, records::DiscountRecord,
        repository::PgDiscountsRepository,
    },
    ids::ProductUuid,
};

#[derive(Debug, Clone)]
pub struct PgDiscountsService {
    db: Db,
    repository: PgDiscountsRepository,
}

impl PgDiscountsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgDiscountsRepository::new(),
        }
    }
}

#[async_trait]
impl DiscountsService for PgDiscountsService {
    async fn list_discounts(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<DiscountRecord>, DiscountsServiceError> {
        let mut tx = self.db.begin().await?;

        let discounts = self.repository.list_discounts(&mut tx, &[product]).await?;

        tx.commit().await?;

        Ok(discounts)
    }

    async fn create_discount(
        &self,
        discount: NewDiscount,
    ) -> Result<DiscountRecord, DiscountsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_discount(&mut tx, discount).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
/// Promotional discount persistence operations.
pub trait DiscountsService: Send + Sync {
    /// Retrieves a product's discounts in collection order.
    async fn list_discounts(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<DiscountRecord>, DiscountsServiceError>;

    /// Appends a discount to the end of a product's collection.
    async fn create_discount(
        &self,
        discount: NewDiscount,
    ) -> Result<DiscountRecord, DiscountsServiceError>;
}
