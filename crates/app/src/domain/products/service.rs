//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use larder::{
    discounts::{Discount, find_active_discount},
    pricing::{OrderQuote, quote_order},
};
use mockall::automock;
use tracing::debug;

use crate::{
    clock::Clock,
    database::Db,
    domain::{
        brands::repository::PgBrandsRepository,
        categories::repository::PgCategoriesRepository,
        products::{
            data::{NewProduct, ProductFilter, ProductUpdate},
            errors::ProductsServiceError,
            records::ProductRecord,
            repository::PgProductsRepository,
            views::ProductView,
        },
    },
    ids::ProductUuid,
};

#[derive(Clone)]
pub struct PgProductsService {
    db: Db,
    clock: Arc<dyn Clock>,
    products: PgProductsRepository,
    brands: PgBrandsRepository,
    categories: PgCategoriesRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db, clock: Arc<dyn Clock>) -> Self {
        Self {
            db,
            clock,
            products: PgProductsRepository::new(),
            brands: PgBrandsRepository::new(),
            categories: PgCategoriesRepository::new(),
        }
    }

    fn view(&self, record: ProductRecord) -> Result<ProductView, ProductsServiceError> {
        Ok(ProductView::priced(record, self.clock.today())?)
    }

    async fn find_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .products
            .get_product(&mut tx, product)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(record)
    }
}

impl std::fmt::Debug for PgProductsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgProductsService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductView>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.products.list_products(&mut tx, &filter).await?;

        tx.commit().await?;

        products
            .into_iter()
            .map(|record| self.view(record))
            .collect()
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductView, ProductsServiceError> {
        let record = self.find_product(product).await?;

        self.view(record)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductView, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        if self.brands.get_brand(&mut tx, product.brand).await?.is_none() {
            return Err(ProductsServiceError::BrandNotFound(product.brand));
        }

        if self
            .categories
            .get_category(&mut tx, product.category)
            .await?
            .is_none()
        {
            return Err(ProductsServiceError::CategoryNotFound(product.category));
        }

        let created = self.products.create_product(&mut tx, product).await?;

        tx.commit().await?;

        self.view(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductView, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self
            .products
            .get_product(&mut tx, product)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        if existing.brand.uuid != update.brand
            && self.brands.get_brand(&mut tx, update.brand).await?.is_none()
        {
            return Err(ProductsServiceError::BrandNotFound(update.brand));
        }

        if existing.category.uuid != update.category
            && self
                .categories
                .get_category(&mut tx, update.category)
                .await?
                .is_none()
        {
            return Err(ProductsServiceError::CategoryNotFound(update.category));
        }

        let updated = self.products.update_product(&mut tx, product, update).await?;

        tx.commit().await?;

        self.view(updated)
    }

    async fn delete_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductView, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self
            .products
            .get_product(&mut tx, product)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        let rows_affected = self.products.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        self.view(existing)
    }

    async fn quote_order(
        &self,
        product: ProductUuid,
        quantity: i32,
    ) -> Result<OrderQuote, ProductsServiceError> {
        let record = self.find_product(product).await?;

        debug!(%product, quantity, "quoting order");

        Ok(quote_order(&record.details, quantity, self.clock.today())?)
    }

    async fn active_discount(
        &self,
        product: ProductUuid,
    ) -> Result<Option<Discount>, ProductsServiceError> {
        let record = self.find_product(product).await?;

        Ok(find_active_discount(&record.details.discounts, self.clock.now()).cloned())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves products matching `filter`, priced for today.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductView>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductView, ProductsServiceError>;

    /// Creates a new product under an existing brand and category.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductView, ProductsServiceError>;

    /// Updates a product's details, brand and category.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductView, ProductsServiceError>;

    /// Deletes a product, returning it as it was before deletion.
    async fn delete_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductView, ProductsServiceError>;

    /// Prices `quantity` units of a product for today.
    async fn quote_order(
        &self,
        product: ProductUuid,
        quantity: i32,
    ) -> Result<OrderQuote, ProductsServiceError>;

    /// The product's first promotional discount active right now, if any.
    async fn active_discount(
        &self,
        product: ProductUuid,
    ) -> Result<Option<Discount>, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, ToSpan};
    use larder::discounts::DiscountKind;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        ids::{BrandUuid, CategoryUuid},
        test::{
            TestContext,
            helpers::{add_discount, create_product, new_product},
        },
    };

    use super::*;

    #[tokio::test]
    async fn create_product_resolves_brand_and_category() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(new_product(&ctx, "Whole Milk", Decimal::new(129, 2), 12))
            .await?;

        assert_eq!(product.brand, ctx.brand);
        assert_eq!(product.category, ctx.category);
        assert_eq!(product.price, Decimal::new(129, 2));
        assert_eq!(product.near_expiry_quantity, 0);
        assert!(product.discounts.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn create_product_with_missing_brand_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let missing = BrandUuid::new();

        let mut product = new_product(&ctx, "Whole Milk", Decimal::ONE, 12);
        product.brand = missing;

        let result = ctx.products.create_product(product).await;

        assert!(
            matches!(result, Err(ProductsServiceError::BrandNotFound(uuid)) if uuid == missing),
            "expected BrandNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_product_with_missing_category_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let missing = CategoryUuid::new();

        let mut product = new_product(&ctx, "Whole Milk", Decimal::ONE, 12);
        product.category = missing;

        let result = ctx.products.create_product(product).await;

        assert!(
            matches!(result, Err(ProductsServiceError::CategoryNotFound(uuid)) if uuid == missing),
            "expected CategoryNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_missing_product_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_product_is_priced_for_today() -> TestResult {
        let ctx = TestContext::new().await;

        let mut product = new_product(&ctx, "Yoghurt", Decimal::from(4), 6);
        product.expiration_date = Some(ctx.today.checked_add(2.days())?);

        let created = ctx.products.create_product(product).await?;
        let fetched = ctx.products.get_product(created.uuid).await?;

        assert_eq!(fetched.current_price, Decimal::from(2));
        assert!(
            !fetched.has_active_discount,
            "stock is not flagged until the sweep runs"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_product_copies_fields_and_switches_brand() -> TestResult {
        let ctx = TestContext::new().await;
        let created = create_product(&ctx, "Cheddar", Decimal::from(5), 3).await?;
        let other_brand = ctx.create_brand("Oakfield").await?;

        let updated = ctx
            .products
            .update_product(
                created.uuid,
                ProductUpdate {
                    name: "Mature Cheddar".to_string(),
                    unit_of_measure: "kg".to_string(),
                    price: Decimal::new(650, 2),
                    stock_quantity: 9,
                    expiration_date: None,
                    brand: other_brand.uuid,
                    category: ctx.category.uuid,
                },
            )
            .await?;

        assert_eq!(updated.name, "Mature Cheddar");
        assert_eq!(updated.unit_of_measure, "kg");
        assert_eq!(updated.price, Decimal::new(650, 2));
        assert_eq!(updated.stock_quantity, 9);
        assert_eq!(updated.brand, other_brand);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_with_missing_brand_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let created = create_product(&ctx, "Cheddar", Decimal::from(5), 3).await?;
        let missing = BrandUuid::new();

        let result = ctx
            .products
            .update_product(
                created.uuid,
                ProductUpdate {
                    name: created.name.clone(),
                    unit_of_measure: created.unit_of_measure.clone(),
                    price: created.price,
                    stock_quantity: created.stock_quantity,
                    expiration_date: created.expiration_date,
                    brand: missing,
                    category: ctx.category.uuid,
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::BrandNotFound(uuid)) if uuid == missing),
            "expected BrandNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_missing_product_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product(
                ProductUuid::new(),
                ProductUpdate {
                    name: "Ghost".to_string(),
                    unit_of_measure: "each".to_string(),
                    price: Decimal::ONE,
                    stock_quantity: 1,
                    expiration_date: None,
                    brand: ctx.brand.uuid,
                    category: ctx.category.uuid,
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_returns_deleted_product() -> TestResult {
        let ctx = TestContext::new().await;
        let created = create_product(&ctx, "Bread", Decimal::from(2), 10).await?;

        let deleted = ctx.products.delete_product(created.uuid).await?;
        let result = ctx.products.get_product(created.uuid).await;

        assert_eq!(deleted.uuid, created.uuid);
        assert_eq!(deleted.name, "Bread");
        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after delete, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_product_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.products.delete_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters_by_brand_category_and_expiry() -> TestResult {
        let ctx = TestContext::new().await;
        let bakery = ctx.create_category("Bakery").await?;

        let mut milk = new_product(&ctx, "Milk", Decimal::ONE, 5);
        milk.expiration_date = Some(ctx.today.checked_add(3.days())?);
        ctx.products.create_product(milk).await?;

        let mut bread = new_product(&ctx, "Bread", Decimal::ONE, 5);
        bread.category = bakery.uuid;
        bread.expiration_date = Some(ctx.today.checked_add(10.days())?);
        ctx.products.create_product(bread).await?;

        ctx.products
            .create_product(new_product(&ctx, "Salt", Decimal::ONE, 5))
            .await?;

        let all = ctx.products.list_products(ProductFilter::All).await?;
        let expiring = ctx
            .products
            .list_products(ProductFilter::ExpiringBefore(
                ctx.today.checked_add(5.days())?,
            ))
            .await?;
        let by_brand = ctx
            .products
            .list_products(ProductFilter::BrandName(ctx.brand.name.clone()))
            .await?;
        let by_category = ctx
            .products
            .list_products(ProductFilter::CategoryName("Bakery".to_string()))
            .await?;
        let unknown = ctx
            .products
            .list_products(ProductFilter::BrandName("Nobody".to_string()))
            .await?;

        assert_eq!(all.len(), 3);
        assert_eq!(
            expiring.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["Milk"]
        );
        assert_eq!(by_brand.len(), 3);
        assert_eq!(
            by_category.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["Bread"]
        );
        assert!(unknown.is_empty(), "unknown brand should match nothing");

        Ok(())
    }

    #[tokio::test]
    async fn quote_order_prices_through_the_store() -> TestResult {
        let ctx = TestContext::new().await;
        let created = create_product(&ctx, "Rice", Decimal::from(3), 10).await?;

        let quote = ctx.products.quote_order(created.uuid, 4).await?;

        assert_eq!(quote.total, Decimal::from(12));
        assert_eq!(quote.full_price_quantity, 4);

        Ok(())
    }

    #[tokio::test]
    async fn active_discount_returns_first_open_window() -> TestResult {
        let ctx = TestContext::new().await;
        let created = create_product(&ctx, "Coffee", Decimal::from(8), 10).await?;

        add_discount(
            &ctx,
            created.uuid,
            DiscountKind::Fixed,
            Decimal::from(3),
            -SignedDuration::from_hours(48),
            -SignedDuration::from_hours(24),
        )
        .await?;
        add_discount(
            &ctx,
            created.uuid,
            DiscountKind::Percent,
            Decimal::from(10),
            -SignedDuration::from_hours(1),
            SignedDuration::from_hours(1),
        )
        .await?;
        add_discount(
            &ctx,
            created.uuid,
            DiscountKind::Fixed,
            Decimal::from(1),
            -SignedDuration::from_hours(2),
            SignedDuration::from_hours(2),
        )
        .await?;

        let active = ctx.products.active_discount(created.uuid).await?;

        assert_eq!(
            active.map(|discount| (discount.kind, discount.value)),
            Some((DiscountKind::Percent, Decimal::from(10)))
        );

        Ok(())
    }

    #[tokio::test]
    async fn active_discount_is_none_without_discounts() -> TestResult {
        let ctx = TestContext::new().await;
        let created = create_product(&ctx, "Tea", Decimal::from(3), 10).await?;

        assert!(ctx.products.active_discount(created.uuid).await?.is_none());

        Ok(())
    }
}
