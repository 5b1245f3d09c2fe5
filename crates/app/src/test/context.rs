//! Test context for service-level integration tests.

use std::sync::Arc;

use jiff::{Timestamp, civil::Date};

use crate::{
    clock::MockClock,
    database::Db,
    domain::{
        brands::{BrandsService, BrandsServiceError, PgBrandsService, data::NewBrand, records::BrandRecord},
        categories::{
            CategoriesService, CategoriesServiceError, PgCategoriesService, data::NewCategory,
            records::CategoryRecord,
        },
        discounts::PgDiscountsService,
        lots::PgLotsService,
        products::PgProductsService,
    },
    ids::{BrandUuid, CategoryUuid},
};

use super::db::TestDb;

pub(crate) struct TestContext {
    // Keeps the per-test database alive
    _db: TestDb,
    pub(crate) today: Date,
    pub(crate) brand: BrandRecord,
    pub(crate) category: CategoryRecord,
    pub(crate) products: PgProductsService,
    pub(crate) brands: PgBrandsService,
    pub(crate) categories: PgCategoriesService,
    pub(crate) discounts: PgDiscountsService,
    pub(crate) lots: PgLotsService,
}

impl TestContext {
    pub(crate) async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());
        let today = Date::constant(2025, 6, 1);

        let mut clock = MockClock::new();
        clock.expect_today().returning(move || today);
        clock.expect_now().returning(Timestamp::now);

        let brands = PgBrandsService::new(db.clone());
        let categories = PgCategoriesService::new(db.clone());

        let brand = brands
            .create_brand(NewBrand {
                uuid: BrandUuid::new(),
                name: "Hillside".to_string(),
            })
            .await
            .expect("Failed to create default test brand");

        let category = categories
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: "Dairy".to_string(),
            })
            .await
            .expect("Failed to create default test category");

        Self {
            products: PgProductsService::new(db.clone(), Arc::new(clock)),
            discounts: PgDiscountsService::new(db.clone()),
            lots: PgLotsService::new(db),
            brands,
            categories,
            brand,
            category,
            today,
            _db: test_db,
        }
    }

    pub(crate) async fn create_brand(&self, name: &str) -> Result<BrandRecord, BrandsServiceError> {
        self.brands
            .create_brand(NewBrand {
                uuid: BrandUuid::new(),
                name: name.to_string(),
            })
            .await
    }

    pub(crate) async fn create_category(
        &self,
        name: &str,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        self.categories
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: name.to_string(),
            })
            .await
    }
}
