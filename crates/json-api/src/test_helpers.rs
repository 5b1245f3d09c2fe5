//! Test helpers.

use std::sync::Arc;

use jiff::{Timestamp, civil::Date};
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use larder_app::{
    clock::MockClock,
    context::AppContext,
    domain::{
        brands::{MockBrandsService, records::BrandRecord},
        categories::{MockCategoriesService, records::CategoryRecord},
        discounts::MockDiscountsService,
        lots::MockLotsService,
        products::{MockProductsService, views::ProductView},
    },
    ids::{BrandUuid, CategoryUuid, ProductUuid},
};

use crate::state::State;

pub(crate) const TODAY: Date = Date::constant(2025, 6, 1);

/// 2025-06-01T12:00:00Z
pub(crate) const NOW: Timestamp = Timestamp::constant(1_748_779_200, 0);

/// Service mocks backing a test [`State`].
///
/// Mocks start without expectations, so any call a test did not set up panics.
pub(crate) struct TestMocks {
    pub(crate) products: MockProductsService,
    pub(crate) brands: MockBrandsService,
    pub(crate) categories: MockCategoriesService,
    pub(crate) discounts: MockDiscountsService,
    pub(crate) lots: MockLotsService,
}

impl TestMocks {
    pub(crate) fn new() -> Self {
        Self {
            products: MockProductsService::new(),
            brands: MockBrandsService::new(),
            categories: MockCategoriesService::new(),
            discounts: MockDiscountsService::new(),
            lots: MockLotsService::new(),
        }
    }
}

fn fixed_clock() -> MockClock {
    let mut clock = MockClock::new();

    clock.expect_today().return_const(TODAY);
    clock.expect_now().return_const(NOW);

    clock
}

pub(crate) fn state(mocks: TestMocks) -> Arc<State> {
    state_with_clock(mocks, fixed_clock())
}

pub(crate) fn state_with_clock(mocks: TestMocks, clock: MockClock) -> Arc<State> {
    State::from_app_context(AppContext {
        products: Arc::new(mocks.products),
        brands: Arc::new(mocks.brands),
        categories: Arc::new(mocks.categories),
        discounts: Arc::new(mocks.discounts),
        lots: Arc::new(mocks.lots),
        clock: Arc::new(clock),
    })
}

/// Service around `route` with no mocked service calls allowed.
pub(crate) fn service(route: Router) -> Service {
    mocked_service(TestMocks::new(), route)
}

pub(crate) fn mocked_service(mocks: TestMocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state(mocks))).push(route))
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    let mut mocks = TestMocks::new();

    mocks.products = products;

    mocked_service(mocks, route)
}

pub(crate) fn make_brand() -> BrandRecord {
    BrandRecord {
        uuid: BrandUuid::new(),
        name: "Hillside".to_string(),
    }
}

pub(crate) fn make_category() -> CategoryRecord {
    CategoryRecord {
        uuid: CategoryUuid::new(),
        name: "Dairy".to_string(),
    }
}

/// A full-price product view with ten units in stock.
pub(crate) fn make_product(uuid: ProductUuid) -> ProductView {
    ProductView {
        uuid,
        name: "Milk 1L".to_string(),
        unit_of_measure: "each".to_string(),
        price: Decimal::new(120, 2),
        current_price: Decimal::new(120, 2),
        has_active_discount: false,
        stock_quantity: 10,
        near_expiry_quantity: 0,
        expiration_date: None,
        brand: make_brand(),
        category: make_category(),
        discounts: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
