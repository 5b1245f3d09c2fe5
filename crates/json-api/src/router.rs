//! App Router

use salvo::Router;

use crate::{brands, categories, lots, products};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler)
                        .push(Router::with_path("quote").get(products::quote::handler))
                        .push(Router::with_path("discount").get(products::discount::handler)),
                ),
        )
        .push(
            Router::with_path("brands")
                .get(brands::index::handler)
                .post(brands::create::handler),
        )
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .post(categories::create::handler),
        )
        .push(Router::with_path("lots/sweep").post(lots::sweep::handler))
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::StatusCode,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use larder::pricing::OrderQuote;
    use larder_app::ids::ProductUuid;
    use rust_decimal::Decimal;

    use crate::{
        products::quote::QuoteResponse,
        test_helpers::{TestMocks, mocked_service},
    };

    use super::*;

    #[tokio::test]
    async fn nested_product_routes_resolve() -> TestResult {
        let uuid = ProductUuid::new();
        let mut mocks = TestMocks::new();

        mocks
            .products
            .expect_quote_order()
            .once()
            .withf(move |u, quantity| *u == uuid && *quantity == 2)
            .return_once(|_, _| {
                Ok(OrderQuote {
                    total: Decimal::from(4),
                    unit_price: Decimal::from(2),
                    discounted_unit_price: Decimal::from(2),
                    discounted_quantity: 0,
                    full_price_quantity: 2,
                })
            });

        let service = mocked_service(mocks, app_router());

        let response: QuoteResponse =
            TestClient::get(format!("http://example.com/products/{uuid}/quote?quantity=2"))
                .send(&service)
                .await
                .take_json()
                .await?;

        assert_eq!(response.total, "4");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_routes_return_404() -> TestResult {
        let res = TestClient::get("http://example.com/carts")
            .send(&mocked_service(TestMocks::new(), app_router()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
