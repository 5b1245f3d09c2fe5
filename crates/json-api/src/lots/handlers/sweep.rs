//! Run Lot Sweep Handler

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_app::domain::lots::report::{SweepFailure, SweepReport};

use crate::{extensions::*, lots::run_sweep};

/// Product that could not be saved during a sweep
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SweepFailureResponse {
    pub product: Uuid,
    pub name: String,
    pub reason: String,
}

impl From<SweepFailure> for SweepFailureResponse {
    fn from(failure: SweepFailure) -> Self {
        Self {
            product: failure.product.into(),
            name: failure.name,
            reason: failure.reason,
        }
    }
}

/// Sweep Report Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SweepResponse {
    /// Day swept for (YYYY-MM-DD)
    pub date: String,

    pub examined: usize,

    /// Lots newly marked near expiry
    pub activated: usize,

    /// Expired units removed
    pub decayed: usize,

    /// Changed products saved
    pub persisted: usize,

    pub failures: Vec<SweepFailureResponse>,
}

impl From<SweepReport> for SweepResponse {
    fn from(report: SweepReport) -> Self {
        Self {
            date: report.today.to_string(),
            examined: report.examined,
            activated: report.activated,
            decayed: report.decayed,
            persisted: report.persisted,
            failures: report.failures.into_iter().map(Into::into).collect(),
        }
    }
}

/// Run Lot Sweep Handler
///
/// Runs the daily lot sweep immediately, for `date` or today.
#[endpoint(
    tags("lots"),
    summary = "Run Lot Sweep",
    responses(
        (status_code = StatusCode::OK, description = "Sweep report; failures are listed, not fatal"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    date: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<SweepResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let today = date.into_date("date")?.unwrap_or_else(|| state.today());

    let report = run_sweep(state, today)
        .await
        .or_500("failed to run lot sweep")?;

    Ok(Json(report.into()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use larder_app::ids::ProductUuid;

    use crate::test_helpers::{TODAY, TestMocks, mocked_service};

    use super::*;

    fn report(today: jiff::civil::Date) -> SweepReport {
        SweepReport {
            today,
            examined: 3,
            activated: 1,
            decayed: 1,
            persisted: 2,
            failures: Vec::new(),
        }
    }

    fn make_service(mocks: TestMocks) -> Service {
        mocked_service(mocks, Router::with_path("lots/sweep").post(handler))
    }

    #[tokio::test]
    async fn test_sweep_defaults_to_today() -> TestResult {
        let mut mocks = TestMocks::new();

        mocks
            .lots
            .expect_run_daily_sweep()
            .once()
            .withf(|today| *today == TODAY)
            .return_once(|today| Ok(report(today)));

        let response: SweepResponse = TestClient::post("http://example.com/lots/sweep")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.date, "2025-06-01");
        assert_eq!(response.activated, 1);
        assert!(response.failures.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_sweep_for_explicit_date_reports_failures() -> TestResult {
        let product = ProductUuid::new();
        let mut mocks = TestMocks::new();

        mocks
            .lots
            .expect_run_daily_sweep()
            .once()
            .withf(|today| *today == date(2025, 6, 9))
            .return_once(move |today| {
                let mut report = report(today);

                report.persisted = 1;
                report.failures.push(SweepFailure {
                    product,
                    name: "Milk 1L".to_string(),
                    reason: "no rows returned".to_string(),
                });

                Ok(report)
            });

        let mut res = TestClient::post("http://example.com/lots/sweep?date=2025-06-09")
            .send(&make_service(mocks))
            .await;

        let response: SweepResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(response.failures.len(), 1, "expected one failure");
        assert_eq!(response.failures[0].product, product.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_sweep_malformed_date_returns_400() -> TestResult {
        let mut mocks = TestMocks::new();

        mocks.lots.expect_run_daily_sweep().never();

        let res = TestClient::post("http://example.com/lots/sweep?date=tomorrow")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
