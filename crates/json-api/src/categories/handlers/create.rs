//! Create Category Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_app::{domain::categories::data::NewCategory, ids::CategoryUuid};

use crate::{
    categories::{errors::into_status_error, index::CategoryResponse},
    extensions::*,
};

/// Create Category Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCategoryRequest {
    /// Generated when omitted
    pub uuid: Option<Uuid>,

    /// Unique category name
    pub name: String,
}

/// Create Category Handler
#[endpoint(
    tags("categories"),
    summary = "Create Category",
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
        (status_code = StatusCode::CONFLICT, description = "Category already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let request = json.into_inner();

    if request.name.trim().is_empty() {
        return Err(StatusError::bad_request().brief("name cannot be empty"));
    }

    let category = state
        .app
        .categories
        .create_category(NewCategory {
            uuid: request.uuid.map_or_else(CategoryUuid::new, Into::into),
            name: request.name,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(category.into()))
}

#[cfg(test)]
mod tests {
    use larder_app::domain::categories::{CategoriesServiceError, records::CategoryRecord};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{TestMocks, mocked_service};

    use super::*;

    fn make_service(mocks: TestMocks) -> Service {
        mocked_service(mocks, Router::with_path("categories").post(handler))
    }

    #[tokio::test]
    async fn test_create_category_success() -> TestResult {
        let mut mocks = TestMocks::new();

        mocks
            .categories
            .expect_create_category()
            .once()
            .withf(|category| category.name == "Dairy")
            .return_once(|category| {
                Ok(CategoryRecord {
                    uuid: category.uuid,
                    name: category.name,
                })
            });

        let mut res = TestClient::post("http://example.com/categories")
            .json(&json!({ "name": "Dairy" }))
            .send(&make_service(mocks))
            .await;

        let response: CategoryResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(response.name, "Dairy");

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_category_returns_409() -> TestResult {
        let mut mocks = TestMocks::new();

        mocks
            .categories
            .expect_create_category()
            .once()
            .return_once(|_| Err(CategoriesServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/categories")
            .json(&json!({ "name": "Dairy" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_name_returns_400() -> TestResult {
        let mut mocks = TestMocks::new();

        mocks.categories.expect_create_category().never();

        let res = TestClient::post("http://example.com/categories")
            .json(&json!({ "name": "  " }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
