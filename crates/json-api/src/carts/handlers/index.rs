//! Cart Index Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{carts::get::CartResponse, extensions::*};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartsResponse {
    /// The list of carts
    pub carts: Vec<CartResponse>,
}

/// Cart Index Handler
///
/// Returns a list of carts in creation order.
#[endpoint(tags("carts"), summary = "List Carts")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartsResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let carts = state
        .app
        .carts
        .list_carts()
        .await
        .or_500("failed to fetch carts")?;

    Ok(Json(CartsResponse {
        carts: carts.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use uuid::Uuid;

    use trolley_app::domain::carts::{CartsServiceError, MockCartsService, records::CartUuid};

    use crate::test_helpers::{carts_service, make_cart};

    use super::*;

    fn make_service(repo: MockCartsService) -> Service {
        carts_service(repo, Router::with_path("carts").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_empty_list() -> TestResult {
        let mut repo = MockCartsService::new();

        repo.expect_list_carts().once().return_once(|| Ok(vec![]));

        repo.expect_get_cart().never();
        repo.expect_create_cart().never();
        repo.expect_delete_cart().never();

        let response: CartsResponse = TestClient::get("http://example.com/carts")
            .send(&make_service(repo))
            .await
            .take_json()
            .await?;

        assert!(response.carts.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_returns_carts_in_order() -> TestResult {
        let uuid_a = CartUuid::new();
        let uuid_b = CartUuid::new();

        let mut repo = MockCartsService::new();

        repo.expect_list_carts()
            .once()
            .return_once(move || Ok(vec![make_cart(uuid_a), make_cart(uuid_b)]));

        repo.expect_get_cart().never();
        repo.expect_create_cart().never();
        repo.expect_delete_cart().never();

        let response: CartsResponse = TestClient::get("http://example.com/carts")
            .send(&make_service(repo))
            .await
            .take_json()
            .await?;

        let uuids: Vec<Uuid> = response.carts.iter().map(|cart| cart.uuid).collect();

        assert_eq!(uuids, vec![uuid_a.into_uuid(), uuid_b.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_service_error_returns_500() -> TestResult {
        let mut repo = MockCartsService::new();

        repo.expect_list_carts()
            .once()
            .return_once(|| Err(CartsServiceError::TotalOverflow));

        repo.expect_get_cart().never();
        repo.expect_create_cart().never();
        repo.expect_delete_cart().never();

        let res = TestClient::get("http://example.com/carts")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
