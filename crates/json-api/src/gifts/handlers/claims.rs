//! Gift Claims Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    gifts::{GiftClaimResponse, errors::into_status_error},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct GiftClaimsResponse {
    pub claims: Vec<GiftClaimResponse>,
}

/// Gift Claims Handler
#[endpoint(
    tags("admin"),
    summary = "List Gift Claims",
    security(("basic_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<GiftClaimsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let claims = state
        .app
        .gifts
        .list_claims()
        .await
        .map_err(into_status_error)?;

    Ok(Json(GiftClaimsResponse {
        claims: claims.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::{customers::records::CustomerUuid, gifts::MockGiftsService};

    use crate::{
        gifts::tests::make_claim,
        test_helpers::{open_service, strict_app},
    };

    use super::*;

    #[tokio::test]
    async fn test_lists_claims_with_addresses() -> TestResult {
        let mut gifts = MockGiftsService::new();

        gifts
            .expect_list_claims()
            .once()
            .return_once(|| Ok(vec![make_claim(CustomerUuid::new())]));

        let mut app = strict_app();

        app.gifts = Arc::new(gifts);

        let body: GiftClaimsResponse = TestClient::get("http://example.com/admin/gift-claims")
            .send(&open_service(app, Router::with_path("admin/gift-claims").get(handler)))
            .await
            .take_json()
            .await?;

        assert_eq!(body.claims.len(), 1);
        assert_eq!(body.claims[0].shipping_address.postal_code, "560001");

        Ok(())
    }
}
