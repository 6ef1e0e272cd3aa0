//! Sign Out Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::prelude::*;

use crate::{
    auth::{into_status_error, middleware::extract_bearer_token},
    extensions::*,
    state::State,
};

/// Sign Out Handler
///
/// Revokes the bearer token the request was made with.
#[endpoint(
    tags("auth"),
    summary = "Sign Out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Token revoked"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unknown token"),
    ),
)]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let token = extract_bearer_token(req)
        .ok_or_else(|| StatusError::unauthorized().brief("Missing bearer token"))?;

    state
        .app
        .auth
        .sign_out(token, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bazaar_app::auth::{AuthServiceError, MockAuthService};
    use salvo::{http::header::AUTHORIZATION, test::TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{open_service, strict_app};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        let mut app = strict_app();

        app.auth = Arc::new(auth);

        open_service(app, Router::with_path("auth/sign-out").post(handler))
    }

    #[tokio::test]
    async fn test_sign_out_revokes_presented_token() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_sign_out()
            .once()
            .withf(|token, _| token == "bz_v1_abc.def")
            .return_once(|_, _| Ok(()));

        let res = TestClient::post("http://example.com/auth/sign-out")
            .add_header(AUTHORIZATION, "Bearer bz_v1_abc.def", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_revoked_token_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_sign_out()
            .once()
            .return_once(|_, _| Err(AuthServiceError::NotFound));

        let res = TestClient::post("http://example.com/auth/sign-out")
            .add_header(AUTHORIZATION, "Bearer bz_v1_abc.def", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
