//! Back-office Basic auth middleware.

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use salvo::{
    http::header::{AUTHORIZATION, WWW_AUTHENTICATE},
    prelude::*,
};
use tracing::warn;

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    let authorized = extract_basic_credentials(req)
        .is_some_and(|(username, password)| state.admin.matches(&username, &password));

    if !authorized {
        warn!("rejected back-office request");

        if res
            .add_header(WWW_AUTHENTICATE, "Basic realm=\"bazaar-admin\"", true)
            .is_err()
        {
            warn!("failed to set WWW-Authenticate header");
        }

        res.render(StatusError::unauthorized().brief("Admin credentials required"));
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

fn extract_basic_credentials(req: &Request) -> Option<(String, String)> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_string(), password.to_string()))
}
