//! Bazaar JSON API Server

use std::process;

use jiff::tz::TimeZone;
use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use bazaar_app::{
    auth::OpenBaoConfig,
    context::{AppContext, AppSettings},
    integrations::{ImageHostConfig, TextGeneratorConfig},
};

use crate::{
    config::ServerConfig,
    observability::{Observability, metrics_handler, request_logging},
    state::{AdminCredentials, State},
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod carts;
mod config;
mod coupons;
mod customers;
mod extensions;
mod feedback;
mod gifts;
mod healthcheck;
mod history;
mod images;
mod observability;
mod orders;
mod product_requests;
mod products;
mod recommendations;
mod returns;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod wishlist;

/// Bazaar JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Observability error: {e}");
        }

        process::exit(1);
    });

    let time_zone = match TimeZone::get(&config.store.time_zone) {
        Ok(time_zone) => time_zone,
        Err(tz_error) => {
            error!(time_zone = %config.store.time_zone, "unknown store time zone: {tz_error}");

            process::exit(1);
        }
    };

    let addr = config.socket_addr();
    let grace = config.server.shutdown_grace();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let settings = AppSettings {
        database_url: config.database.database_url,
        time_zone,
        openbao: OpenBaoConfig {
            addr: config.auth.addr,
            token: config.auth.token,
            transit_key: config.auth.transit_key,
        },
        images: ImageHostConfig {
            upload_url: config.integrations.image_upload_url,
            upload_preset: config.integrations.image_upload_preset,
        },
        text: TextGeneratorConfig {
            endpoint: config.integrations.recommendation_endpoint,
            model: config.integrations.recommendation_model,
            api_key: config.integrations.recommendation_api_key,
        },
    };

    let app = match AppContext::from_settings(settings).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let admin = AdminCredentials::new(config.admin.admin_username, config.admin.admin_password);

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(request_logging)
        .hoop(inject(State::shared(app, admin)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(router::app_router());

    let doc = OpenApi::new("Bazaar API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .add_security_scheme(
            "basic_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;

    observability.shutdown();
}
