//! App Context

use std::sync::Arc;

use jiff::tz::TimeZone;
use thiserror::Error;
use tracing::info;

use crate::{
    auth::{AuthService, OpenBaoClient, OpenBaoConfig, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        coupons::{CouponsService, PgCouponsService},
        customers::{CustomersService, PgCustomersService},
        feedback::{FeedbackService, PgFeedbackService},
        gifts::{GiftsService, PgGiftsService},
        history::{HistoryService, PgHistoryService},
        orders::{OrdersService, PgOrdersService},
        product_requests::{PgProductRequestsService, ProductRequestsService},
        products::{PgProductsService, ProductsService},
        recommendations::{PgRecommendationsService, RecommendationsService},
        returns::{PgReturnsService, ReturnsService},
        wishlists::{PgWishlistsService, WishlistsService},
    },
    integrations::{
        GenerativeTextClient, HostedImageClient, ImageHost, ImageHostConfig, TextGeneratorConfig,
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("database role bypasses row-level security; connect as the restricted app role")]
    RlsBypass,
}

/// Everything needed to build the services.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    /// Zone whose calendar decides coupon expiry and return windows.
    pub time_zone: TimeZone,
    pub openbao: OpenBaoConfig,
    pub images: ImageHostConfig,
    pub text: TextGeneratorConfig,
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub customers: Arc<dyn CustomersService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub wishlists: Arc<dyn WishlistsService>,
    pub history: Arc<dyn HistoryService>,
    pub recommendations: Arc<dyn RecommendationsService>,
    pub coupons: Arc<dyn CouponsService>,
    pub orders: Arc<dyn OrdersService>,
    pub returns: Arc<dyn ReturnsService>,
    pub feedback: Arc<dyn FeedbackService>,
    pub product_requests: Arc<dyn ProductRequestsService>,
    pub gifts: Arc<dyn GiftsService>,
    pub images: Arc<dyn ImageHost>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Connect to the database and build every service.
    ///
    /// # Errors
    ///
    /// Returns an error when the database is unreachable or the connected role
    /// would bypass row-level security.
    pub async fn from_settings(settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(&settings.database_url)
            .await
            .map_err(AppInitError::Database)?;

        if database::role_bypasses_rls(&pool)
            .await
            .map_err(AppInitError::Database)?
        {
            return Err(AppInitError::RlsBypass);
        }

        info!(time_zone = ?settings.time_zone.iana_name(), "connected to database");

        let db = Db::new(pool);
        let tz = settings.time_zone;

        Ok(Self {
            auth: Arc::new(PgAuthService::new(
                db.clone(),
                Arc::new(OpenBaoClient::new(settings.openbao)),
            )),
            customers: Arc::new(PgCustomersService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone(), tz.clone())),
            wishlists: Arc::new(PgWishlistsService::new(db.clone())),
            history: Arc::new(PgHistoryService::new(db.clone())),
            recommendations: Arc::new(PgRecommendationsService::new(
                db.clone(),
                Arc::new(GenerativeTextClient::new(settings.text)),
            )),
            coupons: Arc::new(PgCouponsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone(), tz.clone())),
            returns: Arc::new(PgReturnsService::new(db.clone(), tz)),
            feedback: Arc::new(PgFeedbackService::new(db.clone())),
            product_requests: Arc::new(PgProductRequestsService::new(db.clone())),
            gifts: Arc::new(PgGiftsService::new(db)),
            images: Arc::new(HostedImageClient::new(settings.images)),
        })
    }
}
