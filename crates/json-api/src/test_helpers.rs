//! Test helpers.

use std::sync::Arc;

use bazaar::products::{ProductImage, ProductSpecifics, Variants};
use bazaar_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::MockCartsService,
        coupons::MockCouponsService,
        customers::{MockCustomersService, records::CustomerUuid},
        feedback::MockFeedbackService,
        gifts::MockGiftsService,
        history::MockHistoryService,
        orders::MockOrdersService,
        product_requests::MockProductRequestsService,
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        recommendations::MockRecommendationsService,
        returns::MockReturnsService,
        wishlists::MockWishlistsService,
    },
    integrations::MockImageHost,
};
use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::{AdminCredentials, State},
};

pub(crate) const TEST_CUSTOMER_UUID: CustomerUuid = CustomerUuid::from_uuid(Uuid::nil());

pub(crate) const ADMIN_USERNAME: &str = "admin";
pub(crate) const ADMIN_PASSWORD: &str = "s3cret";

/// Every service mocked with no expectations, so any unexpected call fails the test.
pub(crate) fn strict_app() -> AppContext {
    AppContext {
        auth: Arc::new(MockAuthService::new()),
        customers: Arc::new(MockCustomersService::new()),
        products: Arc::new(MockProductsService::new()),
        carts: Arc::new(MockCartsService::new()),
        wishlists: Arc::new(MockWishlistsService::new()),
        history: Arc::new(MockHistoryService::new()),
        recommendations: Arc::new(MockRecommendationsService::new()),
        coupons: Arc::new(MockCouponsService::new()),
        orders: Arc::new(MockOrdersService::new()),
        returns: Arc::new(MockReturnsService::new()),
        feedback: Arc::new(MockFeedbackService::new()),
        product_requests: Arc::new(MockProductRequestsService::new()),
        gifts: Arc::new(MockGiftsService::new()),
        images: Arc::new(MockImageHost::new()),
    }
}

pub(crate) fn state(app: AppContext) -> Arc<State> {
    State::shared(app, AdminCredentials::new(ADMIN_USERNAME, ADMIN_PASSWORD))
}

#[salvo::handler]
pub(crate) async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_customer_uuid(TEST_CUSTOMER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// A route served as if [`TEST_CUSTOMER_UUID`] had signed in.
pub(crate) fn customer_service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(app)))
            .hoop(inject_customer)
            .push(route),
    )
}

/// A route served without any identity, as public and admin handlers see it
/// once their middleware has passed.
pub(crate) fn open_service(app: AppContext, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state(app))).push(route))
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Classic Tee".to_string(),
        description: "Cotton crew neck".to_string(),
        price: 499_00,
        category: "Apparel".to_string(),
        subcategory: Some("T-Shirts".to_string()),
        keywords: vec!["cotton".to_string()],
        images: vec![ProductImage {
            url: "https://cdn.example.com/tee.png".to_string(),
            alt_text: None,
            color: None,
            is_primary: true,
        }],
        specifics: ProductSpecifics::Physical {
            variants: Variants {
                colors: vec!["Black".to_string()],
                sizes: vec!["M".to_string(), "L".to_string()],
            },
        },
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}
