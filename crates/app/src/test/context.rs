//! Test context for service-level integration tests.

use jiff::tz::{Offset, TimeZone};
use sqlx::{Connection, PgConnection, PgPool, query};

use crate::{
    database::Db,
    domain::{
        carts::PgCartsService,
        coupons::{
            CouponsService, PgCouponsService,
            data::{CouponTerms, NewCoupon},
            records::{CouponRecord, CouponUuid},
        },
        customers::{PgCustomersRepository, PgCustomersService, records::CustomerUuid},
        feedback::PgFeedbackService,
        gifts::PgGiftsService,
        history::PgHistoryService,
        orders::PgOrdersService,
        product_requests::PgProductRequestsService,
        products::{
            PgProductsService, ProductsService,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
        returns::PgReturnsService,
        wishlists::PgWishlistsService,
    },
    test::helpers::product_details,
};

use super::db::{DB_PASSWORD, DB_USER, TestDb};

/// Name of the non-superuser app role used for RLS testing.
const APP_ROLE: &str = "bazaar_app_test";
const APP_ROLE_PASSWORD: &str = "bazaar_app_test_pass";

/// Store time zone used by tests: India Standard Time, UTC+05:30.
const IST_SECONDS: i32 = 5 * 3600 + 30 * 60;

pub(crate) struct TestContext {
    /// Superuser connection, for setup and for inspecting rows behind RLS.
    pub db: TestDb,
    /// Restricted connection every service runs on.
    pub app_db: Db,
    pub customer_uuid: CustomerUuid,
    pub customers: PgCustomersService,
    pub products: PgProductsService,
    pub coupons: PgCouponsService,
    pub carts: PgCartsService,
    pub wishlists: PgWishlistsService,
    pub history: PgHistoryService,
    pub orders: PgOrdersService,
    pub returns: PgReturnsService,
    pub feedback: PgFeedbackService,
    pub product_requests: PgProductRequestsService,
    pub gifts: PgGiftsService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;

        let app_db = Db::new(Self::setup_app_pool(&test_db).await);

        let time_zone = TimeZone::fixed(
            Offset::from_seconds(IST_SECONDS).expect("IST offset should be valid"),
        );

        let customer_uuid = Self::insert_customer(&test_db, "Asha").await;

        Self {
            customer_uuid,
            customers: PgCustomersService::new(app_db.clone()),
            products: PgProductsService::new(app_db.clone()),
            coupons: PgCouponsService::new(app_db.clone()),
            carts: PgCartsService::new(app_db.clone(), time_zone.clone()),
            wishlists: PgWishlistsService::new(app_db.clone()),
            history: PgHistoryService::new(app_db.clone()),
            orders: PgOrdersService::new(app_db.clone(), time_zone.clone()),
            returns: PgReturnsService::new(app_db.clone(), time_zone),
            feedback: PgFeedbackService::new(app_db.clone()),
            product_requests: PgProductRequestsService::new(app_db.clone()),
            gifts: PgGiftsService::new(app_db.clone()),
            app_db,
            db: test_db,
        }
    }

    /// Register another customer, useful for isolation tests.
    pub async fn create_customer(&self, name: &str) -> CustomerUuid {
        Self::insert_customer(&self.db, name).await
    }

    /// Add a physical Apparel product to the catalog.
    pub async fn create_product(&self, name: &str, price: u64) -> ProductRecord {
        self.products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                details: product_details(name, price),
            })
            .await
            .expect("Failed to create test product")
    }

    pub async fn create_coupon(&self, code: &str, terms: CouponTerms) -> CouponRecord {
        self.coupons
            .create_coupon(NewCoupon {
                uuid: CouponUuid::new(),
                code: code.to_string(),
                terms,
            })
            .await
            .expect("Failed to create test coupon")
    }

    async fn insert_customer(test_db: &TestDb, name: &str) -> CustomerUuid {
        let uuid = CustomerUuid::new();
        let email = format!("{}.{}@example.com", name.to_lowercase(), uuid.into_uuid().simple());

        let mut tx = test_db.pool().begin().await.expect("Failed to begin");

        PgCustomersRepository::new()
            .create_customer(&mut tx, uuid, &email, name, "unused")
            .await
            .expect("Failed to create test customer");

        tx.commit().await.expect("Failed to commit test customer");

        uuid
    }

    /// Create a non-superuser role (once per server) and return a pool connected as it.
    ///
    /// Superusers bypass RLS even with `FORCE ROW LEVEL SECURITY`, so services
    /// under test must connect through this restricted role.
    async fn setup_app_pool(test_db: &TestDb) -> PgPool {
        let su_url = &test_db.superuser_url;

        // CREATE ROLE is server-scoped, so run it from the maintenance database.
        let server_url = su_url.rsplit_once('/').map_or(su_url.as_str(), |(base, _)| base);

        let mut server_conn = PgConnection::connect(&format!("{server_url}/postgres"))
            .await
            .expect("Failed to connect to postgres database for role setup");

        let created = query(&format!(
            "CREATE ROLE {APP_ROLE} WITH LOGIN PASSWORD '{APP_ROLE_PASSWORD}' \
               NOSUPERUSER NOCREATEDB NOCREATEROLE"
        ))
        .execute(&mut server_conn)
        .await;

        // Parallel tests race to create the role: 42710 duplicate_object, 23505 unique_violation.
        match created {
            Ok(_) => {}
            Err(sqlx::Error::Database(ref error))
                if matches!(error.code().as_deref(), Some("42710" | "23505")) => {}
            Err(error) => panic!("Failed to create app role: {error}"),
        }

        query(&format!(
            "GRANT CONNECT ON DATABASE \"{}\" TO {APP_ROLE}",
            test_db.name
        ))
        .execute(&mut server_conn)
        .await
        .expect("Failed to grant CONNECT on test database");

        server_conn
            .close()
            .await
            .expect("Failed to close server connection");

        let mut db_conn = PgConnection::connect(su_url)
            .await
            .expect("Failed to connect to test database for privilege setup");

        for statement in [
            format!("GRANT USAGE ON SCHEMA public TO {APP_ROLE}"),
            format!(
                "GRANT SELECT, INSERT, UPDATE, DELETE ON ALL TABLES IN SCHEMA public TO {APP_ROLE}"
            ),
        ] {
            query(&statement)
                .execute(&mut db_conn)
                .await
                .expect("Failed to grant table privileges to app role");
        }

        db_conn
            .close()
            .await
            .expect("Failed to close db connection");

        let app_url = su_url.replacen(
            &format!("{DB_USER}:{DB_PASSWORD}"),
            &format!("{APP_ROLE}:{APP_ROLE_PASSWORD}"),
            1,
        );

        PgPool::connect(&app_url)
            .await
            .expect("Failed to create app pool")
    }
}
