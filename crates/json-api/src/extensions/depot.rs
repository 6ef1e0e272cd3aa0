//! Depot helper extensions.

use std::any::Any;

use bazaar_app::domain::customers::records::CustomerUuid;
use salvo::prelude::{Depot, StatusError};

const CUSTOMER_UUID_KEY: &str = "customer_uuid";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }
}

/// The signed-in customer, set by the bearer auth middleware.
pub(crate) trait CustomerDepotExt {
    fn insert_customer_uuid(&mut self, customer: CustomerUuid);

    fn customer_uuid_or_401(&self) -> Result<CustomerUuid, StatusError>;
}

impl CustomerDepotExt for Depot {
    fn insert_customer_uuid(&mut self, customer: CustomerUuid) {
        self.insert(CUSTOMER_UUID_KEY, customer);
    }

    fn customer_uuid_or_401(&self) -> Result<CustomerUuid, StatusError> {
        self.get::<CustomerUuid>(CUSTOMER_UUID_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
