//! Storefront Domain Concerns

pub mod carts;
pub mod coupons;
pub mod customers;
pub mod feedback;
pub mod gifts;
pub mod history;
pub mod orders;
pub mod product_requests;
pub mod products;
pub mod recommendations;
pub mod returns;
pub mod wishlists;
