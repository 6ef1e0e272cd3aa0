//! Bazaar
//!
//! Storefront rules for a small online shop: cart pricing and coupons, order
//! and payment states, return eligibility, gift rewards and product
//! recommendations. Storage and transport live in the `bazaar-app` and
//! `bazaar-json` crates.

pub mod calendar;
pub mod coupons;
pub mod orders;
pub mod pricing;
pub mod products;
pub mod recommendations;
pub mod returns;
pub mod rewards;
