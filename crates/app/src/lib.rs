//! Storefront services, Postgres persistence and external clients.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod integrations;
pub mod uuids;

#[cfg(test)]
mod test;
