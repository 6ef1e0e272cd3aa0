//! Server configuration module

use clap::Parser;

use crate::config::{
    auth::{AdminConfig, AuthConfig},
    db::DatabaseConfig,
    integrations::IntegrationsConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    store::StoreConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod integrations;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod store;

/// Bazaar JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "bazaar-json", about = "Bazaar storefront JSON API", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Traces and metrics settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// `OpenBao` settings for customer credentials.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Back-office credentials.
    #[command(flatten)]
    pub admin: AdminConfig,

    /// Store-wide settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Image hosting and recommendation endpoints.
    #[command(flatten)]
    pub integrations: IntegrationsConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // A missing .env file is fine.
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
