//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig, identity::IdentityProviderConfig, logging::LoggingConfig,
    payments::PaymentGatewayConfig, server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod identity;
pub(crate) mod logging;
pub(crate) mod payments;
pub(crate) mod server;

/// Quadmart JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "quadmart-json", about = "Quadmart JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Identity provider settings.
    #[command(flatten)]
    pub identity: IdentityProviderConfig,

    /// Payment gateway settings.
    #[command(flatten)]
    pub payments: PaymentGatewayConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
