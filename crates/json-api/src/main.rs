//! Quadmart JSON API Server

use std::{process, sync::Arc};

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
use tracing_subscriber::EnvFilter;

use quadmart_app::{
    auth::{IdentityConfig, IdentityHttpClient},
    context::AppContext,
    domain::wallet::{CheckoutClient, CheckoutConfig},
};

use crate::{config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod applications;
mod auth;
mod config;
mod extensions;
mod healthcheck;
mod notifications;
mod orders;
mod products;
mod profiles;
mod rewards;
mod service_requests;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod vendors;
mod wallet;

/// Quadmart JSON API Server entry point
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

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.log_level)),
        )
        .init();

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let identity = IdentityHttpClient::new(IdentityConfig {
        addr: config.identity.addr,
        api_key: config.identity.api_key,
    });

    let gateway = CheckoutClient::new(CheckoutConfig {
        addr: config.payments.addr,
        api_key: config.payments.api_key,
    });

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        Arc::new(identity),
        Arc::new(gateway),
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(Router::with_path("profile").get(profiles::get::handler))
                .push(
                    Router::with_path("vendors")
                        .get(vendors::index::handler)
                        .push(
                            Router::with_path("{uuid}")
                                .get(vendors::get::handler)
                                .patch(vendors::update::handler)
                                .push(
                                    Router::with_path("products")
                                        .get(products::index::handler)
                                        .post(products::create::handler),
                                )
                                .push(
                                    Router::with_path("orders")
                                        .get(orders::vendor_index::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("products/{uuid}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                )
                .push(
                    Router::with_path("orders")
                        .post(orders::create::handler)
                        .get(orders::index::handler)
                        .push(
                            Router::with_path("{uuid}")
                                .get(orders::get::handler)
                                .push(
                                    Router::with_path("status")
                                        .put(orders::update_status::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("service-requests")
                        .post(service_requests::create::handler)
                        .push(
                            Router::with_path("{uuid}/status")
                                .put(service_requests::update::handler),
                        ),
                )
                .push(
                    Router::with_path("applications")
                        .post(applications::create::handler)
                        .get(applications::index::handler)
                        .push(
                            Router::with_path("{uuid}/approve")
                                .post(applications::approve::handler),
                        )
                        .push(
                            Router::with_path("{uuid}/reject")
                                .post(applications::reject::handler),
                        ),
                )
                .push(
                    Router::with_path("rewards")
                        .get(rewards::index::handler)
                        .push(Router::with_path("{uuid}/redeem").post(rewards::redeem::handler)),
                )
                .push(
                    Router::with_path("wallet")
                        .push(Router::with_path("topup").post(wallet::topup::handler))
                        .push(Router::with_path("webhook").post(wallet::webhook::handler)),
                )
                .push(
                    Router::with_path("notifications")
                        .get(notifications::index::handler)
                        .push(
                            Router::with_path("{uuid}/read")
                                .put(notifications::mark_read::handler),
                        ),
                ),
        );

    let doc = OpenApi::new("Quadmart API", "0.1.0")
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}
