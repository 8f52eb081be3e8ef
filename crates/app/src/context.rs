//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, IdentityProvider, PgAuthService},
    database::{self, Db},
    domain::{
        applications::{ApplicationsService, PgApplicationsService},
        notifications::{
            NotificationsService, PgNotificationsService, PushGateway, WebPushDispatcher,
        },
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        profiles::{PgProfilesService, ProfilesService},
        rewards::{PgRewardsService, RewardsService},
        service_requests::{PgServiceRequestsService, ServiceRequestsService},
        vendors::{PgVendorsService, VendorsService},
        wallet::{PaymentGateway, PgWalletService, WalletService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub profiles: Arc<dyn ProfilesService>,
    pub vendors: Arc<dyn VendorsService>,
    pub products: Arc<dyn ProductsService>,
    pub orders: Arc<dyn OrdersService>,
    pub service_requests: Arc<dyn ServiceRequestsService>,
    pub applications: Arc<dyn ApplicationsService>,
    pub rewards: Arc<dyn RewardsService>,
    pub wallet: Arc<dyn WalletService>,
    pub notifications: Arc<dyn NotificationsService>,
}

impl AppContext {
    /// Build application context from a database URL and the external
    /// service clients.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        identity: Arc<dyn IdentityProvider>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());
        let push: Arc<dyn PushGateway> = Arc::new(WebPushDispatcher::new(pool));

        Ok(Self {
            auth: Arc::new(PgAuthService::new(db.clone(), identity)),
            profiles: Arc::new(PgProfilesService::new(db.clone())),
            vendors: Arc::new(PgVendorsService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone(), Arc::clone(&push))),
            service_requests: Arc::new(PgServiceRequestsService::new(db.clone(), Arc::clone(&push))),
            applications: Arc::new(PgApplicationsService::new(db.clone())),
            rewards: Arc::new(PgRewardsService::new(db.clone())),
            wallet: Arc::new(PgWalletService::new(db.clone(), gateway)),
            notifications: Arc::new(PgNotificationsService::new(db)),
        })
    }
}
