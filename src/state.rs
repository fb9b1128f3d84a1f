use axum::extract::FromRef;
use std::sync::Arc;

use crate::{
    config::Config,
    db::{DbPool, SqliteShipmentStore, UserStore},
    services::{AuthService, ShipmentService},
};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub shipments: Arc<ShipmentService>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>, shipments: Arc<ShipmentService>) -> Self {
        Self { auth, shipments }
    }

    /// Wire the SQLite-backed stores into the services
    pub fn from_pool(pool: DbPool, config: &Config, jwt_secret: &str) -> Self {
        let user_store = Arc::new(UserStore::new(pool.clone()));
        let shipment_store = Arc::new(SqliteShipmentStore::new(pool));

        let auth = Arc::new(AuthService::new(
            user_store,
            jwt_secret,
            config.jwt_expiration_hours,
        ));
        let shipments = Arc::new(ShipmentService::new(shipment_store, config.negative_dues));

        Self::new(auth, shipments)
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
