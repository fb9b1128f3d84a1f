use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{self, auth, shipments},
    state::AppState,
};

/// Build the application router
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route(
            "/shipments",
            get(shipments::list_shipments).post(shipments::create_shipment),
        )
        .route("/shipments/form", get(shipments::form_metadata))
        .route("/shipments/preview", post(shipments::preview_dues))
        .route("/shipments/summary", get(shipments::shipment_summary))
        .route("/shipments/export", get(shipments::export_shipments));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
