pub mod auth;
pub mod shipments;

/// Liveness probe
pub async fn health() -> &'static str {
    "ok"
}
