pub mod auth_service;
pub mod shipment_service;

pub use auth_service::{AuthService, Authenticator};
pub use shipment_service::ShipmentService;
