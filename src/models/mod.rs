pub mod shipment;
pub mod user;

pub use shipment::{
    DriverTotals, FormMetadata, NewShipmentRecord, ShipmentDraft, ShipmentForm, ShipmentRecord,
    ShipmentSummary,
};
pub use user::{Claims, Identity, LoginRequest, LoginResponse, Role, User};
