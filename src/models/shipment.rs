use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::dues::{Dues, DRIVER_SHARE};

/// Trucks offered by the entry form. Any other non-empty name is accepted.
pub const KNOWN_TRUCKS: [&str; 2] = ["Benz", "Volvo"];

/// Raw form submission from a client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShipmentForm {
    pub source: String,
    pub destination: String,
    pub product_name: String,
    /// Shipment date as `YYYY-MM-DD`
    pub date: String,
    pub quantity: i64,
    pub weight: f64,
    pub driver_name: String,
    pub truck: String,
    pub toll_fees: f64,
    pub food_costs: f64,
    pub amount_charged: f64,
}

/// A form that passed validation, with trimmed text and a parsed date
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentDraft {
    pub source: String,
    pub destination: String,
    pub product_name: String,
    pub date: NaiveDate,
    pub quantity: i64,
    pub weight: f64,
    pub driver_name: String,
    pub truck: String,
    pub toll_fees: f64,
    pub food_costs: f64,
    pub amount_charged: f64,
}

/// Fully populated row handed to the store; the store assigns the id
#[derive(Debug, Clone, PartialEq)]
pub struct NewShipmentRecord {
    pub source: String,
    pub destination: String,
    pub product_name: String,
    pub date: NaiveDate,
    pub quantity: i64,
    pub weight: f64,
    pub driver_name: String,
    pub truck: String,
    pub toll_fees: f64,
    pub food_costs: f64,
    pub amount_charged: f64,
    pub driver_due: f64,
    pub owner_due: f64,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl NewShipmentRecord {
    pub fn new(draft: ShipmentDraft, dues: Dues, created_by: &str) -> Self {
        Self {
            source: draft.source,
            destination: draft.destination,
            product_name: draft.product_name,
            date: draft.date,
            quantity: draft.quantity,
            weight: draft.weight,
            driver_name: draft.driver_name,
            truck: draft.truck,
            toll_fees: draft.toll_fees,
            food_costs: draft.food_costs,
            amount_charged: draft.amount_charged,
            driver_due: dues.driver_due,
            owner_due: dues.owner_due,
            created_by: created_by.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Stored shipment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRecord {
    pub id: i64,
    pub source: String,
    pub destination: String,
    pub product_name: String,
    pub date: NaiveDate,
    pub quantity: i64,
    pub weight: f64,
    pub driver_name: String,
    pub truck: String,
    pub toll_fees: f64,
    pub food_costs: f64,
    pub amount_charged: f64,
    pub driver_due: f64,
    pub owner_due: f64,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Static data the entry form needs to render itself
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormMetadata {
    pub known_trucks: Vec<String>,
    pub driver_share: f64,
}

impl FormMetadata {
    pub fn current() -> Self {
        Self {
            known_trucks: KNOWN_TRUCKS.iter().map(|t| t.to_string()).collect(),
            driver_share: DRIVER_SHARE,
        }
    }
}

/// Per-driver totals on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverTotals {
    pub driver_name: String,
    pub trips: u64,
    pub amount_charged: f64,
    pub driver_due: f64,
}

/// Dashboard totals over every stored record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentSummary {
    pub records: u64,
    pub total_quantity: i64,
    pub total_weight: f64,
    pub total_amount_charged: f64,
    pub total_toll_fees: f64,
    pub total_food_costs: f64,
    pub total_driver_due: f64,
    pub total_owner_due: f64,
    pub drivers: Vec<DriverTotals>,
}

impl ShipmentSummary {
    pub fn from_records(records: &[ShipmentRecord]) -> Self {
        let mut summary = Self::default();
        let mut drivers: BTreeMap<&str, DriverTotals> = BTreeMap::new();

        for record in records {
            summary.records += 1;
            summary.total_quantity = summary.total_quantity.saturating_add(record.quantity);
            summary.total_weight += record.weight;
            summary.total_amount_charged += record.amount_charged;
            summary.total_toll_fees += record.toll_fees;
            summary.total_food_costs += record.food_costs;
            summary.total_driver_due += record.driver_due;
            summary.total_owner_due += record.owner_due;

            let totals = drivers
                .entry(record.driver_name.as_str())
                .or_insert_with(|| DriverTotals {
                    driver_name: record.driver_name.clone(),
                    ..Default::default()
                });
            totals.trips += 1;
            totals.amount_charged += record.amount_charged;
            totals.driver_due += record.driver_due;
        }

        summary.drivers = drivers.into_values().collect();
        summary
    }
}
