//! Validation of shipment form submissions.
//!
//! Every rule here runs before the dues are computed; a form that fails any
//! of them never reaches the store.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ShipmentDraft, ShipmentForm};

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A required text field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be at least `min`.
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: String, min: f64 },

    /// Value must be at most `max`.
    #[error("{field} must be at most {max}")]
    AboveMaximum { field: String, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// NaN or infinity.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Invalid date string.
    #[error("{field} has invalid format: {reason}")]
    InvalidDate { field: String, reason: String },

    /// Tolls and food together cost more than the trip was charged.
    #[error("toll fees and food costs ({expenses:.2}) exceed the amount charged ({amount:.2})")]
    ExpensesExceedCharge { expenses: f64, amount: f64 },
}

impl ValidationError {
    /// The form field the error refers to
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::MustBePositive { field }
            | ValidationError::BelowMinimum { field, .. }
            | ValidationError::AboveMaximum { field, .. }
            | ValidationError::Negative { field }
            | ValidationError::NotFinite { field }
            | ValidationError::InvalidDate { field, .. } => field,
            ValidationError::ExpensesExceedCharge { .. } => "amountCharged",
        }
    }
}

/// Largest quantity a single record may carry. Matches the table CHECK.
pub const MAX_QUANTITY: i64 = 1_000_000;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// What to do when tolls and food exceed the amount charged, which would
/// leave both dues negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegativeDuePolicy {
    /// Refuse the submission with [`ValidationError::ExpensesExceedCharge`].
    #[default]
    Reject,
    /// Store the record with negative dues.
    Allow,
}

impl FromStr for NegativeDuePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(NegativeDuePolicy::Reject),
            "allow" => Ok(NegativeDuePolicy::Allow),
            other => Err(format!("unknown negative dues policy '{other}'")),
        }
    }
}

impl fmt::Display for NegativeDuePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NegativeDuePolicy::Reject => f.write_str("reject"),
            NegativeDuePolicy::Allow => f.write_str("allow"),
        }
    }
}

pub(crate) fn required_text(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(value.to_string())
}

fn finite(field: &str, value: f64) -> ValidationResult<f64> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }
    Ok(value)
}

fn non_negative(field: &str, value: f64) -> ValidationResult<f64> {
    if finite(field, value)? < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(value)
}

/// Parses a `YYYY-MM-DD` shipment date.
pub fn parse_date(value: &str) -> ValidationResult<NaiveDate> {
    let value = required_text("date", value)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|e| ValidationError::InvalidDate {
        field: "date".to_string(),
        reason: e.to_string(),
    })
}

/// Validates a submitted form and returns the cleaned draft.
///
/// ## Rules
/// - source, destination, product name, driver name and truck must be non-blank
/// - date must be `YYYY-MM-DD`
/// - 1 ≤ quantity ≤ [`MAX_QUANTITY`], weight ≥ 1.0
/// - toll fees and food costs ≥ 0, amount charged > 0, all finite
/// - toll fees + food costs must stay finite, whatever the policy
/// - with [`NegativeDuePolicy::Reject`], toll fees + food costs ≤ amount charged
pub fn validate_form(form: &ShipmentForm, policy: NegativeDuePolicy) -> ValidationResult<ShipmentDraft> {
    let source = required_text("source", &form.source)?;
    let destination = required_text("destination", &form.destination)?;
    let product_name = required_text("productName", &form.product_name)?;
    let date = parse_date(&form.date)?;

    if form.quantity < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    if form.quantity > MAX_QUANTITY {
        return Err(ValidationError::AboveMaximum {
            field: "quantity".to_string(),
            max: MAX_QUANTITY,
        });
    }

    if finite("weight", form.weight)? < 1.0 {
        return Err(ValidationError::BelowMinimum {
            field: "weight".to_string(),
            min: 1.0,
        });
    }

    let driver_name = required_text("driverName", &form.driver_name)?;
    let truck = required_text("truck", &form.truck)?;
    let toll_fees = non_negative("tollFees", form.toll_fees)?;
    let food_costs = non_negative("foodCosts", form.food_costs)?;

    let amount_charged = finite("amountCharged", form.amount_charged)?;
    if amount_charged <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "amountCharged".to_string(),
        });
    }

    let expenses = finite("foodCosts", toll_fees + food_costs)?;
    if policy == NegativeDuePolicy::Reject && expenses > amount_charged {
        return Err(ValidationError::ExpensesExceedCharge {
            expenses,
            amount: amount_charged,
        });
    }

    Ok(ShipmentDraft {
        source,
        destination,
        product_name,
        date,
        quantity: form.quantity,
        weight: form.weight,
        driver_name,
        truck,
        toll_fees,
        food_costs,
        amount_charged,
    })
}
