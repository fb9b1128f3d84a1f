use serde::Serialize;

/// Fraction of net revenue paid out to the driver.
pub const DRIVER_SHARE: f64 = 0.10;

/// Payout split for a single trip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dues {
    pub total_expenses: f64,
    pub net_revenue: f64,
    pub driver_due: f64,
    pub owner_due: f64,
}

/// Split the amount charged for a trip between driver and owner.
///
/// Tolls and food are paid out of the charge first; the driver gets
/// [`DRIVER_SHARE`] of what is left and the owner keeps the rest. Negative
/// results are returned as-is when the expenses exceed the charge.
pub fn compute_dues(amount_charged: f64, toll_fees: f64, food_costs: f64) -> Dues {
    let total_expenses = toll_fees + food_costs;
    let driver_due = DRIVER_SHARE * (amount_charged - total_expenses);
    let owner_due = amount_charged - total_expenses - driver_due;

    Dues {
        total_expenses,
        net_revenue: amount_charged - total_expenses,
        driver_due,
        owner_due,
    }
}
