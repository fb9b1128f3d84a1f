use std::sync::Arc;

use crate::{
    access::{Operation, authorize},
    context::RequestContext,
    db::ShipmentRepository,
    dues::{Dues, compute_dues},
    error::Result,
    export::excel::records_to_xlsx,
    models::{NewShipmentRecord, ShipmentForm, ShipmentRecord, ShipmentSummary},
    validation::{NegativeDuePolicy, validate_form},
};

/// Entry point for everything the form and the dashboard do with records
pub struct ShipmentService {
    repository: Arc<dyn ShipmentRepository>,
    negative_dues: NegativeDuePolicy,
}

impl ShipmentService {
    pub fn new(repository: Arc<dyn ShipmentRepository>, negative_dues: NegativeDuePolicy) -> Self {
        Self {
            repository,
            negative_dues,
        }
    }

    /// Validate a form and show the dues it would produce, without storing it
    pub fn preview(&self, form: &ShipmentForm) -> Result<Dues> {
        let draft = validate_form(form, self.negative_dues)?;
        Ok(compute_dues(
            draft.amount_charged,
            draft.toll_fees,
            draft.food_costs,
        ))
    }

    /// Validate a form, compute its dues and append it to the store
    pub async fn submit(&self, ctx: &RequestContext, form: &ShipmentForm) -> Result<ShipmentRecord> {
        authorize(ctx, Operation::Append)?;

        let draft = validate_form(form, self.negative_dues)?;
        let dues = compute_dues(draft.amount_charged, draft.toll_fees, draft.food_costs);
        let record = NewShipmentRecord::new(draft, dues, &ctx.identity.username);

        tracing::debug!(request_id = %ctx.request_id, ?record, "Appending shipment record");
        self.repository.append(record).await
    }

    /// Every stored record, for privileged roles
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<ShipmentRecord>> {
        authorize(ctx, Operation::ListAll)?;
        self.repository.list_all().await
    }

    /// Dashboard totals over every stored record
    pub async fn summary(&self, ctx: &RequestContext) -> Result<ShipmentSummary> {
        authorize(ctx, Operation::Summary)?;
        let records = self.repository.list_all().await?;
        Ok(ShipmentSummary::from_records(&records))
    }

    /// Spreadsheet snapshot of every stored record
    pub async fn export(&self, ctx: &RequestContext) -> Result<Vec<u8>> {
        authorize(ctx, Operation::Export)?;
        let records = self.repository.list_all().await?;

        tracing::info!(
            request_id = %ctx.request_id,
            user = %ctx.identity.username,
            records = records.len(),
            "Exporting shipment records"
        );
        records_to_xlsx(&records)
    }
}
