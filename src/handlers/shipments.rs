use axum::{
    extract::{Json, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{
    context::RequestContext,
    error::Result,
    export::{EXPORT_FILENAME, XLSX_CONTENT_TYPE},
    models::{FormMetadata, ShipmentForm},
    state::AppState,
};

/// Field metadata for the entry form
pub async fn form_metadata(_ctx: RequestContext) -> impl IntoResponse {
    Json(FormMetadata::current())
}

/// Compute the dues of a form without storing it
pub async fn preview_dues(
    State(state): State<AppState>,
    _ctx: RequestContext,
    payload: std::result::Result<Json<ShipmentForm>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(form) = payload?;
    let dues = state.shipments.preview(&form)?;
    Ok((StatusCode::OK, Json(dues)))
}

/// Create a shipment record
pub async fn create_shipment(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: std::result::Result<Json<ShipmentForm>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(form) = payload?;
    let record = state.shipments.submit(&ctx, &form).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Get all shipment records
pub async fn list_shipments(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<impl IntoResponse> {
    let records = state.shipments.list(&ctx).await?;
    Ok((StatusCode::OK, Json(records)))
}

/// Dashboard totals
pub async fn shipment_summary(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<impl IntoResponse> {
    let summary = state.shipments.summary(&ctx).await?;
    Ok((StatusCode::OK, Json(summary)))
}

/// Download every record as an Excel workbook
pub async fn export_shipments(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<impl IntoResponse> {
    let workbook = state.shipments.export(&ctx).await?;

    let headers = [
        (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{EXPORT_FILENAME}\""),
        ),
    ];
    Ok((StatusCode::OK, headers, workbook))
}
