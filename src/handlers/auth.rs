use axum::{
    extract::{Json, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    context::RequestContext,
    error::Result,
    models::LoginRequest,
    state::AppState,
};

/// Handler for username/password login
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(request) = payload?;
    let response = state.auth.login(&request).await?;
    Ok((StatusCode::OK, Json(response)))
}

/// Sessions are stateless tokens; logging out only tells the client to drop its copy
pub async fn logout(ctx: RequestContext) -> impl IntoResponse {
    tracing::info!(user = %ctx.identity.username, "User logged out");
    StatusCode::NO_CONTENT
}

/// Who the current token belongs to
pub async fn me(ctx: RequestContext) -> impl IntoResponse {
    Json(ctx.identity)
}
