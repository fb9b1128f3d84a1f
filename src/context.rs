use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{AppError, AuthError},
    models::Identity,
    services::AuthService,
};

/// Explicit per-request context passed into every service call
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: Uuid,
    pub identity: Identity,
}

impl RequestContext {
    pub fn new(identity: Identity) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            identity,
        }
    }
}

/// Extract the caller from an `Authorization: Bearer <token>` header
impl<S> FromRequestParts<S> for RequestContext
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_service = Arc::<AuthService>::from_ref(state);

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let identity = auth_service.verify_token(token)?;
        Ok(RequestContext::new(identity))
    }
}
