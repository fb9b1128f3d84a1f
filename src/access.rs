use std::fmt;

use crate::context::RequestContext;
use crate::error::{AppError, Result};
use crate::models::Role;

/// Operations guarded by the access gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Append,
    ListAll,
    Summary,
    Export,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Append => "add records",
            Operation::ListAll => "view records",
            Operation::Summary => "view the dashboard",
            Operation::Export => "export records",
        };
        f.write_str(name)
    }
}

impl Role {
    /// Whether this role may invoke `operation`
    pub fn may(&self, operation: Operation) -> bool {
        match operation {
            Operation::Append => true,
            Operation::ListAll | Operation::Summary | Operation::Export => {
                matches!(self, Role::Admin | Role::Manager)
            }
        }
    }
}

/// Reject the call unless the caller's role allows `operation`
pub fn authorize(ctx: &RequestContext, operation: Operation) -> Result<()> {
    if ctx.identity.role.may(operation) {
        return Ok(());
    }

    tracing::warn!(
        request_id = %ctx.request_id,
        user = %ctx.identity.username,
        role = %ctx.identity.role,
        "Denied attempt to {}",
        operation
    );
    Err(AppError::Forbidden(format!(
        "role '{}' may not {}",
        ctx.identity.role, operation
    )))
}
