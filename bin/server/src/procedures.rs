//! Server-side procedures under `/api`.
//!
//! `/api` is excluded from the gate, so every procedure authenticates its
//! own caller through the extractors in [`crate::auth`]. Role enforcement
//! happens here, per call, against the role on the user record.

use axum::{
    Json, Router,
    extract::Path,
    routing::get,
};
use kumiai_access::{Role, has_role};
use kumiai_core::UserId;
use serde::Serialize;
use std::sync::Arc;

use crate::auth::{AppState, Caller, OptionalAuth, RequireAdmin, RequireAuth, RequireMember};
use crate::error::ProcedureError;

/// Routes for all procedures.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/session", get(session))
        .route("/api/roles/{role}", get(check_role))
        .route("/api/member/session", get(member_session))
        .route("/api/admin/session", get(admin_session))
}

/// Who the caller is, as far as the server knows.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    authenticated: bool,
    user_id: Option<UserId>,
    role: Option<String>,
}

impl From<Option<Caller>> for SessionResponse {
    fn from(caller: Option<Caller>) -> Self {
        match caller {
            Some(caller) => Self {
                authenticated: true,
                user_id: Some(caller.user_id),
                role: caller.role,
            },
            None => Self {
                authenticated: false,
                user_id: None,
                role: None,
            },
        }
    }
}

/// Result of a role check.
#[derive(Debug, Serialize)]
pub struct RoleCheckResponse {
    role: Role,
    allowed: bool,
}

async fn session(OptionalAuth(caller): OptionalAuth) -> Json<SessionResponse> {
    Json(caller.into())
}

/// Lets the client decide whether to show an action before attempting it.
async fn check_role(
    RequireAuth(caller): RequireAuth,
    Path(role): Path<String>,
) -> Result<Json<RoleCheckResponse>, ProcedureError> {
    let required = Role::parse(&role).ok_or_else(|| ProcedureError::BadRequest {
        message: format!("unknown role '{role}'"),
    })?;

    Ok(Json(RoleCheckResponse {
        role: required,
        allowed: has_role(caller.role(), required),
    }))
}

async fn member_session(RequireMember(caller): RequireMember) -> Json<SessionResponse> {
    Json(Some(caller).into())
}

async fn admin_session(RequireAdmin(caller): RequireAdmin) -> Json<SessionResponse> {
    Json(Some(caller).into())
}
