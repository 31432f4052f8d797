//! Errors returned by procedures.
//!
//! Every failure is rendered as JSON `{ "code": ..., "message": ... }` with a
//! matching status code, so the client can translate it into a user-visible
//! message or hide the action that triggered it.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kumiai_access::AuthorizationError;
use serde::Serialize;
use std::fmt;

/// Procedure-level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcedureError {
    /// The role guard or authentication check rejected the caller.
    Authorization(AuthorizationError),
    /// The request was malformed.
    BadRequest { message: String },
    /// No procedure matches the path.
    NotFound,
}

impl ProcedureError {
    /// Returns the wire code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Authorization(err) => err.code().as_str(),
            Self::BadRequest { .. } => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
        }
    }

    /// Returns the HTTP status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Authorization(AuthorizationError::Unauthenticated) => StatusCode::UNAUTHORIZED,
            Self::Authorization(AuthorizationError::Forbidden { .. }) => StatusCode::FORBIDDEN,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl fmt::Display for ProcedureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authorization(err) => write!(f, "{err}"),
            Self::BadRequest { message } => write!(f, "bad request: {message}"),
            Self::NotFound => write!(f, "no such procedure"),
        }
    }
}

impl std::error::Error for ProcedureError {}

impl From<AuthorizationError> for ProcedureError {
    fn from(err: AuthorizationError) -> Self {
        Self::Authorization(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for ProcedureError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kumiai_access::Role;

    #[test]
    fn forbidden_maps_to_403() {
        let err = ProcedureError::from(AuthorizationError::Forbidden {
            required: Role::Admin,
        });
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.code(), "FORBIDDEN");
        assert!(err.to_string().contains("Admin"));
    }

    #[test]
    fn unauthenticated_maps_to_401() {
        let err = ProcedureError::from(AuthorizationError::Unauthenticated);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.code(), "UNAUTHORIZED");
    }

    #[test]
    fn response_carries_status() {
        let response = ProcedureError::BadRequest {
            message: "unknown role".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
