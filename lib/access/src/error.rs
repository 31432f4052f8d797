//! Error types for the access crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `AuthorizationError`: role checks and missing authentication
//! - `SessionLookupError`: failures inside the session reader
//! - `RoleLookupError`: failures inside the role source

use std::fmt;

use crate::role::Role;

/// Machine-readable error code surfaced to callers of a procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The caller carries no valid session.
    Unauthorized,
    /// The caller's role ranks below the requirement.
    Forbidden,
}

impl ErrorCode {
    /// Returns the wire form of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from authorization checks.
///
/// Always recoverable: the caller decides how to present the rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationError {
    /// No authenticated session is attached to the call.
    Unauthenticated,
    /// The caller's role ranks below `required`.
    Forbidden { required: Role },
}

impl AuthorizationError {
    /// Returns the error code for this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Unauthenticated => ErrorCode::Unauthorized,
            Self::Forbidden { .. } => ErrorCode::Forbidden,
        }
    }
}

impl fmt::Display for AuthorizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "you must be signed in to do this"),
            Self::Forbidden { required } => {
                write!(f, "requires {} role or higher", required.label())
            }
        }
    }
}

impl std::error::Error for AuthorizationError {}

/// Errors from the external session reader.
///
/// The gate treats every variant as "unauthenticated".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLookupError {
    /// The session store could not be reached.
    Unavailable { reason: String },
    /// A stored session could not be decoded.
    Corrupt { session_id: String, reason: String },
}

impl fmt::Display for SessionLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { reason } => {
                write!(f, "session store unavailable: {reason}")
            }
            Self::Corrupt { session_id, reason } => {
                write!(f, "session '{session_id}' is corrupt: {reason}")
            }
        }
    }
}

impl std::error::Error for SessionLookupError {}

/// Errors from the external role source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleLookupError {
    /// The user store could not be reached.
    Unavailable { reason: String },
}

impl fmt::Display for RoleLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { reason } => {
                write!(f, "user store unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for RoleLookupError {}
