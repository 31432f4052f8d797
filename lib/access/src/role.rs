//! Role hierarchy evaluation.
//!
//! Roles are ranked `VIEWER = 0 < MEMBER = 1 < ADMIN = 2`. The ladder is
//! strictly linear: there are no per-resource overrides and no orthogonal
//! scopes, so holding a rank grants everything below it.
//!
//! The role being checked comes from the user record as a plain string.
//! Unknown or missing values rank as 0 and are never an error.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AuthorizationError;

/// Platform role stored on a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Read-only access.
    Viewer,
    /// Can create and edit projects.
    Member,
    /// Full administrative access.
    Admin,
}

impl Role {
    /// All roles, lowest rank first.
    pub const ALL: [Role; 3] = [Role::Viewer, Role::Member, Role::Admin];

    /// Returns the numeric rank used for hierarchy comparison.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Viewer => 0,
            Self::Member => 1,
            Self::Admin => 2,
        }
    }

    /// Returns the stored form of the role (`"ADMIN"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "VIEWER",
            Self::Member => "MEMBER",
            Self::Admin => "ADMIN",
        }
    }

    /// Returns the human-readable role name used in messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Viewer => "Viewer",
            Self::Member => "Member",
            Self::Admin => "Admin",
        }
    }

    /// Parses the stored form of a role. Matching is exact and case-sensitive.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == value)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the rank of a loosely-typed role value.
///
/// Absent and unrecognized values rank as 0.
#[must_use]
pub fn rank_of<'a>(actual: impl Into<Option<&'a str>>) -> u8 {
    actual
        .into()
        .and_then(Role::parse)
        .map_or(0, Role::rank)
}

/// Returns true if `actual` ranks at or above `required`.
#[must_use]
pub fn has_role<'a>(actual: impl Into<Option<&'a str>>, required: Role) -> bool {
    rank_of(actual) >= required.rank()
}

/// Fails with [`AuthorizationError::Forbidden`] unless `actual` ranks at or
/// above `required`.
///
/// # Errors
///
/// Returns `Forbidden` naming `required` when the rank check fails.
pub fn require_role<'a>(
    actual: impl Into<Option<&'a str>>,
    required: Role,
) -> Result<(), AuthorizationError> {
    if has_role(actual, required) {
        Ok(())
    } else {
        Err(AuthorizationError::Forbidden { required })
    }
}

/// Returns true if `actual` is an admin role.
#[must_use]
pub fn is_admin<'a>(actual: impl Into<Option<&'a str>>) -> bool {
    has_role(actual, Role::Admin)
}

/// Fails with [`AuthorizationError::Forbidden`] unless `actual` is an admin role.
///
/// # Errors
///
/// Returns `Forbidden` naming the admin role when the check fails.
pub fn require_admin<'a>(actual: impl Into<Option<&'a str>>) -> Result<(), AuthorizationError> {
    require_role(actual, Role::Admin)
}
