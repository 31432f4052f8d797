//! Collaborator contracts for session and role lookups.
//!
//! Both lookups are owned by external systems (the identity provider's
//! session store and the user table). The gate and the procedure guards only
//! see these traits, so they can be driven by in-memory doubles in tests.

use async_trait::async_trait;
use kumiai_core::{Result, UserId};

use crate::error::{RoleLookupError, SessionLookupError};
use crate::session::{SessionId, SessionState};

/// Answers "does this session token prove an authenticated user?".
#[async_trait]
pub trait SessionReader: Send + Sync {
    /// Resolves a session token into an authentication state.
    ///
    /// Unknown and expired tokens resolve to [`SessionState::Anonymous`].
    /// Errors are reserved for the store itself failing.
    async fn resolve_session(
        &self,
        session_id: &SessionId,
    ) -> Result<SessionState, SessionLookupError>;
}

/// Returns the role stored on a user record.
#[async_trait]
pub trait RoleSource: Send + Sync {
    /// Returns the raw role value for `user_id`, or `None` if the user has
    /// no role or does not exist.
    async fn get_user_role(&self, user_id: UserId) -> Result<Option<String>, RoleLookupError>;
}
