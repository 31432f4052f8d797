//! Postgres-backed session and role lookups.
//!
//! The `sessions` and `users` tables are owned by the identity-provider
//! sign-in flow and the user-management screens. These repositories only
//! read them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kumiai_access::{
    RoleLookupError, RoleSource, Session, SessionId, SessionLookupError, SessionReader,
    SessionState,
};
use kumiai_core::UserId;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

/// Row type for session queries.
#[derive(FromRow)]
struct SessionRow {
    id: String,
    user_id: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl SessionRow {
    fn try_into_session(self) -> Result<Session, SessionLookupError> {
        let user_id = UserId::from_str(&self.user_id).map_err(|e| SessionLookupError::Corrupt {
            session_id: self.id.clone(),
            reason: format!("invalid user id '{}': {e}", self.user_id),
        })?;

        Ok(Session::new(
            SessionId::new(self.id),
            user_id,
            self.created_at,
            self.expires_at,
        ))
    }
}

/// Reads sessions from the `sessions` table.
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Creates a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<SessionRow>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT id, user_id, created_at, expires_at
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
    }
}

#[async_trait]
impl SessionReader for SessionRepository {
    async fn resolve_session(
        &self,
        session_id: &SessionId,
    ) -> kumiai_core::Result<SessionState, SessionLookupError> {
        let row = self
            .find_by_id(session_id)
            .await
            .map_err(|e| SessionLookupError::Unavailable {
                reason: e.to_string(),
            })?;

        let Some(row) = row else {
            return Ok(SessionState::Anonymous);
        };

        let session = row.try_into_session()?;
        if session.is_expired() {
            tracing::debug!(
                user_id = %session.user_id(),
                created_at = %session.created_at(),
                expires_at = %session.expires_at(),
                "Session expired"
            );
        }
        Ok(session.state())
    }
}

/// Reads user roles from the `users` table.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the stored role of a user, if the user exists and has one.
    pub async fn find_role(&self, id: UserId) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(Option<String>,)> = sqlx::query_as(
            r#"
            SELECT role
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.and_then(|(role,)| role))
    }
}

#[async_trait]
impl RoleSource for UserRepository {
    async fn get_user_role(
        &self,
        user_id: UserId,
    ) -> kumiai_core::Result<Option<String>, RoleLookupError> {
        let role = self
            .find_role(user_id)
            .await
            .map_err(|e| RoleLookupError::Unavailable {
                reason: e.to_string(),
            })?;
        Ok(role)
    }
}
