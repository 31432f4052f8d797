//! Request gating and caller authentication for the kumiai server.
//!
//! This module provides:
//! - The gate middleware that runs in front of the router
//! - Extractors that authenticate callers of procedures and enforce roles
//! - Postgres-backed session and role lookups
//!
//! # Authorization Model
//!
//! Two separate questions are answered at two separate points:
//! - The gate asks only "is there a valid session?" and decides between
//!   passing the request and redirecting to a locale root.
//! - Procedures ask "does the caller's role rank high enough?" using the
//!   role stored on the user record, loaded fresh for every call.
//!
//! Nothing is cached between requests.

pub mod db;
pub mod middleware;

use crate::config::SessionConfig;
use kumiai_access::RoleSource;
use kumiai_gate::Gate;
use std::sync::Arc;

pub use middleware::{Caller, OptionalAuth, RequireAdmin, RequireAuth, RequireMember, request_gate};

/// Shared application state.
pub struct AppState {
    /// The request gate, including its session reader.
    pub gate: Gate,
    /// Where procedure guards load caller roles from.
    pub roles: Arc<dyn RoleSource>,
    /// Session cookie settings.
    pub session_config: SessionConfig,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(gate: Gate, roles: Arc<dyn RoleSource>, session_config: SessionConfig) -> Self {
        Self {
            gate,
            roles,
            session_config,
        }
    }
}
