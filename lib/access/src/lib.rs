//! Authentication state and role-hierarchy authorization for kumiai.
//!
//! This crate provides:
//! - The Role Hierarchy Evaluator (`Role`, `has_role`, `require_role`, ...)
//! - Session types (`Session`, `SessionId`, `SessionState`)
//! - The collaborator contracts the gate and procedures consume
//!   (`SessionReader`, `RoleSource`)
//! - Authorization and lookup error types
//!
//! # Access Control Model
//!
//! Roles form a single linear ladder: `VIEWER < MEMBER < ADMIN`. A higher
//! role holds every capability of the roles beneath it. Role values arrive as
//! loosely-typed strings from the user record; anything unrecognized ranks as
//! a viewer.
//!
//! # Example
//!
//! ```
//! use kumiai_access::{Role, has_role, require_admin};
//!
//! assert!(has_role("ADMIN", Role::Member));
//! assert!(!has_role("superuser", Role::Member));
//! assert!(require_admin(Some("MEMBER")).is_err());
//! ```

pub mod error;
pub mod role;
pub mod session;
pub mod source;

pub use error::{AuthorizationError, ErrorCode, RoleLookupError, SessionLookupError};
pub use role::{Role, has_role, is_admin, rank_of, require_admin, require_role};
pub use session::{Session, SessionId, SessionState};
pub use source::{RoleSource, SessionReader};
