//! Shared types for the kumiai request-gating pipeline.
//!
//! This crate provides the identifier types and the `Result` alias that the
//! access, gate, and server crates build on.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ParseIdError, UserId};
