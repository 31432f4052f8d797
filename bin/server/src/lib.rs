//! kumiai web server.
//!
//! Hosts the request gate in front of the localized pages and the `/api`
//! procedures. See [`app::gated`] for how the pieces are put together.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod pages;
pub mod procedures;
