//! The request gate.
//!
//! Every inbound request is classified once, before it reaches a page or a
//! procedure:
//!
//! 1. the locale is resolved from the leading path segment;
//! 2. the path is checked for being a locale root;
//! 3. session presence is read from the injected [`SessionReader`];
//! 4. the request either passes (possibly with a locale rewrite) or is
//!    redirected to a locale root.
//!
//! [`decide`] is the pure classification; [`Gate`] adds the session lookup
//! around it.
//!
//! [`SessionReader`]: kumiai_access::SessionReader

pub mod config;
pub mod decision;
pub mod gate;

pub use config::GateConfig;
pub use decision::{GateDecision, Passage, RedirectTarget, RequestContext, decide};
pub use gate::Gate;
