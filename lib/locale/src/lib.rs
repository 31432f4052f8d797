//! Locale negotiation primitives for kumiai.
//!
//! Paths are matched against a small explicit grammar rather than regular
//! expressions:
//!
//! - a *locale code* is exactly two lowercase ASCII letters;
//! - a *locale root* is a path made of a single locale-code segment, with an
//!   optional trailing slash (`/en`, `/ja/`);
//! - an *excluded* path starts with a configured prefix segment or has a
//!   segment containing a `.` (a file extension).
//!
//! # Example
//!
//! ```
//! use kumiai_locale::{LocaleConfig, RequestPath};
//!
//! let config = LocaleConfig::default();
//! let path = RequestPath::parse("/ja/projects/42");
//! let resolution = config.resolve(&path);
//!
//! assert_eq!(resolution.locale().as_str(), "ja");
//! assert_eq!(resolution.downstream_path(), "/projects/42");
//! ```

pub mod code;
pub mod config;
pub mod path;

pub use code::LocaleCode;
pub use config::{LocaleConfig, LocaleConfigError, LocaleResolution};
pub use path::RequestPath;
