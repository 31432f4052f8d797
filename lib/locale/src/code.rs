//! Two-letter locale codes.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

/// A locale code: exactly two lowercase ASCII letters (`en`, `ja`).
///
/// Holding a `LocaleCode` says nothing about whether the locale is
/// supported; that is decided by [`LocaleConfig`](crate::LocaleConfig).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocaleCode([u8; 2]);

impl LocaleCode {
    /// English.
    pub const EN: LocaleCode = LocaleCode(*b"en");
    /// Japanese.
    pub const JA: LocaleCode = LocaleCode(*b"ja");

    /// Parses a segment that matches the locale pattern.
    ///
    /// Returns `None` for anything that is not exactly two lowercase ASCII
    /// letters.
    #[must_use]
    pub fn parse(segment: &str) -> Option<Self> {
        match segment.as_bytes() {
            &[a, b] if a.is_ascii_lowercase() && b.is_ascii_lowercase() => Some(Self([a, b])),
            _ => None,
        }
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Both bytes are ASCII lowercase letters by construction.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Returns the path of this locale's root page (`/en`).
    #[must_use]
    pub fn root_path(&self) -> String {
        format!("/{}", self.as_str())
    }
}

impl fmt::Debug for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocaleCode({})", self.as_str())
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a locale code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLocaleCode(pub String);

impl fmt::Display for InvalidLocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not a locale code (expected two lowercase letters)",
            self.0
        )
    }
}

impl std::error::Error for InvalidLocaleCode {}

impl FromStr for LocaleCode {
    type Err = InvalidLocaleCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidLocaleCode(s.to_string()))
    }
}

impl Serialize for LocaleCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LocaleCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
