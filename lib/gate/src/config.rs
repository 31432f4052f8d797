//! Static gate configuration.

use kumiai_locale::LocaleConfig;

/// Leading segments that bypass the gate unless configured otherwise.
pub const DEFAULT_EXCLUDED_PREFIXES: [&str; 2] = ["api", "_next"];

/// Locale settings plus the path prefixes the gate never touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    locales: LocaleConfig,
    excluded_prefixes: Vec<String>,
}

impl GateConfig {
    /// Creates a gate configuration.
    #[must_use]
    pub fn new(locales: LocaleConfig, excluded_prefixes: Vec<String>) -> Self {
        Self {
            locales,
            excluded_prefixes,
        }
    }

    /// Returns the locale configuration.
    #[must_use]
    pub fn locales(&self) -> &LocaleConfig {
        &self.locales
    }

    /// Returns the excluded leading segments.
    #[must_use]
    pub fn excluded_prefixes(&self) -> &[String] {
        &self.excluded_prefixes
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self::new(
            LocaleConfig::default(),
            DEFAULT_EXCLUDED_PREFIXES.map(String::from).to_vec(),
        )
    }
}
