//! Supported-locale configuration and locale resolution.

use std::fmt;

use crate::code::LocaleCode;
use crate::path::RequestPath;

/// Errors from building a [`LocaleConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleConfigError {
    /// The supported set is empty.
    NoSupportedLocales,
    /// The default locale is not in the supported set.
    DefaultNotSupported { default: LocaleCode },
}

impl fmt::Display for LocaleConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSupportedLocales => write!(f, "at least one supported locale is required"),
            Self::DefaultNotSupported { default } => {
                write!(f, "default locale '{default}' is not a supported locale")
            }
        }
    }
}

impl std::error::Error for LocaleConfigError {}

/// The supported locales and the fallback locale.
///
/// Fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    supported: Vec<LocaleCode>,
    default: LocaleCode,
}

impl LocaleConfig {
    /// Creates a configuration.
    ///
    /// # Errors
    ///
    /// Fails if `supported` is empty or does not contain `default`.
    pub fn new(supported: Vec<LocaleCode>, default: LocaleCode) -> Result<Self, LocaleConfigError> {
        if supported.is_empty() {
            return Err(LocaleConfigError::NoSupportedLocales);
        }
        if !supported.contains(&default) {
            return Err(LocaleConfigError::DefaultNotSupported { default });
        }
        let mut unique = Vec::with_capacity(supported.len());
        for locale in supported {
            if !unique.contains(&locale) {
                unique.push(locale);
            }
        }
        Ok(Self {
            supported: unique,
            default,
        })
    }

    /// Returns the supported locales.
    #[must_use]
    pub fn supported(&self) -> &[LocaleCode] {
        &self.supported
    }

    /// Returns the default locale.
    #[must_use]
    pub fn default_locale(&self) -> LocaleCode {
        self.default
    }

    /// Returns true if `locale` is in the supported set.
    #[must_use]
    pub fn is_supported(&self, locale: LocaleCode) -> bool {
        self.supported.contains(&locale)
    }

    /// Resolves the locale a request should be rendered in.
    ///
    /// A supported locale prefix is honored and stripped. Anything else,
    /// including a well-formed but unsupported code, falls back to the
    /// default locale and leaves the path untouched.
    #[must_use]
    pub fn resolve(&self, path: &RequestPath<'_>) -> LocaleResolution {
        let prefix = path.locale_prefix();
        match prefix.filter(|code| self.is_supported(*code)) {
            Some(locale) => LocaleResolution {
                locale,
                prefix,
                downstream_path: path.without_first_segment(),
            },
            None => LocaleResolution {
                locale: self.default,
                prefix,
                downstream_path: normalized(path.raw()),
            },
        }
    }

    /// Returns the locale whose root an unauthenticated request is sent to.
    ///
    /// Any leading segment that matches the locale pattern is used, even if
    /// it is not supported; otherwise the default locale.
    #[must_use]
    pub fn redirect_locale(&self, path: &RequestPath<'_>) -> LocaleCode {
        path.locale_prefix().unwrap_or(self.default)
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            supported: vec![LocaleCode::EN, LocaleCode::JA],
            default: LocaleCode::EN,
        }
    }
}

fn normalized(raw: &str) -> String {
    if raw.starts_with('/') {
        raw.to_string()
    } else {
        format!("/{raw}")
    }
}

/// The outcome of locale resolution for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleResolution {
    locale: LocaleCode,
    prefix: Option<LocaleCode>,
    downstream_path: String,
}

impl LocaleResolution {
    /// The locale to render in. Always a supported locale.
    #[must_use]
    pub fn locale(&self) -> LocaleCode {
        self.locale
    }

    /// The leading segment, if it matched the locale pattern.
    #[must_use]
    pub fn prefix(&self) -> Option<LocaleCode> {
        self.prefix
    }

    /// The path left for downstream routing.
    #[must_use]
    pub fn downstream_path(&self) -> &str {
        &self.downstream_path
    }
}
