//! Centralized server configuration.
//!
//! Loaded once at startup via the `config` crate from environment variables.
//! Nested keys use `__` as the separator (`GATE__DEFAULT_LOCALE`) and list
//! values are comma-separated (`GATE__SUPPORTED_LOCALES=en,ja`). Nothing is
//! reloaded at runtime.

use kumiai_gate::GateConfig;
use kumiai_gate::config::DEFAULT_EXCLUDED_PREFIXES;
use kumiai_locale::{LocaleCode, LocaleConfig, LocaleConfigError};
use serde::Deserialize;
use std::time::Duration;

/// Server configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// PostgreSQL URL of the database holding sessions and users.
    pub database_url: String,

    /// Socket address to listen on.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Directory served under `/_next/static`.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Session cookie settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Connection pool settings.
    #[serde(default)]
    pub database_pool: PoolConfig,

    /// Request gate settings.
    #[serde(default)]
    pub gate: GateSettings,
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

/// Session-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Where the sign-in button on a locale root points. Handled by the
    /// external identity provider.
    #[serde(default = "default_sign_in_url")]
    pub sign_in_url: String,
}

fn default_cookie_name() -> String {
    "session".to_string()
}

fn default_sign_in_url() -> String {
    "/api/auth/signin".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            sign_in_url: default_sign_in_url(),
        }
    }
}

/// Database pool configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PoolConfig {
    /// Maximum open connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// How long a lookup waits for a connection before failing.
    #[serde(default = "default_acquire_timeout_seconds")]
    pub acquire_timeout_seconds: u64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_seconds() -> u64 {
    3
}

impl PoolConfig {
    /// Returns the acquire timeout as a `Duration`.
    #[must_use]
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_seconds)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            acquire_timeout_seconds: default_acquire_timeout_seconds(),
        }
    }
}

/// Request gate configuration as read from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct GateSettings {
    /// Locales the application can render.
    #[serde(default = "default_supported_locales")]
    pub supported_locales: Vec<LocaleCode>,

    /// Locale used when a request names none.
    #[serde(default = "default_locale")]
    pub default_locale: LocaleCode,

    /// Leading path segments that bypass the gate.
    #[serde(default = "default_excluded_prefixes")]
    pub excluded_prefixes: Vec<String>,
}

fn default_supported_locales() -> Vec<LocaleCode> {
    vec![LocaleCode::EN, LocaleCode::JA]
}

fn default_locale() -> LocaleCode {
    LocaleCode::EN
}

fn default_excluded_prefixes() -> Vec<String> {
    DEFAULT_EXCLUDED_PREFIXES.map(String::from).to_vec()
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            supported_locales: default_supported_locales(),
            default_locale: default_locale(),
            excluded_prefixes: default_excluded_prefixes(),
        }
    }
}

impl GateSettings {
    /// Validates the settings into a gate configuration.
    ///
    /// # Errors
    ///
    /// Fails if the default locale is not among the supported locales.
    pub fn into_gate_config(self) -> Result<GateConfig, LocaleConfigError> {
        let locales = LocaleConfig::new(self.supported_locales, self.default_locale)?;
        Ok(GateConfig::new(locales, self.excluded_prefixes))
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(environment())
    }

    fn from_source<T>(source: T) -> Result<Self, config::ConfigError>
    where
        T: config::Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }
}

/// Environment source: `__` nests keys and the two list keys split on `,`.
fn environment() -> config::Environment {
    config::Environment::default()
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("gate.supported_locales")
        .with_list_parse_key("gate.excluded_prefixes")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_json(json: &str) -> Result<ServerConfig, config::ConfigError> {
        ServerConfig::from_source(config::File::from_str(json, config::FileFormat::Json))
    }

    fn from_vars(vars: &[(&str, &str)]) -> Result<ServerConfig, config::ConfigError> {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_source(environment().source(Some(vars)))
    }

    #[test]
    fn environment_lists_and_nesting() {
        let config = from_vars(&[
            ("DATABASE_URL", "postgres://localhost/kumiai"),
            ("GATE__SUPPORTED_LOCALES", "en,ja,ko"),
            ("GATE__DEFAULT_LOCALE", "ja"),
            ("GATE__EXCLUDED_PREFIXES", "api,healthz"),
            ("SESSION__COOKIE_NAME", "sid"),
            ("SESSION__SIGN_IN_URL", "/auth/login"),
            ("STATIC_DIR", "/srv/kumiai/static"),
            ("DATABASE_POOL__MAX_CONNECTIONS", "12"),
        ])
        .expect("valid config");

        assert_eq!(config.session.cookie_name, "sid");
        assert_eq!(config.session.sign_in_url, "/auth/login");
        assert_eq!(config.static_dir, "/srv/kumiai/static");
        assert_eq!(config.database_pool.max_connections, 12);

        let gate = config.gate.into_gate_config().expect("valid gate config");
        let ko = LocaleCode::parse("ko").expect("code");
        assert_eq!(gate.locales().supported(), &[LocaleCode::EN, LocaleCode::JA, ko]);
        assert_eq!(gate.locales().default_locale(), LocaleCode::JA);
        assert_eq!(gate.excluded_prefixes(), &["api", "healthz"]);
    }

    #[test]
    fn environment_single_item_list() {
        let config = from_vars(&[
            ("DATABASE_URL", "postgres://localhost/kumiai"),
            ("GATE__SUPPORTED_LOCALES", "ja"),
            ("GATE__DEFAULT_LOCALE", "ja"),
        ])
        .expect("valid config");

        let gate = config.gate.into_gate_config().expect("valid gate config");
        assert_eq!(gate.locales().supported(), &[LocaleCode::JA]);
        assert_eq!(gate.excluded_prefixes(), &["api", "_next"]);
    }

    #[test]
    fn defaults_apply() {
        let config = from_json(r#"{ "database_url": "postgres://localhost/kumiai" }"#)
            .expect("valid config");

        assert_eq!(config.listen_addr, "127.0.0.1:3000");
        assert_eq!(config.static_dir, "static");
        assert_eq!(config.session.cookie_name, "session");
        assert_eq!(config.session.sign_in_url, "/api/auth/signin");
        assert_eq!(config.database_pool.max_connections, 5);
        assert_eq!(config.database_pool.acquire_timeout(), Duration::from_secs(3));

        let gate = config.gate.into_gate_config().expect("valid gate config");
        assert_eq!(gate, GateConfig::default());
    }

    #[test]
    fn gate_settings_override() {
        let config = from_json(
            r#"{
                "database_url": "postgres://localhost/kumiai",
                "gate": {
                    "supported_locales": ["ja", "ko"],
                    "default_locale": "ja",
                    "excluded_prefixes": ["api", "healthz"]
                }
            }"#,
        )
        .expect("valid config");

        let gate = config.gate.into_gate_config().expect("valid gate config");
        assert_eq!(gate.locales().default_locale(), LocaleCode::JA);
        assert!(!gate.locales().is_supported(LocaleCode::EN));
        assert_eq!(gate.excluded_prefixes(), &["api", "healthz"]);
    }

    #[test]
    fn default_locale_must_be_supported() {
        let config = from_json(
            r#"{
                "database_url": "postgres://localhost/kumiai",
                "gate": { "supported_locales": ["ja"], "default_locale": "en" }
            }"#,
        )
        .expect("config parses");

        assert!(config.gate.into_gate_config().is_err());
    }

    #[test]
    fn malformed_locale_is_rejected() {
        let result = from_json(
            r#"{
                "database_url": "postgres://localhost/kumiai",
                "gate": { "default_locale": "English" }
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn database_url_is_required() {
        assert!(from_json("{}").is_err());
    }
}
