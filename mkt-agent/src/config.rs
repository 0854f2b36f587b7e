//! Participant configuration.
//!
//! Settings are merged from multiple sources with a clear precedence order:
//! default values, an optional configuration file, and environment variables.

use crate::proxy::PLATFORM_MARKET_SERVICE;
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Configuration for the reservation/offer protocol driver.
///
/// # Examples
///
/// ```
/// use mkt_agent::ProxyConfig;
/// use std::time::Duration;
///
/// // Use default configuration
/// let config = ProxyConfig::default();
/// assert_eq!(config.timeout, Duration::from_secs(60));
///
/// // Custom configuration
/// let config = ProxyConfig {
///     peer: "campus.market".to_owned(),
///     timeout: Duration::from_secs(5),
///     verbose_logging: false,
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProxyConfig {
    /// The identity of the market coordinator to call
    #[serde(default = "default_peer")]
    pub peer: String,

    /// How long to wait for each reservation or offer call
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Whether accepted offers are reported to the diagnostics sink
    #[serde(default = "default_true")]
    pub verbose_logging: bool,
}

fn default_peer() -> String {
    PLATFORM_MARKET_SERVICE.to_owned()
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_true() -> bool {
    true
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            peer: default_peer(),
            timeout: default_timeout(),
            verbose_logging: true,
        }
    }
}

/// The top-level participant configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AgentConfig {
    /// Protocol driver configuration (coordinator identity, call deadline, logging)
    #[serde(default)]
    pub proxy: ProxyConfig,
}

impl AgentConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. The config file, if one is given
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern
    /// `MKT_<SECTION>__<KEY>` to `<section>.<key>`, e.g.
    /// `MKT_PROXY__TIMEOUT=30s`.
    ///
    /// # Errors
    ///
    /// Fails if the file is given but missing or malformed, or if any source
    /// provides a value of the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::layered(path, environment())
    }

    fn layered(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        // Start with default values
        builder = builder.add_source(config::Config::try_from(&Self::default())?);

        // Layer on the config file
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        // Override with environment variables
        builder = builder.add_source(env);

        builder.build()?.try_deserialize()
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("MKT")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_defaults() {
        let config = AgentConfig::default();
        assert_eq!(config.proxy.peer, "platform.market");
        assert_eq!(config.proxy.timeout, Duration::from_secs(60));
        assert!(config.proxy.verbose_logging);
    }

    #[test]
    fn test_partial_section() {
        let config: AgentConfig =
            serde_json::from_str(r#"{ "proxy": { "timeout": "2m 30s" } }"#).unwrap();
        assert_eq!(config.proxy.timeout, Duration::from_secs(150));
        assert_eq!(config.proxy.peer, "platform.market");
    }

    #[test]
    fn test_missing_file() {
        let result = AgentConfig::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(result.is_err());
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn vars(pairs: &[(&str, &str)]) -> config::Environment {
        environment().source(Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = toml_file(
            r#"
            [proxy]
            peer = "campus.market"
            timeout = "10s"
            "#,
        );

        let config = AgentConfig::layered(Some(file.path()), vars(&[])).unwrap();
        assert_eq!(config.proxy.peer, "campus.market");
        assert_eq!(config.proxy.timeout, Duration::from_secs(10));
        assert!(config.proxy.verbose_logging);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = toml_file(
            r#"
            [proxy]
            peer = "campus.market"
            timeout = "10s"
            "#,
        );

        let config = AgentConfig::layered(
            Some(file.path()),
            vars(&[
                ("MKT_PROXY__TIMEOUT", "30s"),
                ("MKT_PROXY__VERBOSE_LOGGING", "false"),
                ("OTHER_PROXY__PEER", "ignored"),
            ]),
        )
        .unwrap();
        assert_eq!(config.proxy.timeout, Duration::from_secs(30));
        assert!(!config.proxy.verbose_logging);
        assert_eq!(config.proxy.peer, "campus.market");
    }

    #[test]
    fn test_env_without_file() {
        let config =
            AgentConfig::layered(None, vars(&[("MKT_PROXY__PEER", "district.market")])).unwrap();
        assert_eq!(config.proxy.peer, "district.market");
        assert_eq!(config.proxy.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_malformed_duration() {
        let result = AgentConfig::layered(None, vars(&[("MKT_PROXY__TIMEOUT", "soon")]));
        assert!(result.is_err());
    }
}
