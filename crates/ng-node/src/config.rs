//! # Node Configuration
//!
//! Defaults, overridden from `NG_*` environment variables.
//!
//! | Variable              | Field                         | Default                 |
//! |-----------------------|-------------------------------|-------------------------|
//! | `NG_HTTP_HOST`        | `gateway.http.host`           | `0.0.0.0`               |
//! | `NG_HTTP_PORT`        | `gateway.http.port`           | `8080`                  |
//! | `NG_DATA_FILE`        | `storage.data_file`           | `data/users.txt`        |
//! | `NG_FILTER_BITS`      | `filter.size_bits`            | `1000000`               |
//! | `NG_FILTER_HASHES`    | `filter.hash_count`           | `3`                     |
//! | `NG_FILTER_SCHEME`    | `filter.scheme`               | `fnv1a`                 |
//! | `NG_EXPECTED_NAMES`   | sizing input, with FPR        | unset                   |
//! | `NG_TARGET_FPR`       | sizing input, with names      | unset                   |
//! | `NG_CORS_ORIGINS`     | `gateway.cors.allowed_origins`| `http://localhost:5173` |
//!
//! `NG_FILTER_BITS` and `NG_FILTER_HASHES` win over values derived from
//! `NG_EXPECTED_NAMES` / `NG_TARGET_FPR`.

use std::path::PathBuf;
use std::str::FromStr;

use ng_gateway::GatewayConfig;
use ng_membership::{FilterConfig, FilterConfigBuilder, FilterError, DEFAULT_DATA_FILE};
use tracing::info;

/// Complete node configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeConfig {
    /// HTTP gateway configuration.
    pub gateway: GatewayConfig,
    /// Name store configuration.
    pub storage: StorageConfig,
    /// Membership filter configuration.
    pub filter: FilterConfig,
}

impl NodeConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.filter.validate()?;
        self.gateway.validate()?;
        Ok(())
    }

    /// Build configuration from defaults plus a key lookup.
    ///
    /// `lookup` returns the raw value for an environment key, if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = NodeConfig::default();

        if let Some(host) = parse_var(&lookup, "NG_HTTP_HOST")? {
            config.gateway.http.host = host;
        }
        if let Some(port) = parse_var(&lookup, "NG_HTTP_PORT")? {
            config.gateway.http.port = port;
        }
        if let Some(path) = lookup("NG_DATA_FILE").filter(|v| !v.trim().is_empty()) {
            config.storage.data_file = PathBuf::from(path.trim());
        }
        if let Some(origins) = lookup("NG_CORS_ORIGINS") {
            config.gateway.cors.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }

        let mut filter = FilterConfigBuilder::new();
        if let Some(scheme) = lookup("NG_FILTER_SCHEME") {
            filter = filter.scheme(scheme.parse()?);
        }
        if let Some(names) = parse_var(&lookup, "NG_EXPECTED_NAMES")? {
            filter = filter.expected_names(names);
        }
        if let Some(fpr) = parse_var(&lookup, "NG_TARGET_FPR")? {
            filter = filter.target_fpr(fpr);
        }
        if let Some(bits) = parse_var(&lookup, "NG_FILTER_BITS")? {
            filter = filter.size_bits(bits);
        }
        if let Some(k) = parse_var(&lookup, "NG_FILTER_HASHES")? {
            filter = filter.hash_count(k);
        }
        config.filter = filter.build()?;

        config.validate()?;
        Ok(config)
    }
}

/// Load configuration from the process environment.
pub fn load_config() -> Result<NodeConfig, ConfigError> {
    let config = NodeConfig::from_lookup(|key| std::env::var(key).ok())?;
    info!(
        addr = %config.gateway.http_addr(),
        data_file = %config.storage.data_file.display(),
        size_bits = config.filter.size_bits,
        hash_count = config.filter.hash_count,
        scheme = %config.filter.scheme,
        "Configuration loaded"
    );
    Ok(config)
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}

/// Name store configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    /// Append-only name file.
    pub data_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment value did not parse.
    #[error("{key}={value:?} is not a valid value")]
    InvalidValue { key: &'static str, value: String },
    /// Filter sizing rejected.
    #[error(transparent)]
    Filter(#[from] FilterError),
    /// Gateway settings rejected.
    #[error(transparent)]
    Gateway(#[from] ng_gateway::ConfigError),
}
