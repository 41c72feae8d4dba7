//! Gateway configuration with validation.

use axum::http::{HeaderName, HeaderValue, Method};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Main gateway configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// CORS configuration
    pub cors: CorsConfig,
}

impl GatewayConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cors.validate()
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 8080, 0 picks an ephemeral port)
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8080,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Enable CORS headers
    pub enabled: bool,
    /// Allowed origins (`*` for any)
    pub allowed_origins: Vec<String>,
    /// Allowed methods
    pub allowed_methods: Vec<String>,
    /// Allowed request headers (`*` for any)
    pub allowed_headers: Vec<String>,
    /// Preflight cache lifetime in seconds
    pub max_age: u64,
    /// Allow credentials
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["http://localhost:5173".to_string()],
            allowed_methods: vec!["GET".to_string(), "POST".to_string(), "OPTIONS".to_string()],
            allowed_headers: vec!["Content-Type".to_string()],
            max_age: 3600,
            allow_credentials: false,
        }
    }
}

impl CorsConfig {
    /// Every configured value must parse as its HTTP type
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }

        if self.allowed_origins.is_empty() {
            return Err(ConfigError::Invalid(
                "CORS enabled with no allowed origins".into(),
            ));
        }

        let wildcard_origin = self.allowed_origins.iter().any(|o| o == "*");
        if wildcard_origin && self.allow_credentials {
            return Err(ConfigError::Invalid(
                "credentials cannot be allowed for a wildcard origin".into(),
            ));
        }

        for origin in self.allowed_origins.iter().filter(|o| *o != "*") {
            HeaderValue::from_str(origin)
                .map_err(|_| ConfigError::InvalidOrigin(origin.clone()))?;
        }

        for method in &self.allowed_methods {
            method
                .parse::<Method>()
                .map_err(|_| ConfigError::InvalidMethod(method.clone()))?;
        }

        for header in self.allowed_headers.iter().filter(|h| *h != "*") {
            header
                .parse::<HeaderName>()
                .map_err(|_| ConfigError::InvalidHeader(header.clone()))?;
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Origin is not a valid header value
    #[error("invalid CORS origin: {0}")]
    InvalidOrigin(String),
    /// Unknown HTTP method
    #[error("invalid CORS method: {0}")]
    InvalidMethod(String),
    /// Header name does not parse
    #[error("invalid CORS header: {0}")]
    InvalidHeader(String),
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
