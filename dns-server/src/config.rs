use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::Path,
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// The file read from the working directory when no configuration path is given.
pub const DEFAULT_CONFIG_FILE: &str = "dns-proxy.toml";

/// Runtime settings for the proxy. Every field has a default, so a configuration file only needs
/// to name the values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Address the proxy accepts client queries on.
    pub listen_address: SocketAddr,

    /// The resolver that cache misses are forwarded to.
    pub upstream_address: SocketAddr,

    /// How long to wait for the upstream to answer a single query.
    pub upstream_timeout_ms: u64,

    /// The number of queries that may be in flight at once.
    pub max_concurrent_queries: usize,

    /// Log filter passed to the logger (trace, debug, info, warn, error). `RUST_LOG` takes
    /// precedence when it is set.
    pub log_level: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listen_address: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8053),
            upstream_address: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 53),
            upstream_timeout_ms: 2000,
            max_concurrent_queries: 256,
            log_level: "info".to_string(),
        }
    }
}

/// Values given on the command line. They replace whatever the file or the defaults provide.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub listen_port: Option<u16>,
    pub upstream_address: Option<SocketAddr>,
    pub upstream_timeout_ms: Option<u64>,
    pub log_level: Option<String>,
}

impl ProxyConfig {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dns-proxy.toml in current directory
    /// 3. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::from_file(DEFAULT_CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.listen_port {
            self.listen_address.set_port(port);
        }
        if let Some(upstream) = overrides.upstream_address {
            self.upstream_address = upstream;
        }
        if let Some(timeout) = overrides.upstream_timeout_ms {
            self.upstream_timeout_ms = timeout;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upstream_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "upstream timeout cannot be 0".to_string(),
            ));
        }

        if self.max_concurrent_queries == 0 {
            return Err(ConfigError::Validation(
                "at least one concurrent query must be allowed".to_string(),
            ));
        }

        if self.upstream_address.port() == 0 {
            return Err(ConfigError::Validation(
                "upstream port cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    #[inline]
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }
}
