//! Server configuration, read from an optional TOML file
//!
//! ```toml
//! host = "127.0.0.1"
//! port = 5001
//! artifacts_dir = "models"
//! debug = false
//! unknown_symptoms = "ignore"
//! ```

use medi_diagnose::UnknownSymptomPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_ARTIFACTS_DIR: &str = "models";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid host '{0}'")]
    Host(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub artifacts_dir: PathBuf,
    /// Expose internal error detail to clients and log at debug level
    pub debug: bool,
    pub unknown_symptoms: UnknownSymptomPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
            debug: false,
            unknown_symptoms: UnknownSymptomPolicy::Ignore,
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        parse_config(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::Host(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

pub fn parse_config(text: &str) -> Result<ServerConfig, toml::de::Error> {
    toml::from_str::<ServerConfig>(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 5001);
    }

    #[test]
    fn all_fields_parse() {
        let config = parse_config(
            r#"
            host = "0.0.0.0"
            port = 8080
            artifacts_dir = "/srv/models"
            debug = true
            unknown_symptoms = "reject"
            "#,
        )
        .unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.artifacts_dir, PathBuf::from("/srv/models"));
        assert!(config.debug);
        assert_eq!(config.unknown_symptoms, UnknownSymptomPolicy::Reject);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_config("prot = 1").is_err());
    }

    #[test]
    fn socket_addr_requires_ip_literal() {
        let mut config = ServerConfig::default();
        assert_eq!(
            config.socket_addr().unwrap(),
            "127.0.0.1:5001".parse::<SocketAddr>().unwrap()
        );
        config.host = "localhost".into();
        assert!(matches!(config.socket_addr(), Err(ConfigError::Host(_))));
    }

    #[test]
    fn from_file_reports_missing_path() {
        let err = ServerConfig::from_file(Path::new("/nonexistent/medi_ml.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/medi_ml.toml"));
    }
}
