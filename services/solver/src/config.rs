use std::net::{AddrParseError, SocketAddr};
use std::str::FromStr;

use serde::Deserialize;
use strum_macros::EnumString;

use crate::error::ServerError;

/// Transport served by this process
#[derive(Debug, Clone, Copy, PartialEq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Tcp,
    Udp,
}

#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mode: String,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            host: "0.0.0.0".to_string(),
            port: 8080,
            mode: "tcp".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ::config::ConfigError> {
        let mut cfg = ::config::Config::new();
        cfg.merge(::config::Environment::new().prefix("APP").separator("_"))?;
        cfg.try_into()
    }

    pub fn mode(&self) -> Result<Mode, ServerError> {
        Mode::from_str(&self.mode).map_err(|_| ServerError::InvalidMode(self.mode.clone()))
    }

    pub fn addr(&self) -> Result<SocketAddr, AddrParseError> {
        Ok(SocketAddr::new(self.host.parse()?, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.mode().unwrap(), Mode::Tcp);
        assert_eq!(
            config.addr().unwrap(),
            "0.0.0.0:8080".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_modes() {
        assert_eq!(Mode::from_str("tcp").unwrap(), Mode::Tcp);
        assert_eq!(Mode::from_str("udp").unwrap(), Mode::Udp);
        assert!(Mode::from_str("http").is_err());
    }

    #[test]
    fn test_invalid_host() {
        let config = Config {
            host: "not-an-address".to_string(),
            ..Config::default()
        };
        assert!(config.addr().is_err());
    }
}
