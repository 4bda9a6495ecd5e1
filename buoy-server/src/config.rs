//! Server configuration from environment variables.
//!
//! | Variable                    | Default                    |
//! |-----------------------------|----------------------------|
//! | `BUOY_BIND_ADDR`            | `127.0.0.1:3000`           |
//! | `BUOY_STATIONS`             | none (comma separated)     |
//! | `NDBC_BASE_URL`             | `https://www.ndbc.noaa.gov`|
//! | `NDBC_TIMEOUT_SECS`         | `10`                       |
//! | `NDBC_UPDATE_INTERVAL_MINS` | `30`                       |

use std::net::SocketAddr;
use std::time::Duration;

use crate::ndbc::NdbcConfig;
use crate::poller::PollerConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Everything needed to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,
    /// Stations registered at startup.
    pub stations: Vec<String>,
    pub ndbc: NdbcConfig,
    pub poller: PollerConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// if it is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_raw = get("BUOY_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid {
                name: "BUOY_BIND_ADDR",
                value: bind_raw.clone(),
                reason: "expected host:port",
            })?;

        let stations = get("BUOY_STATIONS")
            .map(|list| parse_station_list(&list))
            .unwrap_or_default();

        let mut ndbc = NdbcConfig::default();
        if let Some(url) = get("NDBC_BASE_URL") {
            ndbc = ndbc.with_base_url(url.trim());
        }
        if let Some(secs) = get("NDBC_TIMEOUT_SECS") {
            ndbc = ndbc.with_timeout(parse_positive("NDBC_TIMEOUT_SECS", &secs)?);
        }

        let mut poller = PollerConfig::default();
        if let Some(mins) = get("NDBC_UPDATE_INTERVAL_MINS") {
            let mins = parse_positive("NDBC_UPDATE_INTERVAL_MINS", &mins)?;
            poller = poller.with_update_interval(Duration::from_secs(mins * 60));
        }

        Ok(Self {
            bind_addr,
            stations,
            ndbc,
            poller,
        })
    }
}

/// Split a comma separated station list, dropping blank entries.
fn parse_station_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_positive(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: "must be greater than zero",
        }),
        Err(_) => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: "expected a whole number",
        }),
    }
}
