//! NDBC realtime2 HTTP client.

use std::time::Duration;

use tracing::debug;

use crate::domain::StationId;

use super::error::FetchError;
use super::source::ReportSource;

/// Default base URL for NDBC.
pub const DEFAULT_BASE_URL: &str = "https://www.ndbc.noaa.gov";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the NDBC client.
#[derive(Debug, Clone)]
pub struct NdbcConfig {
    /// Base URL for report downloads
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NdbcConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for NdbcConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Client for NDBC realtime2 station reports.
#[derive(Debug, Clone)]
pub struct NdbcClient {
    http: reqwest::Client,
    base_url: String,
}

impl NdbcClient {
    /// Create a new client with the given configuration.
    pub fn new(config: NdbcConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of a station's standard meteorological report.
    pub fn report_url(&self, station: &StationId) -> String {
        format!("{}/data/realtime2/{}.txt", self.base_url, station.as_str())
    }
}

impl ReportSource for NdbcClient {
    async fn fetch_report(&self, station: &StationId) -> Result<String, FetchError> {
        let url = self.report_url(station);

        let response = self.http.get(&url).send().await.inspect_err(|e| {
            debug!(station = %station, error = %e, "NDBC request failed");
        })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = NdbcConfig::default()
            .with_base_url("http://localhost:8080")
            .with_timeout(3);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn config_defaults() {
        let config = NdbcConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn report_url_uses_trimmed_station() {
        let client = NdbcClient::new(NdbcConfig::default()).unwrap();
        let station = StationId::parse("  41009 ").unwrap();
        assert_eq!(
            client.report_url(&station),
            "https://www.ndbc.noaa.gov/data/realtime2/41009.txt"
        );
    }

    #[test]
    fn report_url_drops_trailing_slash() {
        let config = NdbcConfig::default().with_base_url("http://127.0.0.1:9000/");
        let client = NdbcClient::new(config).unwrap();
        let station = StationId::parse("SJSN4").unwrap();
        assert_eq!(
            client.report_url(&station),
            "http://127.0.0.1:9000/data/realtime2/SJSN4.txt"
        );
    }
}
