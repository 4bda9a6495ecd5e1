//! Mock report source for testing without network access.
//!
//! Serves canned report text, per station, as if it came from NDBC. Responses
//! can be swapped at any time to script a sequence of poll cycles.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;

use crate::domain::StationId;

use super::error::FetchError;
use super::source::ReportSource;

/// What the mock answers for a station.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// HTTP 200 with this body
    Report(String),
    /// Any other HTTP status
    Status(u16),
    /// Connection-level failure
    Unreachable,
}

/// Mock report source backed by an in-memory table.
///
/// Stations without an entry answer 404, like NDBC does for unknown stations.
#[derive(Clone, Default)]
pub struct MockSource {
    /// Responses keyed by case-folded station id.
    responses: Arc<RwLock<HashMap<String, MockResponse>>>,
    /// Number of fetches served.
    calls: Arc<AtomicUsize>,
}

impl MockSource {
    /// Create a mock with no stations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock by loading report files from a directory.
    ///
    /// Expects files named `{STATION}.txt` (e.g. `41009.txt`), the same names
    /// NDBC serves them under.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, FetchError> {
        let data_dir = data_dir.as_ref();
        let mut responses = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            FetchError::Transport(format!("failed to read mock data directory: {}", e))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                FetchError::Transport(format!("failed to read directory entry: {}", e))
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("txt") {
                continue;
            }

            let Some(station) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Ok(station) = StationId::parse(station) else {
                continue;
            };

            let text = std::fs::read_to_string(&path).map_err(|e| {
                FetchError::Transport(format!("failed to read {:?}: {}", path, e))
            })?;

            responses.insert(station.key(), MockResponse::Report(text));
        }

        if responses.is_empty() {
            return Err(FetchError::Transport(format!(
                "no mock report files found in {:?}",
                data_dir
            )));
        }

        Ok(Self {
            responses: Arc::new(RwLock::new(responses)),
            calls: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Set what the mock answers for a station.
    pub async fn set(&self, station: &str, response: MockResponse) {
        let key = station.trim().to_ascii_lowercase();
        self.responses.write().await.insert(key, response);
    }

    /// Shorthand for answering with a report body.
    pub async fn set_report(&self, station: &str, text: impl Into<String>) {
        self.set(station, MockResponse::Report(text.into())).await;
    }

    /// List stations that have a response configured.
    pub async fn available_stations(&self) -> Vec<String> {
        self.responses.read().await.keys().cloned().collect()
    }

    /// Number of fetches served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ReportSource for MockSource {
    async fn fetch_report(&self, station: &StationId) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let responses = self.responses.read().await;
        match responses.get(&station.key()) {
            Some(MockResponse::Report(text)) => Ok(text.clone()),
            Some(MockResponse::Status(status)) => Err(FetchError::Status { status: *status }),
            Some(MockResponse::Unreachable) => Err(FetchError::Transport(format!(
                "mock station {} is unreachable",
                station
            ))),
            None => Err(FetchError::Status { status: 404 }),
        }
    }
}
