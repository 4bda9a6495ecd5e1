//! Polling configuration.

use std::time::Duration;

/// Default time between poll cycles: 30 minutes.
///
/// NDBC publishes roughly hourly, so this catches each new report with margin.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Shortest interval the poll loop will run at.
pub const MIN_UPDATE_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for station pollers.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Time between background poll cycles.
    pub update_interval: Duration,
}

impl PollerConfig {
    /// Set the time between poll cycles.
    ///
    /// Intervals below one second are raised to one second.
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval.max(MIN_UPDATE_INTERVAL);
        self
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            update_interval: DEFAULT_UPDATE_INTERVAL,
        }
    }
}
