//! Application state for the web layer.

use std::sync::Arc;

use crate::ndbc::ReportSource;
use crate::poller::StationRegistry;

/// Shared application state.
pub struct AppState<S: ReportSource> {
    /// Registered stations and their pollers
    pub registry: Arc<StationRegistry<S>>,
}

impl<S: ReportSource> AppState<S> {
    /// Create a new app state.
    pub fn new(registry: Arc<StationRegistry<S>>) -> Self {
        Self { registry }
    }
}

impl<S: ReportSource> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}
