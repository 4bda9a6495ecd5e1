//! Per-station poller.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::domain::{ObservationDelta, StationId, StationSnapshot};
use crate::ndbc::ReportSource;
use crate::report;

use super::config::MIN_UPDATE_INTERVAL;
use super::error::{RegistrationError, UpdateError};

/// Outcome of the most recent poll cycles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollStatus {
    /// Whether the last cycle updated the snapshot.
    pub last_update_success: bool,

    /// Failed cycles since the last success.
    pub consecutive_failures: u32,

    /// Message of the last failure, cleared on success.
    pub last_error: Option<String>,

    /// When the last cycle finished.
    pub last_attempt: Option<DateTime<Utc>>,
}

struct Inner<S> {
    station: StationId,
    source: S,
    snapshot: watch::Sender<Arc<StationSnapshot>>,
    status: watch::Sender<PollStatus>,
    retired: AtomicBool,
}

/// Fetches, parses and merges reports for one station.
///
/// Cloning gives another handle to the same station state. A poller can only
/// be obtained through [`StationPoller::register`] or
/// [`StationPoller::validate`], so every poller has succeeded at least once.
pub struct StationPoller<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for StationPoller<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ReportSource> StationPoller<S> {
    /// Validate a user-supplied identifier and create its poller.
    ///
    /// Blank or non-alphanumeric identifiers fail with `InvalidStation` before
    /// any fetch. The first poll runs to completion before this returns.
    pub async fn register(source: S, raw_id: &str) -> Result<Self, RegistrationError> {
        let station = StationId::parse(raw_id)?;
        Self::validate(source, station).await
    }

    /// Run the first poll for `station`; succeed only if it produced data.
    pub async fn validate(source: S, station: StationId) -> Result<Self, RegistrationError> {
        let (snapshot, _) = watch::channel(Arc::new(StationSnapshot::empty(station.clone())));
        let (status, _) = watch::channel(PollStatus::default());

        let poller = Self {
            inner: Arc::new(Inner {
                station,
                source,
                snapshot,
                status,
                retired: AtomicBool::new(false),
            }),
        };

        poller.poll().await?;
        Ok(poller)
    }

    pub fn station(&self) -> &StationId {
        &self.inner.station
    }

    /// The current snapshot.
    ///
    /// Never blocks on an in-flight poll; returns either the previous or the
    /// newly merged snapshot.
    pub fn current(&self) -> Arc<StationSnapshot> {
        Arc::clone(&self.inner.snapshot.borrow())
    }

    /// Receive every snapshot published from now on.
    pub fn subscribe(&self) -> watch::Receiver<Arc<StationSnapshot>> {
        self.inner.snapshot.subscribe()
    }

    pub fn status(&self) -> PollStatus {
        self.inner.status.borrow().clone()
    }

    /// Receive every status change from now on.
    pub fn subscribe_status(&self) -> watch::Receiver<PollStatus> {
        self.inner.status.subscribe()
    }

    pub fn is_retired(&self) -> bool {
        self.inner.retired.load(Ordering::SeqCst)
    }

    /// Run one poll cycle.
    ///
    /// On success the merged snapshot is published. On failure the snapshot
    /// is left as it was.
    pub async fn poll(&self) -> Result<ObservationDelta, UpdateError> {
        let result = self.cycle().await;

        match &result {
            Ok(_) => self.record(None),
            Err(UpdateError::Retired) => {}
            Err(e) => self.record(Some(e.to_string())),
        }

        result
    }

    async fn cycle(&self) -> Result<ObservationDelta, UpdateError> {
        let inner = &self.inner;

        let text = inner.source.fetch_report(&inner.station).await?;
        let observation = report::parse(&text)?;

        if self.is_retired() {
            return Err(UpdateError::Retired);
        }

        let fetched_at = Utc::now();
        let mut delta = ObservationDelta::default();
        inner.snapshot.send_modify(|current| {
            let (next, changes) = current.merged(&observation, fetched_at);
            *current = Arc::new(next);
            delta = changes;
        });

        Ok(delta)
    }

    fn record(&self, error: Option<String>) {
        let now = Utc::now();
        self.inner.status.send_modify(|status| {
            status.last_attempt = Some(now);
            match error {
                None => {
                    status.last_update_success = true;
                    status.consecutive_failures = 0;
                    status.last_error = None;
                }
                Some(message) => {
                    status.last_update_success = false;
                    status.consecutive_failures += 1;
                    status.last_error = Some(message);
                }
            }
        });
    }

    /// Run a steady-state cycle, logging instead of returning failures.
    ///
    /// Returns whether the snapshot was updated.
    pub async fn refresh(&self) -> bool {
        match self.poll().await {
            Ok(delta) if delta.is_empty() => {
                debug!(
                    station = %self.station(),
                    observed_at = ?delta.observed_at,
                    "report unchanged"
                );
                true
            }
            Ok(delta) => {
                debug!(
                    station = %self.station(),
                    updated = delta.updated.len(),
                    retained = delta.retained.len(),
                    observed_at = ?delta.observed_at,
                    "station updated"
                );
                true
            }
            Err(UpdateError::Retired) => false,
            Err(e) => {
                warn!(
                    station = %self.station(),
                    error = %e,
                    "update failed, keeping previous values"
                );
                false
            }
        }
    }

    /// Start polling in the background every `interval`.
    ///
    /// The first cycle runs one interval from now; registration already
    /// polled once. Dropping the returned handle stops the loop.
    pub fn spawn(&self, interval: Duration) -> PollerHandle<S> {
        let poller = self.clone();
        let period = interval.max(MIN_UPDATE_INTERVAL);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await; // First tick is immediate, skip it
            loop {
                ticker.tick().await;
                poller.refresh().await;
            }
        });

        info!(station = %self.station(), interval_secs = period.as_secs(), "polling started");

        PollerHandle {
            poller: self.clone(),
            task,
        }
    }

    /// Stop applying results. Fetches already in flight are discarded.
    fn retire(&self) {
        self.inner.retired.store(true, Ordering::SeqCst);
    }
}

/// Owns a station's background poll loop.
///
/// Dropping the handle retires the poller and aborts its loop.
pub struct PollerHandle<S: ReportSource> {
    poller: StationPoller<S>,
    task: JoinHandle<()>,
}

impl<S: ReportSource> PollerHandle<S> {
    pub fn poller(&self) -> &StationPoller<S> {
        &self.poller
    }

    pub fn current(&self) -> Arc<StationSnapshot> {
        self.poller.current()
    }

    /// True while the background loop is running.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop polling and wait for the loop to exit.
    pub async fn shutdown(mut self) {
        self.poller.retire();
        self.task.abort();
        let _ = (&mut self.task).await;
        info!(station = %self.poller.station(), "polling stopped");
    }
}

impl<S: ReportSource> Drop for PollerHandle<S> {
    fn drop(&mut self) {
        self.poller.retire();
        self.task.abort();
    }
}
