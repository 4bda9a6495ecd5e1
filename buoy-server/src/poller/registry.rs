//! The set of stations being polled.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::domain::{StationId, StationSnapshot};
use crate::ndbc::ReportSource;

use super::config::PollerConfig;
use super::error::RegistrationError;
use super::station::{PollStatus, PollerHandle, StationPoller};

/// A successfully registered station.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub station: StationId,
    /// Display title, the identifier as the user typed it.
    pub title: String,
}

/// Owns one background poller per registered station.
///
/// Stations are keyed case-insensitively, so `sjsn4` and `SJSN4` are one
/// registration.
pub struct StationRegistry<S: ReportSource> {
    source: S,
    config: PollerConfig,
    pollers: RwLock<HashMap<StationId, PollerHandle<S>>>,
}

impl<S: ReportSource> StationRegistry<S> {
    /// Create an empty registry.
    pub fn new(source: S, config: PollerConfig) -> Self {
        Self {
            source,
            config,
            pollers: RwLock::new(HashMap::new()),
        }
    }

    /// Validate a station and start polling it.
    ///
    /// Blocks until the validation fetch finishes. Nothing is registered if
    /// it fails.
    pub async fn register(&self, raw_id: &str) -> Result<Registration, RegistrationError> {
        let station = StationId::parse(raw_id)?;

        if self.pollers.read().await.contains_key(&station) {
            return Err(RegistrationError::AlreadyConfigured(station));
        }

        let poller = StationPoller::validate(self.source.clone(), station.clone()).await?;

        let mut pollers = self.pollers.write().await;
        // Another registration may have finished while we were validating
        if pollers.contains_key(&station) {
            return Err(RegistrationError::AlreadyConfigured(station));
        }

        let handle = poller.spawn(self.config.update_interval);
        pollers.insert(station.clone(), handle);

        info!(station = %station, "station registered");

        Ok(Registration {
            title: station.to_string(),
            station,
        })
    }

    /// Stop polling a station and drop its snapshot.
    ///
    /// Returns `false` if the station was not registered.
    pub async fn unregister(&self, station: &StationId) -> bool {
        let handle = self.pollers.write().await.remove(station);
        match handle {
            Some(handle) => {
                handle.shutdown().await;
                info!(station = %station, "station unregistered");
                true
            }
            None => false,
        }
    }

    /// Current snapshot of a registered station.
    pub async fn current(&self, station: &StationId) -> Option<Arc<StationSnapshot>> {
        let pollers = self.pollers.read().await;
        pollers.get(station).map(|handle| handle.current())
    }

    /// Last poll outcome of a registered station.
    pub async fn status(&self, station: &StationId) -> Option<PollStatus> {
        let pollers = self.pollers.read().await;
        pollers.get(station).map(|handle| handle.poller().status())
    }

    /// Poller for a registered station.
    pub async fn poller(&self, station: &StationId) -> Option<StationPoller<S>> {
        let pollers = self.pollers.read().await;
        pollers.get(station).map(|handle| handle.poller().clone())
    }

    /// Registered stations, sorted by identifier.
    pub async fn stations(&self) -> Vec<StationId> {
        let pollers = self.pollers.read().await;
        let mut stations: Vec<StationId> = pollers.keys().cloned().collect();
        stations.sort_by_key(|s| s.key());
        stations
    }

    pub async fn len(&self) -> usize {
        self.pollers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pollers.read().await.is_empty()
    }

    /// Stop every poller.
    pub async fn shutdown(&self) {
        let handles: Vec<_> = self.pollers.write().await.drain().map(|(_, h)| h).collect();
        futures::future::join_all(handles.into_iter().map(PollerHandle::shutdown)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldKey, FieldValue};
    use crate::ndbc::{MockResponse, MockSource};

    const REPORT: &str = "\
#YY  MM DD hh mm WDIR WSPD GST  WVHT   DPD   APD MWD   PRES  ATMP  WTMP  DEWP  VIS PTDY  TIDE
25 03 15 09 40 270  5.1  6.2   1.1     6     4 270 1015.2  18.1  21.3  15.0   MM   MM    MM
";

    async fn registry() -> (StationRegistry<MockSource>, MockSource) {
        let source = MockSource::new();
        source.set_report("41009", REPORT).await;
        source.set_report("SJSN4", REPORT).await;
        (
            StationRegistry::new(source.clone(), PollerConfig::default()),
            source,
        )
    }

    #[tokio::test]
    async fn register_returns_title() {
        let (registry, _) = registry().await;

        let registration = registry.register("  SjSn4 ").await.unwrap();
        assert_eq!(registration.title, "SjSn4");
        assert_eq!(registration.station, StationId::parse("sjsn4").unwrap());
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn blank_station_never_fetches() {
        let (registry, source) = registry().await;

        let err = registry.register("   ").await.unwrap_err();
        assert_eq!(err.code(), "invalid_station");
        let err = registry.register("../41009").await.unwrap_err();
        assert_eq!(err.code(), "invalid_station");
        assert_eq!(source.calls(), 0);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn failed_validation_registers_nothing() {
        let (registry, source) = registry().await;
        source.set("down", MockResponse::Unreachable).await;

        let err = registry.register("down").await.unwrap_err();
        assert_eq!(err.code(), "cannot_connect");

        let err = registry.register("nope").await.unwrap_err();
        assert_eq!(err.code(), "cannot_connect");

        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn duplicate_is_rejected_case_insensitively() {
        let (registry, source) = registry().await;

        registry.register("sjsn4").await.unwrap();
        let err = registry.register("SJSN4").await.unwrap_err();
        assert!(matches!(err, RegistrationError::AlreadyConfigured(_)));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn current_reads_snapshot() {
        let (registry, _) = registry().await;
        registry.register("41009").await.unwrap();

        let station = StationId::parse("41009").unwrap();
        let snapshot = registry.current(&station).await.unwrap();
        assert_eq!(
            snapshot.fields().get(FieldKey::WaterTemperature),
            &FieldValue::Real(21.3)
        );
        assert!(registry.status(&station).await.unwrap().last_update_success);

        let unknown = StationId::parse("SJSN4").unwrap();
        assert!(registry.current(&unknown).await.is_none());
    }

    #[tokio::test]
    async fn unregister_stops_poller() {
        let (registry, _) = registry().await;
        registry.register("41009").await.unwrap();
        let station = StationId::parse("41009").unwrap();
        let poller = registry.poller(&station).await.unwrap();

        assert!(registry.unregister(&station).await);
        assert!(poller.is_retired());
        assert!(registry.current(&station).await.is_none());
        assert!(!registry.unregister(&station).await);

        // Can be registered again afterwards
        registry.register("41009").await.unwrap();
    }

    #[tokio::test]
    async fn stations_are_listed_and_isolated() {
        let (registry, source) = registry().await;
        registry.register("SJSN4").await.unwrap();
        registry.register("41009").await.unwrap();

        let stations = registry.stations().await;
        let names: Vec<_> = stations.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["41009", "SJSN4"]);

        // A failing station does not disturb the other
        source.set("41009", MockResponse::Status(503)).await;
        let failing = registry.poller(&stations[0]).await.unwrap();
        assert!(!failing.refresh().await);
        let healthy = registry.poller(&stations[1]).await.unwrap();
        assert!(healthy.refresh().await);

        registry.shutdown().await;
        assert!(registry.is_empty().await);
        assert!(failing.is_retired());
    }
}
