//! The fetch seam between the poller and the network.

use std::future::Future;

use crate::domain::StationId;

use super::error::FetchError;

/// Something that can retrieve a station's raw realtime2 report.
///
/// This abstraction allows pollers to be tested without network access.
pub trait ReportSource: Clone + Send + Sync + 'static {
    /// Fetch the report text for `station`.
    ///
    /// Returns the body of a successful response; every other outcome is a
    /// [`FetchError`].
    fn fetch_report(
        &self,
        station: &StationId,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}
