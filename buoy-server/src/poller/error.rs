//! Poll cycle and registration error types.

use crate::domain::{InvalidStation, StationId};
use crate::ndbc::FetchError;
use crate::report::NotAvailable;

/// Why a poll cycle produced no update.
///
/// In steady state every variant means the same thing to consumers: this
/// cycle failed and the previous snapshot is still current.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// The report could not be retrieved
    #[error("station unreachable: {0}")]
    Unreachable(#[from] FetchError),

    /// The report was retrieved but held no usable observation
    #[error("no usable data: {0}")]
    NoData(#[from] NotAvailable),

    /// The poller was torn down while the cycle was in flight
    #[error("poller has been shut down")]
    Retired,
}

/// Why a station could not be registered.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    /// Identifier is blank
    #[error(transparent)]
    InvalidStation(#[from] InvalidStation),

    /// Validation fetch failed at the transport or HTTP level
    #[error("cannot connect to NDBC: {0}")]
    Unreachable(FetchError),

    /// Validation fetch succeeded but the report was empty or malformed
    #[error("station has no usable data: {0}")]
    NoData(NotAvailable),

    /// A poller for this station already exists
    #[error("station {0} is already configured")]
    AlreadyConfigured(StationId),
}

impl RegistrationError {
    /// Short machine-readable code for user-facing messages.
    pub fn code(&self) -> &'static str {
        match self {
            RegistrationError::InvalidStation(_) => "invalid_station",
            RegistrationError::Unreachable(_) => "cannot_connect",
            RegistrationError::NoData(_) => "no_data",
            RegistrationError::AlreadyConfigured(_) => "already_configured",
        }
    }
}

impl From<UpdateError> for RegistrationError {
    fn from(err: UpdateError) -> Self {
        match err {
            UpdateError::Unreachable(e) => RegistrationError::Unreachable(e),
            UpdateError::NoData(e) => RegistrationError::NoData(e),
            UpdateError::Retired => RegistrationError::Unreachable(FetchError::Transport(
                "poller shut down during validation".to_string(),
            )),
        }
    }
}
