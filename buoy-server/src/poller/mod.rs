//! Station polling.
//!
//! Each registered station gets a [`StationPoller`] that fetches its report on
//! a fixed interval, merges the newest observation into the retained
//! snapshot, and publishes the result. Failed cycles leave the snapshot as it
//! was; the loop keeps running until the poller is torn down.

mod config;
mod error;
mod registry;
mod station;

pub use config::{DEFAULT_UPDATE_INTERVAL, MIN_UPDATE_INTERVAL, PollerConfig};
pub use error::{RegistrationError, UpdateError};
pub use registry::{Registration, StationRegistry};
pub use station::{PollStatus, PollerHandle, StationPoller};
