//! Domain types for NDBC buoy observations.
//!
//! Station identifiers, field keys and values, parsed observations and the
//! retained per-station snapshot. Types enforce their invariants at
//! construction time: a `StationId` is never blank and a `FieldMap` always
//! holds every field key.

mod field;
mod observation;
mod snapshot;
mod station;

pub use field::{COLUMN_COUNT, FieldKey, FieldKind, FieldMap, FieldValue};
pub use observation::{Observation, observed_at};
pub use snapshot::{ObservationDelta, StationSnapshot, merge};
pub use station::{InvalidStation, StationId};
