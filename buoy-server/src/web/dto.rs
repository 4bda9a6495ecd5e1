//! Data transfer objects for web requests and responses.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{FieldMap, FieldValue, StationId, StationSnapshot};
use crate::poller::PollStatus;
use crate::sensors::{MANUFACTURER, Reading, SensorValue, device_name};

/// Format a timestamp as RFC 3339 in UTC (e.g. `2025-03-15T09:40:00Z`).
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Request to register a station.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// NDBC station identifier (e.g., "41009")
    pub station_id: String,
}

/// A newly registered station.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub station_id: String,
    pub title: String,
}

/// Outcome of recent poll cycles.
#[derive(Debug, Serialize)]
pub struct StatusDto {
    pub last_update_success: bool,
    pub consecutive_failures: u32,
    pub last_error: Option<String>,
    pub last_attempt: Option<String>,
}

impl From<PollStatus> for StatusDto {
    fn from(status: PollStatus) -> Self {
        Self {
            last_update_success: status.last_update_success,
            consecutive_failures: status.consecutive_failures,
            last_error: status.last_error,
            last_attempt: status.last_attempt.map(format_timestamp),
        }
    }
}

/// A registered station in the station list.
#[derive(Debug, Serialize)]
pub struct StationSummary {
    pub station_id: String,
    pub name: String,
    pub status: StatusDto,
}

impl StationSummary {
    pub fn new(station: &StationId, status: PollStatus) -> Self {
        Self {
            station_id: station.to_string(),
            name: device_name(station),
            status: status.into(),
        }
    }
}

/// All registered stations.
#[derive(Debug, Serialize)]
pub struct StationListResponse {
    pub stations: Vec<StationSummary>,
}

/// Current best-known values for a station.
#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub station_id: String,

    /// Observation time from the report's calendar fields
    pub observed_at: Option<String>,

    /// When the report was last fetched successfully
    pub fetched_at: Option<String>,

    /// Every field key; `null` where nothing is known
    pub values: FieldMap,

    pub status: StatusDto,
}

impl SnapshotResponse {
    pub fn new(snapshot: &StationSnapshot, status: PollStatus) -> Self {
        Self {
            station_id: snapshot.station().to_string(),
            observed_at: snapshot.observed_at().map(format_timestamp),
            fetched_at: snapshot.fetched_at().map(format_timestamp),
            values: snapshot.fields().clone(),
            status: status.into(),
        }
    }
}

/// Device a station's sensors belong to.
#[derive(Debug, Serialize)]
pub struct DeviceDto {
    pub name: String,
    pub manufacturer: &'static str,
}

/// Value of a sensor reading.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ReadingValue {
    Timestamp(String),
    Field(FieldValue),
}

/// One sensor reading.
#[derive(Debug, Serialize)]
pub struct SensorReadingDto {
    pub key: &'static str,
    pub name: &'static str,
    pub unit: Option<&'static str>,
    pub device_class: Option<&'static str>,
    pub state_class: Option<&'static str>,
    pub value: Option<ReadingValue>,
}

impl From<&Reading> for SensorReadingDto {
    fn from(reading: &Reading) -> Self {
        let sensor = reading.sensor;
        let value = match &reading.value {
            SensorValue::Timestamp(ts) => Some(ReadingValue::Timestamp(format_timestamp(*ts))),
            SensorValue::Field(v) => Some(ReadingValue::Field(v.clone())),
            SensorValue::Unavailable => None,
        };

        Self {
            key: sensor.key,
            name: sensor.name,
            unit: sensor.unit,
            device_class: sensor.device_class.map(|c| c.as_str()),
            state_class: sensor.measurement.then_some("measurement"),
            value,
        }
    }
}

/// Sensor readings for a station.
#[derive(Debug, Serialize)]
pub struct SensorsResponse {
    pub station_id: String,
    pub device: DeviceDto,
    pub sensors: Vec<SensorReadingDto>,
}

impl SensorsResponse {
    pub fn new(station: &StationId, readings: &[Reading]) -> Self {
        Self {
            station_id: station.to_string(),
            device: DeviceDto {
                name: device_name(station),
                manufacturer: MANUFACTURER,
            },
            sensors: readings.iter().map(SensorReadingDto::from).collect(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}
