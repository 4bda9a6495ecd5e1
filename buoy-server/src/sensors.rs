//! Consumer-facing sensor readings.
//!
//! A fixed catalogue of the measurements worth showing for a buoy, with the
//! units NDBC reports them in. Values come straight from the station snapshot;
//! nothing is converted.

use chrono::{DateTime, Utc};

use crate::domain::{FieldKey, FieldValue, StationId, StationSnapshot};

/// Manufacturer shown for every buoy device.
pub const MANUFACTURER: &str = "NOAA NDBC";

/// Kind of quantity a sensor measures, where one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Timestamp,
    Temperature,
    Pressure,
}

impl DeviceClass {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceClass::Timestamp => "timestamp",
            DeviceClass::Temperature => "temperature",
            DeviceClass::Pressure => "pressure",
        }
    }
}

/// Where a sensor's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorSource {
    /// The derived observation time
    ObservedAt,
    /// A report field
    Field(FieldKey),
}

/// Static description of one sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorDescription {
    pub key: &'static str,
    pub name: &'static str,
    pub unit: Option<&'static str>,
    pub device_class: Option<DeviceClass>,
    /// Whether the value is a point-in-time measurement.
    pub measurement: bool,
    pub source: SensorSource,
}

const fn field(
    key: &'static str,
    name: &'static str,
    unit: &'static str,
    device_class: Option<DeviceClass>,
    field: FieldKey,
) -> SensorDescription {
    SensorDescription {
        key,
        name,
        unit: Some(unit),
        device_class,
        measurement: true,
        source: SensorSource::Field(field),
    }
}

/// Every sensor exposed for a station.
pub static SENSORS: [SensorDescription; 12] = [
    SensorDescription {
        key: "last_updated",
        name: "Last Updated",
        unit: None,
        device_class: Some(DeviceClass::Timestamp),
        measurement: false,
        source: SensorSource::ObservedAt,
    },
    field(
        "wtmp",
        "Water Temperature",
        "°C",
        Some(DeviceClass::Temperature),
        FieldKey::WaterTemperature,
    ),
    field(
        "atmp",
        "Air Temperature",
        "°C",
        Some(DeviceClass::Temperature),
        FieldKey::AirTemperature,
    ),
    field(
        "dewp",
        "Dew Point",
        "°C",
        Some(DeviceClass::Temperature),
        FieldKey::DewPoint,
    ),
    field(
        "pres",
        "Pressure",
        "hPa",
        Some(DeviceClass::Pressure),
        FieldKey::Pressure,
    ),
    field("wdir", "Wind Direction", "°", None, FieldKey::WindDirection),
    field("wspd", "Wind Speed", "m/s", None, FieldKey::WindSpeed),
    field("gst", "Wind Gust", "m/s", None, FieldKey::GustSpeed),
    field("wvht", "Wave Height", "m", None, FieldKey::WaveHeight),
    field(
        "dpd",
        "Dominant Wave Period",
        "s",
        None,
        FieldKey::DominantWavePeriod,
    ),
    field(
        "apd",
        "Average Wave Period",
        "s",
        None,
        FieldKey::AverageWavePeriod,
    ),
    field(
        "mwdd",
        "Mean Wave Direction",
        "°",
        None,
        FieldKey::MeanWaveDirection,
    ),
];

/// Current value of a sensor.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorValue {
    Timestamp(DateTime<Utc>),
    Field(FieldValue),
    Unavailable,
}

/// A sensor paired with its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub sensor: &'static SensorDescription,
    pub value: SensorValue,
}

/// Display name of a station's device.
pub fn device_name(station: &StationId) -> String {
    format!("NOAA NDBC Ocean Weather {}", station)
}

/// Read one sensor from a snapshot.
pub fn read(sensor: &SensorDescription, snapshot: &StationSnapshot) -> SensorValue {
    match sensor.source {
        SensorSource::ObservedAt => snapshot
            .observed_at()
            .map_or(SensorValue::Unavailable, SensorValue::Timestamp),
        SensorSource::Field(key) => match snapshot.fields().get(key) {
            FieldValue::Absent => SensorValue::Unavailable,
            value => SensorValue::Field(value.clone()),
        },
    }
}

/// Read every sensor from a snapshot.
pub fn readings(snapshot: &StationSnapshot) -> Vec<Reading> {
    SENSORS
        .iter()
        .map(|sensor| Reading {
            sensor,
            value: read(sensor, snapshot),
        })
        .collect()
}

/// Look up a sensor by key.
pub fn sensor(key: &str) -> Option<&'static SensorDescription> {
    SENSORS.iter().find(|s| s.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldMap, Observation};
    use chrono::{Datelike, Timelike};

    fn snapshot() -> StationSnapshot {
        let mut fields = FieldMap::empty();
        fields.set(FieldKey::Year, FieldValue::Integer(25));
        fields.set(FieldKey::Month, FieldValue::Integer(3));
        fields.set(FieldKey::Day, FieldValue::Integer(15));
        fields.set(FieldKey::Hour, FieldValue::Integer(9));
        fields.set(FieldKey::Minute, FieldValue::Integer(40));
        fields.set(FieldKey::MeanWaveDirection, FieldValue::Integer(270));
        fields.set(FieldKey::WaterTemperature, FieldValue::Real(21.3));

        let empty = StationSnapshot::empty(StationId::parse("41009").unwrap());
        empty.merged(&Observation::new(fields), Utc::now()).0
    }

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<_> = SENSORS.iter().map(|s| s.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), SENSORS.len());
    }

    #[test]
    fn mean_wave_direction_reads_mwd() {
        let sensor = sensor("mwdd").unwrap();
        assert_eq!(sensor.source, SensorSource::Field(FieldKey::MeanWaveDirection));
        assert_eq!(
            read(sensor, &snapshot()),
            SensorValue::Field(FieldValue::Integer(270))
        );
    }

    #[test]
    fn last_updated_is_observation_time() {
        let value = read(sensor("last_updated").unwrap(), &snapshot());
        let SensorValue::Timestamp(ts) = value else {
            panic!("expected timestamp, got {:?}", value);
        };
        assert_eq!(ts.year(), 2025);
        assert_eq!(ts.minute(), 40);
    }

    #[test]
    fn absent_field_is_unavailable() {
        let readings = readings(&snapshot());
        let gust = readings.iter().find(|r| r.sensor.key == "gst").unwrap();
        assert_eq!(gust.value, SensorValue::Unavailable);

        let wtmp = readings.iter().find(|r| r.sensor.key == "wtmp").unwrap();
        assert_eq!(wtmp.value, SensorValue::Field(FieldValue::Real(21.3)));
        assert_eq!(wtmp.sensor.unit, Some("°C"));
        assert_eq!(wtmp.sensor.device_class, Some(DeviceClass::Temperature));
    }

    #[test]
    fn empty_snapshot_has_no_timestamp() {
        let empty = StationSnapshot::empty(StationId::parse("41009").unwrap());
        assert_eq!(
            read(sensor("last_updated").unwrap(), &empty),
            SensorValue::Unavailable
        );
    }

    #[test]
    fn device_name_includes_station() {
        let station = StationId::parse("SJSN4").unwrap();
        assert_eq!(device_name(&station), "NOAA NDBC Ocean Weather SJSN4");
    }
}
