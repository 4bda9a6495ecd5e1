//! Field keys and values of the NDBC standard meteorological report.
//!
//! The report header names month `MM` and minute `mm`, and some renderings
//! print both in the same case. Field keys never reuse header text: month and
//! minute are permanently distinct keys, and the report is mapped by column
//! position only.

use std::fmt;

use serde::Serialize;

/// Number of columns in a standard meteorological report row.
pub const COLUMN_COUNT: usize = 19;

/// How a column's token is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Calendar components and directions; `"270.0"` is accepted as 270.
    Integer,
    /// Everything else.
    Real,
}

/// A measurement in the report, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKey {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    WindDirection,
    WindSpeed,
    GustSpeed,
    WaveHeight,
    DominantWavePeriod,
    AverageWavePeriod,
    MeanWaveDirection,
    Pressure,
    AirTemperature,
    WaterTemperature,
    DewPoint,
    Visibility,
    PressureTendency,
    Tide,
}

impl FieldKey {
    /// All keys, indexed by report column.
    pub const ALL: [FieldKey; COLUMN_COUNT] = [
        FieldKey::Year,
        FieldKey::Month,
        FieldKey::Day,
        FieldKey::Hour,
        FieldKey::Minute,
        FieldKey::WindDirection,
        FieldKey::WindSpeed,
        FieldKey::GustSpeed,
        FieldKey::WaveHeight,
        FieldKey::DominantWavePeriod,
        FieldKey::AverageWavePeriod,
        FieldKey::MeanWaveDirection,
        FieldKey::Pressure,
        FieldKey::AirTemperature,
        FieldKey::WaterTemperature,
        FieldKey::DewPoint,
        FieldKey::Visibility,
        FieldKey::PressureTendency,
        FieldKey::Tide,
    ];

    /// Column position in the report row.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable identifier used by consumers.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Year => "yy",
            FieldKey::Month => "month",
            FieldKey::Day => "dd",
            FieldKey::Hour => "hh",
            FieldKey::Minute => "minute",
            FieldKey::WindDirection => "wdir",
            FieldKey::WindSpeed => "wspd",
            FieldKey::GustSpeed => "gst",
            FieldKey::WaveHeight => "wvht",
            FieldKey::DominantWavePeriod => "dpd",
            FieldKey::AverageWavePeriod => "apd",
            FieldKey::MeanWaveDirection => "mwd",
            FieldKey::Pressure => "pres",
            FieldKey::AirTemperature => "atmp",
            FieldKey::WaterTemperature => "wtmp",
            FieldKey::DewPoint => "dewp",
            FieldKey::Visibility => "vis",
            FieldKey::PressureTendency => "ptdy",
            FieldKey::Tide => "tide",
        }
    }

    /// Header text as printed in the report (informational only).
    pub fn column(self) -> &'static str {
        match self {
            FieldKey::Year => "YY",
            FieldKey::Month => "MM",
            FieldKey::Day => "DD",
            FieldKey::Hour => "hh",
            FieldKey::Minute => "mm",
            FieldKey::WindDirection => "WDIR",
            FieldKey::WindSpeed => "WSPD",
            FieldKey::GustSpeed => "GST",
            FieldKey::WaveHeight => "WVHT",
            FieldKey::DominantWavePeriod => "DPD",
            FieldKey::AverageWavePeriod => "APD",
            FieldKey::MeanWaveDirection => "MWD",
            FieldKey::Pressure => "PRES",
            FieldKey::AirTemperature => "ATMP",
            FieldKey::WaterTemperature => "WTMP",
            FieldKey::DewPoint => "DEWP",
            FieldKey::Visibility => "VIS",
            FieldKey::PressureTendency => "PTDY",
            FieldKey::Tide => "TIDE",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FieldKey::Year
            | FieldKey::Month
            | FieldKey::Day
            | FieldKey::Hour
            | FieldKey::Minute
            | FieldKey::WindDirection
            | FieldKey::MeanWaveDirection => FieldKind::Integer,
            _ => FieldKind::Real,
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of one field.
///
/// `Raw` keeps a token that could not be converted, so consumers can tell an
/// unparsed fallback from a number. It serializes as a JSON string; `Absent`
/// serializes as `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    /// Always finite.
    Real(f64),
    Raw(String),
    #[default]
    Absent,
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Integer value, if this field holds one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{v}"),
            FieldValue::Real(v) => write!(f, "{v}"),
            FieldValue::Raw(s) => f.write_str(s),
            FieldValue::Absent => f.write_str("-"),
        }
    }
}

/// One value for every field key.
///
/// There is no way to build a map with a key missing: absent measurements are
/// stored as [`FieldValue::Absent`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldMap([FieldValue; COLUMN_COUNT]);

impl FieldMap {
    /// A map with every field absent.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, key: FieldKey) -> &FieldValue {
        &self.0[key.index()]
    }

    pub fn set(&mut self, key: FieldKey, value: FieldValue) {
        self.0[key.index()] = value;
    }

    /// Iterate over `(key, value)` in column order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &FieldValue)> {
        FieldKey::ALL.into_iter().zip(self.0.iter())
    }

    /// Number of fields holding a value.
    pub fn present_count(&self) -> usize {
        self.0.iter().filter(|v| !v.is_absent()).count()
    }
}

impl Serialize for FieldMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(COLUMN_COUNT))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}
