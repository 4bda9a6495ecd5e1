//! Parsing of NDBC realtime2 standard meteorological reports.
//!
//! A report looks like:
//!
//! ```text
//! #YY  MM DD hh mm WDIR WSPD GST  WVHT   DPD   APD MWD   PRES  ATMP  WTMP  DEWP  VIS PTDY  TIDE
//! #yr  mo dy hr mn degT m/s  m/s     m   sec   sec degT   hPa  degC  degC  degC  nmi  hPa    ft
//! 2025 03 15 09 45 270  5.1  6.2   1.1     6     4 270 1015.2  18.1  17.2  15.0   MM   MM    MM
//! 2025 03 15 09 35 260  4.9  6.0    MM    MM    MM  MM 1015.3  18.0    MM  14.9   MM   MM    MM
//! ```
//!
//! Rows are newest first, so only the first data row is read.

use crate::domain::{COLUMN_COUNT, FieldKey, FieldKind, FieldMap, FieldValue, Observation};

/// Token the report uses for "no value".
pub const MISSING_VALUE: &str = "MM";

/// Why a report produced no observation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotAvailable {
    /// The report holds only comments or blank lines
    #[error("report contains no data rows")]
    NoDataLine,

    /// The newest row has fewer columns than the format defines
    #[error("newest row has {found} columns, expected {}", COLUMN_COUNT)]
    Truncated { found: usize },
}

/// Parse the newest observation out of a realtime2 report.
///
/// Columns are mapped by position. `MM` becomes [`FieldValue::Absent`] for any
/// column; a token that fails numeric conversion is kept as
/// [`FieldValue::Raw`] without affecting the other columns.
pub fn parse(text: &str) -> Result<Observation, NotAvailable> {
    let row = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .ok_or(NotAvailable::NoDataLine)?;

    let tokens: Vec<&str> = row.split_whitespace().collect();
    if tokens.len() < COLUMN_COUNT {
        return Err(NotAvailable::Truncated {
            found: tokens.len(),
        });
    }

    let mut fields = FieldMap::empty();
    for (key, token) in FieldKey::ALL.into_iter().zip(tokens) {
        fields.set(key, convert_token(key, token));
    }

    Ok(Observation::new(fields))
}

/// Convert one token according to its column's kind.
fn convert_token(key: FieldKey, token: &str) -> FieldValue {
    if token == MISSING_VALUE {
        return FieldValue::Absent;
    }

    let converted = match key.kind() {
        // Some feeds print "270.0" in integer columns
        FieldKind::Integer => token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| FieldValue::Integer(v.trunc() as i64)),
        FieldKind::Real => token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(FieldValue::Real),
    };

    converted.unwrap_or_else(|| FieldValue::Raw(token.to_string()))
}
