//! A single parsed measurement cycle.

use chrono::{DateTime, NaiveDate, Utc};

use super::field::{FieldKey, FieldMap, FieldValue};

/// The newest row of one station report.
///
/// Built by the report parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    fields: FieldMap,
}

impl Observation {
    pub fn new(fields: FieldMap) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: FieldKey) -> &FieldValue {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Observation time derived from the row's calendar fields.
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        observed_at(&self.fields)
    }
}

/// Build the UTC observation time from year, month, day, hour and minute.
///
/// Two-digit years are in the 2000s (`25` is 2025); larger years are used as
/// given. Returns `None` if any component is missing, not an integer, or the
/// components do not form a valid date and time.
pub fn observed_at(fields: &FieldMap) -> Option<DateTime<Utc>> {
    let component = |key: FieldKey| fields.get(key).as_integer();

    let yy = component(FieldKey::Year)?;
    let month = component(FieldKey::Month)?;
    let day = component(FieldKey::Day)?;
    let hour = component(FieldKey::Hour)?;
    let minute = component(FieldKey::Minute)?;

    let year = if yy < 100 { 2000 + yy } else { yy };

    let date = NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )?;
    let naive = date.and_hms_opt(u32::try_from(hour).ok()?, u32::try_from(minute).ok()?, 0)?;

    Some(naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn time_fields(yy: i64, month: i64, day: i64, hour: i64, minute: i64) -> FieldMap {
        let mut fields = FieldMap::empty();
        fields.set(FieldKey::Year, FieldValue::Integer(yy));
        fields.set(FieldKey::Month, FieldValue::Integer(month));
        fields.set(FieldKey::Day, FieldValue::Integer(day));
        fields.set(FieldKey::Hour, FieldValue::Integer(hour));
        fields.set(FieldKey::Minute, FieldValue::Integer(minute));
        fields
    }

    #[test]
    fn two_digit_year_is_2000s() {
        let ts = observed_at(&time_fields(25, 3, 15, 9, 45)).unwrap();
        assert_eq!(ts.year(), 2025);
        assert_eq!(ts.month(), 3);
        assert_eq!(ts.day(), 15);
        assert_eq!(ts.hour(), 9);
        assert_eq!(ts.minute(), 45);
    }

    #[test]
    fn four_digit_year_passes_through() {
        let ts = observed_at(&time_fields(1999, 12, 31, 23, 50)).unwrap();
        assert_eq!(ts.year(), 1999);

        let ts = observed_at(&time_fields(2024, 2, 29, 0, 0)).unwrap();
        assert_eq!(ts.year(), 2024);
    }

    #[test]
    fn missing_component_is_unavailable() {
        for key in [
            FieldKey::Year,
            FieldKey::Month,
            FieldKey::Day,
            FieldKey::Hour,
            FieldKey::Minute,
        ] {
            let mut fields = time_fields(25, 3, 15, 9, 45);
            fields.set(key, FieldValue::Absent);
            assert_eq!(observed_at(&fields), None, "{key} absent");
        }
    }

    #[test]
    fn invalid_calendar_is_unavailable() {
        assert_eq!(observed_at(&time_fields(25, 13, 1, 0, 0)), None);
        assert_eq!(observed_at(&time_fields(25, 2, 30, 0, 0)), None);
        assert_eq!(observed_at(&time_fields(25, 1, 1, 24, 0)), None);
        assert_eq!(observed_at(&time_fields(25, 1, 1, 0, 60)), None);
        assert_eq!(observed_at(&time_fields(25, -1, 1, 0, 0)), None);
    }

    #[test]
    fn raw_component_is_unavailable() {
        let mut fields = time_fields(25, 3, 15, 9, 45);
        fields.set(FieldKey::Day, FieldValue::Raw("1x".into()));
        assert_eq!(observed_at(&fields), None);
    }
}
