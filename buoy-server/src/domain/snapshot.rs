//! Retained best-known values for one station.

use chrono::{DateTime, Utc};

use super::field::{FieldKey, FieldMap};
use super::observation::{Observation, observed_at};
use super::station::StationId;

/// Merge a new observation into previously retained values.
///
/// Every non-absent value in `new` replaces the old one; an absent value in
/// `new` leaves the old value in place. Merging the same observation twice
/// gives the same result as merging it once.
pub fn merge(old: &FieldMap, new: &Observation) -> FieldMap {
    let mut merged = old.clone();
    for (key, value) in new.fields().iter() {
        if !value.is_absent() {
            merged.set(key, value.clone());
        }
    }
    merged
}

/// What a successful poll changed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObservationDelta {
    /// Fields whose retained value changed.
    pub updated: Vec<FieldKey>,

    /// Fields absent from the new report that kept an earlier value.
    pub retained: Vec<FieldKey>,

    /// Observation time of the merged values.
    pub observed_at: Option<DateTime<Utc>>,
}

impl ObservationDelta {
    /// Compare retained values before and after a merge.
    pub fn between(old: &FieldMap, new: &Observation, merged: &FieldMap) -> Self {
        let mut delta = ObservationDelta {
            observed_at: observed_at(merged),
            ..Default::default()
        };

        for (key, value) in new.fields().iter() {
            let previous = old.get(key);
            if value.is_absent() {
                if !previous.is_absent() {
                    delta.retained.push(key);
                }
            } else if previous != value {
                delta.updated.push(key);
            }
        }

        delta
    }

    /// True if the poll changed nothing.
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty()
    }
}

/// A station's current values as seen by consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSnapshot {
    station: StationId,
    fields: FieldMap,
    fetched_at: Option<DateTime<Utc>>,
}

impl StationSnapshot {
    /// A snapshot with nothing known yet.
    pub fn empty(station: StationId) -> Self {
        Self {
            station,
            fields: FieldMap::empty(),
            fetched_at: None,
        }
    }

    pub fn station(&self) -> &StationId {
        &self.station
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Time of the last successful fetch.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// Observation time of the retained values, if it can be formed.
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        observed_at(&self.fields)
    }

    /// Build the next snapshot from a newly parsed observation.
    ///
    /// `self` is left untouched; the caller publishes the returned snapshot
    /// as a whole.
    pub fn merged(
        &self,
        observation: &Observation,
        fetched_at: DateTime<Utc>,
    ) -> (StationSnapshot, ObservationDelta) {
        let fields = merge(&self.fields, observation);
        let delta = ObservationDelta::between(&self.fields, observation, &fields);

        let next = StationSnapshot {
            station: self.station.clone(),
            fields,
            fetched_at: Some(fetched_at),
        };
        (next, delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldValue;

    fn observation(values: &[(FieldKey, FieldValue)]) -> Observation {
        let mut fields = FieldMap::empty();
        for (key, value) in values {
            fields.set(*key, value.clone());
        }
        Observation::new(fields)
    }

    #[test]
    fn absent_value_keeps_previous() {
        let mut old = FieldMap::empty();
        old.set(FieldKey::WaterTemperature, FieldValue::Real(21.3));

        let merged = merge(&old, &observation(&[]));
        assert_eq!(
            merged.get(FieldKey::WaterTemperature),
            &FieldValue::Real(21.3)
        );
    }

    #[test]
    fn present_value_replaces_previous() {
        let mut old = FieldMap::empty();
        old.set(FieldKey::WaterTemperature, FieldValue::Real(21.3));

        let new = observation(&[(FieldKey::WaterTemperature, FieldValue::Real(19.8))]);
        let merged = merge(&old, &new);
        assert_eq!(
            merged.get(FieldKey::WaterTemperature),
            &FieldValue::Real(19.8)
        );
    }

    #[test]
    fn raw_fallback_replaces_previous() {
        let mut old = FieldMap::empty();
        old.set(FieldKey::Visibility, FieldValue::Real(10.0));

        let new = observation(&[(FieldKey::Visibility, FieldValue::Raw("9+".into()))]);
        let merged = merge(&old, &new);
        assert_eq!(merged.get(FieldKey::Visibility), &FieldValue::Raw("9+".into()));
    }

    #[test]
    fn merge_is_idempotent() {
        let mut old = FieldMap::empty();
        old.set(FieldKey::GustSpeed, FieldValue::Real(7.0));
        old.set(FieldKey::Pressure, FieldValue::Real(1012.0));

        let new = observation(&[
            (FieldKey::Pressure, FieldValue::Real(1015.2)),
            (FieldKey::WindDirection, FieldValue::Integer(270)),
        ]);

        let once = merge(&old, &new);
        let twice = merge(&once, &new);
        assert_eq!(once, twice);
    }

    #[test]
    fn delta_reports_updates_and_retained() {
        let mut old = FieldMap::empty();
        old.set(FieldKey::GustSpeed, FieldValue::Real(7.0));
        old.set(FieldKey::WindSpeed, FieldValue::Real(5.0));

        let new = observation(&[
            (FieldKey::WindSpeed, FieldValue::Real(5.0)),
            (FieldKey::AirTemperature, FieldValue::Real(18.1)),
        ]);
        let merged = merge(&old, &new);
        let delta = ObservationDelta::between(&old, &new, &merged);

        assert_eq!(delta.updated, vec![FieldKey::AirTemperature]);
        assert_eq!(delta.retained, vec![FieldKey::GustSpeed]);
        assert!(!delta.is_empty());
    }

    #[test]
    fn merged_snapshot_leaves_original_untouched() {
        let station = StationId::parse("41009").unwrap();
        let snapshot = StationSnapshot::empty(station.clone());
        let now = Utc::now();

        let new = observation(&[(FieldKey::WaterTemperature, FieldValue::Real(21.3))]);
        let (next, delta) = snapshot.merged(&new, now);

        assert_eq!(snapshot.fields(), &FieldMap::empty());
        assert_eq!(snapshot.fetched_at(), None);
        assert_eq!(next.station(), &station);
        assert_eq!(next.fetched_at(), Some(now));
        assert_eq!(
            next.fields().get(FieldKey::WaterTemperature),
            &FieldValue::Real(21.3)
        );
        assert_eq!(delta.updated, vec![FieldKey::WaterTemperature]);
        assert_eq!(delta.observed_at, None);
    }
}
