//! Core data types for wastewater samples
//!
//! This module defines the in-memory dataset the dashboard reads from:
//! - `SampleRecord`: One row of the surveillance CSV
//! - `Dataset`: The immutable, ordered collection of records
//! - `DateBounds`: The inclusive span of sample dates

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single wastewater sample
///
/// `wildtype` is `None` when the lab reported no value; such samples are
/// handled as non-detects downstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SampleRecord {
    /// Sampling site (`sample.loc`)
    pub location: String,
    /// Collection date (`sample.date`)
    pub sample_date: NaiveDate,
    /// Measured wildtype concentration in GC/100ml
    pub wildtype: Option<f64>,
    /// Lower detection limit for this sample
    pub ldl: f64,
}

impl SampleRecord {
    /// Create a new sample record
    pub fn new(
        location: impl Into<String>,
        sample_date: NaiveDate,
        wildtype: Option<f64>,
        ldl: f64,
    ) -> Self {
        Self {
            location: location.into(),
            sample_date,
            wildtype,
            ldl,
        }
    }

    /// True when the measured value is strictly above the detection limit
    pub fn is_detect(&self) -> bool {
        matches!(self.wildtype, Some(v) if v > self.ldl)
    }
}

/// Inclusive range of sample dates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

/// The loaded surveillance dataset
///
/// Built once at startup and never mutated; every filter produces a new view.
/// Construction requires at least one record so the date bounds always exist.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<SampleRecord>,
    locations: Vec<String>,
    bounds: DateBounds,
}

impl Dataset {
    /// Build a dataset from records in file order
    ///
    /// Returns `None` for an empty record list.
    pub fn from_records(records: Vec<SampleRecord>) -> Option<Self> {
        let first = records.first()?.sample_date;

        let mut locations = Vec::new();
        let mut min = first;
        let mut max = first;

        {
            let mut seen = HashSet::new();
            for record in &records {
                if seen.insert(record.location.as_str()) {
                    locations.push(record.location.clone());
                }
                min = min.min(record.sample_date);
                max = max.max(record.sample_date);
            }
        }

        Some(Self {
            records,
            locations,
            bounds: DateBounds { min, max },
        })
    }

    /// All records in their original order
    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false: construction requires at least one record
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct locations in first-seen order
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Minimum and maximum sample date across the full dataset
    pub fn date_bounds(&self) -> DateBounds {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_is_detect() {
        let detect = SampleRecord::new("A", date(2023, 1, 1), Some(10.0), 5.0);
        let at_limit = SampleRecord::new("A", date(2023, 1, 1), Some(5.0), 5.0);
        let missing = SampleRecord::new("A", date(2023, 1, 1), None, 5.0);

        assert!(detect.is_detect());
        assert!(!at_limit.is_detect());
        assert!(!missing.is_detect());
    }

    #[test]
    fn test_dataset_locations_and_bounds() {
        let ds = Dataset::from_records(vec![
            SampleRecord::new("B", date(2023, 3, 5), Some(1.0), 0.5),
            SampleRecord::new("A", date(2023, 1, 2), Some(1.0), 0.5),
            SampleRecord::new("B", date(2023, 7, 9), Some(1.0), 0.5),
        ])
        .unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.locations(), &["B".to_string(), "A".to_string()]);
        assert_eq!(ds.date_bounds().min, date(2023, 1, 2));
        assert_eq!(ds.date_bounds().max, date(2023, 7, 9));
    }

    #[test]
    fn test_empty_dataset_rejected() {
        assert!(Dataset::from_records(Vec::new()).is_none());
    }
}
