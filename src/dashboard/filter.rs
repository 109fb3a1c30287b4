//! Filter Engine
//!
//! Narrows the dataset to one location and an inclusive date window, imputing
//! non-detects at half the detection limit along the way.
//!
//! ```text
//!   records → location match → adjust wildtype → date window ∧ above_ldl → rows
//! ```
//!
//! Row order always follows the dataset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::controls::{ControlOptions, ALL_LOCATIONS};
use crate::data::{Dataset, SampleRecord};

/// Location dropdown selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LocationSelection {
    /// Every location
    All,
    /// A single sampling site
    Site(String),
}

impl LocationSelection {
    /// Check if a record's location passes this selection
    pub fn matches(&self, location: &str) -> bool {
        match self {
            LocationSelection::All => true,
            LocationSelection::Site(site) => site == location,
        }
    }
}

impl From<String> for LocationSelection {
    fn from(value: String) -> Self {
        if value == ALL_LOCATIONS {
            LocationSelection::All
        } else {
            LocationSelection::Site(value)
        }
    }
}

impl From<&str> for LocationSelection {
    fn from(value: &str) -> Self {
        LocationSelection::from(value.to_string())
    }
}

impl From<LocationSelection> for String {
    fn from(value: LocationSelection) -> Self {
        match value {
            LocationSelection::All => ALL_LOCATIONS.to_string(),
            LocationSelection::Site(site) => site,
        }
    }
}

impl fmt::Display for LocationSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationSelection::All => write!(f, "{}", ALL_LOCATIONS),
            LocationSelection::Site(site) => write!(f, "{}", site),
        }
    }
}

/// Current values of the four dashboard controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub location: LocationSelection,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub log_scale: bool,
}

impl FilterState {
    /// Create a filter state
    pub fn new(
        location: impl Into<LocationSelection>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            location: location.into(),
            start_date,
            end_date,
            log_scale: false,
        }
    }

    /// Builder method: set log scaling
    pub fn log_scale(mut self, enabled: bool) -> Self {
        self.log_scale = enabled;
        self
    }

    /// The selection the page starts with: all locations, full date span, linear axes
    pub fn initial(controls: &ControlOptions) -> Self {
        Self::new(
            LocationSelection::All,
            controls.date_range.start_date,
            controls.date_range.end_date,
        )
    }

    /// Check if a date falls inside the selected window (inclusive)
    ///
    /// A reversed window contains nothing.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// A record with its censored-value imputation applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustedSample<'a> {
    pub record: &'a SampleRecord,
    /// Measured value when above the detection limit, otherwise `LDL / 2`
    pub wildtype_adjusted: f64,
    /// `wildtype_adjusted > LDL`, evaluated after imputation
    pub above_ldl: bool,
}

impl<'a> AdjustedSample<'a> {
    /// Apply the imputation policy to a record
    pub fn adjust(record: &'a SampleRecord) -> Self {
        let wildtype_adjusted = match record.wildtype {
            Some(v) if record.is_detect() => v,
            _ => record.ldl / 2.0,
        };

        Self {
            record,
            wildtype_adjusted,
            above_ldl: wildtype_adjusted > record.ldl,
        }
    }
}

/// Filter the dataset with the given control values
pub fn filter<'a>(dataset: &'a Dataset, state: &FilterState) -> Vec<AdjustedSample<'a>> {
    filter_records(dataset.records(), state)
}

/// Filter any sequence of records, preserving their order
pub fn filter_records<'a, I>(records: I, state: &FilterState) -> Vec<AdjustedSample<'a>>
where
    I: IntoIterator<Item = &'a SampleRecord>,
{
    records
        .into_iter()
        .filter(|r| state.location.matches(&r.location))
        .map(AdjustedSample::adjust)
        .filter(|s| state.contains_date(s.record.sample_date) && s.above_ldl)
        .collect()
}
