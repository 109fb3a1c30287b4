//! Control Option Builder
//!
//! Derives the dashboard's control options from the full dataset. Built once
//! at startup; filter changes never rebuild it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::Dataset;

/// Wire value of the catch-all location option
pub const ALL_LOCATIONS: &str = "all";

/// Default page heading
pub const DEFAULT_TITLE: &str = "MSU Wastewater Dashboard";

/// Label of the log-scale checkbox
pub const LOG_SCALE_LABEL: &str = "Show concentrations in log-10";

/// One entry of the location dropdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationOption {
    pub label: String,
    pub value: String,
}

impl LocationOption {
    fn all() -> Self {
        Self {
            label: "All".to_string(),
            value: ALL_LOCATIONS.to_string(),
        }
    }

    fn site(location: &str) -> Self {
        Self {
            label: location.to_string(),
            value: location.to_string(),
        }
    }
}

/// Date-range picker configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatePickerOptions {
    pub min_date_allowed: NaiveDate,
    pub max_date_allowed: NaiveDate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_visible_month: NaiveDate,
}

/// Everything the page needs to render its controls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlOptions {
    pub title: String,
    pub locations: Vec<LocationOption>,
    pub date_range: DatePickerOptions,
    pub log_scale_label: String,
}

impl ControlOptions {
    /// Build control options from the loaded dataset
    ///
    /// "all" is always first, followed by each distinct location once.
    pub fn from_dataset(dataset: &Dataset, title: impl Into<String>) -> Self {
        let locations = std::iter::once(LocationOption::all())
            .chain(dataset.locations().iter().map(|l| LocationOption::site(l)))
            .collect();

        let bounds = dataset.date_bounds();

        Self {
            title: title.into(),
            locations,
            date_range: DatePickerOptions {
                min_date_allowed: bounds.min,
                max_date_allowed: bounds.max,
                start_date: bounds.min,
                end_date: bounds.max,
                initial_visible_month: bounds.min,
            },
            log_scale_label: LOG_SCALE_LABEL.to_string(),
        }
    }

    /// Location wire values, "all" included
    pub fn location_values(&self) -> impl Iterator<Item = &str> {
        self.locations.iter().map(|o| o.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_str;
    use std::collections::HashSet;

    const CSV: &str = "sample.loc,sample.date,wildtype,LDL
Holt,2023-02-01,10,1
Mason,2023-01-15,10,1
Holt,2023-03-20,10,1
Okemos,2023-02-11,10,1
Mason,2023-02-12,10,1";

    #[test]
    fn test_all_is_first_and_locations_are_distinct() {
        let ds = load_str(CSV).unwrap();
        let controls = ControlOptions::from_dataset(&ds, DEFAULT_TITLE);
        let values: Vec<&str> = controls.location_values().collect();

        assert_eq!(values[0], ALL_LOCATIONS);
        assert_eq!(values.len(), 4);

        let unique: HashSet<&str> = values.iter().copied().collect();
        assert_eq!(unique.len(), values.len());
        assert!(unique.contains("Holt"));
        assert!(unique.contains("Mason"));
        assert!(unique.contains("Okemos"));
        assert_eq!(controls.locations[0].label, "All");
    }

    #[test]
    fn test_date_range_spans_full_dataset() {
        let ds = load_str(CSV).unwrap();
        let controls = ControlOptions::from_dataset(&ds, "Test");
        let range = controls.date_range;

        let jan15 = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
        let mar20 = NaiveDate::from_ymd_opt(2023, 3, 20).unwrap();

        assert_eq!(range.min_date_allowed, jan15);
        assert_eq!(range.max_date_allowed, mar20);
        assert_eq!(range.start_date, jan15);
        assert_eq!(range.end_date, mar20);
        assert_eq!(range.initial_visible_month, jan15);
        assert_eq!(controls.title, "Test");
    }
}
