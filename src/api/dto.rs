//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! Query-string parameters are decoded by axum's `Query` extractor, so
//! malformed dates or flags are rejected before any handler runs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dashboard::{ControlOptions, FilterState, LocationSelection};

// ============================================
// FILTER DTOs
// ============================================

/// Control values sent by the page on every change
///
/// Omitted fields fall back to the initial selection.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    /// Location wire value, "all" for every site
    #[serde(default)]
    pub location: Option<String>,
    /// Inclusive start date (YYYY-MM-DD)
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Inclusive end date (YYYY-MM-DD)
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Log-10 y axes
    #[serde(default)]
    pub log: Option<bool>,
}

impl FilterParams {
    /// Resolve against the startup defaults
    pub fn into_filter_state(self, controls: &ControlOptions) -> FilterState {
        let initial = FilterState::initial(controls);

        FilterState {
            location: self
                .location
                .map(LocationSelection::from)
                .unwrap_or(initial.location),
            start_date: self.start_date.unwrap_or(initial.start_date),
            end_date: self.end_date.unwrap_or(initial.end_date),
            log_scale: self.log.unwrap_or(initial.log_scale),
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Number of loaded samples
    pub samples: usize,
    /// Number of distinct locations
    pub locations: usize,
    /// First and last sample date
    pub first_sample: NaiveDate,
    pub last_sample: NaiveDate,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_str;

    #[test]
    fn test_params_default_to_initial_state() {
        let ds = load_str("sample.loc,sample.date,wildtype,LDL\nA,2023-01-01,5,1\nB,2023-02-01,5,1")
            .unwrap();
        let controls = ControlOptions::from_dataset(&ds, "t");

        let state = FilterParams::default().into_filter_state(&controls);
        assert_eq!(state, FilterState::initial(&controls));

        let state = FilterParams {
            location: Some("B".to_string()),
            log: Some(true),
            ..Default::default()
        }
        .into_filter_state(&controls);
        assert_eq!(state.location, LocationSelection::Site("B".to_string()));
        assert!(state.log_scale);
        assert_eq!(state.end_date, NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
    }
}
