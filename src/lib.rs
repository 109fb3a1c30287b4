//! # WBE Dashboard
//!
//! Interactive dashboard for wastewater-based epidemiology (WBE) surveillance
//! data: load a sample CSV once, filter it by site and date range, and chart
//! SARS-CoV-2 wildtype concentrations four ways.
//!
//! ## Modules
//!
//! - [`data`]: Dataset model and CSV loading
//! - [`dashboard`]: Control options, filtering and chart builders
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wbe_dashboard::dashboard::{update, ControlOptions, FilterState};
//! use wbe_dashboard::data::load_csv;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = load_csv(Path::new("msu_wbe_data.csv"))?;
//!     let controls = ControlOptions::from_dataset(&dataset, "MSU Wastewater Dashboard");
//!
//!     // Start from the full span, then narrow to one site
//!     let mut state = FilterState::initial(&controls);
//!     state.location = "East Lansing".into();
//!
//!     let figures = update(&dataset, &state);
//!     for chart in figures.charts() {
//!         println!("{}: {} points", chart.title, chart.point_count());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod data;

// Re-export top-level types for convenience
pub use data::{load_csv, Dataset, DateBounds, LoadError, LoadResult, SampleRecord};

pub use dashboard::{
    filter, update, AdjustedSample, ChartSpec, ControlOptions, DashboardFigures, FilterState,
    LocationSelection,
};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, DashboardConfig, DataConfig, LoggingConfig, ServerConfig};
