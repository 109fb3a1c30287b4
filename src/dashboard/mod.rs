//! Dashboard Controller
//!
//! - **controls**: Control options derived once from the dataset
//! - **filter**: Location/date filtering with non-detect imputation
//! - **stats**: OLS fit, box summaries, histogram binning
//! - **charts**: The four chart builders
//! - **figure**: Plotly figure encoding
//! - **update**: The pure update function tying it together
//!
//! # Example
//!
//! ```rust,no_run
//! use wbe_dashboard::dashboard::{update, ControlOptions, FilterState};
//! use wbe_dashboard::data::load_csv;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = load_csv(Path::new("samples.csv"))?;
//!     let controls = ControlOptions::from_dataset(&dataset, "Wastewater");
//!
//!     let state = FilterState::initial(&controls).log_scale(true);
//!     let figures = update(&dataset, &state);
//!
//!     println!("{} samples plotted", figures.row_count);
//!     Ok(())
//! }
//! ```

pub mod charts;
pub mod controls;
pub mod figure;
pub mod filter;
pub mod stats;
pub mod update;

pub use charts::{
    box_chart, histogram_chart, line_chart, scatter_chart, Axis, AxisKind, ChartBody, ChartSpec,
    HISTOGRAM_BINS,
};
pub use controls::{ControlOptions, DatePickerOptions, LocationOption, ALL_LOCATIONS};
pub use figure::to_plotly;
pub use filter::{filter, filter_records, AdjustedSample, FilterState, LocationSelection};
pub use stats::{BoxSummary, HistogramBin, LinearFit};
pub use update::{update, DashboardFigures};
