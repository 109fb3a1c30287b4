//! Wastewater Sample Data
//!
//! - **types**: `SampleRecord`, `Dataset`, `DateBounds`
//! - **loader**: CSV loading and date parsing
//! - **error**: Error types
//!
//! The dataset is loaded once at startup and shared read-only afterwards.

pub mod error;
pub mod loader;
pub mod types;

pub use error::{LoadError, LoadResult};
pub use loader::{load_csv, load_str, parse_sample_date};
pub use types::{Dataset, DateBounds, SampleRecord};
