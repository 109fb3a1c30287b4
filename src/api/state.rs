//! Application State
//!
//! Shared state accessible by all API handlers.
//! The dataset and control options are built once and only ever read.

use crate::dashboard::ControlOptions;
use crate::data::Dataset;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// The loaded sample dataset (read-only)
    pub dataset: Arc<Dataset>,
    /// Control options derived from the full dataset at startup
    pub controls: Arc<ControlOptions>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState, deriving control options from the dataset
    pub fn new(dataset: Dataset, title: impl Into<String>, config: ApiConfig) -> Self {
        let controls = ControlOptions::from_dataset(&dataset, title);

        Self {
            dataset: Arc::new(dataset),
            controls: Arc::new(controls),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable the filtered CSV export endpoint
    pub enable_export: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8051,
            enable_export: true,
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
