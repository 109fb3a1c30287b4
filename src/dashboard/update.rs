//! Reactive Update Handler
//!
//! The single entry point the UI layer calls whenever a control changes:
//! filter once, then build all four charts from the same rows.

use serde::Serialize;
use serde_json::{json, Value};
use std::time::Instant;

use super::charts::{box_chart, histogram_chart, line_chart, scatter_chart, ChartSpec};
use super::figure::to_plotly;
use super::filter::{filter, FilterState};
use crate::data::Dataset;

/// The four linked charts, recomputed together on every update
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardFigures {
    pub time_series: ChartSpec,
    pub box_plot: ChartSpec,
    pub line: ChartSpec,
    pub histogram: ChartSpec,
    /// Rows that survived filtering
    pub row_count: usize,
}

impl DashboardFigures {
    /// All four chart specs in page order
    pub fn charts(&self) -> [&ChartSpec; 4] {
        [&self.time_series, &self.box_plot, &self.line, &self.histogram]
    }

    /// Encode every chart as a Plotly figure, keyed by panel
    pub fn to_plotly(&self) -> Value {
        json!({
            "time_series": to_plotly(&self.time_series),
            "box_plot": to_plotly(&self.box_plot),
            "line": to_plotly(&self.line),
            "histogram": to_plotly(&self.histogram),
            "row_count": self.row_count,
        })
    }
}

/// Recompute all charts for the current control values
pub fn update(dataset: &Dataset, state: &FilterState) -> DashboardFigures {
    let started = Instant::now();
    let rows = filter(dataset, state);

    let figures = DashboardFigures {
        time_series: scatter_chart(&rows, state.log_scale),
        box_plot: box_chart(&rows, state.log_scale),
        line: line_chart(&rows, state.log_scale),
        histogram: histogram_chart(&rows, state.log_scale),
        row_count: rows.len(),
    };

    tracing::debug!(
        location = %state.location,
        start_date = %state.start_date,
        end_date = %state.end_date,
        log_scale = state.log_scale,
        rows = figures.row_count,
        elapsed_us = started.elapsed().as_micros() as u64,
        "Dashboard updated"
    );

    figures
}
