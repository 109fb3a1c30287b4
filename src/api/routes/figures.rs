//! Figure Routes
//!
//! Recompute the four linked charts for the current control values.
//!
//! - GET /api/v1/figures - Plotly figures, ready to render
//! - GET /api/v1/charts - Typed chart specifications

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::api::dto::FilterParams;
use crate::api::state::AppState;
use crate::dashboard::{update, DashboardFigures};

/// GET /api/v1/figures
pub async fn get_figures(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Json<Value> {
    Json(compute(&state, params).to_plotly())
}

/// GET /api/v1/charts
pub async fn get_charts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Json<DashboardFigures> {
    Json(compute(&state, params))
}

fn compute(state: &AppState, params: FilterParams) -> DashboardFigures {
    let filter_state = params.into_filter_state(&state.controls);
    update(&state.dataset, &filter_state)
}
