//! Control Routes
//!
//! - GET /api/v1/controls - Location options, date bounds and labels

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::dashboard::ControlOptions;

/// GET /api/v1/controls
///
/// Options are derived once at startup and never change.
pub async fn get_controls(State(state): State<Arc<AppState>>) -> Json<ControlOptions> {
    Json(state.controls.as_ref().clone())
}
