//! Export Routes
//!
//! - GET /api/v1/export - Filtered samples as CSV, imputed values included

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::dto::FilterParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dashboard::{filter, AdjustedSample};
use crate::data::loader::{DATE_COLUMN, LDL_COLUMN, LOCATION_COLUMN, WILDTYPE_COLUMN};

/// GET /api/v1/export
///
/// Uses the same parameters as the figure endpoint; `log` is ignored.
pub async fn export_csv(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> ApiResult<Response> {
    if !state.config.enable_export {
        return Err(ApiError::Validation(
            "Export feature is disabled".to_string(),
        ));
    }

    let filter_state = params.into_filter_state(&state.controls);
    let rows = filter(&state.dataset, &filter_state);
    let body = format_csv(&rows)?;

    let filename = format!(
        "wbe_{}_{}_{}.csv",
        filter_state.location, filter_state.start_date, filter_state.end_date
    )
    .replace(|c: char| !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '.', "_");

    tracing::info!(rows = rows.len(), file = %filename, "Exporting filtered samples");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}

/// Format rows as CSV
fn format_csv(rows: &[AdjustedSample<'_>]) -> ApiResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record([
        LOCATION_COLUMN,
        DATE_COLUMN,
        WILDTYPE_COLUMN,
        LDL_COLUMN,
        "wildtype_adjusted",
        "above_ldl",
    ])?;

    for row in rows {
        let record = row.record;
        writer.write_record([
            record.location.clone(),
            record.sample_date.to_string(),
            record.wildtype.map(|v| v.to_string()).unwrap_or_default(),
            record.ldl.to_string(),
            row.wildtype_adjusted.to_string(),
            row.above_ldl.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| ApiError::Internal(format!("CSV flush failed: {}", e)))
}
