//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, SampleQuery, SampleRecord, SummaryResponse};

/// Returns scenario config, session summary, and sample count.
///
/// `GET /summary` → 200 + `SummaryResponse` JSON
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    Json(SummaryResponse {
        config: state.config.clone(),
        summary: state.summary.clone(),
        sample_count: state.results.len(),
    })
}

/// Returns samples, optionally filtered by index range.
///
/// `GET /samples` → 200 + `Vec<SampleRecord>` JSON
/// `GET /samples?from=N&to=M` → filtered range (inclusive)
/// `GET /samples?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_samples(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SampleQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let records: Vec<SampleRecord> = state
        .results
        .samples()
        .iter()
        .enumerate()
        .filter(|(i, _)| *i >= from && *i <= to)
        .map(|(index, sample)| SampleRecord {
            index,
            sample: sample.clone(),
        })
        .collect();

    Ok(Json(records))
}
