//! HTTP request handlers for the harvest analytics engine.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analytics::{
    TOP_LIMIT, aggregate_range, build_export, daily_totals, decode_pairs, encode_query,
    export_filename, group_totals, rank_suggestions, to_pretty_json, top_workers,
};
use crate::models::{GroupFilter, QueryState};
use crate::session::compute_view;

use super::response::{
    ApiError, SuggestionRow, SummaryResponse, TopRow, WorkerRow, WorkersResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/workers", get(workers_handler))
        .route("/suggestions", get(suggestions_handler))
        .route("/summary", get(summary_handler))
        .route("/export", get(export_handler))
        .with_state(state)
}

/// Decodes the URL parameter schema against the dataset's groups and dates.
fn decode_state(state: &AppState, params: &HashMap<String, String>) -> QueryState {
    decode_pairs(params, state.groups(), state.index())
}

/// Handler for `GET /workers`: the filtered, sorted, paginated view.
async fn workers_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<WorkersResponse> {
    let correlation_id = Uuid::new_v4();
    let query_state = decode_state(&state, &params);
    let view = compute_view(state.workers(), state.config(), state.index(), &query_state);

    info!(
        correlation_id = %correlation_id,
        total = view.sorted.len(),
        page = view.page.page_index,
        "Serving workers view"
    );

    let workers = view
        .page
        .items
        .iter()
        .map(|aggregate| WorkerRow::from_aggregate(aggregate, view.anomalies.get(&aggregate.id)))
        .collect();

    // Re-encode with the effective page so the shared link restores exactly
    // the view being served.
    let canonical = encode_query(&QueryState {
        page_index: view.page.page_index,
        ..query_state.clone()
    });

    Json(WorkersResponse {
        workers,
        page: view.page.page_index,
        page_count: view.page.page_count,
        page_size: query_state.page_size.get(),
        total: view.page.total,
        date_min: state.index().min(),
        date_max: state.index().max(),
        groups: state.groups().to_vec(),
        thresholds: view.thresholds,
        query: canonical,
    })
}

/// Handler for `GET /suggestions`: ranked autocomplete rows.
async fn suggestions_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<SuggestionRow>> {
    let query_state = decode_state(&state, &params);
    let range = state
        .index()
        .snap_range(query_state.date_from, query_state.date_to);
    let aggregates = aggregate_range(state.workers(), range);

    let suggestions = rank_suggestions(&aggregates, &query_state.search_text, &query_state.group)
        .into_iter()
        .map(SuggestionRow::from)
        .collect();
    Json(suggestions)
}

/// Handler for `GET /summary`: group totals, the daily series, and the
/// top-performer rankings.
async fn summary_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<SummaryResponse> {
    let query_state = decode_state(&state, &params);
    let range = state
        .index()
        .snap_range(query_state.date_from, query_state.date_to);
    let aggregates = aggregate_range(state.workers(), range);

    // The per-group ranking follows the active group, falling back to the
    // first known group when none is active.
    let top_group_label = match &query_state.group {
        GroupFilter::Group(label) => Some(label.clone()),
        GroupFilter::All => state.groups().first().cloned(),
    };
    let top_group = top_group_label
        .as_deref()
        .map(|label| {
            top_workers(&aggregates, Some(label), TOP_LIMIT)
                .into_iter()
                .map(TopRow::from)
                .collect()
        })
        .unwrap_or_default();

    Json(SummaryResponse {
        group_totals: group_totals(&aggregates),
        daily_totals: daily_totals(&aggregates, &query_state.group),
        top_overall: top_workers(&aggregates, None, TOP_LIMIT)
            .into_iter()
            .map(TopRow::from)
            .collect(),
        top_group,
        top_group_label,
    })
}

/// Handler for `GET /export`: the anonymized summary as a download.
async fn export_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let query_state = decode_state(&state, &params);
    let view = compute_view(state.workers(), state.config(), state.index(), &query_state);

    let records = build_export(&view.sorted, &mut rand::thread_rng());
    let filename = export_filename(&query_state.group, view.range);

    match to_pretty_json(&records) {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                records = records.len(),
                filename = %filename,
                "Serving anonymized export"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "application/json".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{filename}\""),
                    ),
                ],
                body,
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Export serialization failed"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("EXPORT_FAILED", err.to_string())),
            )
                .into_response()
        }
    }
}
