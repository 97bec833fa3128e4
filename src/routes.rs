//! API route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::analysis::{analyze, AnalysisSummary};
use crate::config::AppConfig;
use crate::fetcher::LottoClient;
use crate::recommend::{recommend, Recommendation};
use crate::store::HistoryStore;
use crate::types::{ErrorResponse, StatusResponse, UpdateResponse};
use crate::updater::run_update;

/// Application state shared across handlers.
pub struct AppState {
    pub store: HistoryStore,
    pub client: LottoClient,
    pub config: AppConfig,
    /// Serializes update runs; overlapping `/api/update` calls queue instead
    /// of racing on the store and fetching overlapping ranges.
    pub update_lock: Mutex<()>,
}

/// Error type for API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    reason: String,
}

impl ApiError {
    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            reason: reason.into(),
        }
    }

    pub fn not_found(reason: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            reason: reason.into(),
        }
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            reason: reason.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse { error: self.reason });
        (self.status, body).into_response()
    }
}

/// Liveness endpoint.
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "running".to_string(),
        service: "Lotto Analysis API Server".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Trigger an incremental history update.
pub async fn update(State(state): State<Arc<AppState>>) -> Result<Json<UpdateResponse>, ApiError> {
    let _guard = state.update_lock.lock().await;

    let report = run_update(&state.store, &state.client, &state.config.updater)
        .await
        .map_err(|e| ApiError::internal(format!("update failed: {e}")))?;

    Ok(Json(UpdateResponse {
        message: report.message(),
    }))
}

/// Frequency analysis over the full history.
pub async fn analysis(State(state): State<Arc<AppState>>) -> Result<Json<AnalysisSummary>, ApiError> {
    let records = state
        .store
        .load()
        .map_err(|e| ApiError::internal(format!("failed to read history: {e}")))?;

    analyze(&records)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("no draw history yet; run an update first"))
}

/// Random number recommendation sized by budget.
pub async fn recommend_for_budget(Path(budget): Path<u64>) -> Result<Json<Recommendation>, ApiError> {
    recommend(budget)
        .map(Json)
        .ok_or_else(|| ApiError::bad_request("budget too small for a single line"))
}
