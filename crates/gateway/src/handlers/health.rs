//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    pub scholar_credential: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Liveness probe - always returns healthy if server is running
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Readiness probe - checks that the scholar collaborator is usable
pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    let credential_check = if state.config.scholar.api_key.is_some() {
        CheckResult {
            status: "configured".to_string(),
            error: None,
        }
    } else {
        CheckResult {
            status: "missing".to_string(),
            error: Some("scholar.api_key is not configured".to_string()),
        }
    };

    let all_ready = credential_check.status == "configured";

    Json(ReadyResponse {
        status: if all_ready { "ready" } else { "not_ready" }.to_string(),
        checks: HealthChecks {
            scholar_credential: credential_check,
        },
    })
}
