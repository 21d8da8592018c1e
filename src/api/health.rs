//! Liveness and status endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::{Json, RootResponse};

use super::state::AppState;

pub const ROOT_MESSAGE: &str = "MedAssist API is running";

/// Health response with the configured advice backend
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Health check status
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// No advice provider configured; answers come from the keyword fallback
    Degraded,
}

/// GET /
pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(RootResponse {
        message: ROOT_MESSAGE.to_string(),
        provider: state.triage_service.provider_name().map(str::to_string),
    })
}

/// GET /health
///
/// Always 200: a degraded service still answers every request.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let service = &state.triage_service;
    let status = match service.provider_name() {
        Some(_) => HealthStatus::Healthy,
        None => HealthStatus::Degraded,
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider: service.provider_name().map(str::to_string),
        model: service.model().map(str::to_string),
    };

    (StatusCode::OK, Json(response))
}

/// GET /live
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Degraded).unwrap(),
            "\"degraded\""
        );
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: HealthStatus::Degraded,
            version: "1.0.0".to_string(),
            provider: None,
            model: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"degraded\""));
        assert!(json.contains("\"version\":\"1.0.0\""));
        assert!(!json.contains("provider"));
    }
}
