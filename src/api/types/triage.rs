//! Request/response bodies for the triage endpoints

use serde::{Deserialize, Serialize};

/// Body of `POST /api/predict`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictRequest {
    /// Missing and blank are both rejected by validation
    #[serde(default)]
    pub question: Option<String>,
}

/// Successful triage answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

/// Body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}
