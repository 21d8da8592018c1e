//! API request/response types

pub mod error;
pub mod json;
pub mod triage;

pub use error::{ApiError, ApiErrorResponse, INTERNAL_ERROR_DETAIL};
pub use json::Json;
pub use triage::{PredictRequest, PredictResponse, RootResponse};
