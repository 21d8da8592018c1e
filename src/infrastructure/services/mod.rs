//! Infrastructure services

mod triage_service;

pub use triage_service::{TriageService, DEFAULT_PROVIDER_TIMEOUT};
