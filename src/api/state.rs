//! Application state shared by all handlers

use std::sync::Arc;

use crate::infrastructure::services::TriageService;

/// Application state. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub triage_service: Arc<TriageService>,
    /// Echo the question back in `POST /api/predict` responses
    pub echo_question: bool,
}

impl AppState {
    pub fn new(triage_service: TriageService) -> Self {
        Self {
            triage_service: Arc::new(triage_service),
            echo_question: false,
        }
    }

    pub fn with_echo_question(mut self, echo: bool) -> Self {
        self.echo_question = echo;
        self
    }
}
