//! Triage request/response model

mod request;

pub use request::{validate_question, TriageAdvice, TriageOutcome, EMPTY_QUESTION_MESSAGE};
