//! Domain layer - Core triage logic and entities

pub mod classifier;
pub mod department;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod triage;

pub use classifier::{KeywordClassifier, KeywordRule};
pub use department::Department;
pub use error::DomainError;
pub use llm::AdviceProvider;
pub use prompt::{PromptBuilder, PromptTemplate, TemplateError, TemplateKind, ANSWER_MARKER};
pub use triage::{validate_question, TriageAdvice, TriageOutcome, EMPTY_QUESTION_MESSAGE};
