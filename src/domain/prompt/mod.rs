//! Prompt construction - templates with variable support and the built-in triage prompts

mod builder;
mod template;

pub use builder::{PromptBuilder, TemplateKind, ANSWER_MARKER};
pub use template::{PromptTemplate, PromptVariable, TemplateError};
