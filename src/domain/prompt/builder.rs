//! Triage prompt construction

use std::collections::HashMap;

use serde::Deserialize;

use super::template::{PromptTemplate, TemplateError};
use crate::domain::{Department, DomainError};

/// Marker the mapping-table prompt ends with; local models tend to echo it
pub const ANSWER_MARKER: &str = "Your Answer:";

const DETAILED_TEMPLATE: &str = "You are a helpful medical assistant. A user will describe a symptom.

Respond in 2-3 short sentences with friendly, clear advice and recommend one medical department only. Unless, there are two symptoms which are not of the same department then give response in 5-6 lines and recommend the medical departments accordingly.
Department: <Department Name> <Emoji> (the number should be same as the number of departments recommended.)

Here are some valid departments:
${var:departments}
Symptom: ${var:question}

Answer:";

const MAPPING_TABLE_TEMPLATE: &str = "
You are a medical assistant. Based on the user's symptoms, recommend the correct medical department.

Mapping:
${var:departments}

User Symptoms: ${var:question}
Your Answer:
";

/// Order of the local-model symptom table
const MAPPING_ORDER: [Department; 7] = [
    Department::Cardiology,
    Department::Dermatology,
    Department::Neurology,
    Department::GeneralMedicine,
    Department::Gastroenterology,
    Department::Orthopedics,
    Department::Ophthalmology,
];

/// Variables the builder always supplies
const SUPPLIED_VARIABLES: [&str; 2] = ["question", "departments"];

/// Built-in prompt styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// Full instructions with sentence budgets and the department list
    Detailed,
    /// Compact symptom-to-department table for small local models
    MappingTable,
}

impl TemplateKind {
    fn source(&self) -> &'static str {
        match self {
            Self::Detailed => DETAILED_TEMPLATE,
            Self::MappingTable => MAPPING_TABLE_TEMPLATE,
        }
    }

    fn departments_block(&self) -> String {
        let lines: Vec<String> = match self {
            Self::Detailed => Department::ALL
                .iter()
                .map(|d| format!("- {} {}", d.name(), d.emoji()))
                .collect(),
            Self::MappingTable => MAPPING_ORDER
                .iter()
                .map(|d| format!("- {} → {}", d.typical_symptoms(), d.name()))
                .collect(),
        };

        lines.join("\n")
    }
}

/// Builds the text sent to an advice provider from a validated question
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    template: PromptTemplate,
    departments: String,
}

impl PromptBuilder {
    pub fn new(kind: TemplateKind) -> Self {
        Self {
            template: PromptTemplate::parse(kind.source()),
            departments: kind.departments_block(),
        }
    }

    /// Use an operator-supplied template. It must declare `${var:question}`;
    /// `${var:departments}` is optional and renders the detailed list. Any
    /// other variable needs a default, since nothing else is ever supplied.
    pub fn custom(content: impl Into<String>) -> Result<Self, DomainError> {
        let template = PromptTemplate::parse(content);
        let invalid = |e: TemplateError| {
            DomainError::configuration(format!("Invalid custom prompt template: {}", e))
        };

        template.require(&["question"]).map_err(invalid)?;

        if let Some(unknown) = template
            .variables()
            .iter()
            .find(|v| v.is_required() && !SUPPLIED_VARIABLES.contains(&v.name.as_str()))
        {
            return Err(invalid(TemplateError::MissingVariable {
                name: unknown.name.clone(),
            }));
        }

        Ok(Self {
            template,
            departments: TemplateKind::Detailed.departments_block(),
        })
    }

    pub fn build(&self, question: &str) -> Result<String, DomainError> {
        let values = HashMap::from([
            ("question", question),
            ("departments", self.departments.as_str()),
        ]);

        self.template
            .render(&values)
            .map_err(|e: TemplateError| DomainError::internal(e.to_string()))
    }
}
