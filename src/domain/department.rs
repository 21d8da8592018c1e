//! Medical departments a triage answer can point to
//!
//! This is the single source for department names and their emoji. Prompt
//! templates and the keyword fallback both render from it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the fixed medical specialties used for triage output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Cardiology,
    Dermatology,
    #[serde(rename = "General Medicine")]
    GeneralMedicine,
    Neurology,
    Orthopedics,
    Gastroenterology,
    Ophthalmology,
}

impl Department {
    /// All departments, in the order they are listed to the model
    pub const ALL: [Department; 7] = [
        Department::Cardiology,
        Department::Dermatology,
        Department::GeneralMedicine,
        Department::Neurology,
        Department::Orthopedics,
        Department::Gastroenterology,
        Department::Ophthalmology,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Cardiology => "Cardiology",
            Self::Dermatology => "Dermatology",
            Self::GeneralMedicine => "General Medicine",
            Self::Neurology => "Neurology",
            Self::Orthopedics => "Orthopedics",
            Self::Gastroenterology => "Gastroenterology",
            Self::Ophthalmology => "Ophthalmology",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Cardiology => "❤️",
            Self::Dermatology => "🧴",
            Self::GeneralMedicine => "💊",
            Self::Neurology => "🧠",
            Self::Orthopedics => "🦴",
            Self::Gastroenterology => "🍽️",
            Self::Ophthalmology => "👁️",
        }
    }

    /// Typical complaints, used by the compact mapping-table prompt
    pub fn typical_symptoms(&self) -> &'static str {
        match self {
            Self::Cardiology => "Chest pain, breathlessness",
            Self::Dermatology => "Rashes, acne",
            Self::GeneralMedicine => "Fever, sore throat",
            Self::Neurology => "Headaches, dizziness",
            Self::Orthopedics => "Joint pain",
            Self::Gastroenterology => "Stomach issues",
            Self::Ophthalmology => "Eye problems",
        }
    }

    /// The closing line every answer is expected to end with,
    /// e.g. `Department: Neurology 🧠`
    pub fn label_line(&self) -> String {
        format!("Department: {}", self)
    }

    /// Departments named on the last `Department:` line of an answer
    pub fn named_in(answer: &str) -> Vec<Self> {
        let Some(line) = answer
            .lines()
            .rev()
            .find_map(|l| l.trim().strip_prefix("Department:"))
        else {
            return Vec::new();
        };

        let line = line.to_lowercase();
        Self::ALL
            .into_iter()
            .filter(|d| line.contains(&d.name().to_lowercase()))
            .collect()
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.emoji())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_line() {
        assert_eq!(Department::Neurology.label_line(), "Department: Neurology 🧠");
        assert_eq!(
            Department::GeneralMedicine.label_line(),
            "Department: General Medicine 💊"
        );
    }

    #[test]
    fn test_all_departments_are_distinct() {
        let mut names: Vec<_> = Department::ALL.iter().map(|d| d.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 7);
    }

    #[test]
    fn test_named_in_reads_last_label_line() {
        let answer = "Department: Dermatology 🧴 is not it.\nSee both.\nDepartment: Neurology 🧠 Ophthalmology 👁️";
        assert_eq!(
            Department::named_in(answer),
            vec![Department::Neurology, Department::Ophthalmology]
        );
        assert!(Department::named_in("No label here").is_empty());
    }

    #[test]
    fn test_serialization_uses_display_name() {
        assert_eq!(
            serde_json::to_string(&Department::GeneralMedicine).unwrap(),
            "\"General Medicine\""
        );
    }
}
