use serde::{Deserialize, Serialize};

use super::enums::Severity;

/// The intake form: what the patient reports before asking for a
/// suggestion. Created empty and mutated by direct edits; cleared
/// wholesale on reset or when a new suggestion request is accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsultationContext {
    pub severity: Option<Severity>,
    pub problem: String,
    pub symptoms: String,
}

impl ConsultationContext {
    pub fn new(severity: Severity, problem: &str, symptoms: &str) -> Self {
        Self {
            severity: Some(severity),
            problem: problem.to_string(),
            symptoms: symptoms.to_string(),
        }
    }

    /// A suggestion may only be requested when all three fields are set.
    /// Whitespace-only text counts as empty.
    pub fn is_complete(&self) -> bool {
        self.severity.is_some()
            && !self.problem.trim().is_empty()
            && !self.symptoms.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.severity = None;
        self.problem.clear();
        self.symptoms.clear();
    }
}
