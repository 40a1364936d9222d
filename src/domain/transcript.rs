use chrono::{DateTime, Utc};
use serde::Serialize;

use super::VisitId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    pub visit_id: VisitId,
    pub doctor_id: Option<String>,
    pub patient_id: Option<String>,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transcript {
    pub fn new(visit_id: VisitId, text: String) -> Self {
        let now = Utc::now();
        Self {
            visit_id,
            doctor_id: None,
            patient_id: None,
            text,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_participants(
        mut self,
        doctor_id: Option<String>,
        patient_id: Option<String>,
    ) -> Self {
        self.doctor_id = doctor_id;
        self.patient_id = patient_id;
        self
    }

    /// The transcript text, or `None` when there is nothing to summarize.
    pub fn source_text(&self) -> Option<&str> {
        if self.text.trim().is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }
}
