//! Scoring and summarising a collected batch in one step.

use crate::patient::PatientRecord;
use crate::scoring::{score_all, ScoredPatient};
use crate::summary::{generate_summary, Summary};
use crate::{CoreError, CoreResult};

/// Scored patients in input order plus the alert lists derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub patients: Vec<ScoredPatient>,
    pub summary: Summary,
}

impl Assessment {
    /// Pretty JSON of the summary, in the downstream shape.
    pub fn summary_json(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(&self.summary).map_err(|source| CoreError::Serialization {
            what: "summary",
            source,
        })
    }

    /// Pretty JSON of every scored patient.
    pub fn patients_json(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(&self.patients).map_err(|source| {
            CoreError::Serialization {
                what: "scored patients",
                source,
            }
        })
    }
}

/// Score every record and build the summary.
pub fn assess(records: &[PatientRecord]) -> Assessment {
    let patients = score_all(records);
    let summary = generate_summary(&patients);

    tracing::info!(
        patients = patients.len(),
        high_risk = summary.high_risk_patients.len(),
        fever = summary.fever_patients.len(),
        data_quality = summary.data_quality_issues.len(),
        "assessment complete"
    );

    Assessment { patients, summary }
}
