//! Reduction of scored patients into the three alert lists.
//!
//! The [`Summary`] shape (`high_risk_patients`, `fever_patients`, `data_quality_issues`, each
//! sorted ascending) is consumed downstream verbatim. Identifiers are not deduplicated: if the
//! same patient is delivered twice, it is listed twice.

use crate::blood_pressure::parse_blood_pressure;
use crate::constants::{FEVER_THRESHOLD_F, HIGH_RISK_THRESHOLD};
use crate::scoring::ScoredPatient;
use serde::{Deserialize, Serialize};

/// Which alert lists a single patient belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub high_risk: bool,
    pub fever: bool,
    pub data_quality_issue: bool,
}

/// Evaluate the three predicates independently for one patient.
pub fn classify(patient: &ScoredPatient) -> Classification {
    let record = &patient.record;

    let fever = record
        .temperature
        .value()
        .is_some_and(|t| t > FEVER_THRESHOLD_F);

    let data_quality_issue = parse_blood_pressure(record.blood_pressure_text()).is_none()
        || record.age.is_unusable()
        || record.temperature.is_unusable();

    Classification {
        high_risk: patient.risk_score >= HIGH_RISK_THRESHOLD,
        fever,
        data_quality_issue,
    }
}

/// Alert lists produced for a batch of patients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub high_risk_patients: Vec<String>,
    pub fever_patients: Vec<String>,
    pub data_quality_issues: Vec<String>,
}

impl Summary {
    /// Total number of list entries across all three lists.
    pub fn len(&self) -> usize {
        self.high_risk_patients.len() + self.fever_patients.len() + self.data_quality_issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the summary for a batch of scored patients.
pub fn generate_summary(patients: &[ScoredPatient]) -> Summary {
    let mut summary = Summary::default();

    for patient in patients {
        let class = classify(patient);
        let id = patient.patient_id();

        if class.high_risk {
            summary.high_risk_patients.push(id.to_owned());
        }
        if class.fever {
            summary.fever_patients.push(id.to_owned());
        }
        if class.data_quality_issue {
            summary.data_quality_issues.push(id.to_owned());
        }
    }

    summary.high_risk_patients.sort();
    summary.fever_patients.sort();
    summary.data_quality_issues.sort();
    summary
}
