//! Per-patient clinical risk scoring.
//!
//! Three independent sub-scores are summed into a total in `0..=7`:
//!
//! | Sub-score | Range | Source |
//! |---|---|---|
//! | blood pressure | 0–3 | worse of the systolic and diastolic tiers |
//! | temperature | 0–2 | °F |
//! | age | 0–2 | years |
//!
//! Invalid or missing inputs score 0. Scoring never fails; unusable vitals are surfaced later as
//! data-quality issues by the classifier.

use crate::blood_pressure::{parse_blood_pressure, BloodPressure};
use crate::constants::{
    AGE_MIDDLE_LOWER, AGE_MIDDLE_UPPER, FEVER_THRESHOLD_F, HIGH_FEVER_THRESHOLD_F,
};
use crate::patient::PatientRecord;
use crate::reading::Reading;
use serde::Serialize;

/// A patient record together with its derived scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPatient {
    #[serde(flatten)]
    pub record: PatientRecord,
    #[serde(rename = "bpScore")]
    pub bp_score: u8,
    #[serde(rename = "tempScore")]
    pub temp_score: u8,
    #[serde(rename = "ageScore")]
    pub age_score: u8,
    #[serde(rename = "riskScore")]
    pub risk_score: u8,
}

impl ScoredPatient {
    pub fn patient_id(&self) -> &str {
        &self.record.patient_id
    }
}

fn systolic_tier(systolic: u32) -> u8 {
    match systolic {
        0..=119 => 0,
        120..=129 => 1,
        130..=139 => 2,
        _ => 3,
    }
}

// Diastolic has no tier 1.
fn diastolic_tier(diastolic: u32) -> u8 {
    match diastolic {
        0..=79 => 0,
        80..=89 => 2,
        _ => 3,
    }
}

/// Score an already-parsed reading: the higher of the two tiers.
pub fn bp_score_for(reading: BloodPressure) -> u8 {
    systolic_tier(reading.systolic).max(diastolic_tier(reading.diastolic))
}

/// Blood-pressure sub-score from the raw text; unparsable values score 0.
pub fn bp_score(blood_pressure: &str) -> u8 {
    parse_blood_pressure(blood_pressure).map_or(0, bp_score_for)
}

/// Temperature sub-score in °F.
pub fn temp_score(temperature: &Reading) -> u8 {
    match temperature.value() {
        None => 0,
        Some(t) if t <= FEVER_THRESHOLD_F => 0,
        Some(t) if t <= HIGH_FEVER_THRESHOLD_F => 1,
        Some(_) => 2,
    }
}

/// Age sub-score in years.
pub fn age_score(age: &Reading) -> u8 {
    match age.value() {
        None => 0,
        Some(a) if a < AGE_MIDDLE_LOWER => 0,
        Some(a) if a <= AGE_MIDDLE_UPPER => 1,
        Some(_) => 2,
    }
}

/// Compute all sub-scores and the total for one patient.
pub fn score_patient(record: &PatientRecord) -> ScoredPatient {
    let bp_score = bp_score(record.blood_pressure_text());
    let temp_score = temp_score(&record.temperature);
    let age_score = age_score(&record.age);
    let risk_score = bp_score + temp_score + age_score;

    tracing::debug!(
        patient_id = %record.patient_id,
        temperature = %record.temperature,
        bp_score,
        temp_score,
        age_score,
        risk_score,
        "scored patient"
    );

    ScoredPatient {
        record: record.clone(),
        bp_score,
        temp_score,
        age_score,
        risk_score,
    }
}

/// Score every record, preserving input order.
pub fn score_all(records: &[PatientRecord]) -> Vec<ScoredPatient> {
    records.iter().map(score_patient).collect()
}
