//! # Triage Core
//!
//! Pure clinical risk scoring for patient records fetched from the assessment API.
//!
//! This crate contains no I/O beyond reading saved record files:
//! - Lenient patient record model ([`PatientRecord`], [`Reading`])
//! - Blood-pressure parsing
//! - Per-patient risk scoring
//! - Classification into the high-risk, fever and data-quality lists
//!
//! **No transport concerns**: fetching, retries and pagination belong in `triage-client`.

pub mod assessment;
pub mod blood_pressure;
pub mod constants;
pub mod error;
pub mod patient;
pub mod reading;
pub mod scoring;
pub mod summary;

pub use assessment::{assess, Assessment};
pub use blood_pressure::{parse_blood_pressure, BloodPressure, ParsedBloodPressure};
pub use error::{CoreError, CoreResult};
pub use patient::{read_records, records_from_json, PatientRecord};
pub use reading::Reading;
pub use scoring::{score_all, score_patient, ScoredPatient};
pub use summary::{classify, generate_summary, Classification, Summary};
