//! Scoring thresholds and wire sentinels used throughout the triage core crate.
//!
//! The tier boundaries live here so the scorer and the classifier read from one place.

/// Blood-pressure value the remote service uses for "not available".
pub const BP_NOT_AVAILABLE: &str = "N/A";

/// Marker the remote service embeds in deliberately corrupted blood-pressure values.
pub const BP_INVALID_MARKER: &str = "INVALID";

/// Inclusive upper bound of a temperature that scores 0 and does not count as fever.
pub const FEVER_THRESHOLD_F: f64 = 99.5;

/// Inclusive upper bound of the low-grade fever band (temperature score 1).
pub const HIGH_FEVER_THRESHOLD_F: f64 = 100.9;

/// Ages strictly below this score 0.
pub const AGE_MIDDLE_LOWER: f64 = 40.0;

/// Ages up to and including this score 1; anything above scores 2.
pub const AGE_MIDDLE_UPPER: f64 = 65.0;

/// Minimum total risk score for a patient to be classed as high risk.
pub const HIGH_RISK_THRESHOLD: u8 = 4;
