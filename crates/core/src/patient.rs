//! Patient records as fetched from the remote service.
//!
//! Records are read leniently: only `patient_id` is mandatory. Every other field defaults when
//! absent so that a partially populated record still reaches scoring, where bad vitals degrade
//! to zero sub-scores instead of failing the fetch.

use crate::reading::Reading;
use crate::{CoreError, CoreResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One patient as delivered by the remote service. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Identifier, unique within one dataset.
    pub patient_id: String,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,

    #[serde(default)]
    pub age: Reading,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub gender: String,

    /// Freeform `systolic/diastolic` text; may be malformed or missing.
    #[serde(default, deserialize_with = "optional_text")]
    pub blood_pressure: Option<String>,

    #[serde(default)]
    pub temperature: Reading,

    #[serde(default, deserialize_with = "optional_text")]
    pub visit_date: Option<String>,

    #[serde(default, deserialize_with = "optional_text")]
    pub diagnosis: Option<String>,

    #[serde(default, deserialize_with = "optional_text")]
    pub medications: Option<String>,
}

impl PatientRecord {
    /// Minimal record carrying only the vitals that scoring reads.
    pub fn with_vitals(
        patient_id: impl Into<String>,
        age: Reading,
        blood_pressure: Option<&str>,
        temperature: Reading,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            name: String::new(),
            age,
            gender: String::new(),
            blood_pressure: blood_pressure.map(str::to_owned),
            temperature,
            visit_date: None,
            diagnosis: None,
            medications: None,
        }
    }

    /// Blood-pressure text with a missing value read as empty.
    pub fn blood_pressure_text(&self) -> &str {
        self.blood_pressure.as_deref().unwrap_or("")
    }
}

/// Strings pass through, `null` becomes `None`, anything else keeps its JSON text.
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

/// Parse a JSON array of patient records, as saved from an earlier fetch.
pub fn records_from_json(text: &str) -> CoreResult<Vec<PatientRecord>> {
    serde_json::from_str(text).map_err(CoreError::Deserialization)
}

/// Read a JSON array of patient records from disk.
pub fn read_records(path: &std::path::Path) -> CoreResult<Vec<PatientRecord>> {
    let text = std::fs::read_to_string(path).map_err(CoreError::FileRead)?;
    records_from_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_a_complete_record() {
        let value = json!({
            "patient_id": "DEMO001",
            "name": "TestPatient, John",
            "age": 45,
            "gender": "M",
            "blood_pressure": "120/80",
            "temperature": 98.6,
            "visit_date": "2024-01-15",
            "diagnosis": "Sample_Hypertension",
            "medications": "DemoMed_A 10mg, TestDrug_B 500mg"
        });

        let record: PatientRecord = serde_json::from_value(value).expect("parse record");
        assert_eq!(record.patient_id, "DEMO001");
        assert_eq!(record.age, Reading::Number(45.0));
        assert_eq!(record.temperature, Reading::Number(98.6));
        assert_eq!(record.blood_pressure_text(), "120/80");
        assert_eq!(record.diagnosis.as_deref(), Some("Sample_Hypertension"));
    }

    #[test]
    fn tolerates_missing_and_corrupted_vitals() {
        let value = json!({
            "patient_id": "DEMO002",
            "age": "fifty-three",
            "blood_pressure": null,
            "temperature": "TEMP_ERROR"
        });

        let record: PatientRecord = serde_json::from_value(value).expect("parse record");
        assert_eq!(record.age, Reading::Invalid("fifty-three".into()));
        assert_eq!(record.blood_pressure, None);
        assert_eq!(record.blood_pressure_text(), "");
        assert_eq!(record.temperature, Reading::Invalid("TEMP_ERROR".into()));
        assert_eq!(record.name, "");
    }

    #[test]
    fn non_string_text_fields_keep_their_json_text() {
        let value = json!({
            "patient_id": "DEMO004",
            "name": null,
            "blood_pressure": 120,
            "medications": ["A", "B"]
        });

        let record: PatientRecord = serde_json::from_value(value).expect("parse record");
        assert_eq!(record.name, "");
        assert_eq!(record.blood_pressure.as_deref(), Some("120"));
        assert_eq!(record.medications.as_deref(), Some(r#"["A","B"]"#));
    }

    #[test]
    fn absent_vitals_are_missing() {
        let record: PatientRecord =
            serde_json::from_value(json!({ "patient_id": "DEMO003" })).expect("parse record");
        assert_eq!(record.age, Reading::Missing);
        assert_eq!(record.temperature, Reading::Missing);
    }

    #[test]
    fn rejects_record_without_identifier() {
        let err = records_from_json(r#"[{"name": "No Id"}]"#).expect_err("should reject");
        match err {
            CoreError::Deserialization(e) => assert!(e.to_string().contains("patient_id")),
            other => panic!("expected Deserialization error, got {other:?}"),
        }
    }

    #[test]
    fn reads_records_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("patients.json");
        std::fs::write(
            &path,
            r#"[{"patient_id": "A1", "age": 30}, {"patient_id": "A2", "temperature": 101.4}]"#,
        )
        .expect("write fixture");

        let records = read_records(&path).expect("read records");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].temperature, Reading::Number(101.4));
    }
}
