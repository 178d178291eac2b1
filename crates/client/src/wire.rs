//! Response envelope of the patient collection endpoint.
//!
//! ```json
//! {
//!   "data": [ { "patient_id": "DEMO001", ... } ],
//!   "pagination": { "page": 1, "limit": 5, "total": 50, "totalPages": 10,
//!                   "hasNext": true, "hasPrevious": false },
//!   "metadata": { "timestamp": "...", "version": "v1.0", "requestId": "..." }
//! }
//! ```
//!
//! A payload is well formed when it is a JSON object whose `data` member is an array of patient
//! records. Pagination is optional: when it is missing or does not match the expected shape the
//! page still counts, it just carries no metadata.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use triage_core::PatientRecord;

/// Pagination metadata as reported by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Decoded body of one successful page response.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePayload {
    pub data: Vec<PatientRecord>,
    pub pagination: Option<Pagination>,
    pub metadata: Option<Value>,
}

/// Decode a page body, returning a human-readable reason when it is malformed.
pub fn parse_page_payload(body: &str) -> Result<PagePayload, String> {
    let mut envelope: Value =
        serde_json::from_str(body).map_err(|e| format!("body is not JSON: {e}"))?;

    let object = envelope
        .as_object_mut()
        .ok_or_else(|| "body is not a JSON object".to_string())?;

    let data = match object.remove("data") {
        Some(data @ Value::Array(_)) => data,
        Some(other) => return Err(format!("`data` is not an array: {}", type_name(&other))),
        None => return Err("no `data` array".to_string()),
    };

    let data: Vec<PatientRecord> =
        serde_json::from_value(data).map_err(|e| format!("invalid patient record: {e}"))?;

    let pagination = object
        .remove("pagination")
        .and_then(|p| serde_json::from_value::<Pagination>(p).ok());

    let metadata = object.remove("metadata").filter(|m| !m.is_null());

    Ok(PagePayload {
        data,
        pagination,
        metadata,
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
