//! Numeric vital-sign readings as delivered by the remote service.
//!
//! The service is loosely typed: a vital can arrive as a JSON number, a numeric string, `null`,
//! be absent altogether, or carry a free-text error marker such as `"TEMP_ERROR"`. A [`Reading`]
//! keeps that distinction so scoring can degrade to zero and classification can flag the record,
//! while the delivered payload still serialises back unchanged.

use serde_json::Value;

/// A single numeric vital sign.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Reading {
    /// A usable, finite numeric value.
    Number(f64),
    /// The field was `null` or absent.
    #[default]
    Missing,
    /// The field held something that is not a number; the raw text is kept verbatim.
    Invalid(String),
}

impl Reading {
    /// Returns the numeric value, or `None` for missing and invalid readings.
    pub fn value(&self) -> Option<f64> {
        match self {
            Reading::Number(v) => Some(*v),
            Reading::Missing | Reading::Invalid(_) => None,
        }
    }

    /// True when the reading cannot take part in scoring.
    pub fn is_unusable(&self) -> bool {
        self.value().is_none()
    }

    /// Interpret an arbitrary JSON value as a reading.
    ///
    /// Numeric strings are accepted after trimming; empty strings, booleans, arrays and objects
    /// are invalid.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Reading::Missing,
            Value::Number(n) => match n.as_f64() {
                Some(v) if v.is_finite() => Reading::Number(v),
                _ => Reading::Invalid(n.to_string()),
            },
            Value::String(s) => Self::from_text(s),
            other => Reading::Invalid(other.to_string()),
        }
    }

    fn from_text(text: &str) -> Self {
        match text.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Reading::Number(v),
            _ => Reading::Invalid(text.to_owned()),
        }
    }
}

impl From<f64> for Reading {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Reading::Number(value)
        } else {
            Reading::Invalid(value.to_string())
        }
    }
}

impl std::fmt::Display for Reading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reading::Number(v) => write!(f, "{v}"),
            Reading::Missing => write!(f, "missing"),
            Reading::Invalid(raw) => write!(f, "invalid({raw})"),
        }
    }
}

impl serde::Serialize for Reading {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Reading::Number(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
                serializer.serialize_i64(*v as i64)
            }
            Reading::Number(v) => serializer.serialize_f64(*v),
            Reading::Missing => serializer.serialize_none(),
            Reading::Invalid(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Reading {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Reading::from_json(&value))
    }
}
