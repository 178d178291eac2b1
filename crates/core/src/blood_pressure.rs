//! Freeform blood-pressure parsing.
//!
//! Accepts exactly `<digits>/<digits>` (ASCII digits, no whitespace, no sign). Anything else,
//! including the service's `N/A` sentinel and values tagged `INVALID`, parses as absent. A reading
//! is never half-present. Components too large for a `u32` saturate at `u32::MAX`.

use crate::constants::{BP_INVALID_MARKER, BP_NOT_AVAILABLE};
use serde::Serialize;

/// A blood-pressure reading with both components present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BloodPressure {
    pub systolic: u32,
    pub diastolic: u32,
}

/// Outcome of parsing a blood-pressure string.
///
/// `None` means both components are absent.
pub type ParsedBloodPressure = Option<BloodPressure>;

/// Parse a blood-pressure string such as `"120/80"`.
pub fn parse_blood_pressure(input: &str) -> ParsedBloodPressure {
    if input.is_empty() || input == BP_NOT_AVAILABLE || input.contains(BP_INVALID_MARKER) {
        return None;
    }

    let (systolic, diastolic) = input.split_once('/')?;
    if !is_digits(systolic) || !is_digits(diastolic) {
        return None;
    }

    Some(BloodPressure {
        systolic: saturating_digits(systolic),
        diastolic: saturating_digits(diastolic),
    })
}

// Callers have already checked the text is all ASCII digits, so a parse failure is overflow.
fn saturating_digits(part: &str) -> u32 {
    part.parse().unwrap_or(u32::MAX)
}

fn is_digits(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}
