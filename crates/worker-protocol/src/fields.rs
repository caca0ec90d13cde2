//! Checks and normalisation for optional request fields.
//!
//! The worker only understands compact `YYYYMMDD` dates, integer hours and
//! integer pressure levels, while browser clients send whatever their form widgets
//! produce. These helpers convert what can be converted and reject the rest
//! before anything is forwarded.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Normalise a date to `YYYYMMDD`. Accepts `YYYY-MM-DD` or `YYYYMMDD`.
pub fn normalize_date(date: &str) -> Result<String, ValidationError> {
    let date = date.trim();
    if date.is_empty() {
        return Err(ValidationError::EmptyDate);
    }

    let format = if date.len() == 8 && date.bytes().all(|b| b.is_ascii_digit()) {
        "%Y%m%d"
    } else {
        "%Y-%m-%d"
    };

    NaiveDate::parse_from_str(date, format)
        .map(|d| d.format("%Y%m%d").to_string())
        .map_err(|_| ValidationError::InvalidDate(date.to_string()))
}

/// Analysis cycles are hourly, 00Z through 23Z.
pub fn validate_hour(hour: u32) -> Result<u32, ValidationError> {
    if hour > 23 {
        return Err(ValidationError::InvalidHour(hour));
    }
    Ok(hour)
}

/// Analysis hour (UTC), always within 0..=23.
///
/// Accepts a JSON integer or a numeric string such as `"12"`, and always
/// serialises as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HourInput", into = "u32")]
pub struct Hour(u32);

impl Hour {
    pub fn new(hour: u32) -> Result<Self, ValidationError> {
        validate_hour(hour).map(Hour)
    }

    pub fn parse_str(value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        let hour = value
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidHourFormat(value.to_string()))?;
        Self::new(hour)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<Hour> for u32 {
    fn from(hour: Hour) -> Self {
        hour.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HourInput {
    Number(serde_json::Number),
    Text(String),
}

impl TryFrom<HourInput> for Hour {
    type Error = ValidationError;

    fn try_from(input: HourInput) -> Result<Self, Self::Error> {
        match input {
            HourInput::Text(s) => Hour::parse_str(&s),
            HourInput::Number(n) => match n.as_u64() {
                Some(h) => u32::try_from(h)
                    .map_err(|_| ValidationError::InvalidHourFormat(n.to_string()))
                    .and_then(Hour::new),
                None => Err(ValidationError::InvalidHourFormat(n.to_string())),
            },
        }
    }
}

/// Check a sample point lies on the globe.
pub fn validate_point(lat: f64, lon: f64) -> Result<(), ValidationError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(ValidationError::InvalidLatitude(lat));
    }
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        return Err(ValidationError::InvalidLongitude(lon));
    }
    Ok(())
}

/// Isobaric level in millibars (0 means surface).
///
/// Accepts a JSON integer or a numeric string such as `"850"`, and always
/// serialises as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PressureLevelInput", into = "i32")]
pub struct PressureLevel(pub i32);

impl PressureLevel {
    pub fn parse_str(value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::MissingPressureLevel);
        }
        value
            .parse::<i32>()
            .map(PressureLevel)
            .map_err(|_| ValidationError::InvalidPressureLevel(value.to_string()))
    }

    pub fn millibars(&self) -> i32 {
        self.0
    }
}

impl From<PressureLevel> for i32 {
    fn from(level: PressureLevel) -> Self {
        level.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PressureLevelInput {
    Number(serde_json::Number),
    Text(String),
}

impl TryFrom<PressureLevelInput> for PressureLevel {
    type Error = ValidationError;

    fn try_from(input: PressureLevelInput) -> Result<Self, Self::Error> {
        match input {
            PressureLevelInput::Text(s) => PressureLevel::parse_str(&s),
            PressureLevelInput::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return i32::try_from(i)
                        .map(PressureLevel)
                        .map_err(|_| ValidationError::InvalidPressureLevel(n.to_string()));
                }
                // 850.0 is fine, 12.3 is not
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() <= i32::MAX as f64 => {
                        Ok(PressureLevel(f as i32))
                    }
                    _ => Err(ValidationError::InvalidPressureLevel(n.to_string())),
                }
            }
        }
    }
}
