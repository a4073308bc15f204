//! Semantic validation of weather readings.

use crate::reading::Reading;
use chrono::DateTime;
use thiserror::Error;

const LATITUDE_BOUNDS: (f64, f64) = (-90.0, 90.0);
const LONGITUDE_BOUNDS: (f64, f64) = (-180.0, 180.0);
const TEMPERATURE_BOUNDS_C: (f64, f64) = (-50.0, 60.0);
const HUMIDITY_BOUNDS_PCT: (f64, f64) = (0.0, 100.0);
const WIND_SPEED_BOUNDS: (f64, f64) = (0.0, 200.0);
const RAIN_PROBABILITY_BOUNDS: (f64, f64) = (0.0, 1.0);

/// A reading that violates a domain rule.
///
/// Every variant names the offending field and carries the rejected value, so
/// a log line is enough to diagnose the payload.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("required field '{field}' is empty")]
    EmptyField { field: &'static str },

    #[error("timestamp '{value}' is not RFC 3339: {message}")]
    InvalidTimestamp { value: String, message: String },

    #[error("{field} {value} outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Check a reading against the domain rules, reporting the first violation.
///
/// Pure and deterministic. Expects feels-like defaulting to have already run;
/// the `feels_like` range check applies to the defaulted value.
pub fn validate(reading: &Reading) -> Result<(), ValidationError> {
    if reading.location.is_empty() {
        return Err(ValidationError::EmptyField { field: "location" });
    }
    if reading.condition.is_empty() {
        return Err(ValidationError::EmptyField { field: "condition" });
    }
    if reading.timestamp.is_empty() {
        return Err(ValidationError::EmptyField { field: "timestamp" });
    }

    if let Err(err) = DateTime::parse_from_rfc3339(&reading.timestamp) {
        return Err(ValidationError::InvalidTimestamp {
            value: reading.timestamp.clone(),
            message: err.to_string(),
        });
    }

    check_range("latitude", reading.latitude, LATITUDE_BOUNDS)?;
    check_range("longitude", reading.longitude, LONGITUDE_BOUNDS)?;
    check_range("temperature", reading.temperature, TEMPERATURE_BOUNDS_C)?;
    check_range("feels_like", reading.feels_like, TEMPERATURE_BOUNDS_C)?;
    check_range("humidity", reading.humidity as f64, HUMIDITY_BOUNDS_PCT)?;
    check_range("wind_speed", reading.wind_speed, WIND_SPEED_BOUNDS)?;
    check_range(
        "rain_probability",
        reading.rain_probability,
        RAIN_PROBABILITY_BOUNDS,
    )?;

    Ok(())
}

fn check_range(
    field: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
