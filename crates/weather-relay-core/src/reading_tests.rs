//! Tests for the reading model and its wire form.

use super::*;
use serde_json::json;

#[test]
fn test_deserialize_full_payload() {
    let reading: Reading = serde_json::from_value(json!({
        "timestamp": "2024-01-01T12:00:00Z",
        "location": "Recife",
        "latitude": -8.05,
        "longitude": -34.9,
        "temperature": 28.0,
        "feels_like": 31.5,
        "humidity": 78,
        "wind_speed": 12.0,
        "condition": "partly_cloudy",
        "rain_probability": 0.4,
        "raw": {"weather_code": 2}
    }))
    .unwrap();

    assert_eq!(reading.location, "Recife");
    assert_eq!(reading.feels_like, 31.5);
    assert_eq!(reading.raw.get("weather_code"), Some(&json!(2)));
}

#[test]
fn test_missing_feels_like_defaults_to_temperature() {
    let mut reading: Reading = serde_json::from_value(json!({
        "timestamp": "2024-01-01T12:00:00Z",
        "location": "Recife",
        "latitude": -8.05,
        "longitude": -34.9,
        "temperature": 28.0,
        "humidity": 78,
        "wind_speed": 12.0,
        "condition": "clear",
        "rain_probability": 0.4
    }))
    .unwrap();

    assert_eq!(reading.feels_like, 0.0);
    reading.default_feels_like();
    assert_eq!(reading.feels_like, reading.temperature);
}

#[test]
fn test_zero_feels_like_defaults_to_temperature() {
    let mut reading = sample_reading();
    reading.feels_like = 0.0;

    reading.default_feels_like();

    assert_eq!(reading.feels_like, reading.temperature);
}

#[test]
fn test_explicit_feels_like_is_preserved() {
    let mut reading = sample_reading();
    reading.feels_like = 19.5;

    reading.default_feels_like();

    assert_eq!(reading.feels_like, 19.5);
}

#[test]
fn test_defaulting_twice_is_stable() {
    let mut reading = sample_reading();
    reading.feels_like = 0.0;

    reading.default_feels_like();
    reading.default_feels_like();

    assert_eq!(reading.feels_like, reading.temperature);
}

#[test]
fn test_missing_required_field_fails_to_deserialize() {
    // No temperature: malformed, not merely invalid.
    let result: Result<Reading, _> = serde_json::from_value(json!({
        "timestamp": "2024-01-01T12:00:00Z",
        "location": "Recife",
        "latitude": -8.05,
        "longitude": -34.9,
        "humidity": 78,
        "wind_speed": 12.0,
        "condition": "clear",
        "rain_probability": 0.4
    }));

    assert!(result.is_err());
}

#[test]
fn test_raw_payload_passes_through_unmodified() {
    let raw = json!({
        "z_last": [1, 2, 3],
        "a_first": {"nested": true},
        "text": "anything"
    });

    let mut payload = json!({
        "timestamp": "2024-01-01T12:00:00Z",
        "location": "Recife",
        "latitude": -8.05,
        "longitude": -34.9,
        "temperature": 28.0,
        "feels_like": 27.0,
        "humidity": 78,
        "wind_speed": 12.0,
        "condition": "clear",
        "rain_probability": 0.4
    });
    payload["raw"] = raw.clone();

    let reading: Reading = serde_json::from_value(payload).unwrap();
    let wire = serde_json::to_value(&reading).unwrap();

    assert_eq!(wire["raw"], raw);
}

#[test]
fn test_wire_form_carries_exact_field_names() {
    let wire = serde_json::to_value(sample_reading()).unwrap();
    let object = wire.as_object().unwrap();

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "condition",
            "feels_like",
            "humidity",
            "latitude",
            "location",
            "longitude",
            "rain_probability",
            "raw",
            "temperature",
            "timestamp",
            "wind_speed",
        ]
    );
    assert!(object["feels_like"].is_number());
}

fn sample_reading() -> Reading {
    Reading {
        timestamp: "2024-01-01T12:00:00Z".to_string(),
        location: "Lisbon".to_string(),
        latitude: 38.7,
        longitude: -9.1,
        temperature: 20.0,
        feels_like: 19.5,
        humidity: 60,
        wind_speed: 10.0,
        condition: "clear".to_string(),
        rain_probability: 0.2,
        raw: serde_json::Map::new(),
    }
}
