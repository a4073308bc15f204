//! Tests for the fixed-delay retry policy.

use super::*;
use crate::api_client::{DeliveryError, ReadingSink};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use weather_relay_core::Reading;

// ============================================================================
// Mock Types
// ============================================================================

/// Sink returning scripted results per call, in order. Once the script is
/// drained every further call succeeds.
struct ScriptedSink {
    results: Mutex<Vec<Result<(), DeliveryError>>>,
    calls: AtomicU32,
}

impl ScriptedSink {
    fn new(results: Vec<Result<(), DeliveryError>>) -> Self {
        Self {
            results: Mutex::new(results),
            calls: AtomicU32::new(0),
        }
    }

    fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReadingSink for ScriptedSink {
    async fn deliver(&self, _reading: &Reading) -> Result<(), DeliveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut results = self.results.lock().unwrap();
        if results.is_empty() {
            Ok(())
        } else {
            results.remove(0)
        }
    }
}

fn status_error(status: u16) -> DeliveryError {
    DeliveryError::Status {
        status,
        body: "failure".to_string(),
    }
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

// ============================================================================
// RetryPolicy Tests
// ============================================================================

#[test]
fn test_default_policy_values() {
    let policy = RetryPolicy::default();

    assert_eq!(policy.max_attempts, 3);
    assert_eq!(policy.delay, Duration::from_secs(5));
}

#[tokio::test]
async fn test_first_attempt_success_makes_a_single_call() {
    let sink = ScriptedSink::new(vec![]);
    let policy = RetryPolicy::new(3, Duration::from_secs(5));

    deliver_with_retry(&sink, &sample_reading(), &policy)
        .await
        .unwrap();

    assert_eq!(sink.call_count(), 1);
}

#[tokio::test]
async fn test_two_failures_then_success_makes_three_calls_with_pauses() {
    let sink = ScriptedSink::new(vec![Err(status_error(500)), Err(status_error(500))]);
    let policy = RetryPolicy::new(3, Duration::from_millis(25));
    let started = Instant::now();

    deliver_with_retry(&sink, &sample_reading(), &policy)
        .await
        .unwrap();

    assert_eq!(sink.call_count(), 3);
    assert!(
        started.elapsed() >= Duration::from_millis(50),
        "expected two inter-attempt pauses"
    );
}

#[tokio::test]
async fn test_stops_at_first_success() {
    let sink = ScriptedSink::new(vec![Err(status_error(502))]);
    let policy = RetryPolicy::new(5, Duration::from_millis(1));

    deliver_with_retry(&sink, &sample_reading(), &policy)
        .await
        .unwrap();

    assert_eq!(sink.call_count(), 2);
}

#[tokio::test]
async fn test_exhaustion_returns_the_last_attempt_error() {
    let sink = ScriptedSink::new(vec![
        Err(status_error(500)),
        Err(status_error(502)),
        Err(status_error(503)),
    ]);
    let policy = RetryPolicy::new(3, Duration::from_millis(1));

    let result = deliver_with_retry(&sink, &sample_reading(), &policy).await;

    assert_eq!(sink.call_count(), 3);
    match result {
        Err(DeliveryError::Status { status, .. }) => assert_eq!(status, 503),
        other => panic!("expected the final attempt's error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_single_attempt_policy_never_pauses() {
    let sink = ScriptedSink::new(vec![Err(status_error(500))]);
    let policy = RetryPolicy::new(1, Duration::from_secs(5));
    let started = Instant::now();

    let result = deliver_with_retry(&sink, &sample_reading(), &policy).await;

    assert!(result.is_err());
    assert_eq!(sink.call_count(), 1);
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn test_identical_behavior_yields_identical_outcome() {
    let policy = RetryPolicy::new(2, Duration::from_millis(1));
    let reading = sample_reading();

    let first_sink = ScriptedSink::new(vec![Err(status_error(500)), Err(status_error(500))]);
    let second_sink = ScriptedSink::new(vec![Err(status_error(500)), Err(status_error(500))]);

    let first = deliver_with_retry(&first_sink, &reading, &policy).await;
    let second = deliver_with_retry(&second_sink, &reading, &policy).await;

    assert!(matches!(
        first,
        Err(DeliveryError::Status { status: 500, .. })
    ));
    assert!(matches!(
        second,
        Err(DeliveryError::Status { status: 500, .. })
    ));
    assert_eq!(first_sink.call_count(), second_sink.call_count());
}
