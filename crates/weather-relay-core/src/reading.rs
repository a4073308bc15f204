//! The weather reading domain model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One weather observation, as carried on the queue and delivered to the
/// ingestion endpoint.
///
/// The serialized field names are the wire contract; `feels_like` is always
/// present and numeric on the wire. A reading is built once per inbound
/// message, mutated only by [`Reading::default_feels_like`], and discarded
/// after the message's acknowledgment decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: f64,
    /// Absent in the inbound payload deserializes to `0.0`; see
    /// [`Reading::default_feels_like`].
    #[serde(default)]
    pub feels_like: f64,
    pub humidity: i64,
    pub wind_speed: f64,
    pub condition: String,
    pub rain_probability: f64,
    /// Provider-specific payload, forwarded without validation or
    /// modification.
    #[serde(default)]
    pub raw: Map<String, Value>,
}

impl Reading {
    /// Fall back to `temperature` when the source omitted or zeroed
    /// `feels_like`.
    ///
    /// A reading is never validated or transmitted with an unset feels-like
    /// value, and zero is treated as unset.
    pub fn default_feels_like(&mut self) {
        if self.feels_like == 0.0 {
            self.feels_like = self.temperature;
        }
    }
}

#[cfg(test)]
#[path = "reading_tests.rs"]
mod tests;
