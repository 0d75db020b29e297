//! Uplink ingestion: a bounded message log plus sensor discovery.
//!
//! Each incoming transport message becomes one [`IngestedMessage`]. JSON
//! objects carrying a `data` field get a `data_decoded` entry added, holding
//! either the decode record or `{"error": "..."}`. Successfully decoded
//! uplinks from a known device register a [`SensorEntry`] unless their label
//! matches an ignored fragment.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use rbridge_protocol::{CodecError, DecodedFrame, UplinkMessage};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::{CliConfig, DEFAULT_BUFFER_CAPACITY};
use crate::telemetry::metric_defs;

/// How a message was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Valid JSON.
    Json,
    /// Not JSON; kept as text.
    Text,
    /// JSON that could not be processed.
    Error,
}

impl RecordKind {
    pub fn as_label(&self) -> &'static str {
        match self {
            RecordKind::Json => "json",
            RecordKind::Text => "text",
            RecordKind::Error => "error",
        }
    }
}

/// One retained message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestedMessage {
    #[serde(rename = "type")]
    pub kind: RecordKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    pub received_at: DateTime<Utc>,
    pub data: Value,
}

/// A device seen sending a given sensor type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorEntry {
    #[serde(rename = "DevEUI")]
    pub dev_eui: String,
    /// Lowercased message-type label.
    pub sensor_type: String,
}

/// Bounded log of ingested messages, oldest first.
#[derive(Debug, Clone)]
pub struct UplinkLog {
    capacity: usize,
    messages: VecDeque<IngestedMessage>,
    sensors: Vec<SensorEntry>,
    ignored: Vec<String>,
}

impl Default for UplinkLog {
    fn default() -> Self {
        UplinkLog::from_config(&CliConfig::default())
    }
}

impl UplinkLog {
    /// Create a log holding at most `capacity` messages (minimum 1).
    pub fn new(capacity: usize, ignored: Vec<String>) -> Self {
        let capacity = capacity.max(1);
        UplinkLog {
            capacity,
            messages: VecDeque::with_capacity(capacity.min(DEFAULT_BUFFER_CAPACITY)),
            sensors: Vec::new(),
            ignored: ignored.into_iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    pub fn from_config(config: &CliConfig) -> Self {
        UplinkLog::new(config.buffer_capacity, config.ignored_sensor_types.clone())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Retained messages, oldest first.
    pub fn messages(&self) -> impl Iterator<Item = &IngestedMessage> {
        self.messages.iter()
    }

    /// Discovered sensors in discovery order.
    pub fn sensors(&self) -> &[SensorEntry] {
        &self.sensors
    }

    /// Drop retained messages. Discovered sensors are kept.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Ingest one raw transport message and return the stored record.
    pub fn ingest(&mut self, topic: Option<&str>, payload: &str) -> &IngestedMessage {
        let (kind, data) = match serde_json::from_str::<Value>(payload) {
            Ok(Value::Object(mut object)) => match object.get("data").cloned() {
                Some(Value::String(_)) => {
                    let decoded = self.decode_uplink(Value::Object(object.clone()));
                    object.insert("data_decoded".to_string(), decoded);
                    (RecordKind::Json, Value::Object(object))
                }
                Some(other) => {
                    warn!(field = %other, "uplink data is not a string");
                    (
                        RecordKind::Error,
                        Value::String(format!(
                            "Error processing message: data must be a base64 string, got {}",
                            other
                        )),
                    )
                }
                None => (RecordKind::Json, Value::Object(object)),
            },
            Ok(other) => (RecordKind::Json, other),
            Err(_) => (RecordKind::Text, Value::String(payload.to_string())),
        };

        let message_type = data
            .get("data_decoded")
            .and_then(|d| d.get("message_type"))
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        let def = metric_defs::UPLINK_RECEIVED;
        let labels = def.labelled([kind.as_label().to_string(), message_type]);
        metrics::counter!(def.name, &labels).increment(1);

        self.push(IngestedMessage {
            kind,
            topic: topic.map(str::to_string),
            received_at: Utc::now(),
            data,
        })
    }

    fn decode_uplink(&mut self, object: Value) -> Value {
        let result = serde_json::from_value::<UplinkMessage>(object)
            .map_err(|e| CodecError::InvalidJson(e.to_string()))
            .and_then(|uplink| uplink.decode());

        match result {
            Ok(decoded) => {
                debug!(
                    deveui = decoded.dev_eui.as_deref().unwrap_or("-"),
                    message_type = %decoded.frame.message_type,
                    "decoded uplink"
                );
                if let Some(dev_eui) = decoded.dev_eui.as_deref() {
                    self.discover(dev_eui, &decoded.frame);
                }
                serde_json::to_value(&decoded.frame)
                    .unwrap_or_else(|e| json!({ "error": e.to_string() }))
            }
            Err(e) => {
                warn!(error = %e, "failed to decode uplink");
                metrics::counter!(metric_defs::UPLINK_DECODE_ERRORS.name).increment(1);
                json!({ "error": format!("Error decoding Base64 or interpreting the payload: {}", e) })
            }
        }
    }

    fn discover(&mut self, dev_eui: &str, frame: &DecodedFrame) {
        if dev_eui.is_empty() {
            return;
        }
        let sensor_type = frame.message_type.to_lowercase();
        if self.ignored.iter().any(|f| sensor_type.contains(f.as_str())) {
            return;
        }
        let entry = SensorEntry {
            dev_eui: dev_eui.to_string(),
            sensor_type,
        };
        if self.sensors.contains(&entry) {
            return;
        }

        info!(deveui = %entry.dev_eui, sensor_type = %entry.sensor_type, "sensor added");
        let def = metric_defs::SENSOR_DISCOVERED;
        let labels = def.labelled([entry.sensor_type.clone()]);
        metrics::counter!(def.name, &labels).increment(1);
        self.sensors.push(entry);
    }

    fn push(&mut self, message: IngestedMessage) -> &IngestedMessage {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
        // Just pushed, so the deque is non-empty
        &self.messages[self.messages.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER: &str = r#"{"deveui": "00-80-00-00-00-01", "data": "EAgABQ"}"#;
    const SUPERVISORY: &str = r#"{"deveui": "00-80-00-00-00-01", "data": "EAEAADAAAAAAAAE"}"#;

    #[test]
    fn test_json_uplink_gets_decoded() {
        let mut log = UplinkLog::default();
        let record = log.ingest(Some("lora/uplink"), WATER);
        assert_eq!(record.kind, RecordKind::Json);
        assert_eq!(record.topic.as_deref(), Some("lora/uplink"));
        assert_eq!(
            record.data["data_decoded"]["message_type"],
            "Water Leak Sensor Event"
        );
        assert_eq!(record.data["data_decoded"]["Relative Resistance"], 5);
        assert_eq!(record.data["deveui"], "00-80-00-00-00-01");
    }

    #[test]
    fn test_text_and_error_records() {
        let mut log = UplinkLog::default();
        assert_eq!(log.ingest(None, "hello gateway").kind, RecordKind::Text);
        assert_eq!(log.ingest(None, r#"{"data": 5}"#).kind, RecordKind::Error);
        assert_eq!(log.ingest(None, r#"{"status": "ok"}"#).kind, RecordKind::Json);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_decode_failure_is_recorded() {
        let mut log = UplinkLog::default();
        let record = log.ingest(None, r#"{"deveui": "x", "data": "EA"}"#);
        assert_eq!(record.kind, RecordKind::Json);
        assert!(record.data["data_decoded"]["error"].is_string());
        assert!(log.sensors().is_empty());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut log = UplinkLog::new(3, Vec::new());
        for i in 0..5 {
            log.ingest(None, &format!("message {}", i));
        }
        assert_eq!(log.len(), 3);
        let texts: Vec<_> = log.messages().map(|m| m.data.as_str().unwrap_or("")).collect();
        assert_eq!(texts, vec!["message 2", "message 3", "message 4"]);
    }

    #[test]
    fn test_default_capacity() {
        let mut log = UplinkLog::default();
        for i in 0..200 {
            log.ingest(None, &i.to_string());
        }
        assert_eq!(log.len(), 150);
        assert_eq!(log.messages().next().map(|m| m.data.clone()), Some(json!(50)));
    }

    #[test]
    fn test_sensor_discovery_dedupes() {
        let mut log = UplinkLog::default();
        log.ingest(None, WATER);
        log.ingest(None, WATER);
        assert_eq!(
            log.sensors(),
            &[SensorEntry {
                dev_eui: "00-80-00-00-00-01".to_string(),
                sensor_type: "water leak sensor event".to_string(),
            }]
        );
    }

    #[test]
    fn test_sensor_discovery_ignores_housekeeping() {
        let mut log = UplinkLog::default();
        let record = log.ingest(None, SUPERVISORY);
        assert_eq!(record.data["data_decoded"]["message_type"], "Supervisory Message");
        log.ingest(None, r#"{"deveui": "00-80", "data": "EEIA"}"#);
        log.ingest(None, r#"{"data": "EAgABQ"}"#);
        assert!(log.sensors().is_empty());
    }

    #[test]
    fn test_custom_ignore_list() {
        let mut log = UplinkLog::new(10, vec!["Water".to_string()]);
        log.ingest(None, WATER);
        assert!(log.sensors().is_empty());
    }

    #[test]
    fn test_serialized_record_shape() {
        let mut log = UplinkLog::default();
        let record = serde_json::to_value(log.ingest(Some("t"), "plain")).unwrap();
        assert_eq!(record["type"], "text");
        assert_eq!(record["topic"], "t");
        assert_eq!(record["data"], "plain");
        assert!(record["received_at"].is_string());
    }
}
