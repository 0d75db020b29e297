//! Metric definitions for uplink ingestion.
//!
//! Counters are recorded through the `metrics` facade; without an installed
//! recorder they are no-ops.

use metrics::{describe_counter, Unit};

/// A counter definition: name, description and label keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metric {
    /// The metric name (e.g., "rbridge.uplink.received").
    pub name: &'static str,
    /// Human-readable description of the metric.
    pub description: &'static str,
    /// Expected label keys for this metric.
    pub labels: &'static [&'static str],
}

impl Metric {
    /// Creates a new counter with the given name.
    pub const fn counter(name: &'static str) -> Self {
        Self {
            name,
            description: "",
            labels: &[],
        }
    }

    /// Sets the description.
    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Sets the expected label keys.
    pub const fn with_labels(mut self, labels: &'static [&'static str]) -> Self {
        self.labels = labels;
        self
    }

    /// Pairs the declared label keys with `values`, in order.
    pub fn labelled<const N: usize>(&self, values: [String; N]) -> [(&'static str, String); N] {
        debug_assert_eq!(self.labels.len(), N, "label count for {}", self.name);
        let mut values = values.into_iter();
        std::array::from_fn(|i| {
            (
                self.labels.get(i).copied().unwrap_or_default(),
                values.next().unwrap_or_default(),
            )
        })
    }

    /// Registers the description with the installed recorder.
    pub fn describe(&self) {
        describe_counter!(self.name, Unit::Count, self.description);
    }
}

pub mod metric_defs {
    use super::Metric;

    /// Messages ingested.
    ///
    /// Labels: kind, message_type
    pub const UPLINK_RECEIVED: Metric = Metric::counter("rbridge.uplink.received")
        .with_description("Messages ingested, by record kind and decoded message type")
        .with_labels(&["kind", "message_type"]);

    /// Uplinks whose frame failed to decode.
    pub const UPLINK_DECODE_ERRORS: Metric = Metric::counter("rbridge.uplink.decode_errors")
        .with_description("Uplinks whose base64 frame could not be decoded");

    /// Distinct sensors discovered.
    ///
    /// Labels: sensor_type
    pub const SENSOR_DISCOVERED: Metric = Metric::counter("rbridge.sensor.discovered")
        .with_description("Distinct device/sensor-type pairs discovered")
        .with_labels(&["sensor_type"]);

    /// Downlink frames encoded.
    ///
    /// Labels: sensor_type
    pub const DOWNLINK_ENCODED: Metric = Metric::counter("rbridge.downlink.encoded")
        .with_description("Configuration downlinks encoded")
        .with_labels(&["sensor_type"]);

    pub const ALL: [&Metric; 4] = [
        &UPLINK_RECEIVED,
        &UPLINK_DECODE_ERRORS,
        &SENSOR_DISCOVERED,
        &DOWNLINK_ENCODED,
    ];
}

/// Describe every metric. Call once after installing a recorder.
pub fn describe_metrics() {
    for metric in metric_defs::ALL {
        metric.describe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_are_unique() {
        let mut names: Vec<_> = metric_defs::ALL.iter().map(|m| m.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), metric_defs::ALL.len());
    }

    #[test]
    fn test_labelled_uses_declared_keys() {
        let labels = metric_defs::UPLINK_RECEIVED
            .labelled(["json".to_string(), "Water Leak Sensor Event".to_string()]);
        assert_eq!(labels[0], ("kind", "json".to_string()));
        assert_eq!(labels[1], ("message_type", "Water Leak Sensor Event".to_string()));

        for metric in [metric_defs::SENSOR_DISCOVERED, metric_defs::DOWNLINK_ENCODED] {
            let [(key, value)] = metric.labelled(["water_sensor".to_string()]);
            assert_eq!(key, "sensor_type");
            assert_eq!(value, "water_sensor");
        }
        assert!(metric_defs::UPLINK_DECODE_ERRORS.labels.is_empty());
    }

    #[test]
    fn test_describe_without_recorder() {
        describe_metrics();
        assert!(metric_defs::ALL.iter().all(|m| !m.description.is_empty()));
    }
}
