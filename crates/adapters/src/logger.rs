//! Structured JSON logger adapter.

use crate::log_sink::LogSink;
use serde_json::{Map, Value};
use solr_search_ports::{LogEvent, LogFields, LogLevel, LoggerPort};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Field names whose values are replaced before writing.
const MASKED_FIELDS: &[&str] = &["password", "authorization", "token"];
const MASK: &str = "[masked]";

/// JSON logger emitting one line per event.
#[derive(Clone)]
pub struct JsonLogger {
    sink: Arc<dyn LogSink>,
    base_fields: LogFields,
    min_level: LogLevel,
}

impl JsonLogger {
    /// Create a JSON logger backed by the provided sink.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            base_fields: LogFields::new(),
            min_level: LogLevel::Info,
        }
    }

    /// Set base fields applied to every event.
    #[must_use]
    pub fn with_base_fields(mut self, fields: LogFields) -> Self {
        self.base_fields = fields;
        self
    }

    /// Set the minimum log level.
    #[must_use]
    pub const fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    fn render(&self, event: LogEvent) -> String {
        let mut fields = self.base_fields.clone();
        fields.extend(event.fields.unwrap_or_default());

        let mut payload = Map::new();
        payload.insert("timestampMs".to_owned(), Value::from(now_epoch_ms()));
        payload.insert("level".to_owned(), Value::from(event.level.as_str()));
        payload.insert("event".to_owned(), Value::from(&*event.event));
        payload.insert("message".to_owned(), Value::from(&*event.message));
        if !fields.is_empty() {
            let fields = fields
                .into_iter()
                .map(|(key, value)| {
                    let value = if is_masked(&key) { Value::from(MASK) } else { value };
                    (key.into_string(), value)
                })
                .collect();
            payload.insert("fields".to_owned(), Value::Object(fields));
        }
        if let Some(error) = event.error {
            payload.insert("error".to_owned(), error);
        }

        serde_json::to_string(&Value::Object(payload)).map_or_else(
            |_| {
                "{\"timestampMs\":0,\"level\":\"error\",\"event\":\"logger.serialize_failed\",\"message\":\"log serialization failed\"}\n"
                    .to_owned()
            },
            |mut encoded| {
                encoded.push('\n');
                encoded
            },
        )
    }
}

impl LoggerPort for JsonLogger {
    fn log(&self, event: LogEvent) {
        if event.level < self.min_level {
            return;
        }
        self.sink.write_line(&self.render(event));
    }

    fn child(&self, fields: LogFields) -> Box<dyn LoggerPort> {
        let mut merged = self.base_fields.clone();
        merged.extend(fields);
        Box::new(Self {
            sink: Arc::clone(&self.sink),
            base_fields: merged,
            min_level: self.min_level,
        })
    }
}

fn is_masked(key: &str) -> bool {
    MASKED_FIELDS
        .iter()
        .any(|masked| key.eq_ignore_ascii_case(masked))
}

fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|duration| u64::try_from(duration.as_millis()).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_sink::MemoryLogSink;
    use solr_search_ports::log_fields;
    use solr_search_testkit::errors::backend_unavailable_error;

    fn first_line(sink: &MemoryLogSink) -> Result<Value, Box<dyn std::error::Error>> {
        let lines = sink.take();
        let line = lines.first().ok_or("no line written")?;
        Ok(serde_json::from_str(line.trim())?)
    }

    #[test]
    fn events_below_min_level_are_dropped() {
        let sink = Arc::new(MemoryLogSink::default());
        let logger = JsonLogger::new(sink.clone());
        logger.debug("search.parameters", "built", None);
        assert!(sink.take().is_empty());
    }

    #[test]
    fn error_events_carry_the_envelope() -> Result<(), Box<dyn std::error::Error>> {
        let sink = Arc::new(MemoryLogSink::default());
        let logger = JsonLogger::new(sink.clone()).with_min_level(LogLevel::Debug);
        logger.error(
            "search.failed",
            "Search failed",
            &backend_unavailable_error(),
            Some(log_fields([("durationMs", 3)])),
        );

        let payload = first_line(&sink)?;
        assert_eq!(payload["level"], "error");
        assert_eq!(payload["event"], "search.failed");
        assert_eq!(payload["fields"]["durationMs"], 3);
        assert_eq!(payload["error"]["code"]["namespace"], "solr");
        Ok(())
    }

    #[test]
    fn child_logger_merges_fields_and_masks_credentials() -> Result<(), Box<dyn std::error::Error>> {
        let sink = Arc::new(MemoryLogSink::default());
        let logger = JsonLogger::new(sink.clone())
            .with_base_fields(log_fields([("core", "core_en")]));
        let child = logger.child(log_fields([("password", "secret")]));
        child.info("solr.connect", "connecting", Some(log_fields([("page", 2)])));

        let payload = first_line(&sink)?;
        assert_eq!(payload["fields"]["core"], "core_en");
        assert_eq!(payload["fields"]["password"], MASK);
        assert_eq!(payload["fields"]["page"], 2);
        Ok(())
    }
}
