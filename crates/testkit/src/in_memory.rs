//! In-memory adapter implementations for port contracts.
//!
//! These implementations are intended for:
//! - Unit/integration tests
//! - Deterministic contract tests for the ports layer
//! - Local experimentation without a Solr server

use serde_json::Value;
use solr_search_ports::{LogEvent, LogFields, LoggerPort, QueryParameters, SolrBackendInfo, SolrSearchPort};
use solr_search_shared::{ErrorEnvelope, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A no-op logger implementation.
#[derive(Debug, Default)]
pub struct NoopLogger;

impl LoggerPort for NoopLogger {
    fn log(&self, _event: LogEvent) {}

    fn child(&self, _fields: LogFields) -> Box<dyn LoggerPort> {
        Box::new(Self)
    }
}

/// Logger keeping every event in memory.
///
/// Children share the event buffer and merge their base fields into each
/// event.
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    events: Arc<Mutex<Vec<LogEvent>>>,
    base: LogFields,
}

impl RecordingLogger {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Names of the recorded events, in order.
    pub fn event_names(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .map(|event| event.event.into_string())
            .collect()
    }
}

impl LoggerPort for RecordingLogger {
    fn log(&self, mut event: LogEvent) {
        if !self.base.is_empty() {
            let mut fields = self.base.clone();
            fields.extend(event.fields.take().unwrap_or_default());
            event.fields = Some(fields);
        }
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    fn child(&self, fields: LogFields) -> Box<dyn LoggerPort> {
        let mut base = self.base.clone();
        base.extend(fields);
        Box::new(Self {
            events: Arc::clone(&self.events),
            base,
        })
    }
}

/// Solr backend answering from canned responses.
///
/// Responses are served in order; the last one repeats. Every request's
/// parameters are recorded.
#[derive(Debug)]
pub struct InMemorySolr {
    info: SolrBackendInfo,
    responses: Mutex<VecDeque<Result<Value>>>,
    requests: Mutex<Vec<QueryParameters>>,
}

impl InMemorySolr {
    /// Backend answering every request with `response`.
    pub fn new(response: Value) -> Self {
        Self::with_responses(vec![Ok(response)])
    }

    /// Backend failing every request with `error`.
    pub fn failing(error: ErrorEnvelope) -> Self {
        Self::with_responses(vec![Err(error)])
    }

    /// Backend serving `responses` in order.
    pub fn with_responses(responses: Vec<Result<Value>>) -> Self {
        Self {
            info: SolrBackendInfo {
                id: "in-memory".into(),
                name: "In-memory Solr".into(),
            },
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Parameters of every request received so far.
    pub fn requests(&self) -> Vec<QueryParameters> {
        self.requests.lock().map(|requests| requests.clone()).unwrap_or_default()
    }
}

impl SolrSearchPort for InMemorySolr {
    fn backend(&self) -> &SolrBackendInfo {
        &self.info
    }

    fn search(&self, parameters: &QueryParameters) -> Result<Value> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(parameters.clone());
        }
        let mut responses = self
            .responses
            .lock()
            .map_err(|_| ErrorEnvelope::invariant(solr_search_shared::ErrorCode::internal(), "response queue poisoned"))?;
        match responses.len() {
            0 => Ok(Value::Null),
            1 => responses.front().cloned().unwrap_or(Ok(Value::Null)),
            _ => responses.pop_front().unwrap_or(Ok(Value::Null)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use solr_search_ports::log_fields;

    #[test]
    fn responses_are_served_in_order_and_the_last_repeats() -> Result<()> {
        let solr = InMemorySolr::with_responses(vec![Ok(json!({ "n": 1 })), Ok(json!({ "n": 2 }))]);
        let parameters = QueryParameters::new();
        assert_eq!(solr.search(&parameters)?, json!({ "n": 1 }));
        assert_eq!(solr.search(&parameters)?, json!({ "n": 2 }));
        assert_eq!(solr.search(&parameters)?, json!({ "n": 2 }));
        assert_eq!(solr.requests().len(), 3);
        Ok(())
    }

    #[test]
    fn child_loggers_share_events_and_add_fields() {
        let logger = RecordingLogger::new();
        let child = logger.child(log_fields([("request", "r-1")]));
        child.info("search.start", "started", None);
        logger.info("search.completed", "done", None);

        assert_eq!(logger.event_names(), vec!["search.start", "search.completed"]);
        let first = logger.events().into_iter().next().and_then(|event| event.fields);
        assert_eq!(
            first.and_then(|fields| fields.get("request").cloned()),
            Some(Value::from("r-1"))
        );
    }
}
