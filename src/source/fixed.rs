use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{DataSource, Endpoint};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
enum Reply {
    Payload(Value),
    Status(u16),
}

/// In-memory source serving fixed payloads, with optional per-endpoint
/// latency and failures. Endpoints without a payload serve `null`.
#[derive(Debug, Default)]
pub(crate) struct FixedSource {
    replies: HashMap<Endpoint, Reply>,
    delays: HashMap<Endpoint, Duration>,
    calls: AtomicUsize,
}

impl FixedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(mut self, endpoint: Endpoint, payload: Value) -> Self {
        self.replies.insert(endpoint, Reply::Payload(payload));
        self
    }

    /// Answer `endpoint` with a non-success HTTP status.
    pub fn with_status(mut self, endpoint: Endpoint, status: u16) -> Self {
        self.replies.insert(endpoint, Reply::Status(status));
        self
    }

    pub fn with_delay(mut self, endpoint: Endpoint, delay: Duration) -> Self {
        self.delays.insert(endpoint, delay);
        self
    }

    /// Total fetches served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for FixedSource {
    async fn fetch(&self, endpoint: Endpoint) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(&endpoint) {
            tokio::time::sleep(*delay).await;
        }
        match self.replies.get(&endpoint) {
            Some(Reply::Payload(value)) => Ok(value.clone()),
            Some(Reply::Status(status)) => Err(Error::Status {
                endpoint,
                status: *status,
            }),
            None => Ok(Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_serves_configured_replies() {
        let source = FixedSource::new()
            .with_payload(Endpoint::Skills, json!(["a", "b"]))
            .with_status(Endpoint::Tasks, 502);

        assert_eq!(source.fetch(Endpoint::Skills).await.unwrap(), json!(["a", "b"]));
        assert_eq!(source.fetch(Endpoint::Activities).await.unwrap(), Value::Null);
        assert!(matches!(
            source.fetch(Endpoint::Tasks).await,
            Err(Error::Status { status: 502, .. })
        ));
        assert_eq!(source.calls(), 3);
    }
}
