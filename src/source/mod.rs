#[cfg(test)]
pub(crate) mod fixed;
pub mod http;

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

#[cfg(test)]
pub(crate) use fixed::FixedSource;
pub use http::HttpSource;

/// The three read-only query endpoints a profile view consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Activity log. Bare list of records, or an object wrapping one.
    Activities,
    /// Skills/capabilities registry.
    Skills,
    /// Scheduled-task registry.
    Tasks,
}

impl Endpoint {
    /// Request path relative to the service base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Activities => "/api/activities",
            Endpoint::Skills => "/api/skills",
            Endpoint::Tasks => "/api/tasks",
        }
    }

    /// Key under which a wrapped response nests its collection, for
    /// endpoints whose versions disagree on the response shape.
    pub fn wrapper_key(&self) -> Option<&'static str> {
        match self {
            Endpoint::Activities => Some("activities"),
            Endpoint::Skills | Endpoint::Tasks => None,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A request/response data interface serving loosely-typed JSON payloads.
///
/// Implementations must be stateless per call: the orchestrator issues all
/// three reads concurrently against the same source.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self, endpoint: Endpoint) -> Result<Value>;
}
