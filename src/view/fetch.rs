use std::time::Duration;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::metrics::{aggregate, SummaryMetrics};
use crate::source::{DataSource, Endpoint};

/// Default limit on the joined reads.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Options controlling one run of the fetch pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Upper bound on the whole join. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl FetchOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    pub fn without_timeout() -> Self {
        Self { timeout: None }
    }
}

/// The three payloads from one fetch, as served.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPayloads {
    pub activities: Value,
    pub skills: Value,
    pub tasks: Value,
}

impl RawPayloads {
    pub fn summarize(&self) -> SummaryMetrics {
        aggregate(&self.activities, &self.skills, &self.tasks)
    }
}

/// Issue all three reads concurrently and wait for every one of them.
///
/// All or none: the first failure (or the timeout) fails the whole fetch,
/// and the other in-flight reads are dropped.
pub async fn fetch_payloads(source: &dyn DataSource, options: &FetchOptions) -> Result<RawPayloads> {
    let join = async {
        tokio::try_join!(
            source.fetch(Endpoint::Activities),
            source.fetch(Endpoint::Skills),
            source.fetch(Endpoint::Tasks),
        )
    };

    let (activities, skills, tasks) = match options.timeout {
        Some(limit) => tokio::time::timeout(limit, join)
            .await
            .map_err(|_| Error::Timeout(limit))??,
        None => join.await?,
    };

    Ok(RawPayloads {
        activities,
        skills,
        tasks,
    })
}

/// Fetch and aggregate in one step.
pub async fn fetch_summary(source: &dyn DataSource, options: &FetchOptions) -> Result<SummaryMetrics> {
    let payloads = fetch_payloads(source, options).await?;
    Ok(payloads.summarize())
}
