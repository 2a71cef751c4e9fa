pub mod config;
pub mod date_util;
pub mod error;
pub mod metrics;
pub mod source;
pub mod uptime;
pub mod view;

use std::sync::Arc;

use chrono::{DateTime, Utc};

pub use config::Branding;
pub use error::{Error, Result};
pub use metrics::{aggregate, CollectionShape, SummaryMetrics};
pub use source::{DataSource, Endpoint, HttpSource};
pub use uptime::UptimeDays;
pub use view::{FetchOptions, ProfileView, StatsState, ViewState};

/// Main entry point: an agent's branding bound to the source serving its
/// activity, skills and task data.
pub struct AgentProfile {
    source: Arc<dyn DataSource>,
    branding: Branding,
    origin: Option<DateTime<Utc>>,
}

impl AgentProfile {
    /// Bind branding to a data source. The birth date is parsed here, once;
    /// an unparsable one is a configuration error.
    pub fn new(source: Arc<dyn DataSource>, branding: Branding) -> Result<Self> {
        let origin = branding.origin()?;
        Ok(Self {
            source,
            branding,
            origin,
        })
    }

    pub fn branding(&self) -> &Branding {
        &self.branding
    }

    /// Configured origin timestamp, if any.
    pub fn origin(&self) -> Option<DateTime<Utc>> {
        self.origin
    }

    /// Fetch all three sources and aggregate them once.
    pub async fn summary(&self, options: &FetchOptions) -> Result<SummaryMetrics> {
        view::fetch_summary(self.source.as_ref(), options).await
    }

    /// Uptime at `now`, or `None` when no birth date is configured.
    pub fn uptime(&self, now: DateTime<Utc>) -> Option<UptimeDays> {
        uptime::uptime(self.origin, now)
    }

    /// Activate a profile view at the current time.
    pub fn activate(&self, options: FetchOptions) -> ProfileView {
        ProfileView::activate(Arc::clone(&self.source), self.origin, options, Utc::now())
    }
}
