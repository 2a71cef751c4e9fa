pub mod fetch;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::metrics::SummaryMetrics;
use crate::source::DataSource;
use crate::uptime::{uptime, UptimeDays};

pub use fetch::{fetch_payloads, fetch_summary, FetchOptions, RawPayloads};

/// Progress of the metrics pipeline for one view activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsState {
    /// Reads in flight. Render placeholders.
    Pending,
    Ready(SummaryMetrics),
    /// The fetch failed. Every metric renders as unavailable and the view
    /// may offer a manual retry.
    Unavailable { reason: String },
}

impl StatsState {
    pub fn metrics(&self) -> Option<&SummaryMetrics> {
        match self {
            StatsState::Ready(metrics) => Some(metrics),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, StatsState::Pending)
    }
}

/// Transient state backing a profile view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub stats: StatsState,
    /// `None` when no origin timestamp is configured.
    pub uptime: Option<UptimeDays>,
}

/// One activation of a profile view.
///
/// Uptime is computed on activation; the metrics pipeline runs in the
/// background and commits its result only while the activation is live.
/// Deactivating (or dropping) the view cancels the activation, and a late
/// result is discarded without touching state.
pub struct ProfileView {
    source: Arc<dyn DataSource>,
    options: FetchOptions,
    state: Arc<watch::Sender<ViewState>>,
    token: CancellationToken,
}

impl ProfileView {
    /// Activate a view. Must be called from within a tokio runtime.
    pub fn activate(
        source: Arc<dyn DataSource>,
        origin: Option<DateTime<Utc>>,
        options: FetchOptions,
        now: DateTime<Utc>,
    ) -> Self {
        let (state, _) = watch::channel(ViewState {
            stats: StatsState::Pending,
            uptime: uptime(origin, now),
        });
        let view = Self {
            source,
            options,
            state: Arc::new(state),
            token: CancellationToken::new(),
        };
        view.launch();
        view
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Observe state changes.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Token tied to this activation. Cancelled on deactivation.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Wait until the metrics are ready or unavailable. Returns the current
    /// state immediately if the view has been deactivated.
    pub async fn settled(&self) -> ViewState {
        let mut rx = self.state.subscribe();
        tokio::select! {
            _ = self.token.cancelled() => self.state(),
            settled = rx.wait_for(|s| !s.stats.is_pending()) => match settled {
                Ok(state) => state.clone(),
                Err(_) => self.state(),
            },
        }
    }

    /// Re-run the pipeline after a failure. Only an unavailable view on a
    /// live activation can retry; returns whether a retry was started.
    pub fn retry(&self) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        let restarted = self.state.send_if_modified(|s| match s.stats {
            StatsState::Unavailable { .. } => {
                s.stats = StatsState::Pending;
                true
            }
            _ => false,
        });
        if restarted {
            log::info!("Retrying profile metrics fetch");
            self.launch();
        }
        restarted
    }

    /// End the activation. Any in-flight fetch is dropped.
    pub fn deactivate(self) {
        self.token.cancel();
    }

    fn launch(&self) {
        let source = Arc::clone(&self.source);
        let options = self.options.clone();
        let state = Arc::clone(&self.state);
        let token = self.token.clone();

        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => {
                    log::debug!("Profile view deactivated; dropping in-flight fetch");
                    return;
                }
                outcome = fetch_summary(source.as_ref(), &options) => outcome,
            };
            commit(&state, &token, outcome);
        });
    }
}

impl Drop for ProfileView {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Write a pipeline outcome into view state unless the activation has
/// ended. Returns whether the outcome was committed.
fn commit(
    state: &watch::Sender<ViewState>,
    token: &CancellationToken,
    outcome: Result<SummaryMetrics>,
) -> bool {
    if token.is_cancelled() {
        log::debug!("Discarding stale profile metrics");
        return false;
    }

    let stats = match outcome {
        Ok(metrics) => {
            log::info!(
                "Profile metrics ready: {} activities, {}% success, {} skills, {} cron jobs",
                metrics.total_activities,
                metrics.success_rate,
                metrics.skills_count,
                metrics.cron_jobs
            );
            StatsState::Ready(metrics)
        }
        Err(e) => {
            log::warn!("Profile metrics unavailable: {e}");
            StatsState::Unavailable {
                reason: e.to_string(),
            }
        }
    };
    state.send_modify(|s| s.stats = stats);
    true
}
