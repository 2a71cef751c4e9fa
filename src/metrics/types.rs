use serde::Serialize;

/// Summary metrics for a profile view, derived from one fetch of the three
/// data sources.
///
/// Built in one step after every source has responded, never partially.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    pub total_activities: u64,
    /// Integer percentage in `[0, 100]`. `100` when there are no activities
    /// yet: that is the "no data" sentinel, not a measured rate.
    pub success_rate: u8,
    pub skills_count: u64,
    pub cron_jobs: u64,
}

impl SummaryMetrics {
    /// True when `success_rate` is the sentinel rather than a measurement.
    pub fn is_sentinel_rate(&self) -> bool {
        self.total_activities == 0
    }
}

/// Counts over a normalized activity collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityCounts {
    pub total: u64,
    pub success: u64,
    /// Elements that were not records and were left out of both counts.
    pub skipped: u64,
}
