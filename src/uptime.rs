use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Whole days elapsed since the agent's origin timestamp, rendered as `"42d"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct UptimeDays(pub i64);

impl UptimeDays {
    /// `floor((now - origin) / 1 day)`. Never rounds up: half a day reads
    /// `0d`. An origin in the future floors to a negative count.
    pub fn between(origin: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let elapsed = (now - origin).num_milliseconds();
        UptimeDays(elapsed.div_euclid(MILLIS_PER_DAY))
    }

    pub fn days(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UptimeDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d", self.0)
    }
}

impl From<UptimeDays> for String {
    fn from(u: UptimeDays) -> Self {
        u.to_string()
    }
}

/// Uptime for an optional origin. No origin means no value, not `0d`.
pub fn uptime(origin: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<UptimeDays> {
    origin.map(|origin| UptimeDays::between(origin, now))
}
