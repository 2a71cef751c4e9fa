pub mod types;

pub use types::*;

use serde_json::Value;

use crate::source::Endpoint;

/// Status value that classifies an activity as successful. Exact,
/// case-sensitive match.
pub const SUCCESS_STATUS: &str = "success";

/// Rate reported when there are no activities to measure.
pub const SENTINEL_SUCCESS_RATE: u8 = 100;

/// Shape of a collection payload as served by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollectionShape<'a> {
    /// The payload itself is the list.
    Bare(&'a [Value]),
    /// The payload is an object carrying the list under a known key.
    Wrapped(&'a [Value]),
    /// Anything else: null, scalars, objects without the key.
    Unsized,
}

impl<'a> CollectionShape<'a> {
    /// Probe a payload. A wrapped list under `key` wins over treating the
    /// payload as a bare list; without a key only bare lists are sized.
    pub fn probe(payload: &'a Value, key: Option<&str>) -> Self {
        if let (Some(key), Value::Object(map)) = (key, payload) {
            if let Some(Value::Array(items)) = map.get(key) {
                return CollectionShape::Wrapped(items);
            }
        }
        match payload {
            Value::Array(items) => CollectionShape::Bare(items),
            _ => CollectionShape::Unsized,
        }
    }

    /// Probe a payload using the endpoint's wrapper convention.
    pub fn for_endpoint(payload: &'a Value, endpoint: Endpoint) -> Self {
        Self::probe(payload, endpoint.wrapper_key())
    }

    pub fn items(&self) -> &'a [Value] {
        match *self {
            CollectionShape::Bare(items) | CollectionShape::Wrapped(items) => items,
            CollectionShape::Unsized => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// Build summary metrics from the three raw payloads.
///
/// Total for any JSON input: shape mismatches degrade to empty collections,
/// and list elements that are not objects are skipped from the activity
/// counts.
pub fn aggregate(activities: &Value, skills: &Value, tasks: &Value) -> SummaryMetrics {
    let counts = count_activities(CollectionShape::for_endpoint(activities, Endpoint::Activities));
    if counts.skipped > 0 {
        log::debug!("Skipped {} malformed activity records", counts.skipped);
    }

    SummaryMetrics {
        total_activities: counts.total,
        success_rate: success_rate(counts.success, counts.total),
        skills_count: CollectionShape::for_endpoint(skills, Endpoint::Skills).len() as u64,
        cron_jobs: CollectionShape::for_endpoint(tasks, Endpoint::Tasks).len() as u64,
    }
}

/// Count records and successes in a normalized activity collection.
pub fn count_activities(shape: CollectionShape<'_>) -> ActivityCounts {
    let mut counts = ActivityCounts::default();
    for item in shape.items() {
        let Some(record) = item.as_object() else {
            counts.skipped += 1;
            continue;
        };
        counts.total += 1;
        if record.get("status").and_then(Value::as_str) == Some(SUCCESS_STATUS) {
            counts.success += 1;
        }
    }
    counts
}

/// `round(100 * success / total)` with halves rounded up, or the sentinel
/// when `total == 0`. Computed in integers so exact halves are not subject
/// to float error.
pub fn success_rate(success: u64, total: u64) -> u8 {
    if total == 0 {
        return SENTINEL_SUCCESS_RATE;
    }
    let success = success.min(total) as u128;
    let total = total as u128;
    ((200 * success + total) / (2 * total)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(statuses: &[&str]) -> Vec<Value> {
        statuses.iter().map(|s| json!({ "status": s })).collect()
    }

    #[test]
    fn test_success_rate_examples() {
        assert_eq!(success_rate(7, 10), 70);
        assert_eq!(success_rate(3, 4), 75);
        assert_eq!(success_rate(1, 3), 33);
        assert_eq!(success_rate(2, 3), 67);
    }

    #[test]
    fn test_success_rate_rounds_half_up() {
        assert_eq!(success_rate(1, 8), 13); // 12.5
        assert_eq!(success_rate(1, 200), 1); // 0.5
        assert_eq!(success_rate(3, 8), 38); // 37.5
    }

    #[test]
    fn test_success_rate_sentinel_when_empty() {
        assert_eq!(success_rate(0, 0), 100);
    }

    #[test]
    fn test_success_rate_bounded() {
        for total in 1..=50u64 {
            for success in 0..=total {
                let rate = success_rate(success, total);
                assert!(rate <= 100, "{success}/{total} gave {rate}");
            }
        }
        assert_eq!(success_rate(0, 9), 0);
        assert_eq!(success_rate(9, 9), 100);
    }

    #[test]
    fn test_probe_shapes() {
        let bare = json!([{"status": "success"}]);
        let wrapped = json!({"activities": [{"status": "success"}]});
        let other = json!({"items": []});

        assert!(matches!(
            CollectionShape::probe(&bare, Some("activities")),
            CollectionShape::Bare(items) if items.len() == 1
        ));
        assert!(matches!(
            CollectionShape::probe(&wrapped, Some("activities")),
            CollectionShape::Wrapped(items) if items.len() == 1
        ));
        assert_eq!(CollectionShape::probe(&other, Some("activities")), CollectionShape::Unsized);
        assert_eq!(CollectionShape::probe(&wrapped, None), CollectionShape::Unsized);
        assert_eq!(CollectionShape::probe(&Value::Null, None).len(), 0);
    }

    #[test]
    fn test_probe_wrapper_key_not_a_list() {
        let payload = json!({"activities": null});
        assert_eq!(CollectionShape::probe(&payload, Some("activities")), CollectionShape::Unsized);
    }

    #[test]
    fn test_bare_and_wrapped_agree() {
        let statuses = ["success", "error", "success", "pending", "success"];
        let bare = Value::Array(records(&statuses));
        let wrapped = json!({ "activities": records(&statuses), "total": 5 });

        let a = aggregate(&bare, &Value::Null, &Value::Null);
        let b = aggregate(&wrapped, &Value::Null, &Value::Null);
        assert_eq!(a.total_activities, b.total_activities);
        assert_eq!(a.success_rate, b.success_rate);
        assert_eq!(a.total_activities, 5);
        assert_eq!(a.success_rate, 60);
    }

    #[test]
    fn test_aggregate_seven_of_ten() {
        let mut statuses = vec!["success"; 7];
        statuses.extend(["error"; 3]);
        let activities = Value::Array(records(&statuses));
        let skills = json!(["telegram", "search", "email"]);
        let tasks = json!([{"id": "a"}, {"id": "b"}]);

        let metrics = aggregate(&activities, &skills, &tasks);
        assert_eq!(
            metrics,
            SummaryMetrics {
                total_activities: 10,
                success_rate: 70,
                skills_count: 3,
                cron_jobs: 2,
            }
        );
        assert!(!metrics.is_sentinel_rate());
    }

    #[test]
    fn test_aggregate_empty_uses_sentinel() {
        for payload in [json!([]), json!({"activities": []}), Value::Null, json!({})] {
            let metrics = aggregate(&payload, &json!([]), &json!([]));
            assert_eq!(metrics.total_activities, 0);
            assert_eq!(metrics.success_rate, 100);
            assert!(metrics.is_sentinel_rate());
        }
    }

    #[test]
    fn test_success_match_is_exact() {
        let activities = Value::Array(records(&["success", "Success", "SUCCESS", " success"]));
        let metrics = aggregate(&activities, &Value::Null, &Value::Null);
        assert_eq!(metrics.total_activities, 4);
        assert_eq!(metrics.success_rate, 25);
    }

    #[test]
    fn test_unsized_skills_and_tasks_degrade_to_zero() {
        let activities = json!([]);
        for payload in [Value::Null, json!(12), json!("three"), json!({"skills": ["a"]})] {
            let metrics = aggregate(&activities, &payload, &payload);
            assert_eq!(metrics.skills_count, 0);
            assert_eq!(metrics.cron_jobs, 0);
        }
    }

    #[test]
    fn test_malformed_records_skipped() {
        let activities = json!([
            {"status": "success"},
            "garbage",
            null,
            42,
            {"status": 1},
            {"message": "no status"},
            {"status": "success"}
        ]);
        let counts = count_activities(CollectionShape::for_endpoint(&activities, Endpoint::Activities));
        assert_eq!(
            counts,
            ActivityCounts {
                total: 4,
                success: 2,
                skipped: 3
            }
        );

        let metrics = aggregate(&activities, &Value::Null, &Value::Null);
        assert_eq!(metrics.total_activities, 4);
        assert_eq!(metrics.success_rate, 50);
    }

    #[test]
    fn test_serializes_camel_case() {
        let metrics = SummaryMetrics {
            total_activities: 4,
            success_rate: 75,
            skills_count: 8,
            cron_jobs: 2,
        };
        assert_eq!(
            serde_json::to_value(metrics).unwrap(),
            json!({
                "totalActivities": 4,
                "successRate": 75,
                "skillsCount": 8,
                "cronJobs": 2
            })
        );
    }
}
