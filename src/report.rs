//! The hit record and the aggregated per-peck report.
use serde::{Deserialize, Serialize};
use tokio::time::Duration;

/// The record of one fired request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Wall-clock time from sending the request to completing (or failing) it.
    pub duration: Duration,
    /// Whether the request completed with a non-error status.
    pub success: bool,
}

impl HitRecord {
    /// A successful hit.
    pub fn success(duration: Duration) -> Self {
        Self { duration, success: true }
    }

    /// A failed hit.
    pub fn failure(duration: Duration) -> Self {
        Self { duration, success: false }
    }
}

/// Final statistics of one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedResult {
    /// HTTP method of the bucket's target.
    pub method: String,
    /// Path of the bucket's target.
    pub path: String,
    /// Number of fired requests.
    pub hits: u64,
    /// Number of successful requests.
    pub successes: u64,
    /// Number of failed requests.
    pub failures: u64,
    /// Mean duration in milliseconds, rounded to 2 decimals. `None` without hits.
    #[serde(rename = "avgMs")]
    pub avg_ms: Option<f64>,
}

/// Rounds to 2 decimal places, half away from zero.
pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hit_constructors() {
        let hit = HitRecord::success(Duration::from_micros(12_345));
        assert!(hit.success);
        assert_eq!(hit.duration, Duration::from_micros(12_345));
        assert!(!HitRecord::failure(Duration::ZERO).success);
    }

    #[test]
    fn test_serialized_field_names() {
        let r = AggregatedResult {
            method: "GET".into(),
            path: "/ok".into(),
            hits: 5,
            successes: 5,
            failures: 0,
            avg_ms: Some(12.34),
        };
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            json!({"method": "GET", "path": "/ok", "hits": 5, "successes": 5, "failures": 0, "avgMs": 12.34})
        );

        let empty = AggregatedResult { hits: 0, successes: 0, avg_ms: None, ..r };
        assert_eq!(serde_json::to_value(&empty).unwrap()["avgMs"], serde_json::Value::Null);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.344), 12.34);
        assert_eq!(round2(12.345_1), 12.35);
        assert_eq!(round2(0.0), 0.0);
    }
}
