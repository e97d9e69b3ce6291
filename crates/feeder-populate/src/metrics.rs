//! Run-level metrics.

use chrono::{DateTime, Utc};
use feeder_core::CycleResult;
use serde::Serialize;
use std::time::Duration;

/// Totals accumulated across the cycles of one run.
///
/// Only counters are kept; individual cycle results are dropped once
/// recorded.
#[derive(Debug, Clone, Serialize)]
pub struct RunMetrics {
    /// When the run entered its first cycle
    pub started_at: DateTime<Utc>,
    /// Number of cycles that ran to completion
    pub cycles_completed: u64,
    /// Documents issued across all cycles
    pub documents_attempted: u64,
    /// Documents whose upsert failed
    pub failures: u64,
    /// Sum of per-cycle write durations in milliseconds
    pub write_duration_ms: u64,
    /// Whether the run was stopped before the configured cycle count
    pub cancelled: bool,
    #[serde(skip)]
    write_duration: Duration,
}

impl RunMetrics {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            cycles_completed: 0,
            documents_attempted: 0,
            failures: 0,
            write_duration_ms: 0,
            cancelled: false,
            write_duration: Duration::ZERO,
        }
    }

    /// Fold one cycle into the totals.
    pub fn record(&mut self, result: &CycleResult) {
        self.cycles_completed += 1;
        self.documents_attempted += result.item_count as u64;
        self.failures += result.failure_count as u64;
        self.write_duration += result.duration;
        self.write_duration_ms = self.write_duration.as_millis() as u64;
    }

    /// Total time spent writing, excluding generation and settling pauses.
    pub fn write_duration(&self) -> Duration {
        self.write_duration
    }

    /// Calculate documents written per second of write time.
    pub fn documents_per_second(&self) -> f64 {
        if self.write_duration.as_secs_f64() > 0.0 {
            self.documents_attempted as f64 / self.write_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feeder_core::{DocumentWrite, WriteFailure, WriteOutcome};

    fn cycle(cycle: u64, secs: u64, failures: usize, total: usize) -> CycleResult {
        let writes = (0..total)
            .map(|i| DocumentWrite {
                partition_key: i.to_string(),
                outcome: if i < failures {
                    WriteOutcome::Failure(WriteFailure::Unclassified("boom".to_string()))
                } else {
                    WriteOutcome::Success {
                        returned_partition_key: i.to_string(),
                    }
                },
            })
            .collect();
        CycleResult::new(cycle, Duration::from_secs(secs), writes)
    }

    #[test]
    fn test_metrics() {
        let mut metrics = RunMetrics::new(Utc::now());
        metrics.record(&cycle(0, 2, 1, 100));
        metrics.record(&cycle(1, 3, 0, 100));

        assert_eq!(metrics.cycles_completed, 2);
        assert_eq!(metrics.documents_attempted, 200);
        assert_eq!(metrics.failures, 1);
        assert_eq!(metrics.write_duration_ms, 5000);
        assert_eq!(metrics.documents_per_second(), 40.0);
    }

    #[test]
    fn test_empty_metrics_rate() {
        let metrics = RunMetrics::new(Utc::now());
        assert_eq!(metrics.documents_per_second(), 0.0);
    }

    #[test]
    fn test_serialized_summary() {
        let mut metrics = RunMetrics::new(Utc::now());
        metrics.record(&cycle(0, 1, 0, 10));

        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["cycles_completed"], 1);
        assert_eq!(json["documents_attempted"], 10);
        assert_eq!(json["write_duration_ms"], 1000);
        assert!(json.get("write_duration").is_none());
    }
}
