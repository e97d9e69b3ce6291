//! Per-document write outcomes and per-cycle aggregates.

use std::fmt;
use std::time::Duration;

/// Why a single upsert failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteFailure {
    /// The store answered with a structured error.
    Status { code: i32, message: String },
    /// Anything else: transport errors, client errors, panicked tasks.
    Unclassified(String),
}

impl WriteFailure {
    /// Status code reported by the store, if the failure was classified.
    pub fn status_code(&self) -> Option<i32> {
        match self {
            WriteFailure::Status { code, .. } => Some(*code),
            WriteFailure::Unclassified(_) => None,
        }
    }
}

impl fmt::Display for WriteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteFailure::Status { code, message } => write!(f, "Received {code} ({message})"),
            WriteFailure::Unclassified(error) => write!(f, "Exception {error}"),
        }
    }
}

/// Result of one upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The store accepted the document and echoed back its partition key.
    Success { returned_partition_key: String },
    Failure(WriteFailure),
}

impl WriteOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, WriteOutcome::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }
}

/// Outcome of one document's write, tagged with the key it was routed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentWrite {
    pub partition_key: String,
    pub outcome: WriteOutcome,
}

/// Aggregate of one cycle.
///
/// `duration` covers issuing every write through the last completion. It
/// does not include the settling pause the writer takes afterwards.
#[derive(Debug, Clone)]
pub struct CycleResult {
    /// Zero-based cycle index
    pub cycle: u64,
    /// Number of documents in the batch
    pub item_count: usize,
    /// Wall-clock time from first issue to full drain
    pub duration: Duration,
    /// Number of writes that ended in [`WriteOutcome::Failure`]
    pub failure_count: usize,
    /// One entry per document, in batch order
    pub writes: Vec<DocumentWrite>,
}

impl CycleResult {
    pub fn new(cycle: u64, duration: Duration, writes: Vec<DocumentWrite>) -> Self {
        let failure_count = writes.iter().filter(|w| w.outcome.is_failure()).count();
        Self {
            cycle,
            item_count: writes.len(),
            duration,
            failure_count,
            writes,
        }
    }

    pub fn success_count(&self) -> usize {
        self.item_count - self.failure_count
    }

    /// Iterate over the failed writes only.
    pub fn failures(&self) -> impl Iterator<Item = &DocumentWrite> {
        self.writes.iter().filter(|w| w.outcome.is_failure())
    }

    /// Calculate documents written per second.
    pub fn documents_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.item_count as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}
