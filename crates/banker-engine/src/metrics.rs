//! Work counters for a single safety evaluation.

/// Counters collected during one safety evaluation.
///
/// Telemetry only: the counters never influence the verdict. The scan is
/// bounded by P passes of at most P candidates each, so
/// `candidates_scanned <= P * P` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalMetrics {
    /// Full scans over the process list. Every pass but the last grants
    /// at least one process, so this never exceeds P.
    pub passes: usize,
    /// Unfinished processes inspected for runnability, summed over all
    /// passes.
    pub candidates_scanned: usize,
}
