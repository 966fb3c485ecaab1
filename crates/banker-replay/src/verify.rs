//! Re-check a safe report against the state that produced it.
//!
//! A correct evaluator always produces internally consistent reports;
//! verification exists for tests, for debugging alternative evaluators,
//! and for callers that persist reports and want to detect tampering or
//! skew against an edited system state.

use banker_core::{ResourceId, SystemState};
use banker_engine::SafeReport;

/// The first inconsistency found between a report and its system state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DivergenceKind {
    /// The sequence is not a permutation of `0..P`.
    NotPermutation,
    /// The trace does not have `sequence.len() + 1` entries.
    TraceLength {
        /// Required entry count.
        expected: usize,
        /// Actual entry count.
        found: usize,
    },
    /// A trace entry does not have one value per resource type.
    WorkWidth {
        /// Index of the malformed trace entry.
        step: usize,
        /// Required width (the resource count).
        expected: usize,
        /// Actual width.
        found: usize,
    },
    /// `trace[0]` differs from the state's Available vector.
    InitialWork,
    /// A step released more or less than the granted process's
    /// allocation: `trace[step + 1] != trace[step] + allocation[seq[step]]`
    /// at some cell.
    Conservation {
        /// The grant at which conservation broke.
        step: usize,
        /// The resource type at which it broke.
        resource: ResourceId,
        /// The value conservation requires. Widened to `u64` because a
        /// tampered trace can put the required sum out of `u32` range.
        expected: u64,
        /// The value recorded in the trace.
        found: u64,
    },
    /// A granted process's remaining need did not fit in Work at its
    /// step, so the grant was not actually feasible.
    NeedExceedsWork {
        /// The infeasible grant.
        step: usize,
        /// The resource type where need exceeded work.
        resource: ResourceId,
    },
}

/// Report of the first divergence found by [`verify_report`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DivergenceReport {
    /// What diverged.
    pub kind: DivergenceKind,
}

/// Verify a safe report against the system state it claims to describe.
///
/// Returns `None` when the report is consistent: the sequence is a
/// permutation of all processes, the trace starts at Available, every
/// step releases exactly the granted process's allocation, and every
/// grant was feasible at its step. Otherwise returns the first
/// divergence in checking order.
///
/// # Examples
///
/// ```
/// use banker_core::{Matrix, SystemState};
/// use banker_engine::evaluate;
/// use banker_replay::verify_report;
///
/// let allocation = Matrix::from_rows(&[vec![0], vec![1]]).unwrap();
/// let maximum = Matrix::from_rows(&[vec![1], vec![2]]).unwrap();
/// let state = SystemState::new(allocation, maximum, &[1]).unwrap();
/// let verdict = evaluate(&state);
///
/// let report = verdict.safe().unwrap();
/// assert!(verify_report(&state, report).is_none());
/// ```
pub fn verify_report(state: &SystemState, report: &SafeReport) -> Option<DivergenceReport> {
    let processes = state.process_count();
    let resources = state.resource_count();

    let mut seen = vec![false; processes];
    for pid in &report.sequence {
        if pid.index() >= processes || seen[pid.index()] {
            return diverged(DivergenceKind::NotPermutation);
        }
        seen[pid.index()] = true;
    }
    if report.sequence.len() != processes {
        return diverged(DivergenceKind::NotPermutation);
    }

    if report.trace.len() != report.sequence.len() + 1 {
        return diverged(DivergenceKind::TraceLength {
            expected: report.sequence.len() + 1,
            found: report.trace.len(),
        });
    }
    for (step, work) in report.trace.iter().enumerate() {
        if work.len() != resources {
            return diverged(DivergenceKind::WorkWidth {
                step,
                expected: resources,
                found: work.len(),
            });
        }
    }

    if report.trace[0].as_slice() != state.available() {
        return diverged(DivergenceKind::InitialWork);
    }

    let need = state.need();
    for (step, &pid) in report.sequence.iter().enumerate() {
        let before = &report.trace[step];
        let after = &report.trace[step + 1];
        for (j, &need_units) in need.row(pid).iter().enumerate() {
            if need_units > before[j] {
                return diverged(DivergenceKind::NeedExceedsWork {
                    step,
                    resource: ResourceId(j as u32),
                });
            }
        }
        for (j, &held) in state.allocation().row(pid).iter().enumerate() {
            // u64 so arbitrary trace values cannot overflow the sum.
            let expected = u64::from(before[j]) + u64::from(held);
            if u64::from(after[j]) != expected {
                return diverged(DivergenceKind::Conservation {
                    step,
                    resource: ResourceId(j as u32),
                    expected,
                    found: u64::from(after[j]),
                });
            }
        }
    }

    None
}

fn diverged(kind: DivergenceKind) -> Option<DivergenceReport> {
    Some(DivergenceReport { kind })
}
