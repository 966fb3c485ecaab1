//! The safety scan: search for a completion ordering.
//!
//! The classical check runs repeated passes over the process list. Within
//! a pass, every unfinished process whose remaining need fits in the
//! current Work vector is granted in ascending index order; granting
//! releases the process's full allocation back into Work. A pass that
//! grants nothing while processes remain unfinished proves the system
//! unsafe. The ascending-index policy is fixed: re-running on identical
//! input yields an identical sequence and trace.

use smallvec::SmallVec;

use banker_core::{check_total_units, Matrix, ProcessId, ResourceVec, StateError, SystemState};

use crate::metrics::EvalMetrics;

// ── Reports ─────────────────────────────────────────────────────

/// A proven-safe result: one valid completion ordering plus its trace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SafeReport {
    /// The order in which processes can be granted their remaining need
    /// and complete. A permutation of `0..P`.
    pub sequence: Vec<ProcessId>,
    /// Work-vector snapshots, `sequence.len() + 1` entries. Entry 0 is the
    /// initial Available; entry k+1 is Work after `sequence[k]` completed
    /// and released its allocation.
    pub trace: Vec<ResourceVec>,
    /// Work counters for this evaluation.
    pub metrics: EvalMetrics,
}

/// A proven-unsafe result: no completion ordering exists.
///
/// Not an error. The report carries the processes that could never be
/// granted and the partial trace of the grants made before the stall,
/// so a caller can show how far the simulation got.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsafeReport {
    /// Processes that remained unfinished when no candidate could be
    /// granted, in ascending index order. These are deadlocked against
    /// each other.
    pub blocked: Vec<ProcessId>,
    /// Work-vector snapshots up to the stall: one entry per grant made,
    /// plus the initial Available.
    pub trace: Vec<ResourceVec>,
    /// Work counters for this evaluation.
    pub metrics: EvalMetrics,
}

/// Outcome of a safety evaluation.
///
/// Distinct from [`StateError`] at the type level: malformed input never
/// reaches the scan, and the scan itself cannot fail; it can only prove
/// safety or unsafety.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// A completion ordering exists; the report carries it.
    Safe(SafeReport),
    /// No completion ordering exists.
    Unsafe(UnsafeReport),
}

impl Verdict {
    /// `true` if a completion ordering was found.
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Safe(_))
    }

    /// The safe report, if the verdict is safe.
    pub fn safe(&self) -> Option<&SafeReport> {
        match self {
            Self::Safe(report) => Some(report),
            Self::Unsafe(_) => None,
        }
    }

    /// The unsafe report, if the verdict is unsafe.
    pub fn blocked(&self) -> Option<&UnsafeReport> {
        match self {
            Self::Safe(_) => None,
            Self::Unsafe(report) => Some(report),
        }
    }
}

// ── Evaluation ──────────────────────────────────────────────────

/// Run the safety scan on a validated system state.
///
/// Derives the Need matrix and searches for a completion ordering. The
/// state is only read; all scratch state (Work, Finish, sequence, trace)
/// is local to this call, so concurrent evaluations of different states
/// never interfere.
///
/// # Examples
///
/// ```
/// use banker_core::{Matrix, SystemState};
/// use banker_engine::evaluate;
///
/// let allocation = Matrix::from_rows(&[vec![1], vec![1]]).unwrap();
/// let maximum = Matrix::from_rows(&[vec![2], vec![3]]).unwrap();
/// let state = SystemState::new(allocation, maximum, &[1]).unwrap();
///
/// let verdict = evaluate(&state);
/// let report = verdict.safe().expect("one unit is enough to finish P0");
/// assert_eq!(report.sequence.len(), 2);
/// assert_eq!(report.trace.first().unwrap().as_slice(), &[1]);
/// assert_eq!(report.trace.last().unwrap().as_slice(), &[3]);
/// ```
pub fn evaluate(state: &SystemState) -> Verdict {
    let need = state.need();
    scan(&need, state.allocation(), state.available())
}

/// Run the safety scan on a caller-supplied Need matrix.
///
/// The lower-level entry point for callers that derived (or edited) Need
/// themselves. Need is taken as given: only shape agreement is checked,
/// not the Need/Maximum relationship.
///
/// # Errors
///
/// - [`StateError::DimensionMismatch`] if `need` and `allocation` differ
///   in shape or `available` does not have one entry per resource type.
/// - [`StateError::UnitOverflow`] if any resource type's total units
///   (allocation column sum plus available) do not fit in a `u32`.
pub fn find_safe_sequence(
    need: &Matrix,
    allocation: &Matrix,
    available: &[u32],
) -> Result<Verdict, StateError> {
    if need.shape() != allocation.shape() {
        return Err(StateError::DimensionMismatch {
            context: "need",
            expected: allocation.shape(),
            found: need.shape(),
        });
    }
    if available.len() != allocation.resources() {
        return Err(StateError::DimensionMismatch {
            context: "available",
            expected: (1, allocation.resources()),
            found: (1, available.len()),
        });
    }
    check_total_units(allocation, available)?;
    Ok(scan(need, allocation, available))
}

/// The scan proper. Shapes and unit totals are already validated, so
/// Work stays within `u32` range throughout.
fn scan(need: &Matrix, allocation: &Matrix, available: &[u32]) -> Verdict {
    let processes = allocation.processes();
    let mut work: ResourceVec = SmallVec::from_slice(available);
    let mut finished = vec![false; processes];
    let mut sequence = Vec::with_capacity(processes);
    let mut trace = Vec::with_capacity(processes + 1);
    trace.push(work.clone());
    let mut metrics = EvalMetrics::default();

    loop {
        metrics.passes += 1;
        let mut granted_this_pass = false;

        for i in 0..processes {
            if finished[i] {
                continue;
            }
            metrics.candidates_scanned += 1;
            let pid = ProcessId(i as u32);
            let runnable = need
                .row(pid)
                .iter()
                .zip(work.iter())
                .all(|(need_units, work_units)| need_units <= work_units);
            if !runnable {
                continue;
            }
            // Simulate completion: the process returns everything it held.
            for (work_units, &held) in work.iter_mut().zip(allocation.row(pid)) {
                *work_units += held;
            }
            finished[i] = true;
            sequence.push(pid);
            trace.push(work.clone());
            granted_this_pass = true;
        }

        if sequence.len() == processes {
            return Verdict::Safe(SafeReport {
                sequence,
                trace,
                metrics,
            });
        }
        if !granted_this_pass {
            let blocked = finished
                .iter()
                .enumerate()
                .filter(|(_, &done)| !done)
                .map(|(i, _)| ProcessId(i as u32))
                .collect();
            return Verdict::Unsafe(UnsafeReport {
                blocked,
                trace,
                metrics,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn matrix(rows: &[&[u32]]) -> Matrix {
        let owned: Vec<Vec<u32>> = rows.iter().map(|r| r.to_vec()).collect();
        Matrix::from_rows(&owned).unwrap()
    }

    fn state(allocation: &[&[u32]], maximum: &[&[u32]], available: &[u32]) -> SystemState {
        SystemState::new(matrix(allocation), matrix(maximum), available).unwrap()
    }

    fn ids(indices: &[u32]) -> Vec<ProcessId> {
        indices.iter().copied().map(ProcessId).collect()
    }

    #[test]
    fn textbook_system_is_safe() {
        let state = state(
            &[&[0, 1, 0], &[2, 0, 0], &[3, 0, 2], &[2, 1, 1], &[0, 0, 2]],
            &[&[7, 5, 3], &[3, 2, 2], &[9, 0, 2], &[2, 2, 2], &[4, 3, 3]],
            &[3, 3, 2],
        );
        let verdict = evaluate(&state);
        let report = verdict.safe().expect("textbook system is safe");
        assert_eq!(report.sequence, ids(&[1, 3, 4, 0, 2]));
        assert_eq!(report.trace.len(), 6);
        assert_eq!(report.trace[0].as_slice(), &[3, 3, 2]);
        assert_eq!(report.trace[5].as_slice(), &[10, 5, 7]);
    }

    #[test]
    fn starved_pair_is_unsafe() {
        let state = state(&[&[0], &[0]], &[&[5], &[5]], &[0]);
        let verdict = evaluate(&state);
        assert!(!verdict.is_safe());
        let report = verdict.blocked().unwrap();
        assert_eq!(report.blocked, ids(&[0, 1]));
        assert_eq!(report.trace, vec![ResourceVec::from_slice(&[0])]);
    }

    #[test]
    fn single_idle_process_is_safe() {
        let state = state(&[&[0]], &[&[0]], &[0]);
        let verdict = evaluate(&state);
        let report = verdict.safe().unwrap();
        assert_eq!(report.sequence, ids(&[0]));
        assert_eq!(
            report.trace,
            vec![
                ResourceVec::from_slice(&[0]),
                ResourceVec::from_slice(&[0]),
            ]
        );
    }

    #[test]
    fn zero_need_grants_in_index_order() {
        // Allocation == Maximum everywhere: every process can finish
        // immediately regardless of Available.
        let state = state(
            &[&[4, 1], &[0, 3], &[2, 2]],
            &[&[4, 1], &[0, 3], &[2, 2]],
            &[0, 0],
        );
        let verdict = evaluate(&state);
        let report = verdict.safe().unwrap();
        assert_eq!(report.sequence, ids(&[0, 1, 2]));
        assert_eq!(report.metrics.passes, 1);
    }

    #[test]
    fn partial_trace_stops_at_stall() {
        // P0 can finish with the initial available; P1 and P2 each need
        // more than the total system units of R0.
        let state = state(
            &[&[1], &[1], &[1]],
            &[&[2], &[9], &[9]],
            &[1],
        );
        let verdict = evaluate(&state);
        let report = verdict.blocked().unwrap();
        assert_eq!(report.blocked, ids(&[1, 2]));
        // Initial available plus the one grant of P0.
        assert_eq!(
            report.trace,
            vec![
                ResourceVec::from_slice(&[1]),
                ResourceVec::from_slice(&[2]),
            ]
        );
    }

    #[test]
    fn rerun_is_byte_identical() {
        let state = state(
            &[&[0, 1, 0], &[2, 0, 0], &[3, 0, 2], &[2, 1, 1], &[0, 0, 2]],
            &[&[7, 5, 3], &[3, 2, 2], &[9, 0, 2], &[2, 2, 2], &[4, 3, 3]],
            &[3, 3, 2],
        );
        assert_eq!(evaluate(&state), evaluate(&state));
    }

    #[test]
    fn find_safe_sequence_checks_need_shape() {
        let need = matrix(&[&[1, 1]]);
        let allocation = matrix(&[&[0, 0], &[0, 0]]);
        let err = find_safe_sequence(&need, &allocation, &[1, 1]).unwrap_err();
        assert_eq!(
            err,
            StateError::DimensionMismatch {
                context: "need",
                expected: (2, 2),
                found: (1, 2),
            }
        );
    }

    #[test]
    fn find_safe_sequence_checks_available_length() {
        let need = matrix(&[&[1, 1]]);
        let allocation = matrix(&[&[0, 0]]);
        let err = find_safe_sequence(&need, &allocation, &[1]).unwrap_err();
        assert!(matches!(
            err,
            StateError::DimensionMismatch {
                context: "available",
                ..
            }
        ));
    }

    #[test]
    fn find_safe_sequence_rejects_overflowing_totals() {
        // The column total u32::MAX + 1 cannot be represented, so the
        // scan would overflow Work when P1 released its unit.
        let need = matrix(&[&[0], &[0]]);
        let allocation = matrix(&[&[u32::MAX], &[1]]);
        let err = find_safe_sequence(&need, &allocation, &[0]).unwrap_err();
        assert_eq!(
            err,
            StateError::UnitOverflow {
                resource: banker_core::ResourceId(0),
            }
        );
    }

    #[test]
    fn totals_at_u32_max_evaluate_without_overflow() {
        let state = state(&[&[u32::MAX - 1]], &[&[u32::MAX - 1]], &[1]);
        let verdict = evaluate(&state);
        let report = verdict.safe().unwrap();
        assert_eq!(report.sequence, ids(&[0]));
        assert_eq!(report.trace.last().unwrap().as_slice(), &[u32::MAX]);
    }

    #[test]
    fn find_safe_sequence_accepts_caller_need() {
        // A Need the caller edited by hand, not derived from any maximum.
        let need = matrix(&[&[0], &[2]]);
        let allocation = matrix(&[&[2], &[0]]);
        let verdict = find_safe_sequence(&need, &allocation, &[0]).unwrap();
        let report = verdict.safe().unwrap();
        assert_eq!(report.sequence, ids(&[0, 1]));
    }

    /// Valid systems generated maximum-first so construction never fails.
    fn arb_state() -> impl Strategy<Value = SystemState> {
        (1usize..6, 1usize..5)
            .prop_flat_map(|(p, r)| {
                (
                    prop::collection::vec(prop::collection::vec((0u32..12, 0u32..12), r), p),
                    prop::collection::vec(0u32..12, r),
                )
            })
            .prop_map(|(cells, available)| {
                let maximum: Vec<Vec<u32>> = cells
                    .iter()
                    .map(|row| row.iter().map(|&(m, _)| m).collect())
                    .collect();
                let allocation: Vec<Vec<u32>> = cells
                    .iter()
                    .map(|row| row.iter().map(|&(m, s)| s % (m + 1)).collect())
                    .collect();
                SystemState::new(
                    Matrix::from_rows(&allocation).unwrap(),
                    Matrix::from_rows(&maximum).unwrap(),
                    &available,
                )
                .unwrap()
            })
    }

    proptest! {
        #[test]
        fn safe_sequence_is_a_permutation(state in arb_state()) {
            if let Verdict::Safe(report) = evaluate(&state) {
                let mut seen = vec![false; state.process_count()];
                for pid in &report.sequence {
                    prop_assert!(!seen[pid.index()], "{pid} granted twice");
                    seen[pid.index()] = true;
                }
                prop_assert_eq!(report.sequence.len(), state.process_count());
            }
        }

        #[test]
        fn trace_steps_release_exactly_the_allocation(state in arb_state()) {
            if let Verdict::Safe(report) = evaluate(&state) {
                prop_assert_eq!(report.trace.len(), report.sequence.len() + 1);
                for (k, pid) in report.sequence.iter().enumerate() {
                    let held = state.allocation().row(*pid);
                    for j in 0..state.resource_count() {
                        prop_assert_eq!(
                            report.trace[k + 1][j],
                            report.trace[k][j] + held[j]
                        );
                    }
                }
            }
        }

        #[test]
        fn granted_need_fit_in_work_at_its_step(state in arb_state()) {
            let need = state.need();
            if let Verdict::Safe(report) = evaluate(&state) {
                for (k, pid) in report.sequence.iter().enumerate() {
                    for (j, need_units) in need.row(*pid).iter().enumerate() {
                        prop_assert!(*need_units <= report.trace[k][j]);
                    }
                }
            }
        }

        #[test]
        fn work_grows_monotonically(state in arb_state()) {
            if let Verdict::Safe(report) = evaluate(&state) {
                for window in report.trace.windows(2) {
                    for j in 0..state.resource_count() {
                        prop_assert!(window[0][j] <= window[1][j]);
                    }
                }
            }
        }

        #[test]
        fn final_work_equals_total_units(state in arb_state()) {
            if let Verdict::Safe(report) = evaluate(&state) {
                prop_assert_eq!(
                    report.trace.last().unwrap(),
                    &state.total_units()
                );
            }
        }

        #[test]
        fn unsafe_blocked_set_is_the_unfinished_remainder(state in arb_state()) {
            if let Verdict::Unsafe(report) = evaluate(&state) {
                prop_assert!(!report.blocked.is_empty());
                let granted = report.trace.len() - 1;
                prop_assert_eq!(
                    report.blocked.len() + granted,
                    state.process_count()
                );
                // Ascending, no repeats.
                for pair in report.blocked.windows(2) {
                    prop_assert!(pair[0] < pair[1]);
                }
            }
        }

        #[test]
        fn scan_work_is_bounded(state in arb_state()) {
            let p = state.process_count();
            let metrics = match evaluate(&state) {
                Verdict::Safe(report) => report.metrics,
                Verdict::Unsafe(report) => report.metrics,
            };
            prop_assert!(metrics.passes <= p);
            prop_assert!(metrics.candidates_scanned <= p * p);
        }

        #[test]
        fn evaluation_is_deterministic(state in arb_state()) {
            prop_assert_eq!(evaluate(&state), evaluate(&state));
        }
    }
}
