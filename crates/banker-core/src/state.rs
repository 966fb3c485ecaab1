//! The validated system-state snapshot and Need derivation.
//!
//! [`SystemState`] is constructed once per evaluation from caller-supplied
//! matrices and is immutable afterwards. All shape and demand invariants
//! are checked at construction, so downstream consumers (the safety
//! evaluator, replay verification) never re-validate.

use smallvec::SmallVec;

use crate::error::StateError;
use crate::id::{ProcessId, ResourceId};
use crate::matrix::{Matrix, ResourceVec};

/// An immutable snapshot of process/resource counts.
///
/// Holds the Allocation and Maximum matrices plus the Available vector,
/// with two invariants established at construction:
///
/// - Allocation and Maximum share a shape, and Available has one entry
///   per resource type.
/// - `maximum[i][j] >= allocation[i][j]` for every cell: a process cannot
///   hold more than it declared it would ever need.
///
/// The state never changes after construction; evaluators copy what they
/// mutate. Re-running on the same state therefore always produces the
/// same result.
///
/// # Examples
///
/// ```
/// use banker_core::{Matrix, SystemState};
///
/// let allocation = Matrix::from_rows(&[vec![0, 1], vec![1, 0]]).unwrap();
/// let maximum = Matrix::from_rows(&[vec![2, 1], vec![1, 2]]).unwrap();
/// let state = SystemState::new(allocation, maximum, &[1, 1]).unwrap();
/// assert_eq!(state.process_count(), 2);
/// assert_eq!(state.resource_count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemState {
    allocation: Matrix,
    maximum: Matrix,
    available: ResourceVec,
}

impl SystemState {
    /// Validate and construct a system state.
    ///
    /// # Errors
    ///
    /// - [`StateError::DimensionMismatch`] if the Allocation and Maximum
    ///   shapes disagree or `available` does not have one entry per
    ///   resource type.
    /// - [`StateError::InvalidDemand`] if any process holds more of a
    ///   resource than its declared maximum. The first offending cell in
    ///   row-major order is reported.
    /// - [`StateError::UnitOverflow`] if any resource type's total units
    ///   do not fit in a `u32`.
    pub fn new(
        allocation: Matrix,
        maximum: Matrix,
        available: &[u32],
    ) -> Result<Self, StateError> {
        check_demand(&allocation, &maximum)?;
        if available.len() != allocation.resources() {
            return Err(StateError::DimensionMismatch {
                context: "available",
                expected: (1, allocation.resources()),
                found: (1, available.len()),
            });
        }
        check_total_units(&allocation, available)?;
        Ok(Self {
            allocation,
            maximum,
            available: SmallVec::from_slice(available),
        })
    }

    /// The Allocation matrix: units currently held per process.
    pub fn allocation(&self) -> &Matrix {
        &self.allocation
    }

    /// The Maximum matrix: declared maximum demand per process.
    pub fn maximum(&self) -> &Matrix {
        &self.maximum
    }

    /// The Available vector: unallocated units per resource type.
    pub fn available(&self) -> &[u32] {
        &self.available
    }

    /// Number of processes (P).
    pub fn process_count(&self) -> usize {
        self.allocation.processes()
    }

    /// Number of resource types (R).
    pub fn resource_count(&self) -> usize {
        self.allocation.resources()
    }

    /// Derive the Need matrix: `maximum - allocation`, cell-wise.
    ///
    /// Cannot fail: the construction invariants guarantee every cell is
    /// non-negative. Need is derived on demand, never stored as
    /// authoritative state.
    pub fn need(&self) -> Matrix {
        subtract(&self.maximum, &self.allocation)
    }

    /// Total system units of each resource type: allocation column sums
    /// plus available. Conserved across any evaluation.
    pub fn total_units(&self) -> ResourceVec {
        // Cannot overflow: construction bounds each column's total.
        let mut totals = self.allocation.column_sums();
        for (total, &avail) in totals.iter_mut().zip(self.available.iter()) {
            *total += avail;
        }
        totals
    }
}

/// Derive the Need matrix from caller-supplied Allocation and Maximum.
///
/// The standalone form of [`SystemState::need`] for callers that have not
/// built a full state. Pure and deterministic; re-validates its own
/// preconditions.
///
/// # Errors
///
/// - [`StateError::DimensionMismatch`] if the shapes disagree.
/// - [`StateError::InvalidDemand`] if any allocation cell exceeds the
///   matching maximum cell.
///
/// # Examples
///
/// ```
/// use banker_core::{derive_need, Matrix, ProcessId, ResourceId};
///
/// let allocation = Matrix::from_rows(&[vec![0, 1, 0]]).unwrap();
/// let maximum = Matrix::from_rows(&[vec![7, 5, 3]]).unwrap();
/// let need = derive_need(&allocation, &maximum).unwrap();
/// assert_eq!(need.row(ProcessId(0)), &[7, 4, 3]);
/// ```
pub fn derive_need(allocation: &Matrix, maximum: &Matrix) -> Result<Matrix, StateError> {
    check_demand(allocation, maximum)?;
    Ok(subtract(maximum, allocation))
}

/// Check that each resource type's total units, the allocation column
/// sum plus the available count, fit in a `u32`.
///
/// [`SystemState::new`] applies this automatically. With the totals
/// bounded, the safety scan's Work vector can never overflow: Work only
/// grows by absorbing held allocations, so it is capped by the total.
///
/// # Errors
///
/// Returns [`StateError::UnitOverflow`] naming the first overflowing
/// resource type.
///
/// # Panics
///
/// Panics if `available` has fewer entries than the matrix has columns.
pub fn check_total_units(allocation: &Matrix, available: &[u32]) -> Result<(), StateError> {
    for j in 0..allocation.resources() {
        let mut total = u64::from(available[j]);
        for row in allocation.rows() {
            total += u64::from(row[j]);
        }
        if total > u64::from(u32::MAX) {
            return Err(StateError::UnitOverflow {
                resource: ResourceId(j as u32),
            });
        }
    }
    Ok(())
}

/// Check the shared-shape and allocation-ceiling invariants.
fn check_demand(allocation: &Matrix, maximum: &Matrix) -> Result<(), StateError> {
    if allocation.shape() != maximum.shape() {
        return Err(StateError::DimensionMismatch {
            context: "maximum",
            expected: allocation.shape(),
            found: maximum.shape(),
        });
    }
    for (i, (alloc_row, max_row)) in allocation.rows().zip(maximum.rows()).enumerate() {
        for (j, (&held, &ceiling)) in alloc_row.iter().zip(max_row).enumerate() {
            if held > ceiling {
                return Err(StateError::InvalidDemand {
                    process: ProcessId(i as u32),
                    resource: ResourceId(j as u32),
                    allocated: held,
                    maximum: ceiling,
                });
            }
        }
    }
    Ok(())
}

/// Cell-wise `lhs - rhs`. Caller guarantees matching shapes and
/// `lhs >= rhs` everywhere.
fn subtract(lhs: &Matrix, rhs: &Matrix) -> Matrix {
    let mut data = Vec::with_capacity(lhs.processes() * lhs.resources());
    for (l, r) in lhs.rows().zip(rhs.rows()) {
        data.extend(l.iter().zip(r).map(|(&a, &b)| a - b));
    }
    Matrix::from_flat(lhs.processes(), lhs.resources(), data)
}
