//! Dense process-by-resource matrices and the [`ResourceVec`] alias.

use smallvec::SmallVec;

use crate::error::StateError;
use crate::id::{ProcessId, ResourceId};

/// One non-negative unit count per resource type.
///
/// Uses `SmallVec<[u32; 8]>` to avoid heap allocation for systems with up
/// to 8 resource types, which covers every legible visualization (the
/// recommended bound is 10). Larger systems spill to the heap transparently.
pub type ResourceVec = SmallVec<[u32; 8]>;

/// A dense row-major matrix of unit counts, processes by resource types.
///
/// Rows are processes, columns are resource types. The shape is fixed at
/// construction: at least one process and one resource type, with every
/// row the same length. Used for the Allocation, Maximum, and Need matrices.
///
/// # Examples
///
/// ```
/// use banker_core::{Matrix, ProcessId, ResourceId};
///
/// let m = Matrix::from_rows(&[vec![0, 1, 0], vec![2, 0, 0]]).unwrap();
/// assert_eq!(m.processes(), 2);
/// assert_eq!(m.resources(), 3);
/// assert_eq!(m.get(ProcessId(0), ResourceId(1)), 1);
/// assert_eq!(m.row(ProcessId(1)), &[2, 0, 0]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    processes: usize,
    resources: usize,
    data: Vec<u32>,
}

impl Matrix {
    /// Build a matrix from per-process rows.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::DimensionMismatch`] if there are no rows, if
    /// the first row is empty, or if any row's length differs from the
    /// first row's.
    pub fn from_rows(rows: &[Vec<u32>]) -> Result<Self, StateError> {
        if rows.is_empty() {
            return Err(StateError::DimensionMismatch {
                context: "matrix rows",
                expected: (1, 1),
                found: (0, 0),
            });
        }
        let processes = rows.len();
        let resources = rows[0].len();
        if resources == 0 {
            return Err(StateError::DimensionMismatch {
                context: "matrix rows",
                expected: (processes, 1),
                found: (processes, 0),
            });
        }
        for row in rows {
            if row.len() != resources {
                return Err(StateError::DimensionMismatch {
                    context: "matrix rows",
                    expected: (processes, resources),
                    found: (processes, row.len()),
                });
            }
        }
        let mut data = Vec::with_capacity(processes * resources);
        for row in rows {
            data.extend_from_slice(row);
        }
        Ok(Self {
            processes,
            resources,
            data,
        })
    }

    /// Build an all-zero matrix of the given shape.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero; a shapeless matrix is a
    /// programming error, not an input error.
    pub fn zeros(processes: usize, resources: usize) -> Self {
        assert!(
            processes > 0 && resources > 0,
            "matrix shape must be at least 1x1, got {processes}x{resources}"
        );
        Self {
            processes,
            resources,
            data: vec![0; processes * resources],
        }
    }

    /// Build from a flat row-major buffer. Caller guarantees
    /// `data.len() == processes * resources` and a non-degenerate shape.
    pub(crate) fn from_flat(processes: usize, resources: usize, data: Vec<u32>) -> Self {
        debug_assert_eq!(data.len(), processes * resources);
        Self {
            processes,
            resources,
            data,
        }
    }

    /// Number of processes (rows).
    pub fn processes(&self) -> usize {
        self.processes
    }

    /// Number of resource types (columns).
    pub fn resources(&self) -> usize {
        self.resources
    }

    /// The matrix shape as `(processes, resources)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.processes, self.resources)
    }

    /// The unit count at one cell.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, process: ProcessId, resource: ResourceId) -> u32 {
        let row = self.row(process);
        row[resource.index()]
    }

    /// One process's row as a slice of per-resource counts.
    ///
    /// # Panics
    ///
    /// Panics if the process index is out of range.
    pub fn row(&self, process: ProcessId) -> &[u32] {
        let start = process.index() * self.resources;
        &self.data[start..start + self.resources]
    }

    /// Iterate over rows in process order.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.data.chunks_exact(self.resources)
    }

    /// Sum each column across all processes.
    ///
    /// For an Allocation matrix this is the total units of each resource
    /// type currently held system-wide. Column sums must fit in a `u32`;
    /// [`SystemState::new`](crate::SystemState::new) enforces this for
    /// allocation matrices at construction.
    pub fn column_sums(&self) -> ResourceVec {
        let mut sums: ResourceVec = SmallVec::from_elem(0, self.resources);
        for row in self.rows() {
            for (sum, &v) in sums.iter_mut().zip(row) {
                *sum += v;
            }
        }
        sums
    }
}
