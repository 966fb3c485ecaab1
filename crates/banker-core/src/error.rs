//! Error types for system state validation.
//!
//! Validation errors cover malformed input only. An unsafe verdict from the
//! safety evaluator is *not* an error. It is a normal outcome, represented
//! at the type level in `banker-engine` so callers cannot conflate the two.

use std::error::Error;
use std::fmt;

use crate::id::{ProcessId, ResourceId};

/// Errors detected while constructing or validating a system state.
///
/// All validation happens before any safety computation starts; a failed
/// validation aborts the evaluation with no partial result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateError {
    /// Two inputs that must share a shape disagree, or an input is empty
    /// or ragged. Shapes are `(processes, resources)`; vectors are
    /// reported as `(1, len)`.
    DimensionMismatch {
        /// Which input pair or construction step failed.
        context: &'static str,
        /// The shape the input was required to have.
        expected: (usize, usize),
        /// The shape actually found.
        found: (usize, usize),
    },
    /// A process currently holds more of a resource than its declared
    /// maximum demand. Reports the first offending cell in row-major order.
    InvalidDemand {
        /// The process whose allocation exceeds its ceiling.
        process: ProcessId,
        /// The resource type at which the excess occurs.
        resource: ResourceId,
        /// Units currently held.
        allocated: u32,
        /// Declared maximum demand.
        maximum: u32,
    },
    /// A resource type's total units (allocation column sum plus
    /// available) do not fit in a `u32`, so Work snapshots could not
    /// represent the fully-released system.
    UnitOverflow {
        /// The resource type whose total overflows.
        resource: ResourceId,
    },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch {
                context,
                expected,
                found,
            } => write!(
                f,
                "dimension mismatch in {context}: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            Self::InvalidDemand {
                process,
                resource,
                allocated,
                maximum,
            } => write!(
                f,
                "{process} holds {allocated} of {resource} but declared a maximum of {maximum}"
            ),
            Self::UnitOverflow { resource } => {
                write!(f, "total units of {resource} exceed {}", u32::MAX)
            }
        }
    }
}

impl Error for StateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_offending_cell() {
        let err = StateError::InvalidDemand {
            process: ProcessId(2),
            resource: ResourceId(1),
            allocated: 5,
            maximum: 3,
        };
        assert_eq!(
            err.to_string(),
            "P2 holds 5 of R1 but declared a maximum of 3"
        );
    }

    #[test]
    fn display_names_overflowing_resource() {
        let err = StateError::UnitOverflow {
            resource: ResourceId(0),
        };
        assert_eq!(err.to_string(), "total units of R0 exceed 4294967295");
    }

    #[test]
    fn display_reports_shapes() {
        let err = StateError::DimensionMismatch {
            context: "maximum",
            expected: (5, 3),
            found: (5, 2),
        };
        assert_eq!(
            err.to_string(),
            "dimension mismatch in maximum: expected 5x3, found 5x2"
        );
    }
}
