//! Banker: a deadlock-avoidance decision procedure with replayable traces.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Banker sub-crates. For most users, adding `banker` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use banker::prelude::*;
//!
//! // The classic five-process, three-resource textbook system.
//! let allocation = Matrix::from_rows(&[
//!     vec![0, 1, 0],
//!     vec![2, 0, 0],
//!     vec![3, 0, 2],
//!     vec![2, 1, 1],
//!     vec![0, 0, 2],
//! ])?;
//! let maximum = Matrix::from_rows(&[
//!     vec![7, 5, 3],
//!     vec![3, 2, 2],
//!     vec![9, 0, 2],
//!     vec![2, 2, 2],
//!     vec![4, 3, 3],
//! ])?;
//! let state = SystemState::new(allocation, maximum, &[3, 3, 2])?;
//!
//! let verdict = evaluate(&state);
//! let report = verdict.safe().expect("textbook system is safe");
//! assert_eq!(report.sequence.len(), 5);
//! assert_eq!(report.sequence[0], ProcessId(1));
//!
//! // Replay the result one grant at a time, e.g. to drive a display.
//! let mut cursor = TraceCursor::new(report);
//! assert_eq!(cursor.work(), &[3, 3, 2]);
//! while let Some(step) = cursor.advance() {
//!     println!("{} completes, work becomes {:?}", step.process, step.work_after);
//! }
//! assert!(cursor.is_complete());
//! # Ok::<(), banker::types::StateError>(())
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `banker-core` | IDs, matrices, system state, validation errors |
//! | [`engine`] | `banker-engine` | The safety evaluator and verdict types |
//! | [`replay`] | `banker-replay` | Trace cursor and report verification |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, IDs, and validation (`banker-core`).
///
/// Contains [`types::Matrix`], [`types::SystemState`], the typed IDs,
/// and [`types::StateError`].
pub use banker_core as types;

/// The safety evaluator (`banker-engine`).
///
/// [`engine::evaluate`] runs the scan on a validated state;
/// [`engine::find_safe_sequence`] accepts a caller-supplied Need matrix.
pub use banker_engine as engine;

/// Trace replay and verification (`banker-replay`).
///
/// Step through results with [`replay::TraceCursor`], re-check reports
/// with [`replay::verify_report`].
pub use banker_replay as replay;

/// Common imports for typical Banker usage.
///
/// ```rust
/// use banker::prelude::*;
/// ```
///
/// This imports the most frequently used types: matrices, system state,
/// the evaluator entry points, verdicts, and the trace cursor.
pub mod prelude {
    // Core types
    pub use banker_core::{
        check_total_units, derive_need, Matrix, ProcessId, ResourceId, ResourceVec, StateError,
        SystemState,
    };

    // Evaluator
    pub use banker_engine::{
        evaluate, find_safe_sequence, EvalMetrics, SafeReport, UnsafeReport, Verdict,
    };

    // Replay
    pub use banker_replay::{
        verify_report, DivergenceKind, DivergenceReport, ReplayStep, TraceCursor,
    };
}
