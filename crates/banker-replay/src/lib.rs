//! Stepwise replay and verification of safety-evaluation traces.
//!
//! The safety evaluator computes its full trace eagerly; this crate makes
//! that result replayable one grant at a time, for presentation layers
//! that animate resource levels, and verifiable, for tests and debugging.
//!
//! # Architecture
//!
//! - [`TraceCursor`] walks a [`SafeReport`](banker_engine::SafeReport)
//!   grant by grant, restartably, with no recomputation
//! - [`verify_report`] re-checks a report against its system state and
//!   pinpoints the first divergence
//!
//! Replay is read-only: a cursor borrows the report and cannot fail
//! beyond reaching its natural end.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cursor;
pub mod verify;

pub use cursor::{ReplayStep, TraceCursor};
pub use verify::{verify_report, DivergenceKind, DivergenceReport};
