//! Safety evaluator for the Banker workspace.
//!
//! Implements the decision procedure of the Banker's Algorithm: given a
//! validated [`SystemState`](banker_core::SystemState), decide whether some
//! ordering lets every process obtain its full remaining need and complete,
//! and if so produce that ordering together with a stepwise resource trace.
//!
//! The evaluator is synchronous, performs no I/O, and shares no state
//! across calls; identical inputs always yield identical verdicts. An
//! unsafe system is a normal outcome, not an error.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod metrics;
pub mod safety;

pub use metrics::EvalMetrics;
pub use safety::{evaluate, find_safe_sequence, SafeReport, UnsafeReport, Verdict};
