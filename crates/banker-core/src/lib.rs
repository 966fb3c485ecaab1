//! Core types for the Banker deadlock-avoidance library.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Banker workspace:
//! typed process/resource IDs, the dense [`Matrix`] type, the validated
//! [`SystemState`] snapshot, Need derivation, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod matrix;
pub mod state;

pub use error::StateError;
pub use id::{ProcessId, ResourceId};
pub use matrix::{Matrix, ResourceVec};
pub use state::{check_total_units, derive_need, SystemState};
