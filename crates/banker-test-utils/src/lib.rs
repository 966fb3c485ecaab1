//! Test fixtures and scenario generators for Banker development.
//!
//! Provides the named [`Scenario`] catalog (the textbook cases every
//! crate's tests lean on) and a seeded [`random_system`] generator for
//! property tests and benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod random;
pub mod scenarios;

pub use random::random_system;
pub use scenarios::{catalog, Scenario};
