//! Named reference scenarios.
//!
//! Each scenario is a complete system state plus, where one is pinned,
//! the exact sequence the evaluator must produce. The catalog preserves
//! insertion order so data-driven tests and benches iterate
//! deterministically.

use banker_core::{Matrix, SystemState};
use indexmap::IndexMap;

/// A complete evaluator input with an optional pinned expectation.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub name: &'static str,
    pub allocation: Vec<Vec<u32>>,
    pub maximum: Vec<Vec<u32>>,
    pub available: Vec<u32>,
    /// The sequence the evaluator must produce, as raw indices, or
    /// `None` for unsafe scenarios.
    pub expected_sequence: Option<Vec<u32>>,
}

impl Scenario {
    /// Construct the validated system state for this scenario.
    pub fn build(&self) -> SystemState {
        let allocation = Matrix::from_rows(&self.allocation).expect("scenario allocation");
        let maximum = Matrix::from_rows(&self.maximum).expect("scenario maximum");
        SystemState::new(allocation, maximum, &self.available).expect("scenario state")
    }
}

/// The reference scenario catalog, in insertion order.
///
/// - `textbook-safe`: the classic five-process, three-resource example;
///   safe with sequence `[1, 3, 4, 0, 2]`.
/// - `starved-pair`: two processes each needing everything, nothing
///   available; unsafe.
/// - `single-idle`: one process that holds and needs nothing; trivially
///   safe.
/// - `saturated`: allocation equals maximum everywhere, so Need is all
///   zero; safe in index order regardless of Available.
pub fn catalog() -> IndexMap<&'static str, Scenario> {
    let mut scenarios = IndexMap::new();
    for scenario in [
        Scenario {
            name: "textbook-safe",
            allocation: vec![
                vec![0, 1, 0],
                vec![2, 0, 0],
                vec![3, 0, 2],
                vec![2, 1, 1],
                vec![0, 0, 2],
            ],
            maximum: vec![
                vec![7, 5, 3],
                vec![3, 2, 2],
                vec![9, 0, 2],
                vec![2, 2, 2],
                vec![4, 3, 3],
            ],
            available: vec![3, 3, 2],
            expected_sequence: Some(vec![1, 3, 4, 0, 2]),
        },
        Scenario {
            name: "starved-pair",
            allocation: vec![vec![0], vec![0]],
            maximum: vec![vec![5], vec![5]],
            available: vec![0],
            expected_sequence: None,
        },
        Scenario {
            name: "single-idle",
            allocation: vec![vec![0]],
            maximum: vec![vec![0]],
            available: vec![0],
            expected_sequence: Some(vec![0]),
        },
        Scenario {
            name: "saturated",
            allocation: vec![vec![3, 1], vec![0, 2], vec![5, 0]],
            maximum: vec![vec![3, 1], vec![0, 2], vec![5, 0]],
            available: vec![0, 0],
            expected_sequence: Some(vec![0, 1, 2]),
        },
    ] {
        scenarios.insert(scenario.name, scenario);
    }
    scenarios
}
