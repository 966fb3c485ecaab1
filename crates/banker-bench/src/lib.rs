//! Benchmark profiles for the Banker deadlock-avoidance library.
//!
//! Provides adversarial system builders that exercise the evaluator's
//! worst case, alongside the ordinary fixtures from `banker-test-utils`.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use banker_core::{Matrix, SystemState};

/// Build a single-resource chain that forces one grant per pass.
///
/// Every process holds one unit and one unit is available. Process `i`
/// needs `P - i` units, which only fit in Work once every higher-index
/// process has completed. The ascending scan therefore grants exactly
/// one process per pass, from the highest index down: P passes and
/// roughly P²/2 candidate inspections, the evaluator's worst case.
pub fn reverse_chain(processes: usize) -> SystemState {
    let p = processes as u32;
    let allocation: Vec<Vec<u32>> = (0..p).map(|_| vec![1]).collect();
    let maximum: Vec<Vec<u32>> = (0..p).map(|i| vec![p - i + 1]).collect();
    let allocation = Matrix::from_rows(&allocation).expect("chain allocation");
    let maximum = Matrix::from_rows(&maximum).expect("chain maximum");
    SystemState::new(allocation, maximum, &[1]).expect("chain state")
}

#[cfg(test)]
mod tests {
    use super::*;
    use banker_engine::{evaluate, Verdict};

    #[test]
    fn reverse_chain_grants_one_process_per_pass() {
        let processes = 10;
        let state = reverse_chain(processes);
        let Verdict::Safe(report) = evaluate(&state) else {
            panic!("chain is safe by construction");
        };
        assert_eq!(report.metrics.passes, processes);
        let descending: Vec<u32> = report.sequence.iter().map(|pid| pid.0).collect();
        let expected: Vec<u32> = (0..processes as u32).rev().collect();
        assert_eq!(descending, expected);
    }
}
