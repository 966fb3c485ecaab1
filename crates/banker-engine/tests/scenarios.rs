//! Catalog-driven evaluator tests.
//!
//! Runs every named scenario from `banker-test-utils` and checks the
//! pinned expectations: exact sequences for safe scenarios, a definitive
//! unsafe verdict otherwise.

use banker_core::ProcessId;
use banker_engine::{evaluate, Verdict};
use banker_test_utils::{catalog, random_system};

#[test]
fn every_catalog_expectation_holds() {
    for (name, scenario) in catalog() {
        let state = scenario.build();
        let verdict = evaluate(&state);
        match &scenario.expected_sequence {
            Some(expected) => {
                let report = verdict
                    .safe()
                    .unwrap_or_else(|| panic!("{name} should be safe"));
                let expected: Vec<ProcessId> =
                    expected.iter().copied().map(ProcessId).collect();
                assert_eq!(report.sequence, expected, "{name} sequence");
                assert_eq!(
                    report.trace.len(),
                    state.process_count() + 1,
                    "{name} trace length"
                );
            }
            None => assert!(!verdict.is_safe(), "{name} should be unsafe"),
        }
    }
}

#[test]
fn textbook_trace_matches_the_worked_example() {
    let state = catalog()["textbook-safe"].build();
    let verdict = evaluate(&state);
    let report = verdict.safe().unwrap();
    let expected: Vec<&[u32]> = vec![
        &[3, 3, 2],
        &[5, 3, 2],
        &[7, 4, 3],
        &[7, 4, 5],
        &[7, 5, 5],
        &[10, 5, 7],
    ];
    let found: Vec<&[u32]> = report.trace.iter().map(|w| w.as_slice()).collect();
    assert_eq!(found, expected);
}

#[test]
fn seeded_systems_evaluate_identically_across_runs() {
    for seed in 0..20 {
        let state = random_system(seed, 8, 4, 15);
        assert_eq!(evaluate(&state), evaluate(&state), "seed {seed}");
    }
}

#[test]
fn unsafe_verdicts_name_only_unfinished_processes() {
    for seed in 0..50 {
        let state = random_system(seed, 6, 3, 10);
        if let Verdict::Unsafe(report) = evaluate(&state) {
            let granted = report.trace.len() - 1;
            assert_eq!(report.blocked.len() + granted, state.process_count());
        }
    }
}
