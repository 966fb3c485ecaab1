//! End-to-end replay tests: evaluate, replay, verify.

use banker_engine::{evaluate, Verdict};
use banker_replay::{verify_report, TraceCursor};
use banker_test_utils::{catalog, random_system};

#[test]
fn catalog_reports_replay_to_the_total_units() {
    for (name, scenario) in catalog() {
        let state = scenario.build();
        let Verdict::Safe(report) = evaluate(&state) else {
            continue;
        };

        let mut cursor = TraceCursor::new(&report);
        let mut steps = 0;
        while let Some(step) = cursor.advance() {
            assert_eq!(step.index, steps, "{name} step order");
            steps += 1;
        }
        assert_eq!(steps, state.process_count(), "{name} step count");
        assert_eq!(
            cursor.work(),
            state.total_units().as_slice(),
            "{name} final work"
        );
    }
}

#[test]
fn catalog_reports_verify_clean() {
    for (name, scenario) in catalog() {
        let state = scenario.build();
        if let Verdict::Safe(report) = evaluate(&state) {
            assert!(
                verify_report(&state, &report).is_none(),
                "{name} diverged"
            );
        }
    }
}

#[test]
fn seeded_reports_verify_clean() {
    for seed in 0..50 {
        let state = random_system(seed, 7, 5, 12);
        if let Verdict::Safe(report) = evaluate(&state) {
            assert!(verify_report(&state, &report).is_none(), "seed {seed}");
        }
    }
}

#[test]
fn reset_between_consumers_is_independent() {
    let state = catalog()["textbook-safe"].build();
    let Verdict::Safe(report) = evaluate(&state) else {
        panic!("textbook system is safe");
    };

    // Two cursors over one report never interfere.
    let mut first = TraceCursor::new(&report);
    let second = TraceCursor::new(&report);
    first.advance();
    assert_eq!(second.step_index(), 0);
    assert_eq!(first.step_index(), 1);
}
