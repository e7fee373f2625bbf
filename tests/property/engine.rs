//! Property tests for the retry engine.
//!
//! Invariants tested:
//! - An always-failing check runs exactly max_attempts times
//! - Success within the budget ends the run with no terminal signal
//! - Fatal and non-fatal exhaustion differ only in halting

use eventually::{Eventually, RecordingContext, TestContext};
use proptest::prelude::*;
use std::time::Duration;

fn bounded(max_attempts: usize) -> Eventually {
    Eventually::builder()
        .max_attempts(max_attempts)
        .timeout(Duration::ZERO)
        .interval(Duration::ZERO)
        .build()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Property: an always-failing check runs exactly max_attempts times
    /// and exhausts with the attempt-count cause.
    #[test]
    fn attempt_budget_is_exact(max_attempts in 1usize..=10) {
        let mut t = RecordingContext::new();
        let mut calls = 0usize;

        bounded(max_attempts).should(&mut t, |t| {
            calls += 1;
            t.fail();
        });

        prop_assert_eq!(
            calls,
            max_attempts,
            "expected exactly {} attempts, got {}",
            max_attempts,
            calls
        );
        prop_assert!(t.failed());
        prop_assert!(!t.halted());
        prop_assert_eq!(t.logs(), ["eventually: max attempts reached"]);
    }

    /// Property: a check that fails its first K attempts and then passes
    /// ends the run after K + 1 attempts with no terminal signal.
    #[test]
    fn success_within_budget_stops_retrying(
        max_attempts in 2usize..=10,
        failures in 0usize..=8,
    ) {
        if failures >= max_attempts {
            return Ok(());
        }

        let mut t = RecordingContext::new();
        let mut calls = 0usize;

        bounded(max_attempts).must(&mut t, |t| {
            calls += 1;
            if calls <= failures {
                t.fail();
            }
        });

        prop_assert_eq!(
            calls,
            failures + 1,
            "expected {} attempts, got {}",
            failures + 1,
            calls
        );
        prop_assert!(!t.failed());
        prop_assert!(t.logs().is_empty(), "no terminal diagnostic on success");
    }

    /// Property: exhaustion halts the context in fatal mode and leaves it
    /// running in non-fatal mode; both mark it failed.
    #[test]
    fn exhaustion_modes_differ_only_in_halting(max_attempts in 1usize..=6) {
        let mut fatal = RecordingContext::new();
        bounded(max_attempts).must(&mut fatal, |t| t.fail());
        prop_assert!(fatal.failed());
        prop_assert!(fatal.halted());

        let mut nonfatal = RecordingContext::new();
        bounded(max_attempts).should(&mut nonfatal, |t| t.fail());
        prop_assert!(nonfatal.failed());
        prop_assert!(!nonfatal.halted());

        prop_assert_eq!(fatal.logs(), nonfatal.logs());
    }
}
