//! Retry engine metrics regression tests

use super::helpers::*;
use eventually::{Eventually, RecordingContext, TestContext};
use serial_test::serial;
use std::time::Duration;

#[test]
#[serial]
fn successful_run_metrics_exist() {
    init_recorder();

    let eventually = Eventually::builder()
        .name("test_engine")
        .max_attempts(3)
        .timeout(Duration::ZERO)
        .interval(Duration::ZERO)
        .build();

    let mut t = RecordingContext::new();
    let mut calls = 0;
    eventually.must(&mut t, |t| {
        calls += 1;
        if calls < 2 {
            t.fail();
        }
    });

    assert_counter_exists("eventually_runs_total");
    assert_metric_has_label("eventually_runs_total", "engine", "test_engine");
    assert_metric_has_label("eventually_runs_total", "result", "success");

    assert_counter_exists("eventually_attempts_total");
    assert_metric_has_label("eventually_attempts_total", "engine", "test_engine");

    assert_histogram_exists("eventually_attempts");
    assert_metric_has_label("eventually_attempts", "engine", "test_engine");
}

#[test]
#[serial]
fn exhausted_run_metrics_exist() {
    init_recorder();

    let eventually = Eventually::builder()
        .name("exhausted_engine")
        .max_attempts(2)
        .timeout(Duration::ZERO)
        .interval(Duration::ZERO)
        .build();

    let mut t = RecordingContext::new();
    eventually.should(&mut t, |t| t.fail());

    assert_metric_has_label("eventually_runs_total", "result", "exhausted");
    assert_metric_has_label("eventually_runs_total", "engine", "exhausted_engine");
}
