//! Retry-polling test assertions.
//!
//! `eventually` re-runs a check until it stops failing, a wall-clock timeout
//! elapses, or an attempt budget is used up. Test authors get to say "this
//! condition should become true eventually" (waiting on asynchronous side
//! effects, for example) without hand-rolling polling loops.
//!
//! Each attempt runs against a fresh attempt-scoped proxy of the real test
//! context, so a failed attempt marks nothing on the real context; only an
//! exhausted run does. Log output passes straight through to the real
//! context, and a fatal signal (`fail_now`) aborts just the current attempt.
//!
//! # Examples
//!
//! ```
//! use eventually::{Eventually, RecordingContext, TestContext};
//! use std::time::Duration;
//!
//! let mut t = RecordingContext::new();
//!
//! let eventually = Eventually::builder()
//!     .timeout(Duration::from_secs(1))
//!     .interval(Duration::from_millis(1))
//!     .build();
//!
//! let mut ready = false;
//! eventually.must(&mut t, |t| {
//!     if !ready {
//!         ready = true;
//!         t.error("not ready yet");
//!     }
//! });
//!
//! assert!(!t.failed());
//! ```
//!
//! One-shot runs with the default policy go through the free functions:
//!
//! ```
//! use eventually::{should, RecordingContext, TestContext};
//!
//! let mut t = RecordingContext::new();
//! should(&mut t, |t| {
//!     t.log("checked");
//! });
//! assert!(!t.failed());
//! ```

mod config;
mod error;
mod events;
mod proxy;

pub use config::{DEFAULT_INTERVAL, DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT, EventuallyBuilder};
pub use error::ExhaustionCause;
pub use events::AttemptEvent;
pub use eventually_core::{RecordingContext, TestContext};

use crate::proxy::{AttemptAbort, AttemptContext};
use eventually_core::EventListeners;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

/// A reusable retry engine bound to a fixed policy.
///
/// Build one with [`Eventually::builder`] to share a configuration across
/// several checks, or use [`Eventually::default`] for the default policy
/// (10s timeout, 100ms interval, unbounded attempts).
///
/// ```
/// use eventually::{Eventually, RecordingContext, TestContext};
/// use std::time::Duration;
///
/// let eventually = Eventually::builder()
///     .max_attempts(10)
///     .interval(Duration::from_millis(1))
///     .build();
///
/// let mut t = RecordingContext::new();
/// eventually.must(&mut t, |t| {
///     t.log("consumer caught up");
/// });
/// eventually.should(&mut t, |t| {
///     t.log("metrics flushed");
/// });
/// assert!(!t.failed());
/// ```
pub struct Eventually {
    pub(crate) timeout: Duration,
    pub(crate) interval: Duration,
    pub(crate) max_attempts: usize,
    pub(crate) name: String,
    pub(crate) event_listeners: EventListeners<AttemptEvent>,
}

impl Default for Eventually {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Which terminal signal a run replays on the real context when it gives up.
#[derive(Clone, Copy)]
enum FailureMode {
    Fatal,
    NonFatal,
}

impl Eventually {
    /// Creates a builder for configuring an engine.
    pub fn builder() -> EventuallyBuilder {
        EventuallyBuilder::new()
    }

    /// Keeps retrying `check` until the context passed to it does not fail,
    /// the timeout elapses, or the attempt budget is used up.
    ///
    /// If the check never stops failing, the run halts the enclosing test
    /// by calling the real context's `fatalf`.
    pub fn must<F>(&self, t: &mut dyn TestContext, check: F)
    where
        F: FnMut(&mut dyn TestContext),
    {
        self.run(t, check, FailureMode::Fatal);
    }

    /// Keeps retrying `check` until the context passed to it does not fail,
    /// the timeout elapses, or the attempt budget is used up.
    ///
    /// If the check never stops failing, the run marks the enclosing test
    /// failed via the real context's `errorf` and returns, letting the
    /// caller continue.
    pub fn should<F>(&self, t: &mut dyn TestContext, check: F)
    where
        F: FnMut(&mut dyn TestContext),
    {
        self.run(t, check, FailureMode::NonFatal);
    }

    fn run<F>(&self, t: &mut dyn TestContext, mut check: F, mode: FailureMode)
    where
        F: FnMut(&mut dyn TestContext),
    {
        let start = Instant::now();
        let mut attempts = 0usize;

        loop {
            // Budget is checked before running another attempt, so
            // max_attempts = N means exactly N check invocations.
            if self.max_attempts > 0 && attempts >= self.max_attempts {
                self.give_up(t, mode, ExhaustionCause::MaxAttempts, attempts);
                return;
            }
            attempts += 1;

            let failed = self.attempt(t, &mut check);

            if !failed {
                #[cfg(feature = "tracing")]
                tracing::debug!(eventually = %self.name, attempts, "check passed");

                #[cfg(feature = "metrics")]
                {
                    metrics::counter!(
                        "eventually_runs_total",
                        "engine" => self.name.clone(),
                        "result" => "success"
                    )
                    .increment(1);
                    metrics::histogram!("eventually_attempts", "engine" => self.name.clone())
                        .record(attempts as f64);
                }

                self.event_listeners.emit(&AttemptEvent::Success {
                    engine_name: self.name.clone(),
                    timestamp: Instant::now(),
                    attempts,
                });
                return;
            }

            // The timeout is evaluated after a failed attempt, never
            // before the first one, against elapsed time since run start.
            if self.timeout > Duration::ZERO && start.elapsed() >= self.timeout {
                self.give_up(t, mode, ExhaustionCause::Timeout, attempts);
                return;
            }

            // The loop head owns the budget decision; only announce a retry
            // when another attempt can actually follow.
            if self.max_attempts == 0 || attempts < self.max_attempts {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    eventually = %self.name,
                    attempt = attempts,
                    delay_ms = self.interval.as_millis() as u64,
                    "check failed, retrying"
                );

                self.event_listeners.emit(&AttemptEvent::Retry {
                    engine_name: self.name.clone(),
                    timestamp: Instant::now(),
                    attempt: attempts,
                    delay: self.interval,
                });
            }

            std::thread::sleep(self.interval);
        }
    }

    /// Runs `check` once against a fresh attempt-scoped proxy and reports
    /// whether the attempt failed. Only the proxy's own abort payload is
    /// intercepted; any other panic propagates out of the whole run.
    fn attempt<F>(&self, t: &mut dyn TestContext, check: &mut F) -> bool
    where
        F: FnMut(&mut dyn TestContext),
    {
        #[cfg(feature = "metrics")]
        metrics::counter!("eventually_attempts_total", "engine" => self.name.clone()).increment(1);

        let mut attempt = AttemptContext::new(t);
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| check(&mut attempt))) {
            if !payload.is::<AttemptAbort>() {
                panic::resume_unwind(payload);
            }
        }
        attempt.failed()
    }

    fn give_up(
        &self,
        t: &mut dyn TestContext,
        mode: FailureMode,
        cause: ExhaustionCause,
        attempts: usize,
    ) {
        #[cfg(feature = "tracing")]
        tracing::warn!(eventually = %self.name, attempts, %cause, "giving up");

        #[cfg(feature = "metrics")]
        {
            metrics::counter!(
                "eventually_runs_total",
                "engine" => self.name.clone(),
                "result" => "exhausted"
            )
            .increment(1);
            metrics::histogram!("eventually_attempts", "engine" => self.name.clone())
                .record(attempts as f64);
        }

        self.event_listeners.emit(&AttemptEvent::Exhausted {
            engine_name: self.name.clone(),
            timestamp: Instant::now(),
            attempts,
            cause,
        });

        match mode {
            FailureMode::Fatal => t.fatalf(format_args!("eventually: {cause}")),
            FailureMode::NonFatal => t.errorf(format_args!("eventually: {cause}")),
        }
    }
}

/// Keeps retrying `check` with the default policy until it stops failing;
/// halts the enclosing test if it never does.
///
/// Equivalent to `Eventually::default().must(t, check)`. Runs needing a
/// non-default policy go through [`Eventually::builder`].
pub fn must<F>(t: &mut dyn TestContext, check: F)
where
    F: FnMut(&mut dyn TestContext),
{
    Eventually::default().must(t, check);
}

/// Keeps retrying `check` with the default policy until it stops failing;
/// marks the enclosing test failed, without halting it, if it never does.
///
/// Equivalent to `Eventually::default().should(t, check)`.
pub fn should<F>(t: &mut dyn TestContext, check: F)
where
    F: FnMut(&mut dyn TestContext),
{
    Eventually::default().should(t, check);
}
