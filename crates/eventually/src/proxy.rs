//! The attempt-scoped stand-in for the real test context.

use eventually_core::TestContext;
use std::fmt;

/// Panic payload used by [`AttemptContext::fail_now`] to unwind the rest of
/// a check. Caught at the attempt boundary; never observable outside it.
pub(crate) struct AttemptAbort;

/// A [`TestContext`] standing in for the real context during exactly one
/// attempt.
///
/// Failure signals raised by the check are recorded here instead of acting
/// on the real context, so a failed attempt marks nothing until the engine
/// decides the run is over. Log output passes straight through, which keeps
/// lines from retried attempts visible in emission order.
pub(crate) struct AttemptContext<'a> {
    real: &'a mut dyn TestContext,
    failed: bool,
}

impl<'a> AttemptContext<'a> {
    pub(crate) fn new(real: &'a mut dyn TestContext) -> Self {
        Self {
            real,
            failed: false,
        }
    }
}

impl TestContext for AttemptContext<'_> {
    fn fail(&mut self) {
        self.failed = true;
    }

    /// Marks the attempt failed and unwinds the remainder of the check.
    /// The engine swallows the [`AttemptAbort`] payload at the attempt
    /// boundary; every other payload crossing that boundary is re-raised.
    fn fail_now(&mut self) {
        self.failed = true;
        std::panic::panic_any(AttemptAbort);
    }

    fn failed(&self) -> bool {
        self.failed
    }

    fn log(&mut self, message: &str) {
        self.real.log(message);
    }

    fn logf(&mut self, args: fmt::Arguments<'_>) {
        self.real.logf(args);
    }

    /// Accepted for interface compatibility; the hook is dropped without
    /// running. Cleanup hooks registered during an attempt are not
    /// guaranteed to run.
    fn cleanup(&mut self, _hook: Box<dyn FnOnce()>) {}
}
