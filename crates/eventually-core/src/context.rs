//! The test-context capability trait and a recording implementation.

use std::fmt;

/// The capability set of a test context.
///
/// This is the surface a test harness offers the code running under it:
/// marking the test failed, aborting it, and logging. The retry engine
/// accepts any `&mut dyn TestContext`, so checks are written once and run
/// unchanged against a real harness adapter, a [`RecordingContext`], or the
/// engine's own attempt-scoped proxy.
///
/// The `*f` variants take pre-formatted messages through [`format_args!`]:
///
/// ```
/// use eventually_core::{RecordingContext, TestContext};
///
/// let mut t = RecordingContext::new();
/// t.errorf(format_args!("expected {}, got {}", 2, 3));
/// assert!(t.failed());
/// assert_eq!(t.logs(), ["expected 2, got 3"]);
/// ```
pub trait TestContext {
    /// Marks the context as failed without stopping execution.
    fn fail(&mut self);

    /// Marks the context as failed and aborts the code running under it.
    ///
    /// Implementations backing a live test are expected to unwind and never
    /// return, so that no code after the aborting call executes. Recording
    /// implementations may instead note the halt and return.
    fn fail_now(&mut self);

    /// Reports whether this context has been marked as failed.
    fn failed(&self) -> bool;

    /// Records `message` in the log, with a trailing newline appended.
    fn log(&mut self, message: &str);

    /// Records a pre-formatted message in the log, verbatim.
    fn logf(&mut self, args: fmt::Arguments<'_>);

    /// Registers a hook to run when the context is torn down.
    ///
    /// When and whether the hook runs is up to the implementation; see the
    /// implementation's own documentation.
    fn cleanup(&mut self, hook: Box<dyn FnOnce()>);

    /// Logs `message` and marks the context as failed.
    fn error(&mut self, message: &str) {
        self.log(message);
        self.fail();
    }

    /// Logs a formatted message and marks the context as failed.
    fn errorf(&mut self, args: fmt::Arguments<'_>) {
        self.logf(args);
        self.fail();
    }

    /// Logs `message`, marks the context as failed, and aborts.
    fn fatal(&mut self, message: &str) {
        self.log(message);
        self.fail_now();
    }

    /// Logs a formatted message, marks the context as failed, and aborts.
    fn fatalf(&mut self, args: fmt::Arguments<'_>) {
        self.logf(args);
        self.fail_now();
    }
}

/// A [`TestContext`] that records everything it is told.
///
/// `fail_now` notes the halt and returns instead of unwinding, which makes
/// this type suitable both as a harness adapter inside plain `#[test]`
/// functions (assert on [`failed`] at the end) and as a double when
/// asserting on what a run reported.
///
/// Cleanup hooks run in reverse registration order when the context is
/// dropped.
///
/// [`failed`]: TestContext::failed
#[derive(Default)]
pub struct RecordingContext {
    failed: bool,
    halted: bool,
    logs: Vec<String>,
    cleanups: Vec<Box<dyn FnOnce()>>,
}

impl RecordingContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports whether [`fail_now`] was called.
    ///
    /// [`fail_now`]: TestContext::fail_now
    pub fn halted(&self) -> bool {
        self.halted
    }

    /// The log lines recorded so far, in emission order.
    pub fn logs(&self) -> &[String] {
        &self.logs
    }
}

impl TestContext for RecordingContext {
    fn fail(&mut self) {
        self.failed = true;
    }

    fn fail_now(&mut self) {
        self.failed = true;
        self.halted = true;
    }

    fn failed(&self) -> bool {
        self.failed
    }

    fn log(&mut self, message: &str) {
        self.logs.push(format!("{message}\n"));
    }

    fn logf(&mut self, args: fmt::Arguments<'_>) {
        self.logs.push(args.to_string());
    }

    fn cleanup(&mut self, hook: Box<dyn FnOnce()>) {
        self.cleanups.push(hook);
    }
}

impl Drop for RecordingContext {
    fn drop(&mut self) {
        while let Some(hook) = self.cleanups.pop() {
            hook();
        }
    }
}
