//! Configuration for the retry engine.

use crate::error::ExhaustionCause;
use crate::events::AttemptEvent;
use crate::Eventually;
use eventually_core::{EventListeners, FnListener};
use std::time::Duration;

/// Default wall-clock budget for a whole run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default pause between failed attempts.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

/// Default attempt budget (`0` = unbounded).
pub const DEFAULT_MAX_ATTEMPTS: usize = 0;

/// Builder for [`Eventually`].
pub struct EventuallyBuilder {
    timeout: Duration,
    interval: Duration,
    max_attempts: usize,
    name: String,
    event_listeners: EventListeners<AttemptEvent>,
}

impl Default for EventuallyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EventuallyBuilder {
    /// Creates a builder with the default policy.
    ///
    /// Defaults:
    /// - timeout: 10 seconds
    /// - interval: 100 milliseconds
    /// - max_attempts: 0 (unbounded)
    /// - name: `"<unnamed>"`
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            interval: DEFAULT_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            name: String::from("<unnamed>"),
            event_listeners: EventListeners::new(),
        }
    }

    /// Sets the wall-clock budget for a whole run.
    ///
    /// The timeout is evaluated against elapsed time since the run started,
    /// after each failed attempt; a check always gets to run at least once.
    /// `Duration::ZERO` disables the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the pause between failed attempts.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the maximum number of attempts.
    ///
    /// The budget counts check invocations, so `max_attempts(3)` runs the
    /// check at most three times. `0` leaves the attempt count unbounded.
    ///
    /// A run with an unbounded attempt count and a disabled timeout never
    /// gives up; keeping at least one of the two finite is the caller's
    /// responsibility.
    pub fn max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the name for this engine (used in events and diagnostics).
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Registers a callback invoked before each retry pause.
    ///
    /// # Callback Signature
    /// `Fn(usize, Duration)` - the number of the attempt that just failed
    /// (1-indexed) and the pause before the next one.
    ///
    /// # Example
    /// ```
    /// use eventually::Eventually;
    /// use std::time::Duration;
    ///
    /// let eventually = Eventually::builder()
    ///     .max_attempts(5)
    ///     .interval(Duration::from_millis(10))
    ///     .on_retry(|attempt, delay| {
    ///         println!("attempt {} failed, next try in {:?}", attempt, delay);
    ///     })
    ///     .build();
    /// ```
    pub fn on_retry<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, Duration) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let AttemptEvent::Retry { attempt, delay, .. } = event {
                f(*attempt, *delay);
            }
        }));
        self
    }

    /// Registers a callback invoked when a run's check stops failing.
    ///
    /// # Callback Signature
    /// `Fn(usize)` - total attempts made, including the successful one.
    /// A value of 1 means the check passed on the first try.
    pub fn on_success<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let AttemptEvent::Success { attempts, .. } = event {
                f(*attempts);
            }
        }));
        self
    }

    /// Registers a callback invoked when a run gives up.
    ///
    /// # Callback Signature
    /// `Fn(ExhaustionCause, usize)` - why the run stopped and how many
    /// attempts it made.
    ///
    /// # Example
    /// ```
    /// use eventually::{Eventually, ExhaustionCause};
    /// use std::time::Duration;
    ///
    /// let eventually = Eventually::builder()
    ///     .max_attempts(3)
    ///     .interval(Duration::from_millis(10))
    ///     .on_exhausted(|cause, attempts| {
    ///         if cause == ExhaustionCause::Timeout {
    ///             eprintln!("timed out after {} attempts", attempts);
    ///         }
    ///     })
    ///     .build();
    /// ```
    pub fn on_exhausted<F>(mut self, f: F) -> Self
    where
        F: Fn(ExhaustionCause, usize) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let AttemptEvent::Exhausted {
                cause, attempts, ..
            } = event
            {
                f(*cause, *attempts);
            }
        }));
        self
    }

    /// Builds the engine.
    pub fn build(self) -> Eventually {
        Eventually {
            timeout: self.timeout,
            interval: self.interval,
            max_attempts: self.max_attempts,
            name: self.name,
            event_listeners: self.event_listeners,
        }
    }
}
