//! Events emitted by the retry engine.

use crate::error::ExhaustionCause;
use eventually_core::PollEvent;
use std::time::{Duration, Instant};

/// Events emitted while a run polls its check.
#[derive(Debug, Clone)]
pub enum AttemptEvent {
    /// A failed attempt is about to be retried after `delay`.
    Retry {
        engine_name: String,
        timestamp: Instant,
        attempt: usize,
        delay: Duration,
    },
    /// The check stopped failing.
    Success {
        engine_name: String,
        timestamp: Instant,
        attempts: usize,
    },
    /// The run gave up without the check succeeding.
    Exhausted {
        engine_name: String,
        timestamp: Instant,
        attempts: usize,
        cause: ExhaustionCause,
    },
}

impl PollEvent for AttemptEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AttemptEvent::Retry { .. } => "Retry",
            AttemptEvent::Success { .. } => "Success",
            AttemptEvent::Exhausted { .. } => "Exhausted",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            AttemptEvent::Retry { timestamp, .. }
            | AttemptEvent::Success { timestamp, .. }
            | AttemptEvent::Exhausted { timestamp, .. } => *timestamp,
        }
    }

    fn engine_name(&self) -> &str {
        match self {
            AttemptEvent::Retry { engine_name, .. }
            | AttemptEvent::Success { engine_name, .. }
            | AttemptEvent::Exhausted { engine_name, .. } => engine_name,
        }
    }
}
