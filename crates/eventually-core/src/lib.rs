//! Core infrastructure for the `eventually` crates.
//!
//! This crate provides the pieces shared between the retry engine and test
//! harness adapters:
//! - [`TestContext`], the capability trait of a test context
//! - [`RecordingContext`], a context implementation that records everything
//!   it is told
//! - The event system used for observability

pub mod context;
pub mod events;

pub use context::{RecordingContext, TestContext};
pub use events::{EventListener, EventListeners, FnListener, PollEvent};
