//! Comprehensive tests for the retry engine.
//!
//! Test organization:
//! - behavior.rs: Core retry loop behavior
//! - halting.rs: Fatal-mode halting semantics against an unwinding context
//! - logging.rs: Log passthrough and formatting contract
//! - reuse.rs: Engine reuse across runs
//! - events.rs: Event listener callbacks
