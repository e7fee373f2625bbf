//! Exhaustion causes for polling runs.

/// Why a run stopped retrying without its check succeeding.
///
/// The display form is the diagnostic replayed on the real context,
/// prefixed with `eventually:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExhaustionCause {
    /// The configured attempt budget was used up.
    #[error("max attempts reached")]
    MaxAttempts,
    /// The configured wall-clock timeout elapsed.
    #[error("timeout reached")]
    Timeout,
}
