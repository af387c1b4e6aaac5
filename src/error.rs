//! Error types for the control core.
//!
//! The clock is a fixed-function loop over trusted local peripherals, so
//! there is no recoverable-error taxonomy: collaborator failures collapse
//! into one variant per peripheral and are propagated to the platform loop,
//! which decides whether to retry, reset, or show a fault screen.

use core::fmt;

/// Control-core error type.
///
/// Each variant names the collaborator that failed. Initialization failures
/// additionally leave the core in a boot-fault state (see
/// [`ClockCore::activate`](crate::sched::ClockCore::activate)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// The real-time-clock collaborator failed to read or adjust
    ClockFault,

    /// The LCD collaborator rejected a write
    DisplayFault,

    /// The accelerometer collaborator failed to produce a sample
    MotionFault,
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockError::ClockFault => write!(f, "clock fault"),
            ClockError::DisplayFault => write!(f, "display fault"),
            ClockError::MotionFault => write!(f, "motion fault"),
        }
    }
}
