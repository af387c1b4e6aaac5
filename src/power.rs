//! Power-mode request and wake-flag plumbing.
//!
//! The only data shared between interrupt context and the main loop is the
//! wake flag: a single word, written once by the wake interrupt and consumed
//! once per scheduler pass. Everything else in the crate is loop-private.

use core::sync::atomic::{AtomicBool, Ordering};

/// Requested operating mode, produced by the display renderer and applied by
/// the scheduler's final step.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// Normal operation, backlight on
    #[default]
    Active,
    /// Backlight dimmed, low-power wait requested
    Standby,
}

/// One-bit wake request shared with interrupt context.
///
/// `request()` is the only operation an interrupt handler may perform on the
/// core; `take()` is called once at the top of every scheduler pass. The
/// release store / acquire swap pair is the whole synchronization protocol —
/// no larger critical section is needed for a single flag.
#[derive(Debug)]
pub struct WakeFlag(AtomicBool);

impl WakeFlag {
    /// Create a cleared wake flag (const, so it can live in a `static`).
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Set the flag. Safe to call from interrupt context.
    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Consume the flag, returning whether a wake was pending.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

impl Default for WakeFlag {
    fn default() -> Self {
        Self::new()
    }
}
