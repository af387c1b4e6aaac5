//! Monotonic time base and periodic task timers.
//!
//! The hardware tick is a free-running 32-bit millisecond counter that wraps
//! roughly every 49.7 days. [`Monotonic`] widens it to 64 bits so that every
//! deadline comparison in the crate is a plain unsigned compare; wraparound
//! of the 64-bit value itself is outside the operating lifetime of the
//! device.

/// 64-bit monotonic millisecond clock extended from a wrapping 32-bit tick.
///
/// Invariants:
/// - `now()` is non-decreasing across any sequence of `update()` calls whose
///   raw arguments are in temporal order.
/// - The low 32 bits of `now()` always equal the most recent raw value.
///
/// `update()` must run once per scheduler pass, before any timer check, and
/// at least once per raw wrap period so no wrap goes unobserved.
#[derive(Debug, Default)]
pub struct Monotonic {
    now: u64,
}

impl Monotonic {
    /// Create a clock at zero.
    pub const fn new() -> Self {
        Self { now: 0 }
    }

    /// Fold the latest raw counter value in and return the extended time.
    ///
    /// A raw value numerically below the stored low word means the counter
    /// wrapped; carry into the high word.
    pub fn update(&mut self, raw: u32) -> u64 {
        let low = self.now as u32;
        if raw < low {
            self.now = (self.now & 0xFFFF_FFFF_0000_0000) + 0x1_0000_0000 + u64::from(raw);
        } else {
            self.now = (self.now & 0xFFFF_FFFF_0000_0000) | u64::from(raw);
        }
        self.now
    }

    /// Extended time as of the last `update()`.
    pub fn now(&self) -> u64 {
        self.now
    }
}

/// Last-fired stamp for one periodic task.
///
/// A task fires when `now - last >= interval`; the stamp is then set to
/// `now`, not `last + interval`, so missed ticks are not compensated —
/// under overload the task drifts instead of bursting to catch up.
#[derive(Debug, Default)]
pub struct PeriodicTimer {
    last: u64,
}

impl PeriodicTimer {
    /// Create a timer stamped at time zero; it first fires one full
    /// interval after boot.
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Check whether the interval has elapsed; restamp and return true if so.
    pub fn poll(&mut self, now: u64, interval: u64) -> bool {
        if now - self.last >= interval {
            self.last = now;
            true
        } else {
            false
        }
    }

    /// Time of the last firing (for tests/debugging).
    #[cfg(test)]
    pub fn last_fired(&self) -> u64 {
        self.last
    }
}
