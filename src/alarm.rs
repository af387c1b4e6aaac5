//! Alarm roster and the ring/snooze/dismiss state machine.
//!
//! The roster is a fixed bank of five slots toggled on and off, never
//! removed. Runtime state lives in [`AlarmEngine`]: at most one alarm is
//! armed at a time, shaking the unit snoozes the ring for a fixed delay, and
//! docking on the charging pad is the dismissal gesture.

use crate::datetime::DateTime;

/// Number of alarm slots in the bank.
pub const ALARM_SLOTS: usize = 5;

/// Seconds past the alarm instant that still count as a match. The
/// evaluator runs coarser than the clock's second resolution and must not
/// slip past the matching instant.
const MATCH_SLACK_S: u32 = 2;

/// One alarm slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Alarm {
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59); not user-editable, defaults to 0
    pub second: u8,
    /// Whether the slot participates in evaluation
    pub enabled: bool,
}

impl Alarm {
    /// Create a disabled alarm at the given time.
    pub const fn disabled_at(hour: u8, minute: u8) -> Self {
        Self {
            hour,
            minute,
            second: 0,
            enabled: false,
        }
    }

    /// Alarm instant as seconds since midnight.
    fn seconds_of_day(&self) -> u32 {
        u32::from(self.hour) * 3600 + u32::from(self.minute) * 60 + u32::from(self.second)
    }

    /// Whether `wall` falls inside this alarm's match window.
    ///
    /// Computed on seconds-of-day modulo one day, so the +2 s slack survives
    /// the minute (and hour) wrap at the alarm instant.
    pub fn matches(&self, wall: &DateTime) -> bool {
        if !self.enabled {
            return false;
        }
        let elapsed = (wall.seconds_of_day() + 86_400 - self.seconds_of_day()) % 86_400;
        elapsed <= MATCH_SLACK_S
    }
}

/// Fixed bank of alarm slots with stable indices.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmBank {
    slots: [Alarm; ALARM_SLOTS],
}

impl Default for AlarmBank {
    fn default() -> Self {
        Self::seeded(0, 0)
    }
}

impl AlarmBank {
    /// Create a bank with every slot disabled at the given time (boot
    /// default: the current wall-clock hour and minute).
    pub const fn seeded(hour: u8, minute: u8) -> Self {
        Self {
            slots: [Alarm::disabled_at(hour, minute); ALARM_SLOTS],
        }
    }

    /// Number of slots (fixed).
    pub const fn len(&self) -> usize {
        ALARM_SLOTS
    }

    /// Always false; the bank has fixed capacity.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Slot at `index`.
    pub fn get(&self, index: usize) -> &Alarm {
        &self.slots[index]
    }

    /// Flip a slot's enabled flag.
    pub fn toggle(&mut self, index: usize) {
        self.slots[index].enabled = !self.slots[index].enabled;
    }

    /// Overwrite a slot's hour and minute, keeping its enabled flag.
    pub fn set_time(&mut self, index: usize, hour: u8, minute: u8) {
        self.slots[index].hour = hour;
        self.slots[index].minute = minute;
    }

    /// Iterate the slots in index order.
    pub fn iter(&self) -> core::slice::Iter<'_, Alarm> {
        self.slots.iter()
    }
}

/// Runtime alarm state, mutated solely by the evaluator tick.
#[derive(Debug, Default)]
pub struct AlarmEngine {
    armed: Option<usize>,
    ringing: bool,
    rearm_at: Option<u64>,
}

impl AlarmEngine {
    /// Create an idle engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the armed alarm, if any.
    pub fn armed_index(&self) -> Option<usize> {
        self.armed
    }

    /// Whether the buzzer should currently be pulsing.
    pub fn is_ringing(&self) -> bool {
        self.ringing
    }

    /// Whether a shake snooze is counting down.
    pub fn is_snoozed(&self) -> bool {
        self.rearm_at.is_some()
    }

    /// One evaluation tick.
    ///
    /// Order matters: charging dismisses everything before any other rule;
    /// an expired snooze resumes ringing before a fresh shake is considered;
    /// a new match is only taken while nothing is armed.
    pub fn tick(
        &mut self,
        now: u64,
        wall: &DateTime,
        bank: &AlarmBank,
        charging: bool,
        shaking: bool,
        snooze_ms: u64,
    ) {
        if charging {
            if self.armed.is_some() {
                #[cfg(feature = "defmt")]
                defmt::debug!("alarm dismissed by charge dock");
                self.armed = None;
                self.ringing = false;
                self.rearm_at = None;
            }
            return;
        }

        if let Some(deadline) = self.rearm_at
            && now >= deadline
        {
            #[cfg(feature = "defmt")]
            defmt::debug!("snooze elapsed, ringing resumes");
            self.rearm_at = None;
            self.ringing = true;
        }

        if self.ringing && self.rearm_at.is_none() && shaking {
            #[cfg(feature = "defmt")]
            defmt::debug!("shake detected, snoozing");
            self.ringing = false;
            self.rearm_at = Some(now + snooze_ms);
            return;
        }

        if self.armed.is_none() {
            for (index, alarm) in bank.iter().enumerate() {
                if alarm.matches(wall) {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("alarm {} armed", index);
                    self.armed = Some(index);
                    self.ringing = true;
                    self.rearm_at = None;
                    break;
                }
            }
        }
    }
}
