//! Wall-clock date/time snapshot and field editing.
//!
//! [`DateTime`] is the value the clock collaborator hands out and accepts
//! back. Field editing goes through [`DateField`] with per-field wrap rules;
//! the day of month deliberately wraps at 31 for every month — committing an
//! impossible calendar date is accepted without validation and passed to the
//! RTC as-is.

use core::fmt::Write;

use heapless::String;

/// Day of the week as reported by the clock collaborator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Weekday {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl Weekday {
    /// Three-letter abbreviation for the 16x2 display.
    pub fn abbrev(&self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
            Weekday::Sunday => "Sun",
        }
    }
}

/// Editable field of a [`DateTime`], in menu cycle order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DateField {
    /// Hour (0-23)
    Hour,
    /// Minute (0-59)
    Minute,
    /// Second (0-59)
    Second,
    /// Year (2000-2099)
    Year,
    /// Month (1-12)
    Month,
    /// Day of month (1-31, uniform)
    Day,
}

impl DateField {
    /// Next field in the SEL cycle, wrapping back to the hour.
    pub fn next(self) -> Self {
        match self {
            DateField::Hour => DateField::Minute,
            DateField::Minute => DateField::Second,
            DateField::Second => DateField::Year,
            DateField::Year => DateField::Month,
            DateField::Month => DateField::Day,
            DateField::Day => DateField::Hour,
        }
    }
}

/// Wall-clock date and time.
///
/// Treated as an immutable snapshot per clock-sync tick; editing operates on
/// a scratch copy that is committed back to the clock collaborator in one
/// piece, never partially.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    /// Year (2000-2099 when user-edited)
    pub year: u16,
    /// Month (1-12)
    pub month: u8,
    /// Day of month (1-31)
    pub day: u8,
    /// Day of week
    pub day_of_week: Weekday,
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59)
    pub second: u8,
}

impl Default for DateTime {
    fn default() -> Self {
        Self {
            year: 2000,
            month: 1,
            day: 1,
            day_of_week: Weekday::Saturday,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }
}

impl DateTime {
    /// Seconds elapsed since local midnight. Used by the alarm evaluator so
    /// its tolerance window survives minute and hour boundaries.
    pub fn seconds_of_day(&self) -> u32 {
        u32::from(self.hour) * 3600 + u32::from(self.minute) * 60 + u32::from(self.second)
    }

    /// Increment one field with its wrap rule.
    pub fn increment(&mut self, field: DateField) {
        match field {
            DateField::Hour => self.hour = (self.hour + 1) % 24,
            DateField::Minute => self.minute = (self.minute + 1) % 60,
            DateField::Second => self.second = (self.second + 1) % 60,
            DateField::Year => self.year = if self.year >= 2099 { 2000 } else { self.year + 1 },
            DateField::Month => self.month = if self.month >= 12 { 1 } else { self.month + 1 },
            DateField::Day => self.day = if self.day >= 31 { 1 } else { self.day + 1 },
        }
    }

    /// Decrement one field with its wrap rule.
    pub fn decrement(&mut self, field: DateField) {
        match field {
            DateField::Hour => self.hour = self.hour.checked_sub(1).unwrap_or(23),
            DateField::Minute => self.minute = self.minute.checked_sub(1).unwrap_or(59),
            DateField::Second => self.second = self.second.checked_sub(1).unwrap_or(59),
            DateField::Year => self.year = if self.year <= 2000 { 2099 } else { self.year - 1 },
            DateField::Month => self.month = if self.month <= 1 { 12 } else { self.month - 1 },
            DateField::Day => self.day = if self.day <= 1 { 31 } else { self.day - 1 },
        }
    }

    /// "HH:MM:SS"
    pub fn format_time(&self) -> String<16> {
        let mut s = String::new();
        write!(s, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second).ok();
        s
    }

    /// "HH:MM"
    pub fn format_hm(&self) -> String<16> {
        let mut s = String::new();
        write!(s, "{:02}:{:02}", self.hour, self.minute).ok();
        s
    }

    /// "YYYY-MM-DD"
    pub fn format_date(&self) -> String<16> {
        let mut s = String::new();
        write!(s, "{:04}-{:02}-{:02}", self.year, self.month, self.day).ok();
        s
    }
}
