//! Menu and alarm-editing state machine.
//!
//! The central finite-state machine of the firmware: it interprets button
//! edges as navigation/edit commands, holds the scratch copies of whatever
//! the user is editing, and composes the two display lines for the active
//! state. Persistent state (the RTC, an alarm slot) is only written on an
//! explicit SET commit; leaving an edit state any other way discards the
//! scratch copy.

use crate::alarm::{Alarm, AlarmBank};
use crate::datetime::{DateField, DateTime};
use crate::input::{Button, ButtonSnapshot};
use crate::render::{LineBuf, Screen, StatusFlags};

pub mod edit;

pub use edit::{AlarmField, RepeatGate};

/// Active menu state.
///
/// The six date-field edit screens share one parameterized state, as do the
/// two alarm-field edit screens, keyed by the field under the cursor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuState {
    /// Live wall-clock time and date
    DateView,
    /// Editing one field of the scratch wall-clock time
    DateEdit(DateField),
    /// Browsing the alarm roster
    AlarmList,
    /// Editing one field of the scratch alarm time
    AlarmEdit(AlarmField),
}

/// Menu state machine and scratch buffers.
#[derive(Debug)]
pub struct Menu {
    state: MenuState,
    /// Scratch wall-clock copy while in a date-edit state
    time_tmp: DateTime,
    /// Scratch alarm copy while in an alarm-edit state
    alarm_tmp: Alarm,
    /// Alarm slot the list view points at
    selected: usize,
    gate: RepeatGate,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl Menu {
    /// Create a menu showing the date view.
    pub fn new() -> Self {
        Self {
            state: MenuState::DateView,
            time_tmp: DateTime::default(),
            alarm_tmp: Alarm::disabled_at(0, 0),
            selected: 0,
            gate: RepeatGate::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Alarm slot index the list view points at.
    pub fn selected_alarm(&self) -> usize {
        self.selected
    }

    /// Consume one tick's button snapshot.
    ///
    /// Returns the scratch time to commit to the clock collaborator when a
    /// SET rise closes a date edit; all other effects (alarm toggles, alarm
    /// time commits, navigation) are applied in place.
    pub fn handle(
        &mut self,
        now: u64,
        input: &ButtonSnapshot,
        live: &DateTime,
        alarms: &mut AlarmBank,
        repeat_delay_ms: u64,
    ) -> Option<DateTime> {
        match self.state {
            MenuState::DateView => {
                if input.rise(Button::Set) {
                    self.time_tmp = *live;
                    self.gate.reset();
                    self.state = MenuState::DateEdit(DateField::Hour);
                } else if input.rise(Button::Select) {
                    self.state = MenuState::AlarmList;
                }
                None
            }

            MenuState::DateEdit(field) => {
                self.step_scratch_time(now, input, field, repeat_delay_ms);

                if input.rise(Button::Set) {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("clock adjust committed");
                    self.state = MenuState::DateView;
                    Some(self.time_tmp)
                } else {
                    if input.rise(Button::Select) {
                        self.state = MenuState::DateEdit(field.next());
                    }
                    None
                }
            }

            MenuState::AlarmList => {
                if input.rise(Button::Plus) {
                    self.selected = (self.selected + 1) % alarms.len();
                }
                if input.rise(Button::Minus) {
                    alarms.toggle(self.selected);
                }
                if input.rise(Button::Set) {
                    self.alarm_tmp = *alarms.get(self.selected);
                    self.gate.reset();
                    self.state = MenuState::AlarmEdit(AlarmField::Hour);
                } else if input.rise(Button::Select) {
                    self.state = MenuState::DateView;
                }
                None
            }

            MenuState::AlarmEdit(field) => {
                self.step_scratch_alarm(now, input, field, repeat_delay_ms);

                if input.rise(Button::Set) {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("alarm {} time committed", self.selected);
                    alarms.set_time(self.selected, self.alarm_tmp.hour, self.alarm_tmp.minute);
                    self.state = MenuState::AlarmList;
                } else if input.rise(Button::Select) {
                    self.state = MenuState::AlarmEdit(field.next());
                }
                None
            }
        }
    }

    /// Apply a gated PLUS/MINUS step to the scratch wall-clock time.
    fn step_scratch_time(
        &mut self,
        now: u64,
        input: &ButtonSnapshot,
        field: DateField,
        repeat_delay_ms: u64,
    ) {
        if self.gate.fire(
            now,
            input.rise(Button::Plus),
            input.held(Button::Plus),
            repeat_delay_ms,
        ) {
            self.time_tmp.increment(field);
        } else if self.gate.fire(
            now,
            input.rise(Button::Minus),
            input.held(Button::Minus),
            repeat_delay_ms,
        ) {
            self.time_tmp.decrement(field);
        }
    }

    /// Apply a gated PLUS/MINUS step to the scratch alarm time.
    fn step_scratch_alarm(
        &mut self,
        now: u64,
        input: &ButtonSnapshot,
        field: AlarmField,
        repeat_delay_ms: u64,
    ) {
        let plus = self.gate.fire(
            now,
            input.rise(Button::Plus),
            input.held(Button::Plus),
            repeat_delay_ms,
        );
        let minus = !plus
            && self.gate.fire(
                now,
                input.rise(Button::Minus),
                input.held(Button::Minus),
                repeat_delay_ms,
            );

        match field {
            AlarmField::Hour => {
                if plus {
                    self.alarm_tmp.hour = (self.alarm_tmp.hour + 1) % 24;
                } else if minus {
                    self.alarm_tmp.hour = self.alarm_tmp.hour.checked_sub(1).unwrap_or(23);
                }
            }
            AlarmField::Minute => {
                if plus {
                    self.alarm_tmp.minute = (self.alarm_tmp.minute + 1) % 60;
                } else if minus {
                    self.alarm_tmp.minute = self.alarm_tmp.minute.checked_sub(1).unwrap_or(59);
                }
            }
        }
    }

    /// Compose the two display lines for the active state.
    ///
    /// Pure function of state plus the passed-in data; called every FSM tick
    /// regardless of whether anything changed.
    pub fn compose(&self, live: &DateTime, alarms: &AlarmBank, status: StatusFlags) -> Screen {
        match self.state {
            MenuState::DateView => Screen::compose(
                LineBuf::new()
                    .push(live.format_time().as_str())
                    .push_right(status.marker()),
                LineBuf::new()
                    .push(live.format_date().as_str())
                    .push(" ")
                    .push(live.day_of_week.abbrev()),
                None,
            ),

            MenuState::DateEdit(field) => Screen::compose(
                LineBuf::new().push(self.time_tmp.format_time().as_str()),
                LineBuf::new().push(self.time_tmp.format_date().as_str()),
                Some(edit::date_cursor(field)),
            ),

            MenuState::AlarmList => {
                let alarm = alarms.get(self.selected);
                Screen::compose(
                    LineBuf::new().push_fmt(format_args!(
                        "ALARM {}/{}",
                        self.selected + 1,
                        alarms.len()
                    )),
                    LineBuf::new()
                        .push_fmt(format_args!("{:02}:{:02}", alarm.hour, alarm.minute))
                        .push_right(if alarm.enabled { "ON" } else { "OFF" }),
                    None,
                )
            }

            MenuState::AlarmEdit(field) => Screen::compose(
                LineBuf::new().push_fmt(format_args!("ALARM {} SET", self.selected + 1)),
                LineBuf::new().push_fmt(format_args!(
                    "{:02}:{:02}",
                    self.alarm_tmp.hour, self.alarm_tmp.minute
                )),
                Some(edit::alarm_cursor(field)),
            ),
        }
    }
}
