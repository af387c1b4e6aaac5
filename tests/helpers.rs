//! Shared test helpers to reduce duplication across integration tests.

#![allow(dead_code)]

#[allow(clippy::duplicate_mod)]
#[path = "fixtures/mod.rs"]
pub mod fixtures;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use fixtures::{LcdModel, MockLcd, MockMotion, MockPins, MockPower, MockRtc, PinBoard, boot_time};
use nightstand::{ClockCore, DateTime, FastConfig, PowerMode, WakeFlag};

/// Fully wired core plus handles to every mock's shared state.
///
/// Tests drive `now` (the raw 32-bit tick) through [`Rig::advance`] and
/// manipulate inputs through the handles; the core owns the mocks.
pub struct Rig {
    pub core: ClockCore<'static, MockRtc, MockLcd, MockMotion, MockPins, MockPower, FastConfig>,
    pub wake: &'static WakeFlag,
    pub time: Rc<RefCell<DateTime>>,
    pub adjustments: Rc<RefCell<Vec<DateTime>>>,
    pub lcd: Rc<RefCell<LcdModel>>,
    pub x_axis: Rc<Cell<i16>>,
    pub pins: Rc<RefCell<PinBoard>>,
    pub power_log: Rc<RefCell<Vec<PowerMode>>>,
    /// Raw tick value fed to the next pass
    pub now: u32,
}

/// Create and activate a rig booted at [`fixtures::boot_time`].
pub fn create_rig() -> Rig {
    create_rig_at(boot_time())
}

/// Create and activate a rig booted at the given wall-clock time.
pub fn create_rig_at(initial: DateTime) -> Rig {
    let rtc = MockRtc::new(initial);
    let lcd = MockLcd::new();
    let motion = MockMotion::new();
    let io = MockPins::new();
    let power = MockPower::new();
    let wake: &'static WakeFlag = Box::leak(Box::new(WakeFlag::new()));

    let time = rtc.time.clone();
    let adjustments = rtc.adjustments.clone();
    let lcd_model = lcd.model.clone();
    let x_axis = motion.x.clone();
    let pins = io.board.clone();
    let power_log = power.log.clone();

    let mut core = ClockCore::new(rtc, lcd, motion, io, power, wake);
    core.activate().expect("activation with healthy mocks");

    Rig {
        core,
        wake,
        time,
        adjustments,
        lcd: lcd_model,
        x_axis,
        pins,
        power_log,
        now: 0,
    }
}

impl Rig {
    /// Run the loop for `ms` milliseconds in (at most) 5 ms passes.
    pub fn advance(&mut self, ms: u32) {
        let mut remaining = ms;
        while remaining > 0 {
            let step = remaining.min(5);
            self.now = self.now.wrapping_add(step);
            remaining -= step;
            self.core.poll(self.now).expect("poll with healthy mocks");
        }
    }

    /// Set the mock wall clock (picked up on the next clock-sync tick).
    pub fn set_wall(&self, hour: u8, minute: u8, second: u8) {
        let mut time = self.time.borrow_mut();
        time.hour = hour;
        time.minute = minute;
        time.second = second;
    }

    /// Press or release one button level.
    pub fn set_button(&self, name: &str, pressed: bool) {
        let mut board = self.pins.borrow_mut();
        match name {
            "plus" => board.plus = pressed,
            "minus" => board.minus = pressed,
            "select" => board.select = pressed,
            "set" => board.set = pressed,
            other => panic!("unknown button {other}"),
        }
    }

    /// Press a button for one sampling window, then release and settle.
    pub fn tap(&mut self, name: &str) {
        self.set_button(name, true);
        self.advance(40);
        self.set_button(name, false);
        self.advance(40);
    }

    /// Dock on or off the charging pad.
    pub fn set_charging(&self, charging: bool) {
        self.pins.borrow_mut().charge_present = charging;
    }

    /// Start or stop shaking the unit.
    pub fn set_shaking(&self, shaking: bool) {
        self.x_axis.set(if shaking { 20_000 } else { 0 });
    }

    /// One display row as written to the mock LCD.
    pub fn line(&self, row: usize) -> String {
        self.lcd.borrow().line(row)
    }
}
