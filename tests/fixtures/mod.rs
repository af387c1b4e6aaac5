//! Test fixtures for the control core.
//!
//! Provides mock implementations of every collaborator trait. Each mock
//! shares its state through `Rc` handles so a test can mutate inputs (wall
//! clock, pin levels, acceleration) and observe outputs (LCD model, power
//! transitions, clock adjustments) while the core owns the mock itself.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use nightstand::{
    Accelerometer, AxisSample, CharLcd, DateTime, DigitalIo, InputPin, OutputPin, PowerControl,
    PowerMode, WallClock, Weekday,
};

/// A plausible boot time used by most tests.
pub fn boot_time() -> DateTime {
    DateTime {
        year: 2026,
        month: 8,
        day: 6,
        day_of_week: Weekday::Thursday,
        hour: 12,
        minute: 34,
        second: 56,
    }
}

// ============================================================================
// MockRtc - Wall Clock
// ============================================================================

/// Mock wall clock backed by a shared, test-settable time.
pub struct MockRtc {
    pub time: Rc<RefCell<DateTime>>,
    pub fail_reads: Rc<Cell<bool>>,
    pub adjustments: Rc<RefCell<Vec<DateTime>>>,
}

impl MockRtc {
    pub fn new(initial: DateTime) -> Self {
        Self {
            time: Rc::new(RefCell::new(initial)),
            fail_reads: Rc::new(Cell::new(false)),
            adjustments: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl WallClock for MockRtc {
    type Error = ();

    fn now(&mut self) -> Result<DateTime, ()> {
        if self.fail_reads.get() {
            return Err(());
        }
        Ok(*self.time.borrow())
    }

    fn adjust(&mut self, time: &DateTime) -> Result<(), ()> {
        self.adjustments.borrow_mut().push(*time);
        *self.time.borrow_mut() = *time;
        Ok(())
    }
}

// ============================================================================
// MockLcd - 16x2 Character Display
// ============================================================================

/// In-memory model of the 16x2 display.
#[derive(Debug)]
pub struct LcdModel {
    pub cells: [[char; 16]; 2],
    pub cursor: (u8, u8),
    pub backlight: bool,
    pub cursor_visible: bool,
    /// Number of `write_text` calls observed
    pub writes: u32,
}

impl Default for LcdModel {
    fn default() -> Self {
        Self {
            cells: [[' '; 16]; 2],
            cursor: (0, 0),
            backlight: false,
            cursor_visible: false,
            writes: 0,
        }
    }
}

impl LcdModel {
    /// One display row as a string.
    pub fn line(&self, row: usize) -> String {
        self.cells[row].iter().collect()
    }
}

pub struct MockLcd {
    pub model: Rc<RefCell<LcdModel>>,
}

impl MockLcd {
    pub fn new() -> Self {
        Self {
            model: Rc::new(RefCell::new(LcdModel::default())),
        }
    }
}

impl CharLcd for MockLcd {
    type Error = ();

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), ()> {
        self.model.borrow_mut().cursor = (col, row);
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), ()> {
        let mut model = self.model.borrow_mut();
        model.writes += 1;
        let (mut col, row) = model.cursor;
        for c in text.chars() {
            if usize::from(col) >= 16 || usize::from(row) >= 2 {
                break;
            }
            model.cells[usize::from(row)][usize::from(col)] = c;
            col += 1;
        }
        model.cursor = (col, row);
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), ()> {
        self.model.borrow_mut().backlight = on;
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<(), ()> {
        self.model.borrow_mut().cursor_visible = visible;
        Ok(())
    }
}

// ============================================================================
// MockMotion - Accelerometer
// ============================================================================

/// Mock accelerometer; tests drive the X axis to simulate shaking.
pub struct MockMotion {
    pub x: Rc<Cell<i16>>,
}

impl MockMotion {
    pub fn new() -> Self {
        Self {
            x: Rc::new(Cell::new(0)),
        }
    }
}

impl Accelerometer for MockMotion {
    type Error = ();

    fn read_axes(&mut self) -> Result<AxisSample, ()> {
        Ok(AxisSample {
            x: self.x.get(),
            y: 0,
            z: -16_384,
        })
    }
}

// ============================================================================
// MockPins - Digital I/O
// ============================================================================

/// Shared pin board: button levels, sense inputs and captured outputs.
#[derive(Debug, Default)]
pub struct PinBoard {
    pub plus: bool,
    pub minus: bool,
    pub select: bool,
    pub set: bool,
    /// Logical charge state; the sense pin itself is active low
    pub charge_present: bool,
    /// Logical battery-low state; the sense pin itself is active low
    pub battery_low: bool,
    pub buzzer: bool,
    pub led: bool,
    /// Rising buzzer edges observed (pulse count)
    pub buzzer_pulses: u32,
}

pub struct MockPins {
    pub board: Rc<RefCell<PinBoard>>,
}

impl MockPins {
    pub fn new() -> Self {
        Self {
            board: Rc::new(RefCell::new(PinBoard::default())),
        }
    }
}

impl DigitalIo for MockPins {
    fn read(&mut self, pin: InputPin) -> bool {
        let board = self.board.borrow();
        match pin {
            InputPin::Plus => board.plus,
            InputPin::Minus => board.minus,
            InputPin::Select => board.select,
            InputPin::Set => board.set,
            InputPin::ChargeDetect => !board.charge_present,
            InputPin::BatteryLow => !board.battery_low,
        }
    }

    fn write(&mut self, pin: OutputPin, high: bool) {
        let mut board = self.board.borrow_mut();
        match pin {
            OutputPin::Buzzer => {
                if high && !board.buzzer {
                    board.buzzer_pulses += 1;
                }
                board.buzzer = high;
            }
            OutputPin::StatusLed => board.led = high,
        }
    }
}

// ============================================================================
// MockPower - Low-Power Controller
// ============================================================================

/// Mock power controller recording every mode transition.
pub struct MockPower {
    pub log: Rc<RefCell<Vec<PowerMode>>>,
}

impl MockPower {
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl PowerControl for MockPower {
    fn enter_standby(&mut self) {
        self.log.borrow_mut().push(PowerMode::Standby);
    }

    fn exit_standby(&mut self) {
        self.log.borrow_mut().push(PowerMode::Active);
    }
}
