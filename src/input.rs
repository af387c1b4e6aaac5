//! Button, charge-pin and shake sampling.
//!
//! Edge detection is shift-and-sample: each tick moves the current level
//! into `previous` and reads the pin fresh. A rise is a pure function of the
//! two most recent samples and is never persisted beyond the tick that
//! derived it — consumers must run in the same scheduler pass.

use crate::hal::{AxisSample, DigitalIo, InputPin};

/// The four user buttons.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Increment / cycle up
    Plus,
    /// Decrement / toggle
    Minus,
    /// Field / view select
    Select,
    /// Enter edit / commit
    Set,
}

impl Button {
    /// All buttons in sampling order.
    pub const ALL: [Button; 4] = [Button::Plus, Button::Minus, Button::Select, Button::Set];

    fn index(self) -> usize {
        match self {
            Button::Plus => 0,
            Button::Minus => 1,
            Button::Select => 2,
            Button::Set => 3,
        }
    }

    fn pin(self) -> InputPin {
        match self {
            Button::Plus => InputPin::Plus,
            Button::Minus => InputPin::Minus,
            Button::Select => InputPin::Select,
            Button::Set => InputPin::Set,
        }
    }
}

/// Two-sample level memory for one button.
#[derive(Debug, Copy, Clone, Default)]
struct ButtonState {
    current: bool,
    previous: bool,
}

impl ButtonState {
    fn sample(&mut self, level: bool) {
        self.previous = self.current;
        self.current = level;
    }

    fn rise(&self) -> bool {
        self.current && !self.previous
    }
}

/// Levels and edges of all four buttons as of one sampling tick.
#[derive(Debug, Copy, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSnapshot {
    pressed: [bool; 4],
    rose: [bool; 4],
}

impl ButtonSnapshot {
    /// True on the one tick immediately after a 0->1 transition.
    pub fn rise(&self, button: Button) -> bool {
        self.rose[button.index()]
    }

    /// True while the button level reads pressed, independent of edges.
    pub fn held(&self, button: Button) -> bool {
        self.pressed[button.index()]
    }

    /// True if any button level reads pressed.
    pub fn any_pressed(&self) -> bool {
        self.pressed.iter().any(|&p| p)
    }

    /// Construct a snapshot by hand (test support). A rising button is also
    /// pressed; `held` lists buttons pressed without a fresh edge.
    #[doc(hidden)]
    pub fn synthetic(rose: &[Button], held: &[Button]) -> Self {
        let mut snapshot = Self::default();
        for &button in held {
            snapshot.pressed[button.index()] = true;
        }
        for &button in rose {
            snapshot.pressed[button.index()] = true;
            snapshot.rose[button.index()] = true;
        }
        snapshot
    }
}

/// Debounced, edge-detecting sampler for the four buttons, plus the
/// idle-timeout deadline used for backlight dimming.
#[derive(Debug, Default)]
pub struct InputSampler {
    buttons: [ButtonState; 4],
    idle_until: u64,
}

impl InputSampler {
    /// Create a sampler with all buttons released and the idle deadline due.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample all button pins and derive the tick's snapshot.
    ///
    /// Any pressed level (not just a rise) pushes the idle deadline to
    /// `now + timeout_ms`.
    pub fn sample<IO: DigitalIo>(
        &mut self,
        io: &mut IO,
        now: u64,
        timeout_ms: u64,
    ) -> ButtonSnapshot {
        let mut snapshot = ButtonSnapshot::default();
        for button in Button::ALL {
            let state = &mut self.buttons[button.index()];
            state.sample(io.read(button.pin()));
            snapshot.pressed[button.index()] = state.current;
            snapshot.rose[button.index()] = state.rise();
        }
        if snapshot.any_pressed() {
            self.idle_until = now + timeout_ms;
        }
        snapshot
    }

    /// Monotonic instant after which the display may dim.
    pub fn idle_deadline(&self) -> u64 {
        self.idle_until
    }

    /// Push the idle deadline forward without a button press (wake-from-
    /// standby path).
    pub fn extend_idle(&mut self, deadline: u64) {
        if deadline > self.idle_until {
            self.idle_until = deadline;
        }
    }
}

/// Per-tick shake decision: one axis thresholded against a fixed constant,
/// no hysteresis or smoothing.
pub fn is_shaking(sample: &AxisSample, threshold: u16) -> bool {
    sample.x.unsigned_abs() >= threshold
}
