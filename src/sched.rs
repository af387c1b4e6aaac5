//! Scheduler pass and owned device context.
//!
//! `ClockCore` is the owned device context: every collaborator and every
//! piece of loop state lives in one struct constructed once at startup. One
//! call to [`ClockCore::poll`] is one scheduler pass: the monotonic clock is
//! extended first, then each periodic task runs if due, in a fixed order so
//! that a value produced early in the pass (a fresh button rise, a composed
//! screen) is visible to the tasks after it in the same pass.
//!
//! Task order per pass: buttons, clock sync, motion, charge/battery,
//! speaker, LED, display-compose (FSM), display-write (LCD), alarm
//! evaluation, power-mode transition.

use core::marker::PhantomData;

use crate::alarm::{AlarmBank, AlarmEngine};
use crate::config::ClockConfig;
use crate::datetime::DateTime;
use crate::error::ClockError;
use crate::hal::{Accelerometer, CharLcd, DigitalIo, InputPin, OutputPin, PowerControl, WallClock};
use crate::input::{self, ButtonSnapshot, InputSampler};
use crate::menu::{Menu, MenuState};
use crate::power::{PowerMode, WakeFlag};
use crate::render::{Renderer, Screen, StatusFlags};
use crate::time::{Monotonic, PeriodicTimer};

/// Lifecycle state of the core.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CoreState {
    /// Constructed but not yet activated; `poll()` does nothing
    Inactive,
    /// Normal operation
    Running,
    /// A peripheral failed during activation; `poll()` does nothing
    Fault,
}

/// One last-fired stamp per periodic task, in pass order.
#[derive(Debug, Default)]
struct TaskTimers {
    buttons: PeriodicTimer,
    rtc: PeriodicTimer,
    motion: PeriodicTimer,
    charge: PeriodicTimer,
    speaker: PeriodicTimer,
    led: PeriodicTimer,
    fsm: PeriodicTimer,
    lcd: PeriodicTimer,
    alarm: PeriodicTimer,
}

/// The control core: collaborators plus all loop state, scheduled
/// cooperatively from a single context.
///
/// Generic over:
/// - `'a`: lifetime of the shared wake flag (typically `'static`)
/// - `RTC`: [`WallClock`] implementation
/// - `LCD`: [`CharLcd`] implementation
/// - `MOT`: [`Accelerometer`] implementation
/// - `IO`: [`DigitalIo`] implementation
/// - `PWR`: [`PowerControl`] implementation
/// - `C`: [`ClockConfig`] implementation
pub struct ClockCore<'a, RTC, LCD, MOT, IO, PWR, C>
where
    RTC: WallClock,
    LCD: CharLcd,
    MOT: Accelerometer,
    IO: DigitalIo,
    PWR: PowerControl,
    C: ClockConfig,
{
    rtc: RTC,
    lcd: LCD,
    motion: MOT,
    pins: IO,
    power: PWR,

    /// Wake request written from interrupt context
    wake: &'a WakeFlag,

    state: CoreState,
    mono: Monotonic,
    timers: TaskTimers,

    sampler: InputSampler,
    snapshot: ButtonSnapshot,

    /// Wall-clock snapshot as of the last clock-sync tick
    wall: DateTime,
    charging: bool,
    battery_low: bool,
    shaking: bool,

    menu: Menu,
    alarms: AlarmBank,
    engine: AlarmEngine,

    screen: Screen,
    renderer: Renderer,
    requested: PowerMode,
    mode: PowerMode,

    buzzer_high: bool,
    led_high: bool,

    /// Config type marker (zero-size)
    _config: PhantomData<C>,
}

impl<'a, RTC, LCD, MOT, IO, PWR, C> core::fmt::Debug for ClockCore<'a, RTC, LCD, MOT, IO, PWR, C>
where
    RTC: WallClock,
    LCD: CharLcd,
    MOT: Accelerometer,
    IO: DigitalIo,
    PWR: PowerControl,
    C: ClockConfig,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClockCore")
            .field("state", &self.state)
            .field("now", &self.mono.now())
            .field("menu", &self.menu.state())
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl<'a, RTC, LCD, MOT, IO, PWR, C> ClockCore<'a, RTC, LCD, MOT, IO, PWR, C>
where
    RTC: WallClock,
    LCD: CharLcd,
    MOT: Accelerometer,
    IO: DigitalIo,
    PWR: PowerControl,
    C: ClockConfig,
{
    /// Create an inactive core. Call [`activate`](Self::activate) before
    /// polling.
    pub fn new(rtc: RTC, lcd: LCD, motion: MOT, pins: IO, power: PWR, wake: &'a WakeFlag) -> Self {
        Self {
            rtc,
            lcd,
            motion,
            pins,
            power,
            wake,
            state: CoreState::Inactive,
            mono: Monotonic::new(),
            timers: TaskTimers::default(),
            sampler: InputSampler::new(),
            snapshot: ButtonSnapshot::default(),
            wall: DateTime::default(),
            charging: false,
            battery_low: false,
            shaking: false,
            menu: Menu::new(),
            alarms: AlarmBank::seeded(0, 0),
            engine: AlarmEngine::new(),
            screen: Screen::default(),
            renderer: Renderer::new(),
            requested: PowerMode::Active,
            mode: PowerMode::Active,
            buzzer_high: false,
            led_high: false,
            _config: PhantomData,
        }
    }

    /// Boot the core: take the first wall-clock snapshot, seed the alarm
    /// roster (every slot at the current time, disabled), and light the
    /// display.
    ///
    /// A failing clock collaborator leaves the core in [`CoreState::Fault`]
    /// with a fault message on the display instead of silently running on
    /// garbage time.
    pub fn activate(&mut self) -> Result<(), ClockError> {
        let wall = match self.rtc.now() {
            Ok(t) => t,
            Err(_) => {
                self.state = CoreState::Fault;
                self.show_boot_fault();
                return Err(ClockError::ClockFault);
            }
        };
        self.wall = wall;
        self.alarms = AlarmBank::seeded(wall.hour, wall.minute);

        // Full idle window before the first dim
        self.sampler.extend_idle(C::BACKLIGHT_TIMEOUT_MS);

        self.lcd
            .set_backlight(true)
            .map_err(|_| ClockError::DisplayFault)?;
        self.lcd
            .set_cursor_visible(false)
            .map_err(|_| ClockError::DisplayFault)?;

        self.state = CoreState::Running;
        #[cfg(feature = "defmt")]
        defmt::debug!("core activated at {=u8:02}:{=u8:02}", wall.hour, wall.minute);
        Ok(())
    }

    /// Best-effort fault message; the display may itself be the broken part.
    fn show_boot_fault(&mut self) {
        let _ = self.lcd.set_backlight(true);
        let _ = self.lcd.set_cursor(0, 0);
        let _ = self.lcd.write_text("CLOCK FAULT     ");
    }

    /// Run one scheduler pass against the latest raw 32-bit millisecond
    /// counter value. No-op unless the core is running.
    pub fn poll(&mut self, raw_ticks: u32) -> Result<(), ClockError> {
        if self.state != CoreState::Running {
            return Ok(());
        }

        // Extend the monotonic clock before any timer check
        let now = self.mono.update(raw_ticks);

        // Wake request from interrupt context, consumed once per pass
        if self.wake.take() {
            self.sampler.extend_idle(now + C::BACKLIGHT_TIMEOUT_MS);
            self.requested = PowerMode::Active;
        }

        // Buttons: sample levels, derive rises, push the idle deadline
        if self.timers.buttons.poll(now, C::BUTTON_POLL_MS) {
            self.snapshot = self
                .sampler
                .sample(&mut self.pins, now, C::BACKLIGHT_TIMEOUT_MS);
        }

        // Clock sync: refresh the wall-clock snapshot
        if self.timers.rtc.poll(now, C::RTC_POLL_MS) {
            self.wall = self.rtc.now().map_err(|_| ClockError::ClockFault)?;
        }

        // Motion: per-tick shake decision, no smoothing
        if self.timers.motion.poll(now, C::MOTION_POLL_MS) {
            let sample = self.motion.read_axes().map_err(|_| ClockError::MotionFault)?;
            self.shaking = input::is_shaking(&sample, C::SHAKE_THRESHOLD);
        }

        // Charge / battery senses (both active low)
        if self.timers.charge.poll(now, C::CHARGE_POLL_MS) {
            self.charging = !self.pins.read(InputPin::ChargeDetect);
            self.battery_low = !self.pins.read(InputPin::BatteryLow);
        }

        // Speaker: pulse train while ringing, held low otherwise
        if self.timers.speaker.poll(now, C::SPEAKER_MS) {
            self.buzzer_high = self.engine.is_ringing() && !self.buzzer_high;
            self.pins.write(OutputPin::Buzzer, self.buzzer_high);
        }

        // Status LED: flashes in time with the ring
        if self.timers.led.poll(now, C::LED_MS) {
            self.led_high = self.engine.is_ringing() && !self.led_high;
            self.pins.write(OutputPin::StatusLed, self.led_high);
        }

        // Display compose: the menu consumes this pass's button edges
        if self.timers.fsm.poll(now, C::FSM_MS) {
            if let Some(adjusted) =
                self.menu
                    .handle(now, &self.snapshot, &self.wall, &mut self.alarms, C::REPEAT_DELAY_MS)
            {
                self.rtc.adjust(&adjusted).map_err(|_| ClockError::ClockFault)?;
                self.wall = adjusted;
            }
            let status = StatusFlags {
                charging: self.charging,
                ringing: self.engine.is_ringing(),
                snoozed: self.engine.is_snoozed(),
                battery_low: self.battery_low,
            };
            self.screen = self.menu.compose(&self.wall, &self.alarms, status);
        }

        // Display write: physical flush plus backlight/standby decision
        if self.timers.lcd.poll(now, C::LCD_WRITE_MS) {
            self.requested = self
                .renderer
                .flush(&mut self.lcd, &self.screen, now, self.sampler.idle_deadline())
                .map_err(|_| ClockError::DisplayFault)?;
        }

        // Alarm evaluation
        if self.timers.alarm.poll(now, C::ALARM_EVAL_MS) {
            self.engine.tick(
                now,
                &self.wall,
                &self.alarms,
                self.charging,
                self.shaking,
                C::SNOOZE_MS,
            );
        }

        // Power-mode transition, last so it sees this pass's request
        if self.requested != self.mode {
            match self.requested {
                PowerMode::Standby => self.power.enter_standby(),
                PowerMode::Active => self.power.exit_standby(),
            }
            #[cfg(feature = "defmt")]
            defmt::debug!("power mode -> {}", self.requested);
            self.mode = self.requested;
        }

        Ok(())
    }

    /// Lifecycle state.
    pub fn state(&self) -> CoreState {
        self.state
    }

    /// Active menu state.
    pub fn menu_state(&self) -> MenuState {
        self.menu.state()
    }

    /// Wall-clock snapshot as of the last clock-sync tick.
    pub fn wall(&self) -> &DateTime {
        &self.wall
    }

    /// The alarm roster.
    pub fn alarms(&self) -> &AlarmBank {
        &self.alarms
    }

    /// Whether the buzzer should currently be pulsing.
    pub fn is_ringing(&self) -> bool {
        self.engine.is_ringing()
    }

    /// Index of the armed alarm slot, if any.
    pub fn armed_alarm(&self) -> Option<usize> {
        self.engine.armed_index()
    }

    /// Whether a shake snooze is counting down.
    pub fn is_snoozed(&self) -> bool {
        self.engine.is_snoozed()
    }

    /// Current operating mode as applied by the last pass.
    pub fn power_mode(&self) -> PowerMode {
        self.mode
    }

    /// Most recently composed screen.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    // ========================================
    // Test-only accessors
    // ========================================

    /// Mutable roster access (test-only; normal mutation goes through the
    /// menu).
    #[doc(hidden)]
    pub fn __test_alarms_mut(&mut self) -> &mut AlarmBank {
        &mut self.alarms
    }
}
