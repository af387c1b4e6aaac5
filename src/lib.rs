//! # nightstand
//!
//! Control core for a battery-powered bedside alarm clock.
//!
//! **Key features:**
//! - **Single-threaded polling loop** - cooperative scheduler, no blocking calls
//! - **64-bit monotonic time** - extended from a wrapping 32-bit hardware tick
//! - **Four-button menu machine** - date/time and alarm editing with auto-repeat
//! - **Alarm policies** - shake-to-snooze, dock-to-dismiss, five-slot roster
//! - **Platform-agnostic** - every peripheral behind a narrow collaborator trait
//!
//! The platform integration owns the hardware: it implements the traits in
//! [`hal`], constructs a [`ClockCore`], calls
//! [`activate()`](sched::ClockCore::activate) once, then calls
//! [`poll()`](sched::ClockCore::poll) with the raw millisecond counter from
//! its main loop. A button-edge interrupt used for wake-from-standby sets the
//! shared [`WakeFlag`] and nothing else.
//!
//! ## Optional Features
//!
//! - `defmt` - logging and `defmt::Format` derives on public types
//!
//! This library is `no_std` compatible and allocation-free.

#![no_std]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

extern crate heapless;

// ============================================================================
// Module Declarations
// ============================================================================

// Platform seams
pub mod config;
pub mod hal;

// Error handling
pub mod error;

// Time base and wall-clock model
pub mod datetime;
pub mod time;

// Input sampling and shake detection
pub mod input;

// Alarm roster and policies
pub mod alarm;

// Menu / editing state machine
pub mod menu;

// Display composition and write task
pub mod render;

// Power mode and wake flag
pub mod power;

// Scheduler orchestration
pub mod sched;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Configuration
pub use config::{ClockConfig, DefaultConfig, FastConfig};

// Error types
pub use error::ClockError;

// Collaborator traits
pub use hal::{Accelerometer, AxisSample, CharLcd, DigitalIo, InputPin, OutputPin, PowerControl, WallClock};

// Time types
pub use datetime::{DateField, DateTime, Weekday};
pub use time::{Monotonic, PeriodicTimer};

// Input types
pub use input::{Button, ButtonSnapshot, InputSampler};

// Alarm types
pub use alarm::{ALARM_SLOTS, Alarm, AlarmBank, AlarmEngine};

// Menu types
pub use menu::{AlarmField, Menu, MenuState};

// Display types
pub use render::{Cursor, Screen, StatusFlags};

// Power types
pub use power::{PowerMode, WakeFlag};

// Core orchestration
pub use sched::{ClockCore, CoreState};

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
