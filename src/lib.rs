#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`AnimationSequencer`**: Runs the falling, fading and silent phases forever
//! - **`DutyModulator`**: Software PWM on one on/off output, polled at a calibrated period
//! - **`FadeRamp`**: Duty cycle schedule for the fade, 255 down to 0
//! - **`AnimationConfig`**: Build-time durations and the calibrated update period
//! - **`LedStrip`**: Fixed-size ordered set of LED outputs; the last one is the fade target
//! - **`StripLayout`**: Validated pin wiring that resolves [`PinId`]s through a [`PinBank`]
//! - **`LedOutput`**: Trait to implement for your LED line
//! - **`BusyWait`**: Trait to implement for your delay source
//! - **`PowerManager`**: Trait to implement for your low-power sleep
//!
//! LED lines are logical: `set(true)` lights the LED whatever the wiring.
//! The default [`Polarity`] is open-drain, where low is on.

#[macro_use]
mod fmt;

pub mod bank;
pub mod config;
pub mod fade;
pub mod hal;
pub mod pin;
pub mod power;
pub mod pwm;
pub mod sequencer;
pub mod strip;
pub mod time;

pub use bank::{BankPin, PinBank, PinId, RegisterBank};
pub use config::{
    AnimationConfig, CALIBRATED_UPDATE_PERIOD_US, ConfigBuilder, ConfigError,
    calibrate_update_period,
};
pub use fade::{FadeRamp, FadeRounding};
pub use hal::{HalDelay, HalPin};
pub use pin::{LedOutput, Level, Polarity, blink};
pub use power::PowerManager;
pub use pwm::{DUTY_FULL, DUTY_OFF, DutyModulator};
pub use sequencer::{AnimationSequencer, Phase};
pub use strip::{LayoutError, LedStrip, REFERENCE_LED_COUNT, StripLayout};
pub use time::BusyWait;

/// Sequencer wired to the reference board layout through a register bank.
pub type ReferenceSequencer<'b, B, W, M> =
    AnimationSequencer<BankPin<'b, B>, W, M, REFERENCE_LED_COUNT>;
