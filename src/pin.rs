//! Single-line LED outputs and the active-level convention.
//!
//! The animation only ever asks for "on" or "off". Which physical level that
//! means is decided here, once, by a [`Polarity`]. The reference wiring is
//! open-drain: driving the line low lights the LED.

use crate::time::BusyWait;
use fugit::MillisDurationU32;

/// Physical level of an output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    High,
    Low,
}

impl Level {
    /// Returns the opposite level.
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            Level::High => Level::Low,
            Level::Low => Level::High,
        }
    }
}

/// Which physical level lights the LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Open-drain wiring: low is on, high is off.
    #[default]
    ActiveLow,

    /// Line sources the LED current: high is on.
    ActiveHigh,
}

impl Polarity {
    /// Level that encodes the requested logical state.
    #[inline]
    pub const fn level_for(self, on: bool) -> Level {
        match (self, on) {
            (Polarity::ActiveLow, true) | (Polarity::ActiveHigh, false) => Level::Low,
            (Polarity::ActiveLow, false) | (Polarity::ActiveHigh, true) => Level::High,
        }
    }

    /// Logical state encoded by a physical level.
    #[inline]
    pub const fn is_on(self, level: Level) -> bool {
        matches!(
            (self, level),
            (Polarity::ActiveLow, Level::Low) | (Polarity::ActiveHigh, Level::High)
        )
    }
}

/// Trait for a single LED output line.
///
/// Implementations write straight to hardware; both operations are
/// synchronous and cannot fail.
pub trait LedOutput {
    /// Drives the line to the level that encodes `on`.
    fn set(&mut self, on: bool);

    /// Flips the current physical level, whatever it is.
    fn toggle(&mut self);
}

/// Blinks a pin by toggling it `toggles` times, waiting `half_period` after each.
///
/// Meant for bring-up and wiring checks. The animation never toggles.
pub fn blink<P: LedOutput, W: BusyWait>(
    pin: &mut P,
    wait: &mut W,
    half_period: MillisDurationU32,
    toggles: u32,
) {
    for _ in 0..toggles {
        pin.toggle();
        wait.wait_ms(half_period.to_millis());
    }
}
