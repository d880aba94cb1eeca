//! Software PWM on a single on/off output.
//!
//! [`DutyModulator`] approximates an analog brightness by cycling a pin
//! through a 256-tick period. It must be polled at a fixed interval; the
//! length of that interval is the calibrated update period and is never
//! measured here.

use crate::pin::LedOutput;

/// Duty cycle that keeps the pin permanently off.
pub const DUTY_OFF: u8 = 0;

/// Duty cycle that keeps the pin permanently on.
pub const DUTY_FULL: u8 = 255;

/// Number of ticks in one modulation period.
pub const PERIOD_TICKS: u32 = 256;

/// Software PWM driver bound to one LED output.
///
/// Each [`update`](Self::update) evaluates the current counter value, then
/// advances it by one, wrapping at 256. The pin turns on when the counter is
/// 0 (unless the duty cycle is 0) and off when the counter reaches the duty
/// cycle (unless the duty cycle is 255). Over one period the pin is on for
/// exactly `duty` ticks, with 255 meaning all 256.
///
/// New duty cycles are latched at counter 0, so brightness only ever changes
/// on period boundaries.
pub struct DutyModulator<'p, P: LedOutput> {
    pin: &'p mut P,
    counter: u8,
    duty_cycle: u8,
    pending: u8,
}

impl<'p, P: LedOutput> DutyModulator<'p, P> {
    /// Binds to `pin` at full brightness and turns it on immediately.
    pub fn new(pin: &'p mut P) -> Self {
        pin.set(true);

        Self {
            pin,
            counter: 0,
            duty_cycle: DUTY_FULL,
            pending: DUTY_FULL,
        }
    }

    /// Advances the waveform by one tick.
    #[inline]
    pub fn update(&mut self) {
        if self.counter == 0 {
            self.duty_cycle = self.pending;
            if self.duty_cycle != DUTY_OFF {
                self.pin.set(true);
            }
        }

        if self.counter == self.duty_cycle && self.duty_cycle != DUTY_FULL {
            self.pin.set(false);
        }

        self.counter = self.counter.wrapping_add(1);
    }

    /// Requests a new brightness, applied at the next counter wrap.
    #[inline]
    pub fn set_duty_cycle(&mut self, duty_cycle: u8) {
        self.pending = duty_cycle;
    }

    /// Duty cycle of the period currently being generated.
    pub fn duty_cycle(&self) -> u8 {
        self.duty_cycle
    }

    /// Duty cycle that will be latched at the next wrap.
    pub fn pending_duty_cycle(&self) -> u8 {
        self.pending
    }

    /// Counter value the next update will evaluate.
    pub fn counter(&self) -> u8 {
        self.counter
    }
}
