//! Adapters from `embedded-hal` traits to the crate's capabilities.
//!
//! Lets a board crate hand its HAL output pins and delay provider straight to
//! the sequencer without writing glue.

use crate::pin::{LedOutput, Level, Polarity};
use crate::time::BusyWait;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, StatefulOutputPin};

/// LED output backed by an `embedded-hal` output pin.
///
/// Pin errors are dropped: GPIO writes on the supported targets are
/// infallible, and the animation has no way to recover from one anyway.
#[derive(Debug)]
pub struct HalPin<P> {
    pin: P,
    polarity: Polarity,
}

impl<P: StatefulOutputPin> HalPin<P> {
    pub fn new(pin: P, polarity: Polarity) -> Self {
        Self { pin, polarity }
    }

    /// Open-drain pin: low is on.
    pub fn open_drain(pin: P) -> Self {
        Self::new(pin, Polarity::ActiveLow)
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: StatefulOutputPin> LedOutput for HalPin<P> {
    fn set(&mut self, on: bool) {
        let _ = match self.polarity.level_for(on) {
            Level::High => self.pin.set_high(),
            Level::Low => self.pin.set_low(),
        };
    }

    fn toggle(&mut self) {
        let _ = self.pin.toggle();
    }
}

/// Busy-wait backed by an `embedded-hal` delay provider.
#[derive(Debug)]
pub struct HalDelay<D> {
    delay: D,
}

impl<D: DelayNs> HalDelay<D> {
    pub fn new(delay: D) -> Self {
        Self { delay }
    }

    pub fn into_inner(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> BusyWait for HalDelay<D> {
    #[inline]
    fn wait_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
