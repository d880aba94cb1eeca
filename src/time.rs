//! Busy-wait abstraction for platform-agnostic timing.
//!
//! All timing in the animation is open-loop: durations are produced by
//! waiting, never by reading a clock back.

use fugit::MicrosDurationU32;

/// Trait for abstracting blocking waits.
pub trait BusyWait {
    /// Blocks for `ms` milliseconds.
    fn wait_ms(&mut self, ms: u32);

    /// Called once after every software PWM poll.
    ///
    /// On hardware the poll itself takes the calibrated period, so the
    /// default does nothing. Simulated clocks advance by `period` here.
    #[inline]
    fn pwm_tick(&mut self, _period: MicrosDurationU32) {}
}

impl<T: BusyWait + ?Sized> BusyWait for &mut T {
    #[inline]
    fn wait_ms(&mut self, ms: u32) {
        (**self).wait_ms(ms);
    }

    #[inline]
    fn pwm_tick(&mut self, period: MicrosDurationU32) {
        (**self).pwm_tick(period);
    }
}
