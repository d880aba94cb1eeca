//! Low-power idle used between animation cycles.

use fugit::MillisDurationU32;

/// Trait for the timer-driven low-power sleep primitive.
///
/// One call sleeps for exactly one wake period of the backing hardware timer.
/// If the timer never fires the call never returns; that is a hardware fault
/// and is not detected here.
pub trait PowerManager {
    /// Length of one sleep unit, fixed by the wake timer.
    fn sleep_unit(&self) -> MillisDurationU32;

    /// Enters low-power sleep until the next timer wake-up.
    fn sleep_low_power(&mut self);
}

impl<T: PowerManager + ?Sized> PowerManager for &mut T {
    #[inline]
    fn sleep_unit(&self) -> MillisDurationU32 {
        (**self).sleep_unit()
    }

    #[inline]
    fn sleep_low_power(&mut self) {
        (**self).sleep_low_power();
    }
}
