//! Linear brightness ramp for the fading phase.
//!
//! Maps an update index within the fade to the duty cycle that should be
//! requested at that point, from full brightness down to off in 256 levels.
//! [`FadeRamp::level_start`] gives the same schedule as level boundaries, so
//! the polling loop itself does no arithmetic.

use crate::pwm::{DUTY_FULL, PERIOD_TICKS};

/// Number of distinct brightness levels visited by a fade.
pub const FADE_LEVELS: u32 = PERIOD_TICKS;

/// How the ramp handles a fade length that is not a multiple of 256 updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FadeRounding {
    /// Every level lasts `floor(total / 256)` updates; the leftover updates
    /// are spent at duty 0.
    #[default]
    AbsorbAtEnd,

    /// Leftover updates are spread over the ramp, so each level lasts either
    /// `floor` or `ceil` of `total / 256` updates.
    Spread,
}

/// Duty cycle schedule for one fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeRamp {
    total_updates: u32,
    updates_per_level: u32,
    rounding: FadeRounding,
}

impl FadeRamp {
    /// Creates the schedule for a fade of `total_updates` polls.
    pub fn new(total_updates: u32, rounding: FadeRounding) -> Self {
        Self {
            total_updates,
            updates_per_level: (total_updates / FADE_LEVELS).max(1),
            rounding,
        }
    }

    /// Duty cycle to request before update `tick`.
    ///
    /// Never increases with `tick` and never goes below 0.
    pub fn duty_at(&self, tick: u32) -> u8 {
        let level = match self.rounding {
            FadeRounding::AbsorbAtEnd => tick / self.updates_per_level,
            FadeRounding::Spread => {
                let total = u64::from(self.total_updates.max(1));
                (u64::from(tick) * u64::from(FADE_LEVELS) / total) as u32
            }
        };

        Self::level_duty(level)
    }

    /// Update index at which `level` begins, level 0 being duty 255.
    ///
    /// `level_start(FADE_LEVELS)` is the end of the fade. The leftover
    /// updates of [`FadeRounding::AbsorbAtEnd`] belong to the last level.
    pub fn level_start(&self, level: u32) -> u32 {
        if level >= FADE_LEVELS {
            return self.total_updates;
        }

        match self.rounding {
            FadeRounding::AbsorbAtEnd => {
                level.saturating_mul(self.updates_per_level).min(self.total_updates)
            }
            FadeRounding::Spread => {
                let scaled = u64::from(level) * u64::from(self.total_updates);
                scaled.div_ceil(u64::from(FADE_LEVELS)) as u32
            }
        }
    }

    /// Duty cycle of `level`, level 0 being full brightness.
    #[inline]
    pub fn level_duty(level: u32) -> u8 {
        DUTY_FULL - level.min(u32::from(DUTY_FULL)) as u8
    }

    /// Number of updates in the whole fade.
    pub fn total_updates(&self) -> u32 {
        self.total_updates
    }

    /// Nominal updates spent on each level.
    pub fn updates_per_level(&self) -> u32 {
        self.updates_per_level
    }

    /// How leftover updates are distributed.
    pub fn rounding(&self) -> FadeRounding {
        self.rounding
    }
}
