//! Build-time timing configuration for the animation.
//!
//! Every duration the animation uses is derived from an [`AnimationConfig`].
//! Nothing is measured at runtime; if the calibrated update period is wrong
//! the fade runs too fast or too slow, it does not fail.

use crate::fade::{FADE_LEVELS, FadeRamp, FadeRounding};
use fugit::{MicrosDurationU32, MillisDurationU32};

/// Cost of one software PWM poll on the reference target, in microseconds.
///
/// Measured empirically on the reference board. Recalibrate with
/// [`calibrate_update_period`] when the clock or the poll loop changes.
pub const CALIBRATED_UPDATE_PERIOD_US: u32 = 18;

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The update period is zero.
    ZeroUpdatePeriod,

    /// The fade has fewer updates than brightness levels.
    FadeTooShort { updates: u32 },

    /// The fade needs more updates than a `u32` can count.
    FadeTooLong,

    /// The power manager reports a zero-length sleep unit.
    ZeroSleepUnit,

    /// A non-zero silence is shorter than one sleep unit.
    SilenceShorterThanUnit,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroUpdatePeriod => {
                write!(f, "software PWM update period must be non-zero")
            }
            ConfigError::FadeTooShort { updates } => {
                write!(
                    f,
                    "fade of {} updates cannot visit all {} brightness levels",
                    updates, FADE_LEVELS
                )
            }
            ConfigError::FadeTooLong => {
                write!(f, "fade needs more than {} updates", u32::MAX)
            }
            ConfigError::ZeroSleepUnit => {
                write!(f, "low-power sleep unit must be non-zero")
            }
            ConfigError::SilenceShorterThanUnit => {
                write!(f, "silence is shorter than one low-power sleep unit")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Timing of one animation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationConfig {
    /// Time for the light to fall across every pin but the fade target.
    pub fall_total: MillisDurationU32,

    /// Time for the fade target to go from full brightness to off.
    pub fade_total: MillisDurationU32,

    /// Time spent dark in low-power sleep before the next cycle.
    pub silence_total: MillisDurationU32,

    /// Real time between two software PWM polls.
    pub update_period: MicrosDurationU32,

    /// What happens to updates left over after 256 equal levels.
    pub fade_rounding: FadeRounding,
}

impl AnimationConfig {
    /// Timing of the reference board.
    pub const REFERENCE: Self = Self {
        fall_total: MillisDurationU32::millis(700),
        fade_total: MillisDurationU32::millis(700),
        silence_total: MillisDurationU32::millis(3000),
        update_period: MicrosDurationU32::micros(CALIBRATED_UPDATE_PERIOD_US),
        fade_rounding: FadeRounding::AbsorbAtEnd,
    };

    /// Creates a builder starting from [`Self::REFERENCE`].
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks the timing for values that cannot produce a fade.
    ///
    /// # Errors
    /// * `ZeroUpdatePeriod` - `update_period` is zero
    /// * `FadeTooShort` - Fewer than 256 updates fit in `fade_total`
    /// * `FadeTooLong` - More than `u32::MAX` updates fit in `fade_total`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.update_period.ticks() == 0 {
            return Err(ConfigError::ZeroUpdatePeriod);
        }

        let updates =
            u32::try_from(self.fade_updates_wide()).map_err(|_| ConfigError::FadeTooLong)?;
        if updates < FADE_LEVELS {
            return Err(ConfigError::FadeTooShort { updates });
        }

        Ok(())
    }

    /// How long each falling pin stays lit on a strip of `strip_len` LEDs.
    pub fn fall_step(&self, strip_len: usize) -> MillisDurationU32 {
        let steps = strip_len.saturating_sub(1).max(1) as u32;
        MillisDurationU32::millis(self.fall_total.to_millis() / steps)
    }

    /// Number of software PWM polls in one fade.
    ///
    /// Saturates at `u32::MAX`; [`validate`](Self::validate) rejects such fades.
    pub fn fade_updates(&self) -> u32 {
        u32::try_from(self.fade_updates_wide()).unwrap_or(u32::MAX)
    }

    fn fade_updates_wide(&self) -> u64 {
        match self.update_period.ticks() {
            0 => 0,
            period => u64::from(self.fade_total.to_millis()) * 1_000 / u64::from(period),
        }
    }

    /// Updates between two duty cycle decrements, truncated.
    pub fn updates_per_level(&self) -> u32 {
        self.fade_updates() / FADE_LEVELS
    }

    /// Duty cycle schedule for one fade.
    pub fn fade_ramp(&self) -> FadeRamp {
        FadeRamp::new(self.fade_updates(), self.fade_rounding)
    }

    /// Number of low-power sleeps of length `unit` that make up the silence.
    ///
    /// A silence that is not a multiple of `unit` is truncated.
    pub fn sleep_units(&self, unit: MillisDurationU32) -> Result<u32, ConfigError> {
        let unit_ms = unit.to_millis();
        if unit_ms == 0 {
            return Err(ConfigError::ZeroSleepUnit);
        }

        let silence_ms = self.silence_total.to_millis();
        if silence_ms != 0 && silence_ms < unit_ms {
            return Err(ConfigError::SilenceShorterThanUnit);
        }

        Ok(silence_ms / unit_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Derives the update period from a stopwatch measurement of a fade.
///
/// Run a fade of `updates` polls, time it, and pass the measured duration.
/// The result is rounded to the nearest microsecond. Returns `None` for zero
/// updates or a measurement that rounds to zero.
pub fn calibrate_update_period(
    measured_fade: MillisDurationU32,
    updates: u32,
) -> Option<MicrosDurationU32> {
    if updates == 0 {
        return None;
    }

    let measured_us = u64::from(measured_fade.to_millis()) * 1_000;
    let period = (measured_us + u64::from(updates) / 2) / u64::from(updates);
    match u32::try_from(period) {
        Ok(0) | Err(_) => None,
        Ok(period) => Some(MicrosDurationU32::micros(period)),
    }
}

/// Builder for a validated [`AnimationConfig`].
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: AnimationConfig,
}

impl ConfigBuilder {
    /// Creates a builder holding [`AnimationConfig::REFERENCE`].
    pub fn new() -> Self {
        Self {
            config: AnimationConfig::REFERENCE,
        }
    }

    /// Sets the total duration of the falling phase.
    pub fn fall_total(mut self, duration: MillisDurationU32) -> Self {
        self.config.fall_total = duration;
        self
    }

    /// Sets the total duration of the fading phase.
    pub fn fade_total(mut self, duration: MillisDurationU32) -> Self {
        self.config.fade_total = duration;
        self
    }

    /// Sets the total duration of the silent phase.
    pub fn silence_total(mut self, duration: MillisDurationU32) -> Self {
        self.config.silence_total = duration;
        self
    }

    /// Overrides the calibrated software PWM update period.
    pub fn update_period(mut self, period: MicrosDurationU32) -> Self {
        self.config.update_period = period;
        self
    }

    /// Sets how leftover fade updates are distributed.
    pub fn fade_rounding(mut self, rounding: FadeRounding) -> Self {
        self.config.fade_rounding = rounding;
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> Result<AnimationConfig, ConfigError> {
        if let Err(err) = self.config.validate() {
            warn!("animation config rejected: {}", err);
            return Err(err);
        }
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
