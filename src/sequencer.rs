//! The falling-light animation state machine.
//!
//! Provides [`AnimationSequencer`], which runs the three phases of a cycle
//! strictly one after another: a single light falls down the strip, the last
//! LED fades out under software PWM, then everything stays dark in low-power
//! sleep. Timing is open-loop and comes entirely from the
//! [`AnimationConfig`] fixed at construction.

use crate::config::{AnimationConfig, ConfigError};
use crate::fade::{FADE_LEVELS, FadeRamp};
use crate::pin::LedOutput;
use crate::power::PowerManager;
use crate::pwm::DutyModulator;
use crate::strip::LedStrip;
use crate::time::BusyWait;
use fugit::MillisDurationU32;

/// Phase of the animation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// One pin at a time lights up, in strip order. Fade target stays off.
    Falling,
    /// The fade target ramps from full brightness to off.
    Fading,
    /// All pins off, processor in low-power sleep.
    Silent,
}

/// Runs the falling-light animation on a strip of `N` LEDs.
///
/// Owns the strip, the busy-wait and the power manager. The only state kept
/// between cycles is the configuration, so every cycle drives the pins
/// through the exact same sequence.
///
/// # Type Parameters
/// * `P` - LED output type
/// * `W` - Busy-wait implementation type
/// * `M` - Power manager implementation type
/// * `N` - Number of LEDs, including the fade target
pub struct AnimationSequencer<P: LedOutput, W: BusyWait, M: PowerManager, const N: usize> {
    strip: LedStrip<P, N>,
    wait: W,
    power: M,
    config: AnimationConfig,
    fall_step: MillisDurationU32,
    fade: FadeRamp,
    sleep_units: u32,
    phase: Phase,
}

impl<P: LedOutput, W: BusyWait, M: PowerManager, const N: usize> AnimationSequencer<P, W, M, N> {
    /// Creates a sequencer with every LED off, ready to start falling.
    ///
    /// # Errors
    /// Any [`ConfigError`] from validating `config` against the strip and the
    /// power manager's sleep unit.
    pub fn new(
        mut strip: LedStrip<P, N>,
        wait: W,
        power: M,
        config: AnimationConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let sleep_units = config.sleep_units(power.sleep_unit()).inspect_err(|err| {
            warn!("silence does not fit the sleep unit: {}", err);
        })?;

        strip.all_off();

        Ok(Self {
            fall_step: config.fall_step(N),
            fade: config.fade_ramp(),
            strip,
            wait,
            power,
            config,
            sleep_units,
            phase: Phase::Falling,
        })
    }

    /// Runs the animation forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.run_cycle();
        }
    }

    /// Runs one full falling, fading and silent cycle.
    pub fn run_cycle(&mut self) {
        self.run_fall();
        self.run_fade();
        self.run_silence();
        debug!("cycle complete");
    }

    /// Lights every pin but the fade target once, in order, one at a time.
    pub fn run_fall(&mut self) {
        self.phase = Phase::Falling;
        let step_ms = self.fall_step.to_millis();
        debug!("falling: {=usize} pins, {=u32} ms each", N - 1, step_ms);

        for pin in self.strip.fall_pins_mut() {
            pin.set(true);
            self.wait.wait_ms(step_ms);
            pin.set(false);
        }
    }

    /// Fades the fade target from full brightness to off.
    ///
    /// Level boundaries come from the ramp before each level starts, so the
    /// inner loop is one modulator poll per calibrated update period and
    /// nothing else.
    pub fn run_fade(&mut self) {
        self.phase = Phase::Fading;
        let period = self.config.update_period;
        let ramp = self.fade;
        debug!(
            "fading: {=u32} updates, {=u32} per level",
            ramp.total_updates(),
            ramp.updates_per_level()
        );

        let mut modulator = DutyModulator::new(self.strip.fade_target_mut());
        let mut start = ramp.level_start(0);
        for level in 0..FADE_LEVELS {
            let end = ramp.level_start(level + 1);
            modulator.set_duty_cycle(FadeRamp::level_duty(level));

            for _ in start..end {
                modulator.update();
                self.wait.pwm_tick(period);
            }
            start = end;
        }

        trace!("fade done, duty {=u8}", modulator.duty_cycle());
    }

    /// Turns the fade target off and sleeps for the configured silence.
    pub fn run_silence(&mut self) {
        self.phase = Phase::Silent;
        debug!("silent: {=u32} sleep units", self.sleep_units);

        self.strip.fade_target_mut().set(false);
        for _ in 0..self.sleep_units {
            self.power.sleep_low_power();
        }
    }

    /// Phase currently running, or last run.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Timing the sequencer was built with.
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// How long each falling pin stays lit.
    pub fn fall_step(&self) -> MillisDurationU32 {
        self.fall_step
    }

    /// Duty cycle schedule of the fading phase.
    pub fn fade_ramp(&self) -> &FadeRamp {
        &self.fade
    }

    /// Number of low-power sleeps in the silent phase.
    pub fn sleep_units(&self) -> u32 {
        self.sleep_units
    }

    /// The strip being animated.
    pub fn strip(&self) -> &LedStrip<P, N> {
        &self.strip
    }

    /// Releases the strip, busy-wait and power manager.
    pub fn into_parts(self) -> (LedStrip<P, N>, W, M) {
        (self.strip, self.wait, self.power)
    }
}
