//! Runs one animation cycle on the reference wiring against a simulated
//! register bank and prints what the LEDs do.
//!
//! cargo run --example simulate --features std

use std::cell::Cell;

use falling_light::strip::REFERENCE_WIRING;
use falling_light::{
    AnimationConfig, AnimationSequencer, BusyWait, Level, PinBank, PinId, PowerManager,
    RegisterBank, StripLayout,
};
use fugit::{MicrosDurationU32, MillisDurationU32};

/// Register bank that prints every level change of the strip
struct ConsoleBank {
    registers: RegisterBank<2>,
    now_us: Cell<u64>,
    quiet: Cell<bool>,
    fade_edges: Cell<u32>,
}

impl ConsoleBank {
    fn led_index(pin: PinId) -> Option<usize> {
        REFERENCE_WIRING.iter().position(|&p| p == pin)
    }
}

impl PinBank for ConsoleBank {
    fn write(&self, pin: PinId, level: Level) {
        if self.registers.level(pin) == Some(level) {
            return;
        }
        self.registers.write(pin, level);

        if self.quiet.get() {
            self.fade_edges.set(self.fade_edges.get() + 1);
            return;
        }
        let state = if level == Level::Low { "on" } else { "off" };
        match Self::led_index(pin) {
            Some(index) => println!("{:>9} us  led {:>2} {}", self.now_us.get(), index, state),
            None => println!("{:>9} us  line {}.{} {}", self.now_us.get(), pin.port, pin.line, state),
        }
    }

    fn toggle(&self, pin: PinId) {
        self.registers.toggle(pin);
    }

    fn contains(&self, pin: PinId) -> bool {
        self.registers.contains(pin)
    }
}

struct SimWait<'a>(&'a ConsoleBank);

impl BusyWait for SimWait<'_> {
    fn wait_ms(&mut self, ms: u32) {
        let clock = &self.0.now_us;
        clock.set(clock.get() + u64::from(ms) * 1_000);
    }

    fn pwm_tick(&mut self, period: MicrosDurationU32) {
        let clock = &self.0.now_us;
        clock.set(clock.get() + u64::from(period.ticks()));
    }
}

struct SimPower<'a>(&'a ConsoleBank);

impl PowerManager for SimPower<'_> {
    fn sleep_unit(&self) -> MillisDurationU32 {
        MillisDurationU32::millis(1000)
    }

    fn sleep_low_power(&mut self) {
        let clock = &self.0.now_us;
        clock.set(clock.get() + 1_000_000);
        println!("{:>9} us  woke from low-power sleep", clock.get());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bank = ConsoleBank {
        registers: RegisterBank::new(),
        now_us: Cell::new(0),
        quiet: Cell::new(false),
        fade_edges: Cell::new(0),
    };

    let config = AnimationConfig::REFERENCE;
    let strip = StripLayout::reference()?.build(&bank)?;
    let mut sequencer = AnimationSequencer::new(strip, SimWait(&bank), SimPower(&bank), config)?;

    println!(
        "fall step {} ms, fade {} updates ({} per level), {} sleep units",
        sequencer.fall_step().to_millis(),
        sequencer.fade_ramp().total_updates(),
        sequencer.fade_ramp().updates_per_level(),
        sequencer.sleep_units()
    );

    sequencer.run_fall();

    bank.quiet.set(true);
    sequencer.run_fade();
    bank.quiet.set(false);
    println!(
        "{:>9} us  fade done, {} pwm edges on led 10",
        bank.now_us.get(),
        bank.fade_edges.get()
    );

    sequencer.run_silence();
    Ok(())
}
