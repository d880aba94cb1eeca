//! Shared test infrastructure for falling-light integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};
use falling_light::{BusyWait, Level, PinBank, PinId, PowerManager, RegisterBank};
use fugit::{MicrosDurationU32, MillisDurationU32};

// ============================================================================
// Simulated Bench
// ============================================================================

/// A pin level change, stamped with the bench time it happened at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub at_us: u64,
    pub pin: PinId,
    pub level: Level,
}

/// Register bank plus a microsecond clock that only moves when something waits
pub struct Bench {
    now_us: Cell<u64>,
    registers: RegisterBank<2>,
    transitions: RefCell<Vec<Transition>>,
    sleeps: Cell<u32>,
}

impl Bench {
    pub fn new() -> Self {
        Self {
            now_us: Cell::new(0),
            registers: RegisterBank::new(),
            transitions: RefCell::new(Vec::new()),
            sleeps: Cell::new(0),
        }
    }

    pub fn now_us(&self) -> u64 {
        self.now_us.get()
    }

    pub fn advance_us(&self, us: u64) {
        self.now_us.set(self.now_us.get() + us);
    }

    pub fn registers(&self) -> &RegisterBank<2> {
        &self.registers
    }

    pub fn level(&self, pin: PinId) -> Level {
        self.registers.level(pin).expect("pin on bench")
    }

    /// Transitions recorded so far, leaving the log empty
    pub fn take_transitions(&self) -> Vec<Transition> {
        self.transitions.take()
    }

    pub fn sleeps(&self) -> u32 {
        self.sleeps.get()
    }

    pub fn wait(&self) -> BenchWait<'_> {
        BenchWait { bench: self }
    }

    pub fn power(&self, unit_ms: u32) -> BenchPower<'_> {
        BenchPower {
            bench: self,
            unit_ms,
        }
    }
}

impl PinBank for Bench {
    fn write(&self, pin: PinId, level: Level) {
        let before = self.level(pin);
        self.registers.write(pin, level);
        if before != level {
            self.transitions.borrow_mut().push(Transition {
                at_us: self.now_us(),
                pin,
                level,
            });
        }
    }

    fn toggle(&self, pin: PinId) {
        self.registers.toggle(pin);
        self.transitions.borrow_mut().push(Transition {
            at_us: self.now_us(),
            pin,
            level: self.level(pin),
        });
    }

    fn contains(&self, pin: PinId) -> bool {
        self.registers.contains(pin)
    }
}

/// Busy-wait that advances the bench clock instead of blocking
pub struct BenchWait<'a> {
    bench: &'a Bench,
}

impl BusyWait for BenchWait<'_> {
    fn wait_ms(&mut self, ms: u32) {
        self.bench.advance_us(u64::from(ms) * 1_000);
    }

    fn pwm_tick(&mut self, period: MicrosDurationU32) {
        self.bench.advance_us(u64::from(period.ticks()));
    }
}

/// Power manager whose wake timer fires after `unit_ms` of bench time
pub struct BenchPower<'a> {
    bench: &'a Bench,
    unit_ms: u32,
}

impl PowerManager for BenchPower<'_> {
    fn sleep_unit(&self) -> MillisDurationU32 {
        MillisDurationU32::millis(self.unit_ms)
    }

    fn sleep_low_power(&mut self) {
        self.bench.sleeps.set(self.bench.sleeps.get() + 1);
        self.bench.advance_us(u64::from(self.unit_ms) * 1_000);
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Time `pin` spent lit (driven low) within `[from_us, to_us)`
pub fn lit_time_us(
    transitions: &[Transition],
    pin: PinId,
    initial: Level,
    from_us: u64,
    to_us: u64,
) -> u64 {
    let mut level = initial;
    let mut cursor = from_us;
    let mut lit = 0;

    for t in transitions.iter().filter(|t| t.pin == pin) {
        if t.at_us >= to_us {
            break;
        }
        if t.at_us > cursor {
            if level == Level::Low {
                lit += t.at_us - cursor;
            }
            cursor = t.at_us;
        }
        level = t.level;
    }

    if level == Level::Low {
        lit += to_us - cursor;
    }
    lit
}
