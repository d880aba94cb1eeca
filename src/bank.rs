//! Pin identity and the platform layer that resolves it to registers.
//!
//! A [`PinId`] is just a port number and a line within that port. Everything
//! that touches a register goes through a [`PinBank`], so the animation core
//! never sees an address.

use crate::pin::{LedOutput, Level, Polarity};
use core::cell::Cell;

/// Number of lines in one 8-bit port.
pub const LINES_PER_PORT: u8 = 8;

/// Port index of `PORTA` on the reference board.
pub const PORT_A: u8 = 0;
/// Port index of `PORTB` on the reference board.
pub const PORT_B: u8 = 1;

/// A physical output line, identified by port and line index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId {
    pub port: u8,
    pub line: u8,
}

impl PinId {
    /// Creates a pin id. The line is checked when the pin is used, not here.
    #[inline]
    pub const fn new(port: u8, line: u8) -> Self {
        Self { port, line }
    }

    /// Bit mask of this line within its port register.
    ///
    /// Zero for a line outside `0..LINES_PER_PORT`, so such a pin never
    /// aliases a real line.
    #[inline]
    pub const fn mask(self) -> u8 {
        if self.line < LINES_PER_PORT {
            1 << self.line
        } else {
            0
        }
    }
}

/// Trait for the platform layer that owns the output registers.
///
/// Methods take `&self`: register writes are interior-mutable, and every pin
/// of a strip shares the same bank.
pub trait PinBank {
    /// Drives `pin` to `level`.
    fn write(&self, pin: PinId, level: Level);

    /// Flips the current level of `pin`.
    fn toggle(&self, pin: PinId);

    /// Returns true if `pin` exists on this bank.
    fn contains(&self, pin: PinId) -> bool {
        pin.line < LINES_PER_PORT
    }
}

/// In-memory image of a set of 8-bit port output registers.
///
/// A set bit is a high line. All registers start at zero, matching the
/// power-on state of the output latches.
#[derive(Debug)]
pub struct RegisterBank<const PORTS: usize> {
    ports: [Cell<u8>; PORTS],
}

impl<const PORTS: usize> RegisterBank<PORTS> {
    /// Creates a bank with every register cleared.
    pub fn new() -> Self {
        Self {
            ports: core::array::from_fn(|_| Cell::new(0)),
        }
    }

    /// Raw value of a port register.
    pub fn port(&self, port: u8) -> Option<u8> {
        self.ports.get(port as usize).map(Cell::get)
    }

    /// Current level of a single line, `None` if the bank has no such pin.
    pub fn level(&self, pin: PinId) -> Option<Level> {
        self.register(pin).map(|register| {
            if register.get() & pin.mask() != 0 {
                Level::High
            } else {
                Level::Low
            }
        })
    }

    fn register(&self, pin: PinId) -> Option<&Cell<u8>> {
        if self.contains(pin) {
            self.ports.get(pin.port as usize)
        } else {
            None
        }
    }
}

impl<const PORTS: usize> Default for RegisterBank<PORTS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const PORTS: usize> PinBank for RegisterBank<PORTS> {
    fn write(&self, pin: PinId, level: Level) {
        if let Some(register) = self.register(pin) {
            let value = register.get();
            register.set(match level {
                Level::High => value | pin.mask(),
                Level::Low => value & !pin.mask(),
            });
        }
    }

    fn toggle(&self, pin: PinId) {
        if let Some(register) = self.register(pin) {
            register.set(register.get() ^ pin.mask());
        }
    }

    fn contains(&self, pin: PinId) -> bool {
        (pin.port as usize) < PORTS && pin.line < LINES_PER_PORT
    }
}

/// An LED line resolved through a [`PinBank`].
#[derive(Debug)]
pub struct BankPin<'b, B: PinBank> {
    bank: &'b B,
    id: PinId,
    polarity: Polarity,
}

impl<'b, B: PinBank> BankPin<'b, B> {
    /// Binds `id` on `bank` with the given polarity.
    pub fn new(bank: &'b B, id: PinId, polarity: Polarity) -> Self {
        Self { bank, id, polarity }
    }

    /// The line this pin drives.
    pub fn id(&self) -> PinId {
        self.id
    }

    /// Which level lights the LED.
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }
}

impl<B: PinBank> LedOutput for BankPin<'_, B> {
    #[inline]
    fn set(&mut self, on: bool) {
        self.bank.write(self.id, self.polarity.level_for(on));
    }

    #[inline]
    fn toggle(&mut self) {
        self.bank.toggle(self.id);
    }
}
