//! Fixed-size LED strips and the pin layout builder that wires them.
//!
//! Provides [`LedStrip`], the ordered set of outputs the animation runs on,
//! and [`StripLayout`], which validates a list of [`PinId`]s against the
//! reserved line before resolving them through a [`PinBank`].

use crate::bank::{BankPin, LINES_PER_PORT, PORT_A, PORT_B, PinBank, PinId};
use crate::pin::{LedOutput, Polarity};
use heapless::Vec;

/// Number of LEDs in the reference wiring.
pub const REFERENCE_LED_COUNT: usize = 11;

/// Reset/programming line of the reference board. Never driven.
pub const REFERENCE_RESERVED_LINE: PinId = PinId::new(PORT_B, 3);

/// Reference wiring in strip order. The last entry is the fade target.
pub const REFERENCE_WIRING: [PinId; REFERENCE_LED_COUNT] = [
    PinId::new(PORT_A, 0),
    PinId::new(PORT_A, 1),
    PinId::new(PORT_A, 2),
    PinId::new(PORT_A, 3),
    PinId::new(PORT_A, 4),
    PinId::new(PORT_A, 5),
    PinId::new(PORT_A, 6),
    PinId::new(PORT_A, 7),
    PinId::new(PORT_B, 2),
    PinId::new(PORT_B, 1),
    PinId::new(PORT_B, 0),
];

/// Strip construction and wiring errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    /// A strip needs at least one falling pin plus the fade target.
    TooShort { len: usize },

    /// The pin is the reserved line.
    ReservedLine(PinId),

    /// The pin already appears in the layout.
    DuplicatePin(PinId),

    /// The line index does not exist in an 8-bit port.
    InvalidLine(PinId),

    /// The bank has no such pin.
    UnknownPin(PinId),

    /// More pins than the strip holds.
    CapacityExceeded,

    /// Fewer pins than the strip holds.
    Incomplete { expected: usize, actual: usize },
}

impl core::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LayoutError::TooShort { len } => {
                write!(f, "strip of {} LEDs is too short, at least 2 are required", len)
            }
            LayoutError::ReservedLine(pin) => {
                write!(f, "line {}.{} is reserved and must not be driven", pin.port, pin.line)
            }
            LayoutError::DuplicatePin(pin) => {
                write!(f, "line {}.{} is already part of the layout", pin.port, pin.line)
            }
            LayoutError::InvalidLine(pin) => {
                write!(
                    f,
                    "line {}.{} is outside the {} lines of a port",
                    pin.port, pin.line, LINES_PER_PORT
                )
            }
            LayoutError::UnknownPin(pin) => {
                write!(f, "line {}.{} does not exist on this bank", pin.port, pin.line)
            }
            LayoutError::CapacityExceeded => {
                write!(f, "layout capacity exceeded")
            }
            LayoutError::Incomplete { expected, actual } => {
                write!(f, "layout has {} pins, strip needs {}", actual, expected)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LayoutError {}

/// An ordered, fixed-size set of LED outputs.
///
/// Index order is physical position. The last pin is the fade target and is
/// never touched by the falling phase.
pub struct LedStrip<P: LedOutput, const N: usize> {
    pins: [P; N],
}

impl<P: LedOutput, const N: usize> LedStrip<P, N> {
    /// Takes ownership of the pins and turns every one of them off.
    pub fn new(pins: [P; N]) -> Result<Self, LayoutError> {
        if N < 2 {
            return Err(LayoutError::TooShort { len: N });
        }

        let mut strip = Self { pins };
        strip.all_off();
        info!("led strip ready: {=usize} pins", N);
        Ok(strip)
    }

    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    /// The pins lit one after another while falling.
    #[inline]
    pub fn fall_pins_mut(&mut self) -> &mut [P] {
        &mut self.pins[..N - 1]
    }

    /// The pin faded out by software PWM.
    #[inline]
    pub fn fade_target_mut(&mut self) -> &mut P {
        &mut self.pins[N - 1]
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut P> {
        self.pins.get_mut(index)
    }

    pub fn pins(&self) -> &[P] {
        &self.pins
    }

    pub fn all_off(&mut self) {
        for pin in self.pins.iter_mut() {
            pin.set(false);
        }
    }

    pub fn into_pins(self) -> [P; N] {
        self.pins
    }
}

/// Builder for a validated pin layout.
#[derive(Debug, Clone)]
pub struct StripLayout<const N: usize> {
    pins: Vec<PinId, N>,
    reserved: Option<PinId>,
    polarity: Polarity,
}

impl<const N: usize> StripLayout<N> {
    /// Creates an empty open-drain layout with no reserved line.
    pub fn new() -> Self {
        Self {
            pins: Vec::new(),
            reserved: None,
            polarity: Polarity::ActiveLow,
        }
    }

    /// Marks a line that must never be part of the strip.
    ///
    /// Set this before pushing pins; already pushed pins are not re-checked.
    pub fn reserve(mut self, pin: PinId) -> Self {
        self.reserved = Some(pin);
        self
    }

    pub fn polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Appends the next pin in strip order.
    ///
    /// # Errors
    /// * `ReservedLine` - The pin is the reserved line
    /// * `InvalidLine` - The line index is outside the port
    /// * `DuplicatePin` - The pin was already pushed
    /// * `CapacityExceeded` - The layout already holds `N` pins
    pub fn push(mut self, pin: PinId) -> Result<Self, LayoutError> {
        if self.reserved == Some(pin) {
            return Err(LayoutError::ReservedLine(pin));
        }
        if pin.line >= LINES_PER_PORT {
            return Err(LayoutError::InvalidLine(pin));
        }
        if self.pins.contains(&pin) {
            return Err(LayoutError::DuplicatePin(pin));
        }

        self.pins
            .push(pin)
            .map_err(|_| LayoutError::CapacityExceeded)?;
        Ok(self)
    }

    /// Pins pushed so far, in strip order.
    pub fn pins(&self) -> &[PinId] {
        &self.pins
    }

    /// Resolves the layout through `bank` into a strip with every LED off.
    ///
    /// # Errors
    /// * `Incomplete` - Fewer than `N` pins were pushed
    /// * `UnknownPin` - The bank does not have one of the pins
    /// * `TooShort` - `N` is less than 2
    pub fn build<'b, B: PinBank>(
        &self,
        bank: &'b B,
    ) -> Result<LedStrip<BankPin<'b, B>, N>, LayoutError> {
        if self.pins.len() != N {
            return Err(LayoutError::Incomplete {
                expected: N,
                actual: self.pins.len(),
            });
        }
        if let Some(&pin) = self.pins.iter().find(|pin| !bank.contains(**pin)) {
            return Err(LayoutError::UnknownPin(pin));
        }

        let pins = core::array::from_fn(|i| BankPin::new(bank, self.pins[i], self.polarity));
        LedStrip::new(pins)
    }
}

impl StripLayout<REFERENCE_LED_COUNT> {
    /// The original 11-LED open-drain wiring with the reset line reserved.
    pub fn reference() -> Result<Self, LayoutError> {
        REFERENCE_WIRING
            .iter()
            .try_fold(Self::new().reserve(REFERENCE_RESERVED_LINE), |layout, &pin| {
                layout.push(pin)
            })
    }
}

impl<const N: usize> Default for StripLayout<N> {
    fn default() -> Self {
        Self::new()
    }
}
