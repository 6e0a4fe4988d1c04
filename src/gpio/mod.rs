//! General-purpose I/O.
//!
//! Two independent drivers share the same register map:
//!
//! - [`indexed`]: addresses any pin by a single identifier 0–31, resolved
//!   through the read-only descriptor [`table`] on every call.
//! - [`port`]: addresses an explicit (port, bit) pair and can drive a whole
//!   port at once.
//!
//! Identifier convention: `id = port * 8 + bit`, ports A, B, C, D in order.

pub mod indexed;
pub mod port;
pub mod table;

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::registers::{self, Register};

/// Number of addressable pins (4 ports × 8 bits).
pub const NUM_PINS: u8 = 32;
pub const PINS_PER_PORT: u8 = 8;

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    A,
    B,
    C,
    D,
}

impl Port {
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::A),
            1 => Some(Self::B),
            2 => Some(Self::C),
            3 => Some(Self::D),
            _ => None,
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Input register (PINx).
    pub const fn pin_reg(self) -> Register {
        match self {
            Self::A => registers::PINA,
            Self::B => registers::PINB,
            Self::C => registers::PINC,
            Self::D => registers::PIND,
        }
    }

    /// Output latch (PORTx).
    pub const fn port_reg(self) -> Register {
        match self {
            Self::A => registers::PORTA,
            Self::B => registers::PORTB,
            Self::C => registers::PORTC,
            Self::D => registers::PORTD,
        }
    }

    /// Data-direction register (DDRx).
    pub const fn ddr_reg(self) -> Register {
        match self {
            Self::A => registers::DDRA,
            Self::B => registers::DDRB,
            Self::C => registers::DDRC,
            Self::D => registers::DDRD,
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        };
        write!(f, "{c}")
    }
}

// ---------------------------------------------------------------------------
// Pin identifiers
// ---------------------------------------------------------------------------

/// A validated pin identifier in `0..32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PinId(u8);

impl PinId {
    /// Validate a raw identifier.
    pub const fn new(raw: u8) -> Option<Self> {
        if raw < NUM_PINS { Some(Self(raw)) } else { None }
    }

    /// Compile-time constructor for board pin constants.
    ///
    /// Panics (at compile time when used in a `const`) if `bit >= 8`.
    pub const fn at(port: Port, bit: u8) -> Self {
        assert!(bit < PINS_PER_PORT, "pin bit out of range");
        Self(port.index() * PINS_PER_PORT + bit)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    pub const fn port(self) -> Port {
        match self.0 / PINS_PER_PORT {
            0 => Port::A,
            1 => Port::B,
            2 => Port::C,
            _ => Port::D,
        }
    }

    pub const fn bit(self) -> u8 {
        self.0 % PINS_PER_PORT
    }
}

impl TryFrom<u8> for PinId {
    type Error = GpioError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or(GpioError::PinOutOfRange(raw))
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}{}", self.port(), self.bit())
    }
}

// ---------------------------------------------------------------------------
// Direction / level
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Input,
    Output,
    /// Input with the internal pull-up enabled (DDR bit clear, PORT bit set).
    InputWithPullup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

/// Whole-port direction for [`port::PortGpio::set_port_direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    AllInput,
    AllOutput,
}

pub use crate::error::GpioError;
