//! Unified error types for the smart-home firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! application loop's error handling uniform.  All variants are `Copy` so
//! they can be passed through ports and events without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A pin or port identifier was rejected.
    Gpio(GpioError),
    /// An analog conversion failed.
    Adc(AdcError),
    /// The character display rejected a request.
    Lcd(LcdError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio(e) => write!(f, "gpio: {e}"),
            Self::Adc(e) => write!(f, "adc: {e}"),
            Self::Lcd(e) => write!(f, "lcd: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

#[cfg(not(target_arch = "avr"))]
impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// GPIO
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// Pin identifier is not in `0..32`.
    PinOutOfRange(u8),
    /// Port index is not in `0..4`.
    PortOutOfRange(u8),
    /// Bit index is not in `0..8`.
    BitOutOfRange(u8),
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PinOutOfRange(id) => write!(f, "pin id {id} out of range"),
            Self::PortOutOfRange(p) => write!(f, "port {p} out of range"),
            Self::BitOutOfRange(b) => write!(f, "bit {b} out of range"),
        }
    }
}

impl From<GpioError> for Error {
    fn from(e: GpioError) -> Self {
        Self::Gpio(e)
    }
}

// ---------------------------------------------------------------------------
// ADC
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdcError {
    /// Conversion did not complete within the poll budget.
    Timeout { channel: u8 },
    /// Channel is not in `0..8`.
    InvalidChannel(u8),
}

impl fmt::Display for AdcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout { channel } => write!(f, "conversion timeout on channel {channel}"),
            Self::InvalidChannel(ch) => write!(f, "invalid channel {ch}"),
        }
    }
}

impl From<AdcError> for Error {
    fn from(e: AdcError) -> Self {
        Self::Adc(e)
    }
}

// ---------------------------------------------------------------------------
// LCD
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LcdError {
    /// Cursor row is not in `0..4`.
    InvalidRow(u8),
}

impl fmt::Display for LcdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRow(row) => write!(f, "row {row} out of range"),
        }
    }
}

impl From<LcdError> for Error {
    fn from(e: LcdError) -> Self {
        Self::Lcd(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
