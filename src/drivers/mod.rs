//! Actuator and user-interface drivers built on the GPIO and Timer0 layers.
//!
//! Drivers are dumb: they translate a command into register writes and
//! remember what they last commanded.  Policy lives in [`crate::app`].

pub mod button;
pub mod buzzer;
pub mod dc_motor;
pub mod lcd;
pub mod led;

use serde::{Deserialize, Serialize};

use crate::gpio::Level;

/// Electrical sense of an on/off output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Polarity {
    /// Driving the pin high switches the load on.
    #[default]
    ActiveHigh,
    /// Driving the pin low switches the load on (sinking).
    ActiveLow,
}

impl Polarity {
    /// Pin level that produces the requested logical state.
    pub const fn level(self, on: bool) -> Level {
        match (self, on) {
            (Self::ActiveHigh, true) | (Self::ActiveLow, false) => Level::High,
            (Self::ActiveHigh, false) | (Self::ActiveLow, true) => Level::Low,
        }
    }

    /// Logical state implied by a pin level.
    pub const fn is_on(self, level: Level) -> bool {
        match self {
            Self::ActiveHigh => level.is_high(),
            Self::ActiveLow => !level.is_high(),
        }
    }
}
