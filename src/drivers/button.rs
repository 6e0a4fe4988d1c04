//! Edge-latched push button.
//!
//! ## Hardware
//!
//! Active-low momentary switch: pressed pulls the pin to ground.  Either
//! an external pull-up is fitted, or the internal one is enabled at init.
//!
//! ## Press detection
//!
//! [`PushButton::pressed`] is polled from the main loop.  It reports `true`
//! once on the first poll that sees the pin low, `false` for as long as it
//! stays low, and re-arms when the pin reads high again.

use crate::gpio::indexed::IndexedGpio;
use crate::gpio::{Direction, PinId};
use crate::registers::RegisterBus;

pub struct PushButton<'a, B: RegisterBus> {
    gpio: IndexedGpio<'a, B>,
    pin: PinId,
    internal_pull_up: bool,
    held: bool,
}

impl<'a, B: RegisterBus> PushButton<'a, B> {
    pub fn new(gpio: IndexedGpio<'a, B>, pin: PinId, internal_pull_up: bool) -> Self {
        Self {
            gpio,
            pin,
            internal_pull_up,
            held: false,
        }
    }

    pub fn pin(&self) -> PinId {
        self.pin
    }

    pub fn init(&mut self) {
        let direction = if self.internal_pull_up {
            Direction::InputWithPullup
        } else {
            Direction::Input
        };
        self.gpio.pin(self.pin).set_direction(direction);
        self.held = false;
    }

    /// `true` exactly once per press.
    pub fn pressed(&mut self) -> bool {
        let down = !self.gpio.pin(self.pin).level().is_high();
        if down {
            let fresh = !self.held;
            self.held = true;
            fresh
        } else {
            self.held = false;
            false
        }
    }

    /// Raw pin state, without edge latching.
    pub fn is_down(&self) -> bool {
        !self.gpio.pin(self.pin).level().is_high()
    }
}
