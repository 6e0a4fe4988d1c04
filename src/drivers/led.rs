//! Three indicator LEDs (blue, green, red) on port B.

use serde::{Deserialize, Serialize};

use super::Polarity;
use crate::gpio::Direction;
use crate::gpio::indexed::IndexedGpio;
use crate::gpio::PinId;
use crate::pins;
use crate::registers::RegisterBus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedId {
    Blue,
    Green,
    Red,
}

impl LedId {
    pub const ALL: [Self; 3] = [Self::Blue, Self::Green, Self::Red];

    pub const fn pin(self) -> PinId {
        match self {
            Self::Blue => pins::LED_BLUE,
            Self::Green => pins::LED_GREEN,
            Self::Red => pins::LED_RED,
        }
    }
}

pub struct LedBank<'a, B: RegisterBus> {
    gpio: IndexedGpio<'a, B>,
    polarity: Polarity,
}

impl<'a, B: RegisterBus> LedBank<'a, B> {
    pub fn new(gpio: IndexedGpio<'a, B>, polarity: Polarity) -> Self {
        Self { gpio, polarity }
    }

    /// Configure all three pins as outputs, initially off.
    pub fn init(&mut self) {
        for id in LedId::ALL {
            self.gpio.pin(id.pin()).set_direction(Direction::Output);
            self.off(id);
        }
    }

    pub fn on(&mut self, id: LedId) {
        self.set(id, true);
    }

    pub fn off(&mut self, id: LedId) {
        self.set(id, false);
    }

    pub fn set(&mut self, id: LedId, on: bool) {
        self.gpio.pin(id.pin()).write(self.polarity.level(on));
    }

    /// Reads back the output latch through the polarity.
    pub fn is_on(&self, id: LedId) -> bool {
        self.polarity.is_on(self.gpio.pin(id.pin()).latched())
    }

    pub fn all_off(&mut self) {
        for id in LedId::ALL {
            self.off(id);
        }
    }
}
