//! Digital flame sensor module.

use serde::{Deserialize, Serialize};

use crate::gpio::indexed::IndexedGpio;
use crate::gpio::{Direction, PinId};
use crate::registers::RegisterBus;

/// Pin level that means "flame present".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActiveLevel {
    #[default]
    High,
    Low,
}

pub struct FlameSensor<'a, B: RegisterBus> {
    gpio: IndexedGpio<'a, B>,
    pin: PinId,
    active: ActiveLevel,
}

impl<'a, B: RegisterBus> FlameSensor<'a, B> {
    pub fn new(gpio: IndexedGpio<'a, B>, pin: PinId, active: ActiveLevel) -> Self {
        Self { gpio, pin, active }
    }

    pub fn init(&mut self) {
        self.gpio.pin(self.pin).set_direction(Direction::Input);
    }

    pub fn detected(&self) -> bool {
        let high = self.gpio.pin(self.pin).level().is_high();
        match self.active {
            ActiveLevel::High => high,
            ActiveLevel::Low => !high,
        }
    }
}
