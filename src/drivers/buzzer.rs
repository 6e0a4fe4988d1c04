//! Piezo buzzer on a single digital output.

use super::Polarity;
use crate::gpio::indexed::IndexedGpio;
use crate::gpio::{Direction, PinId};
use crate::registers::RegisterBus;

pub struct Buzzer<'a, B: RegisterBus> {
    gpio: IndexedGpio<'a, B>,
    pin: PinId,
    polarity: Polarity,
}

impl<'a, B: RegisterBus> Buzzer<'a, B> {
    pub fn new(gpio: IndexedGpio<'a, B>, pin: PinId, polarity: Polarity) -> Self {
        Self { gpio, pin, polarity }
    }

    pub fn init(&mut self) {
        self.gpio.pin(self.pin).set_direction(Direction::Output);
        self.off();
    }

    pub fn on(&mut self) {
        self.gpio.pin(self.pin).write(self.polarity.level(true));
    }

    pub fn off(&mut self) {
        self.gpio.pin(self.pin).write(self.polarity.level(false));
    }

    pub fn set(&mut self, on: bool) {
        if on { self.on() } else { self.off() }
    }

    pub fn is_on(&self) -> bool {
        self.polarity.is_on(self.gpio.pin(self.pin).latched())
    }
}
