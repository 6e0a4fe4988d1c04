//! Identifier-addressed GPIO driver.
//!
//! Every operation takes a raw identifier, validates it, fetches the pin
//! descriptor from [`table`](super::table) and then touches the
//! descriptor's registers.  Nothing is cached between calls.
//!
//! Out-of-range identifiers (≥ 32) are rejected before any register access:
//! the `Result`-returning methods report [`GpioError::PinOutOfRange`], and
//! [`IndexedGpio::read_bit`] keeps the legacy contract of returning 0.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};
use log::{debug, warn};

use super::table::{self, PinDescriptor};
use super::{Direction, GpioError, Level, PinId};
use crate::registers::RegisterBus;

pub struct IndexedGpio<'a, B: RegisterBus> {
    bus: &'a B,
}

impl<B: RegisterBus> Clone for IndexedGpio<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: RegisterBus> Copy for IndexedGpio<'_, B> {}

impl<'a, B: RegisterBus> IndexedGpio<'a, B> {
    pub fn new(bus: &'a B) -> Self {
        Self { bus }
    }

    fn resolve(raw: u8) -> Result<PinDescriptor, GpioError> {
        match PinId::new(raw) {
            Some(id) => Ok(table::fetch(id)),
            None => {
                warn!("gpio: rejected pin id {raw} (valid 0..32)");
                Err(GpioError::PinOutOfRange(raw))
            }
        }
    }

    pub fn set_direction(&self, raw: u8, direction: Direction) -> Result<(), GpioError> {
        let d = Self::resolve(raw)?;
        match direction {
            Direction::Input => self.bus.clear_bit(d.direction, d.bit),
            Direction::Output => self.bus.set_bit(d.direction, d.bit),
            Direction::InputWithPullup => {
                self.bus.clear_bit(d.direction, d.bit);
                self.bus.set_bit(d.output, d.bit);
            }
        }
        debug!("gpio: pin {raw} -> {direction:?}");
        Ok(())
    }

    pub fn set_state(&self, raw: u8, level: Level) -> Result<(), GpioError> {
        let d = Self::resolve(raw)?;
        match level {
            Level::High => self.bus.set_bit(d.output, d.bit),
            Level::Low => self.bus.clear_bit(d.output, d.bit),
        }
        Ok(())
    }

    pub fn toggle(&self, raw: u8) -> Result<(), GpioError> {
        let d = Self::resolve(raw)?;
        self.bus.toggle_bit(d.output, d.bit);
        Ok(())
    }

    /// Level on the input register.
    pub fn read(&self, raw: u8) -> Result<Level, GpioError> {
        let d = Self::resolve(raw)?;
        Ok(Level::from(self.bus.get_bit(d.input, d.bit) != 0))
    }

    /// Input bit as 0/1; out-of-range identifiers read as 0.
    pub fn read_bit(&self, raw: u8) -> u8 {
        self.read(raw).map_or(0, |level| u8::from(level.is_high()))
    }

    /// Current value of the output latch bit (what the firmware is driving).
    pub fn output_latch(&self, raw: u8) -> Result<Level, GpioError> {
        let d = Self::resolve(raw)?;
        Ok(Level::from(self.bus.get_bit(d.output, d.bit) != 0))
    }

    /// A handle for one pin that implements the `embedded-hal` digital traits.
    pub fn pin(&self, id: PinId) -> Pin<'a, B> {
        Pin { gpio: *self, id }
    }
}

/// Single-pin handle.  Re-resolves through the table on every call.
pub struct Pin<'a, B: RegisterBus> {
    gpio: IndexedGpio<'a, B>,
    id: PinId,
}

impl<B: RegisterBus> Pin<'_, B> {
    pub fn id(&self) -> PinId {
        self.id
    }

    pub fn set_direction(&mut self, direction: Direction) {
        let d = self.descriptor();
        match direction {
            Direction::Input => self.gpio.bus.clear_bit(d.direction, d.bit),
            Direction::Output => self.gpio.bus.set_bit(d.direction, d.bit),
            Direction::InputWithPullup => {
                self.gpio.bus.clear_bit(d.direction, d.bit);
                self.gpio.bus.set_bit(d.output, d.bit);
            }
        }
    }

    /// Drive the output latch.
    pub fn write(&mut self, level: Level) {
        let d = self.descriptor();
        match level {
            Level::High => self.gpio.bus.set_bit(d.output, d.bit),
            Level::Low => self.gpio.bus.clear_bit(d.output, d.bit),
        }
    }

    /// Level currently held in the output latch.
    pub fn latched(&self) -> Level {
        let d = self.descriptor();
        Level::from(self.gpio.bus.get_bit(d.output, d.bit) != 0)
    }

    /// Level on the input register.
    pub fn level(&self) -> Level {
        let d = self.descriptor();
        Level::from(self.gpio.bus.get_bit(d.input, d.bit) != 0)
    }

    fn descriptor(&self) -> PinDescriptor {
        table::fetch(self.id)
    }
}

impl<B: RegisterBus> ErrorType for Pin<'_, B> {
    type Error = Infallible;
}

impl<B: RegisterBus> OutputPin for Pin<'_, B> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(Level::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(Level::High);
        Ok(())
    }
}

impl<B: RegisterBus> StatefulOutputPin for Pin<'_, B> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.latched().is_high())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.latched().is_high())
    }
}

impl<B: RegisterBus> InputPin for Pin<'_, B> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level().is_high())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level().is_high())
    }
}
