//! Port-addressed GPIO driver.
//!
//! Works on an explicit port index (0–3) and bit (0–7), independently of
//! the identifier table.  Whole-port operations write all eight bits at
//! once; the LCD data bus uses them.

use log::warn;

use super::{GpioError, Level, Port, PortDirection, Direction, PINS_PER_PORT};
use crate::registers::RegisterBus;

pub struct PortGpio<'a, B: RegisterBus> {
    bus: &'a B,
}

impl<B: RegisterBus> Clone for PortGpio<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: RegisterBus> Copy for PortGpio<'_, B> {}

impl<'a, B: RegisterBus> PortGpio<'a, B> {
    pub fn new(bus: &'a B) -> Self {
        Self { bus }
    }

    fn port(index: u8) -> Result<Port, GpioError> {
        Port::from_index(index).ok_or_else(|| {
            warn!("gpio: rejected port index {index}");
            GpioError::PortOutOfRange(index)
        })
    }

    fn port_and_bit(index: u8, bit: u8) -> Result<Port, GpioError> {
        let port = Self::port(index)?;
        if bit >= PINS_PER_PORT {
            warn!("gpio: rejected bit {bit} on port {port}");
            return Err(GpioError::BitOutOfRange(bit));
        }
        Ok(port)
    }

    pub fn set_pin_direction(&self, port: u8, bit: u8, direction: Direction) -> Result<(), GpioError> {
        let port = Self::port_and_bit(port, bit)?;
        match direction {
            Direction::Input => self.bus.clear_bit(port.ddr_reg(), bit),
            Direction::Output => self.bus.set_bit(port.ddr_reg(), bit),
            Direction::InputWithPullup => {
                self.bus.clear_bit(port.ddr_reg(), bit);
                self.bus.set_bit(port.port_reg(), bit);
            }
        }
        Ok(())
    }

    pub fn write_pin(&self, port: u8, bit: u8, level: Level) -> Result<(), GpioError> {
        let port = Self::port_and_bit(port, bit)?;
        match level {
            Level::High => self.bus.set_bit(port.port_reg(), bit),
            Level::Low => self.bus.clear_bit(port.port_reg(), bit),
        }
        Ok(())
    }

    pub fn toggle_pin(&self, port: u8, bit: u8) -> Result<(), GpioError> {
        let port = Self::port_and_bit(port, bit)?;
        self.bus.toggle_bit(port.port_reg(), bit);
        Ok(())
    }

    pub fn read_pin(&self, port: u8, bit: u8) -> Result<Level, GpioError> {
        let port = Self::port_and_bit(port, bit)?;
        Ok(Level::from(self.bus.get_bit(port.pin_reg(), bit) != 0))
    }

    pub fn set_port_direction(&self, port: u8, direction: PortDirection) -> Result<(), GpioError> {
        let port = Self::port(port)?;
        let value = match direction {
            PortDirection::AllInput => 0x00,
            PortDirection::AllOutput => 0xFF,
        };
        self.bus.write(port.ddr_reg(), value);
        Ok(())
    }

    pub fn write_port(&self, port: u8, value: u8) -> Result<(), GpioError> {
        let port = Self::port(port)?;
        self.bus.write(port.port_reg(), value);
        Ok(())
    }

    pub fn read_port(&self, port: u8) -> Result<u8, GpioError> {
        let port = Self::port(port)?;
        Ok(self.bus.read(port.pin_reg()))
    }
}
