//! Light-dependent resistor on an ADC channel.
//!
//! The divider saturates well below full scale; raw 0–200 is treated as
//! 0–100 % and anything brighter reads above 100 %.

use crate::adc::Adc;
use crate::error::AdcError;
use crate::registers::RegisterBus;
use crate::util::remap;

/// Raw reading that corresponds to 100 %.
pub const FULL_SCALE_RAW: i32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightReading {
    pub raw: u16,
    pub percent: u16,
}

/// `remap(raw, 0, 200, 0, 100)`, truncating, unclamped.
pub const fn raw_to_percent(raw: u16) -> u16 {
    remap(raw as i32, 0, FULL_SCALE_RAW, 0, 100) as u16
}

pub struct LightSensor<'a, B: RegisterBus> {
    adc: Adc<'a, B>,
    channel: u8,
}

impl<'a, B: RegisterBus> LightSensor<'a, B> {
    pub fn new(adc: Adc<'a, B>, channel: u8) -> Self {
        Self { adc, channel }
    }

    pub fn read(&self) -> Result<LightReading, AdcError> {
        let raw = self.adc.read_channel(self.channel)?;
        Ok(LightReading {
            raw,
            percent: raw_to_percent(raw),
        })
    }

    pub fn light_intensity(&self) -> Result<u16, AdcError> {
        self.read().map(|r| r.percent)
    }
}
