//! LM35 linear temperature sensor (10 mV/°C) on an ADC channel.
//!
//! Against the 2.56 V reference one count is 2.5 mV, so the full 10-bit
//! range spans 0–256 °C; the sensor itself is rated to 150 °C at 1.5 V.
//! Conversion uses integer arithmetic only:
//!
//! ```text
//! celsius = raw * 150 * 2560 / (1023 * 1500)
//! ```

use crate::adc::{Adc, MAX_READING, REFERENCE_MV};
use crate::error::AdcError;
use crate::registers::RegisterBus;

const SENSOR_MAX_C: u32 = 150;
const SENSOR_MAX_MV: u32 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureReading {
    pub raw: u16,
    pub celsius: u16,
}

pub const fn raw_to_celsius(raw: u16) -> u16 {
    (raw as u32 * SENSOR_MAX_C * REFERENCE_MV / (MAX_READING as u32 * SENSOR_MAX_MV)) as u16
}

pub struct TemperatureSensor<'a, B: RegisterBus> {
    adc: Adc<'a, B>,
    channel: u8,
}

impl<'a, B: RegisterBus> TemperatureSensor<'a, B> {
    pub fn new(adc: Adc<'a, B>, channel: u8) -> Self {
        Self { adc, channel }
    }

    pub fn read(&self) -> Result<TemperatureReading, AdcError> {
        let raw = self.adc.read_channel(self.channel)?;
        Ok(TemperatureReading {
            raw,
            celsius: raw_to_celsius(raw),
        })
    }

    pub fn celsius(&self) -> Result<u16, AdcError> {
        self.read().map(|r| r.celsius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adc::WaitPolicy;
    use crate::registers::SimBus;

    #[test]
    fn conversion_points() {
        assert_eq!(raw_to_celsius(0), 0);
        // 25 °C = 250 mV = 100 counts.
        assert_eq!(raw_to_celsius(100), 25);
        assert_eq!(raw_to_celsius(160), 40);
        assert_eq!(raw_to_celsius(1023), 256);
    }

    #[test]
    fn reads_configured_channel() {
        let bus = SimBus::new();
        let adc = Adc::new(&bus, WaitPolicy::default());
        adc.init();
        bus.set_analog(2, 140);
        let lm35 = TemperatureSensor::new(adc, 2);
        assert_eq!(lm35.celsius(), Ok(35));
    }
}
