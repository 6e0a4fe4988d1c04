//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces a [`SensorSnapshot`] each
//! tick for the application loop.

pub mod flame;
pub mod ldr;
pub mod temperature;

use crate::drivers::button::PushButton;
use crate::error::AdcError;
use crate::registers::RegisterBus;
use flame::FlameSensor;
use ldr::LightSensor;
use temperature::TemperatureSensor;

/// One pass over every sensor.  Analog reads carry their own result so a
/// single failed conversion does not hide the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorSnapshot {
    pub light_percent: Result<u16, AdcError>,
    pub temperature_c: Result<u16, AdcError>,
    pub flame_detected: bool,
    /// A new button press since the previous snapshot.
    pub button_pressed: bool,
}

pub struct SensorHub<'a, B: RegisterBus> {
    pub light: LightSensor<'a, B>,
    pub temperature: TemperatureSensor<'a, B>,
    pub flame: FlameSensor<'a, B>,
    pub button: PushButton<'a, B>,
}

impl<'a, B: RegisterBus> SensorHub<'a, B> {
    pub fn new(
        light: LightSensor<'a, B>,
        temperature: TemperatureSensor<'a, B>,
        flame: FlameSensor<'a, B>,
        button: PushButton<'a, B>,
    ) -> Self {
        Self {
            light,
            temperature,
            flame,
            button,
        }
    }

    pub fn init(&mut self) {
        self.flame.init();
        self.button.init();
    }

    pub fn read_all(&mut self) -> SensorSnapshot {
        SensorSnapshot {
            light_percent: self.light.light_intensity(),
            temperature_c: self.temperature.celsius(),
            flame_detected: self.flame.detected(),
            button_pressed: self.button.pressed(),
        }
    }
}
