//! Hardware adapter: bridges the board drivers to domain port traits.
//!
//! Owns the [`SensorHub`] and all actuator drivers, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  This is the only module that wires
//! drivers to pins; the register bus underneath is either the real MMIO
//! space or the host [`SimBus`](crate::registers::SimBus).

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::adc::Adc;
use crate::app::ports::{ActuatorPort, FanCommand, LedPattern, Screen, SensorPort};
use crate::config::SystemConfig;
use crate::drivers::button::PushButton;
use crate::drivers::buzzer::Buzzer;
use crate::drivers::dc_motor::DcMotor;
use crate::drivers::lcd::{DisplayStatus, Lcd};
use crate::drivers::led::{LedBank, LedId};
use crate::gpio::indexed::IndexedGpio;
use crate::gpio::port::PortGpio;
use crate::pins;
use crate::registers::RegisterBus;
use crate::sensors::flame::FlameSensor;
use crate::sensors::ldr::LightSensor;
use crate::sensors::temperature::TemperatureSensor;
use crate::sensors::{SensorHub, SensorSnapshot};
use crate::timer0::Timer0;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<'a, B: RegisterBus, D: DelayNs> {
    adc: Adc<'a, B>,
    sensor_hub: SensorHub<'a, B>,
    leds: LedBank<'a, B>,
    buzzer: Buzzer<'a, B>,
    motor: DcMotor<'a, B>,
    lcd: Lcd<'a, B, D>,
}

impl<'a, B: RegisterBus, D: DelayNs> HardwareAdapter<'a, B, D> {
    /// Build every driver on `bus` using the board pin map and `config`.
    pub fn new(bus: &'a B, config: &SystemConfig, delay: D) -> Self {
        let gpio = IndexedGpio::new(bus);
        let adc = Adc::new(bus, config.adc_wait);

        let sensor_hub = SensorHub::new(
            LightSensor::new(adc, pins::LDR_CHANNEL),
            TemperatureSensor::new(adc, pins::LM35_CHANNEL),
            FlameSensor::new(gpio, pins::FLAME_SENSOR, config.flame_active_level),
            PushButton::new(gpio, pins::BUTTON, config.button_pull_up),
        );

        Self {
            adc,
            sensor_hub,
            leds: LedBank::new(gpio, config.led_polarity),
            buzzer: Buzzer::new(gpio, pins::BUZZER, config.buzzer_polarity),
            motor: DcMotor::new(gpio, Timer0::new(bus)),
            lcd: Lcd::new(gpio, PortGpio::new(bus), delay).with_settle_us(config.lcd_settle_us),
        }
    }

    /// Bring up every peripheral.  Call once before the first tick.
    pub fn init(&mut self) {
        self.leds.init();
        self.adc.init();
        self.lcd.init();
        self.motor.init();
        self.sensor_hub.init();
        self.buzzer.init();
        info!("hardware initialised");
    }

    pub fn motor(&self) -> &DcMotor<'a, B> {
        &self.motor
    }

    pub fn lcd(&self) -> &Lcd<'a, B, D> {
        &self.lcd
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<B: RegisterBus, D: DelayNs> SensorPort for HardwareAdapter<'_, B, D> {
    fn read_all(&mut self) -> SensorSnapshot {
        self.sensor_hub.read_all()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<B: RegisterBus, D: DelayNs> ActuatorPort for HardwareAdapter<'_, B, D> {
    fn set_leds(&mut self, pattern: LedPattern) {
        self.leds.set(LedId::Blue, pattern.blue);
        self.leds.set(LedId::Green, pattern.green);
        self.leds.set(LedId::Red, pattern.red);
    }

    fn set_fan(&mut self, command: FanCommand) {
        self.motor.rotate(command.state, command.speed);
    }

    fn set_buzzer(&mut self, on: bool) {
        self.buzzer.set(on);
    }

    fn show(&mut self, screen: &Screen) {
        for (row, text) in (0u8..).zip(screen.rows.iter()) {
            match self.lcd.display_string_at(row, 0, text) {
                Ok(DisplayStatus::Fit) => {}
                Ok(DisplayStatus::Truncated) => debug!("lcd: row {row} truncated: {text:?}"),
                Err(e) => warn!("lcd: {e}"),
            }
        }
    }

    fn all_off(&mut self) {
        self.leds.all_off();
        self.motor.stop();
        self.buzzer.off();
    }
}
