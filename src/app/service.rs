//! Control loop: the hexagonal core.
//!
//! [`ControlLoop`] owns the configuration and the last commanded outputs.
//! It exposes a hardware-agnostic API; all I/O flows through port traits
//! injected at call sites, making the loop testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │       ControlLoop       │
//! ActuatorPort ◀──│ light · fan · flame · UI│
//!                 └────────────────────────┘
//! ```
//!
//! ## One tick
//!
//! 1. Read the light level; pick the LED pattern from the light bands.
//! 2. Read the temperature; pick the fan command from the fan table.
//! 3. Flame present: buzzer on, alarm screen.  Otherwise buzzer off and the
//!    fan / temperature / light status screen.
//! 4. Render the screen.
//!
//! A failed analog read keeps the previous value for that input and emits
//! [`AppEvent::SensorFault`].

use core::fmt::Write as _;

use heapless::String;
use log::{info, warn};

use crate::config::{FanStep, LightBands, SystemConfig};

use super::events::{AppEvent, SensorKind, TelemetryData};
use super::ports::{ActuatorPort, EventSink, FanCommand, LedPattern, Screen, SensorPort, padded};

pub const ALARM_TOP: &str = " CRITICAL ALERT";
pub const ALARM_BOTTOM: &str = "      FIRE      ";
pub const FAN_ON: &str = "FAN is ON ";
pub const FAN_OFF: &str = "FAN is OFF";
/// Column where the light reading starts on the status row.
pub const LIGHT_COLUMN: usize = 9;

// ───────────────────────────────────────────────────────────────
// Pure decision helpers
// ───────────────────────────────────────────────────────────────

/// LED pattern for a light level (percent).
pub fn led_pattern_for(light_percent: u16, bands: &LightBands) -> LedPattern {
    if light_percent <= bands.all_on_max {
        LedPattern::ALL_ON
    } else if light_percent <= bands.green_red_max {
        LedPattern::GREEN_RED
    } else if light_percent <= bands.red_only_max {
        LedPattern::RED_ONLY
    } else {
        LedPattern::OFF
    }
}

/// Fan command for a temperature: first step (hottest first) whose
/// threshold is met, otherwise stopped.
pub fn fan_for(temperature_c: u16, steps: &[FanStep]) -> FanCommand {
    steps
        .iter()
        .find(|s| temperature_c >= s.min_celsius)
        .map_or(FanCommand::OFF, |s| FanCommand::clockwise(s.speed))
}

/// Screen contents for the current outputs.
pub fn compose_screen(flame_alarm: bool, fan: FanCommand, temperature_c: u16, light_percent: u16) -> Screen {
    if flame_alarm {
        return Screen::from_rows(ALARM_TOP, ALARM_BOTTOM);
    }

    let top = if fan.is_running() { FAN_ON } else { FAN_OFF };

    let mut temp: String<16> = String::new();
    // "Temp=65535C" is 11 characters.
    let _ = write!(temp, "Temp={temperature_c}C");
    let bottom = padded(format_args!(
        "{:<width$}LDR={light_percent}%",
        temp.as_str(),
        width = LIGHT_COLUMN
    ));

    Screen {
        rows: [padded(format_args!("{top}")), bottom],
    }
}

// ───────────────────────────────────────────────────────────────
// ControlLoop
// ───────────────────────────────────────────────────────────────

pub struct ControlLoop {
    config: SystemConfig,
    light_percent: u16,
    temperature_c: u16,
    leds: LedPattern,
    fan: FanCommand,
    flame_alarm: bool,
    tick_count: u32,
}

impl ControlLoop {
    /// Construct from configuration.  Call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            config,
            light_percent: 0,
            temperature_c: 0,
            leds: LedPattern::OFF,
            fan: FanCommand::OFF,
            flame_alarm: false,
            tick_count: 0,
        }
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Put every actuator in a known-off state.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.all_off();
        self.leds = LedPattern::OFF;
        self.fan = FanCommand::OFF;
        self.flame_alarm = false;
        sink.emit(&AppEvent::Started);
        info!("control loop started");
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full cycle: read sensors → decide → actuate → render.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`]; this avoids a double mutable borrow while keeping
    /// the port boundary explicit.
    pub fn tick(&mut self, hw: &mut (impl SensorPort + ActuatorPort), sink: &mut impl EventSink) {
        self.tick_count = self.tick_count.wrapping_add(1);
        let snapshot = hw.read_all();

        // 1. Light → LEDs
        match snapshot.light_percent {
            Ok(percent) => self.light_percent = percent,
            Err(error) => {
                warn!("light read failed ({error}), keeping {}%", self.light_percent);
                sink.emit(&AppEvent::SensorFault { sensor: SensorKind::Light, error });
            }
        }
        let leds = led_pattern_for(self.light_percent, &self.config.light_bands);
        hw.set_leds(leds);
        if leds != self.leds {
            sink.emit(&AppEvent::LedPatternChanged { from: self.leds, to: leds });
            self.leds = leds;
        }

        // 2. Temperature → fan
        match snapshot.temperature_c {
            Ok(celsius) => self.temperature_c = celsius,
            Err(error) => {
                warn!("temperature read failed ({error}), keeping {}C", self.temperature_c);
                sink.emit(&AppEvent::SensorFault { sensor: SensorKind::Temperature, error });
            }
        }
        let fan = fan_for(self.temperature_c, &self.config.fan_steps);
        hw.set_fan(fan);
        if fan != self.fan {
            sink.emit(&AppEvent::FanChanged { from: self.fan, to: fan });
            self.fan = fan;
        }

        // 3. Flame → buzzer
        let alarm = snapshot.flame_detected;
        hw.set_buzzer(alarm);
        if alarm != self.flame_alarm {
            if alarm {
                warn!("flame detected");
            } else {
                info!("flame alarm cleared");
            }
            sink.emit(&AppEvent::FlameAlarm(alarm));
            self.flame_alarm = alarm;
        }

        // 4. Display
        let screen = compose_screen(self.flame_alarm, self.fan, self.temperature_c, self.light_percent);
        hw.show(&screen);

        // 5. Telemetry
        let interval = self.config.telemetry_interval_ticks;
        let periodic = interval != 0 && self.tick_count % interval == 0;
        if periodic || snapshot.button_pressed {
            sink.emit(&AppEvent::Telemetry(self.telemetry()));
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn telemetry(&self) -> TelemetryData {
        TelemetryData {
            tick: self.tick_count,
            light_percent: self.light_percent,
            temperature_c: self.temperature_c,
            leds: self.leds,
            fan: self.fan,
            flame_alarm: self.flame_alarm,
        }
    }

    pub fn leds(&self) -> LedPattern {
        self.leds
    }

    pub fn fan(&self) -> FanCommand {
        self.fan
    }

    pub fn flame_alarm(&self) -> bool {
        self.flame_alarm
    }

    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }
}
