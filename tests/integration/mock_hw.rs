//! Mock hardware adapter for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching registers.  Sensor snapshots are scripted.

use std::collections::VecDeque;

use smarthome::app::events::AppEvent;
use smarthome::app::ports::{ActuatorPort, EventSink, FanCommand, LedPattern, Screen, SensorPort};
use smarthome::error::AdcError;
use smarthome::sensors::SensorSnapshot;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    SetLeds(LedPattern),
    SetFan(FanCommand),
    SetBuzzer(bool),
    Show([String; 2]),
    AllOff,
}

/// A quiet snapshot: given light and temperature, no flame, no press.
pub fn reading(light_percent: u16, temperature_c: u16) -> SensorSnapshot {
    SensorSnapshot {
        light_percent: Ok(light_percent),
        temperature_c: Ok(temperature_c),
        flame_detected: false,
        button_pressed: false,
    }
}

pub fn timed_out(channel: u8) -> Result<u16, AdcError> {
    Err(AdcError::Timeout { channel })
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    script: VecDeque<SensorSnapshot>,
    idle: SensorSnapshot,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            script: VecDeque::new(),
            idle: reading(100, 20),
        }
    }

    /// Queue a snapshot for the next `read_all`.  Once the queue is empty
    /// the last queued snapshot repeats.
    pub fn push(&mut self, snapshot: SensorSnapshot) -> &mut Self {
        self.script.push_back(snapshot);
        self
    }

    pub fn last_screen(&self) -> Option<&[String; 2]> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::Show(rows) => Some(rows),
            _ => None,
        })
    }

    pub fn buzzer_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetBuzzer(on) => Some(*on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn fan(&self) -> FanCommand {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetFan(f) => Some(*f),
                ActuatorCall::AllOff => Some(FanCommand::OFF),
                _ => None,
            })
            .unwrap_or(FanCommand::OFF)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_all(&mut self) -> SensorSnapshot {
        if let Some(next) = self.script.pop_front() {
            self.idle = SensorSnapshot { button_pressed: false, ..next };
            next
        } else {
            self.idle
        }
    }
}

impl ActuatorPort for MockHardware {
    fn set_leds(&mut self, pattern: LedPattern) {
        self.calls.push(ActuatorCall::SetLeds(pattern));
    }

    fn set_fan(&mut self, command: FanCommand) {
        self.calls.push(ActuatorCall::SetFan(command));
    }

    fn set_buzzer(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetBuzzer(on));
    }

    fn show(&mut self, screen: &Screen) {
        self.calls.push(ActuatorCall::Show([
            screen.rows[0].as_str().to_owned(),
            screen.rows[1].as_str().to_owned(),
        ]));
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }
}

// ── Event sink ────────────────────────────────────────────────

pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn telemetry_count(&self) -> usize {
        self.count(|e| matches!(e, AppEvent::Telemetry(_)))
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
