//! Outbound application events.
//!
//! The [`ControlLoop`](super::service::ControlLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them (serial log today).

use super::ports::{FanCommand, LedPattern};
use crate::error::AdcError;

/// Which analog input a fault refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Light,
    Temperature,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The control loop has started; all actuators are off.
    Started,

    /// The indicator LEDs changed.
    LedPatternChanged { from: LedPattern, to: LedPattern },

    /// The fan command changed.
    FanChanged { from: FanCommand, to: FanCommand },

    /// Flame alarm raised (`true`) or cleared (`false`).
    FlameAlarm(bool),

    /// An analog read failed; the previous value is kept.
    SensorFault { sensor: SensorKind, error: AdcError },

    /// Periodic (or button-requested) status snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time status snapshot suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryData {
    pub tick: u32,
    pub light_percent: u16,
    pub temperature_c: u16,
    pub leds: LedPattern,
    pub fan: FanCommand,
    pub flame_alarm: bool,
}
