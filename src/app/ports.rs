//! Port traits: the hexagonal boundary between domain logic and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, event sinks) implement these traits.
//! The [`ControlLoop`](super::service::ControlLoop) consumes them via
//! generics, so the domain core never touches registers directly.

use core::fmt::Write as _;

use heapless::String;

use crate::drivers::dc_motor::MotorState;
use crate::drivers::lcd::COLUMNS;
use crate::sensors::SensorSnapshot;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Read every sensor and return a unified snapshot.
    fn read_all(&mut self) -> SensorSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    fn set_leds(&mut self, pattern: LedPattern);

    fn set_fan(&mut self, command: FanCommand);

    fn set_buzzer(&mut self, on: bool);

    /// Render both display rows from column 0.
    fn show(&mut self, screen: &Screen);

    /// LEDs off, fan stopped, buzzer silent.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Commands crossing the actuator port
// ───────────────────────────────────────────────────────────────

/// Which indicator LEDs are lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedPattern {
    pub blue: bool,
    pub green: bool,
    pub red: bool,
}

impl LedPattern {
    pub const ALL_ON: Self = Self { blue: true, green: true, red: true };
    pub const GREEN_RED: Self = Self { blue: false, green: true, red: true };
    pub const RED_ONLY: Self = Self { blue: false, green: false, red: true };
    pub const OFF: Self = Self { blue: false, green: false, red: false };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanCommand {
    pub state: MotorState,
    pub speed: u8,
}

impl FanCommand {
    pub const OFF: Self = Self { state: MotorState::Stop, speed: 0 };

    pub const fn clockwise(speed: u8) -> Self {
        Self { state: MotorState::Clockwise, speed }
    }

    pub fn is_running(&self) -> bool {
        self.state != MotorState::Stop
    }
}

impl Default for FanCommand {
    fn default() -> Self {
        Self::OFF
    }
}

/// Capacity of one rendered row.  Rows may exceed the display width; the
/// LCD driver cuts them at [`COLUMNS`].
pub const ROW_CAPACITY: usize = 2 * COLUMNS;

pub type Row = String<ROW_CAPACITY>;

/// Two display rows, each space-padded to the display width so a new frame
/// fully overwrites the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Screen {
    pub rows: [Row; 2],
}

impl Screen {
    pub fn from_rows(top: &str, bottom: &str) -> Self {
        Self {
            rows: [padded(format_args!("{top}")), padded(format_args!("{bottom}"))],
        }
    }
}

/// Format into a row and pad with spaces to the display width.
pub fn padded(args: core::fmt::Arguments<'_>) -> Row {
    let mut row = Row::new();
    // Overflow only drops the tail, which the display would cut anyway.
    let _ = row.write_fmt(args);
    while row.len() < COLUMNS {
        if row.push(' ').is_err() {
            break;
        }
    }
    row
}
