//! Application core: pure control logic, zero I/O.
//!
//! This module contains the house rules: light bands drive the indicator
//! LEDs, temperature drives the fan, the flame sensor raises the alarm,
//! and the LCD shows the current status.  All interaction with hardware
//! happens through **port traits** defined in [`ports`], keeping this layer
//! fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
