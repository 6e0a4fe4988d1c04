//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                          |
//! |------------|--------------|--------------------------------------|
//! | `hardware` | SensorPort   | ADC, flame input, push button        |
//! |            | ActuatorPort | LEDs, buzzer, fan motor, LCD         |
//! | `log_sink` | EventSink    | `log` facade (serial / console)      |

pub mod hardware;
pub mod log_sink;
