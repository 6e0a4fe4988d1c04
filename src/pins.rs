//! Pin and ADC channel assignments for the smart-home board.
//!
//! Single source of truth; every driver references this module rather than
//! hard-coding pin numbers.

use crate::gpio::{PinId, Port};

// ---------------------------------------------------------------------------
// Indicator LEDs (port B, upper bits)
// ---------------------------------------------------------------------------

pub const LED_BLUE: PinId = PinId::at(Port::B, 5);
pub const LED_GREEN: PinId = PinId::at(Port::B, 6);
pub const LED_RED: PinId = PinId::at(Port::B, 7);

// ---------------------------------------------------------------------------
// Buzzer
// ---------------------------------------------------------------------------

pub const BUZZER: PinId = PinId::at(Port::D, 3);

// ---------------------------------------------------------------------------
// DC fan motor (L293D half-bridge pair)
// ---------------------------------------------------------------------------

pub const MOTOR_IN1: PinId = PinId::at(Port::B, 0);
pub const MOTOR_IN2: PinId = PinId::at(Port::B, 1);
/// Enable line, driven by the Timer0 compare output OC0.
pub const MOTOR_ENABLE: PinId = PinId::at(Port::B, 3);

// ---------------------------------------------------------------------------
// Flame sensor (digital output module)
// ---------------------------------------------------------------------------

pub const FLAME_SENSOR: PinId = PinId::at(Port::D, 2);

// ---------------------------------------------------------------------------
// User button (active-low)
// ---------------------------------------------------------------------------

/// Momentary push button; a press requests an immediate status report.
pub const BUTTON: PinId = PinId::at(Port::D, 4);

// ---------------------------------------------------------------------------
// Character LCD (HD44780, 8-bit bus)
// ---------------------------------------------------------------------------

pub const LCD_RS: PinId = PinId::at(Port::D, 0);
pub const LCD_E: PinId = PinId::at(Port::D, 1);
/// Port index of the 8-bit data bus (port C).
pub const LCD_DATA_PORT: u8 = Port::C.index();

// ---------------------------------------------------------------------------
// Analog inputs
// ---------------------------------------------------------------------------

/// Light-dependent resistor divider.
pub const LDR_CHANNEL: u8 = 0;
/// LM35 temperature sensor.
pub const LM35_CHANNEL: u8 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_pins_are_distinct() {
        let pins = [
            LED_BLUE, LED_GREEN, LED_RED, BUZZER, MOTOR_IN1, MOTOR_IN2, MOTOR_ENABLE,
            FLAME_SENSOR, BUTTON, LCD_RS, LCD_E,
        ];
        for (i, a) in pins.iter().enumerate() {
            for b in &pins[i + 1..] {
                assert_ne!(a, b);
            }
            assert_ne!(a.port(), Port::C, "port C is reserved for the LCD data bus");
        }
    }

    #[test]
    fn identifiers_match_board_wiring() {
        assert_eq!(LED_BLUE.raw(), 13);
        assert_eq!(LED_RED.raw(), 15);
        assert_eq!(BUZZER.raw(), 27);
        assert_eq!(FLAME_SENSOR.raw(), 26);
        assert_eq!(MOTOR_ENABLE.raw(), 11);
    }
}
