//! Fuzz target: identifier-addressed GPIO
//!
//! Interprets the input as a stream of (opcode, pin id) pairs and applies
//! them to the in-memory register file.  Asserts that nothing panics and
//! that rejected identifiers never reach a register.
//!
//! cargo fuzz run fuzz_gpio_ops

#![no_main]

use libfuzzer_sys::fuzz_target;
use smarthome::gpio::indexed::IndexedGpio;
use smarthome::gpio::{Direction, Level, NUM_PINS};
use smarthome::registers::SimBus;

fuzz_target!(|data: &[u8]| {
    let bus = SimBus::new();
    let gpio = IndexedGpio::new(&bus);

    for op in data.chunks_exact(2) {
        let (code, raw) = (op[0], op[1]);
        let writes_before = bus.trace().len();

        let accepted = match code % 6 {
            0 => gpio.set_direction(raw, Direction::Input).is_ok(),
            1 => gpio.set_direction(raw, Direction::Output).is_ok(),
            2 => gpio.set_direction(raw, Direction::InputWithPullup).is_ok(),
            3 => gpio.set_state(raw, Level::from(code & 0x80 != 0)).is_ok(),
            4 => gpio.toggle(raw).is_ok(),
            _ => {
                let bit = gpio.read_bit(raw);
                assert!(bit <= 1);
                if raw >= NUM_PINS {
                    assert_eq!(bit, 0);
                }
                gpio.read(raw).is_ok()
            }
        };

        assert_eq!(accepted, raw < NUM_PINS);
        if !accepted {
            assert_eq!(bus.trace().len(), writes_before, "rejected id {raw} wrote a register");
        }
    }
});
